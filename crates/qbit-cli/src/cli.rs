use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use qbit_torrent_controller::ClientConfig;
use qbit_torrent_types::{TorrentsAddOptions, TorrentsInfoParams};

/// Top-level CLI struct for the binary.
#[derive(Debug, Parser)]
#[command(name = "qbit", version, about, long_about = None)]
pub(crate) struct Cli {
    /// Connection options, overriding the `QBITTORRENT_*` environment.
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// WebUI connection flags.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct ConnectionArgs {
    /// WebUI host.
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// WebUI port.
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// WebUI username.
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// WebUI password.
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    /// Applies the flags that were given on top of `config`.
    pub(crate) fn apply(self, mut config: ClientConfig) -> ClientConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(username) = self.username {
            config.credentials.username = username;
        }
        if let Some(password) = self.password {
            config.credentials.password = password;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Some(std::time::Duration::from_secs(secs));
        }
        config
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List torrents.
    List(ListArgs),
    /// Upload a .torrent file.
    Add(AddArgs),
    /// Delete a torrent together with its downloaded data.
    Delete {
        /// Info hash of the torrent.
        hash: String,
    },
    /// Export a torrent's metainfo.
    Export {
        /// Info hash of the torrent.
        hash: String,
        /// Output file, defaults to `<hash>.torrent`.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Toggle force start.
    ForceStart {
        /// Info hash of the torrent.
        hash: String,
        /// Force start value.
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Show the trackers of a torrent.
    Trackers {
        /// Info hash of the torrent.
        hash: String,
    },
    /// Attach tags to torrents.
    AddTags(TagArgs),
    /// Detach tags from torrents.
    RemoveTags(TagArgs),
    /// Create tags.
    CreateTags {
        /// Tags to create.
        #[arg(required = true, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Delete tags.
    DeleteTags {
        /// Tags to delete.
        #[arg(required = true, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Union of the tags used by the given torrents.
    Tags {
        /// Info hashes.
        #[arg(required = true)]
        hashes: Vec<String>,
    },
    /// Every tag known to the server.
    AllTags,
    /// Fetch main data once.
    Sync {
        /// Revision to diff against, 0 for a full snapshot.
        #[arg(long, default_value_t = 0)]
        rid: i64,
    },
    /// Fetch the peers of a torrent.
    Peers {
        /// Info hash of the torrent.
        hash: String,
        /// Revision to diff against, 0 for a full snapshot.
        #[arg(long, default_value_t = 0)]
        rid: i64,
    },
    /// Poll main data until interrupted.
    Watch {
        /// Seconds between polls.
        #[arg(long, default_value_t = 2)]
        interval: u64,
    },
}

/// Filters for `list`.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct ListArgs {
    /// State filter, e.g. `downloading` or `completed`.
    #[arg(long)]
    pub filter: Option<String>,
    /// Category filter.
    #[arg(long)]
    pub category: Option<String>,
    /// Tag filter.
    #[arg(long)]
    pub tag: Option<String>,
    /// Field to sort by.
    #[arg(long)]
    pub sort: Option<String>,
    /// Reverse the sort order.
    #[arg(long)]
    pub reverse: bool,
    /// Maximum number of torrents.
    #[arg(long, default_value_t = 0)]
    pub limit: u32,
    /// Offset into the list, negative counts from the end.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,
    /// Restrict to these info hashes.
    #[arg(long, value_delimiter = ',')]
    pub hashes: Vec<String>,
}

impl From<ListArgs> for TorrentsInfoParams {
    fn from(args: ListArgs) -> Self {
        Self {
            filter: args.filter,
            category: args.category,
            tag: args.tag,
            sort: args.sort,
            reverse: args.reverse,
            limit: args.limit,
            offset: args.offset,
            hashes: args.hashes,
        }
    }
}

/// Arguments of `add`.
#[derive(Debug, Clone, Args)]
pub(crate) struct AddArgs {
    /// Path to the .torrent file.
    pub file: PathBuf,
    /// Download directory.
    #[arg(long)]
    pub save_path: Option<String>,
    /// Category.
    #[arg(long)]
    pub category: Option<String>,
    /// Tags, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,
    /// Add in paused state.
    #[arg(long)]
    pub paused: bool,
    /// Automatic torrent management.
    #[arg(long)]
    pub auto_tmm: Option<bool>,
}

impl From<&AddArgs> for TorrentsAddOptions {
    fn from(args: &AddArgs) -> Self {
        Self {
            save_path: args.save_path.clone(),
            category: args.category.clone(),
            tags: args.tags.clone(),
            start_paused: args.paused.then_some(true),
            auto_tmm: args.auto_tmm,
        }
    }
}

/// Hashes and tags for the tag mutations.
#[derive(Debug, Clone, Args)]
pub(crate) struct TagArgs {
    /// Info hashes, comma separated.
    #[arg(long, required = true, value_delimiter = ',')]
    pub hashes: Vec<String>,
    /// Tags, comma separated.
    #[arg(long, required = true, value_delimiter = ',')]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::try_parse_from(["qbit", "--host", "nas", "--port", "9090", "all-tags"]).unwrap();
        let config = cli.connection.apply(ClientConfig::default());
        assert_eq!(config.host, "nas");
        assert_eq!(config.port, 9090);
        assert!(config.credentials.username.is_empty());
    }

    #[test]
    fn list_flags_become_params() {
        let cli = Cli::try_parse_from([
            "qbit", "list", "--filter", "completed", "--hashes", "abc,def", "--offset", "-2",
        ])
        .unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        let params = TorrentsInfoParams::from(args);
        assert_eq!(params.filter.as_deref(), Some("completed"));
        assert_eq!(params.hashes, vec!["abc", "def"]);
        assert_eq!(params.offset, -2);
    }

    #[test]
    fn add_options() {
        let cli =
            Cli::try_parse_from(["qbit", "add", "debian.torrent", "--tags", "iso,linux", "--paused"])
                .unwrap();
        let Command::Add(args) = cli.command else {
            panic!("expected add");
        };
        let options = TorrentsAddOptions::from(&args);
        assert_eq!(options.tags, Some(vec!["iso".into(), "linux".into()]));
        assert_eq!(options.start_paused, Some(true));
        assert_eq!(options.save_path, None);
    }

    #[test]
    fn force_start_value_can_be_cleared() {
        let cli = Cli::try_parse_from(["qbit", "force-start", "abc", "--value", "false"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::ForceStart { value: false, .. }
        ));
    }
}
