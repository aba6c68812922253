//! # qbit
//!
//! Command line front end for the qBittorrent WebUI.
//!
//! ## Usage
//!
//! ```sh,ignore
//! QBITTORRENT_USERNAME=admin QBITTORRENT_PASSWORD=secret cargo run --release --bin qbit -- list --filter completed
//! cargo run --release --bin qbit -- --host nas.lan add ./debian.torrent --tags iso,linux
//! cargo run --release --bin qbit -- watch --interval 5
//! ```

use std::{error::Error, fs, future::Future, path::PathBuf, time::Duration};

use clap::Parser;
use serde::Serialize;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use qbit_torrent_controller::{ClientConfig, QBittorrentClient};
use qbit_torrent_types::QBittorrent;

use crate::cli::{Cli, Command};

mod cli;

type CliResult = Result<(), Box<dyn Error>>;

/// Initializes the tracing subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

/// Polls main data, carrying the revision forward, until `shutdown` resolves.
///
/// `shutdown` is raced against the whole iteration, so a request that never returns does
/// not keep the loop alive.
async fn watch<F>(client: &QBittorrentClient, every: Duration, shutdown: F) -> CliResult
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut rid = 0;

    loop {
        let poll = async {
            ticker.tick().await;
            client.sync_main_data(rid).await
        };
        let data = tokio::select! {
            _ = &mut shutdown => {
                info!("Interrupted, stopping at rid {rid}");
                return Ok(());
            }
            data = poll => data?,
        };

        debug!(
            "rid {rid} -> {}: {} torrents changed, {} removed",
            data.rid,
            data.torrents.len(),
            data.torrents_removed.len()
        );
        rid = data.rid;
        print_json(&data)?;
    }
}

/// Resolves on the first Ctrl-C. A failure to install the handler is logged and never resolves.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

async fn run(client: &QBittorrentClient, command: Command) -> CliResult {
    match command {
        Command::List(args) => print_json(&client.torrents_info(&args.into()).await?)?,
        Command::Add(args) => {
            let data = fs::read(&args.file)?;
            let file_name = args
                .file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload.torrent".into());
            client.torrents_add(&file_name, &data, &(&args).into()).await?;
            info!("Added {}", args.file.display());
        }
        Command::Delete { hash } => {
            client.torrents_delete(&hash).await?;
            info!("Deleted {hash}");
        }
        Command::Export { hash, output } => {
            let data = client.torrents_export(&hash).await?;
            let output = output.unwrap_or_else(|| PathBuf::from(format!("{hash}.torrent")));
            fs::write(&output, data)?;
            info!("Exported {hash} to {}", output.display());
        }
        Command::ForceStart { hash, value } => client.set_force_start(&hash, value).await?,
        Command::Trackers { hash } => print_json(&client.torrents_trackers(&hash).await?)?,
        Command::AddTags(args) => {
            client
                .torrents_add_tags(&as_strs(&args.hashes), &as_strs(&args.tags))
                .await?
        }
        Command::RemoveTags(args) => {
            client
                .torrents_remove_tags(&as_strs(&args.hashes), &as_strs(&args.tags))
                .await?
        }
        Command::CreateTags { tags } => client.torrents_create_tags(&as_strs(&tags)).await?,
        Command::DeleteTags { tags } => client.torrents_delete_tags(&as_strs(&tags)).await?,
        Command::Tags { hashes } => {
            print_json(&client.torrents_get_tags(&as_strs(&hashes)).await?)?
        }
        Command::AllTags => print_json(&client.torrents_get_all_tags().await?)?,
        Command::Sync { rid } => print_json(&client.sync_main_data(rid).await?)?,
        Command::Peers { hash, rid } => {
            print_json(&client.sync_torrent_peers(&hash, rid).await?)?
        }
        Command::Watch { interval } => {
            watch(client, Duration::from_secs(interval.max(1)), ctrl_c()).await?
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> CliResult {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let config = cli.connection.apply(ClientConfig::from_env());
    debug!("Using {config:?}");

    let client = QBittorrentClient::try_new(config).await?;
    run(&client, cli.command).await?;

    Ok(())
}
