//! Session token storage shared by concurrent requests.

use parking_lot::RwLock;

/// Holds the `SID` session token. Empty until a login returned one.
#[derive(Debug, Default)]
pub(crate) struct SessionStore {
    sid: RwLock<String>,
}

impl SessionStore {
    pub(crate) fn get(&self) -> String {
        self.sid.read().clone()
    }

    pub(crate) fn set(&self, sid: String) {
        *self.sid.write() = sid;
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::SessionStore;

    #[test]
    fn starts_empty() {
        assert!(SessionStore::default().get().is_empty());
    }

    #[test]
    fn set_overwrites() {
        let store = SessionStore::default();
        store.set("first".into());
        store.set("second".into());
        assert_eq!(store.get(), "second");
    }

    #[test]
    fn readers_never_see_partial_tokens() {
        let store = SessionStore::default();
        let tokens: Vec<String> = (0..8).map(|i| i.to_string().repeat(64)).collect();

        thread::scope(|scope| {
            for token in &tokens {
                let store = &store;
                scope.spawn(move || {
                    for _ in 0..200 {
                        store.set(token.clone());
                    }
                });
            }
            for _ in 0..4 {
                let store = &store;
                let tokens = &tokens;
                scope.spawn(move || {
                    for _ in 0..200 {
                        let seen = store.get();
                        assert!(seen.is_empty() || tokens.contains(&seen));
                    }
                });
            }
        });

        assert!(tokens.contains(&store.get()));
    }
}
