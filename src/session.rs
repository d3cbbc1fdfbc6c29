use crate::db::TokenStore;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Process-wide authentication state handed to the gateway at construction.
///
/// Cloning shares the same token. The token is set on login and cleared on
/// logout; requests only ever read it. When a [`TokenStore`] is attached the
/// token is written through so the next launch starts logged in.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
    store: Option<Arc<TokenStore>>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Session::new();
        session.write(Some(token.into()));
        session
    }

    /// Loads the persisted token, if any, and keeps the store for later writes.
    pub fn restore(store: Arc<TokenStore>) -> Self {
        let token = match store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!("Could not read saved session: {}", e);
                None
            }
        };
        debug!("Session restored (authenticated: {})", token.is_some());

        Session {
            token: Arc::new(RwLock::new(token)),
            store: Some(store),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&token) {
                warn!("Could not persist session token: {}", e);
            }
        }
        self.write(Some(token));
    }

    pub fn clear(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.clear() {
                warn!("Could not clear saved session: {}", e);
            }
        }
        self.write(None);
    }

    fn write(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("persistent", &self.store.is_some())
            .finish()
    }
}
