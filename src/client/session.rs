use std::fs;
use std::path::PathBuf;

use super::ClientError;

/// Holds the current bearer token in memory, with an optional durable copy on
/// disk so a restarted client resumes its session. Any 401 funnels through
/// [`SessionHolder::intercept`], which discards the token; with no token held,
/// the caller falls back to the unauthenticated view.
#[derive(Debug, Default)]
pub struct SessionHolder {
    token: Option<String>,
    cache: Option<PathBuf>,
}

impl SessionHolder {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads any previously stored token from `path`; later stores and clears
    /// keep the file in sync.
    pub fn with_cache(path: PathBuf) -> Self {
        let token = fs::read_to_string(&path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Self {
            token,
            cache: Some(path),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn store(&mut self, token: String) {
        if let Some(path) = &self.cache {
            if let Err(e) = fs::write(path, &token) {
                tracing::warn!("Failed to persist session token: {}", e);
            }
        }
        self.token = Some(token);
    }

    pub fn clear(&mut self) {
        self.token = None;
        if let Some(path) = &self.cache {
            if let Err(e) = fs::remove_file(path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to remove cached session token: {}", e);
                }
            }
        }
    }

    /// Passes a client result through, discarding the held token when the
    /// server said 401. Every protected call's result should come through
    /// here.
    pub fn intercept<T>(&mut self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if matches!(result, Err(ClientError::Unauthorized)) {
            self.clear();
        }
        result
    }
}
