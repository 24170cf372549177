//! Dictionary file loading.
//!
//! The engine never does I/O; this loader owns reading the word list
//! from disk, normalizing it, and retrying transient failures before
//! giving up.

use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;
use wordladders_core::Dictionary;

/// How loading should retry.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Extra attempts after the first failure.
    pub retries: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            retries: 2,
            delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("unable to load dictionary {path} after {attempts} attempts: {source}")]
    Exhausted {
        path: String,
        attempts: u32,
        source: std::io::Error,
    },

    #[error("dictionary {0} contains no playable words")]
    Empty(String),
}

/// Read a newline-separated word list into a [`Dictionary`].
pub async fn load_wordlist(path: &Path, opts: LoadOptions) -> Result<Dictionary, LoaderError> {
    let attempts = opts.retries + 1;
    let mut last_err = None;

    for attempt in 1..=attempts {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => {
                let dictionary = Dictionary::from_text(&text);
                if dictionary.is_empty() {
                    return Err(LoaderError::Empty(path.display().to_string()));
                }
                return Ok(dictionary);
            }
            Err(err) => {
                warn!(attempt, %err, "dictionary read failed");
                last_err = Some(err);
                if attempt < attempts {
                    tokio::time::sleep(opts.delay).await;
                }
            }
        }
    }

    Err(LoaderError::Exhausted {
        path: path.display().to_string(),
        attempts,
        source: last_err.unwrap_or_else(|| std::io::Error::other("no attempt made")),
    })
}
