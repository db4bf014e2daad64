use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum SidekickError {
    #[error("Failed to read config file")]
    #[diagnostic(
        code(sidekick_core::config_read_failed),
        help("Check that the path exists and is readable: {}", path.display())
    )]
    ConfigReadFailed {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("Failed to parse config file")]
    #[diagnostic(
        code(sidekick_core::config_parse_failed),
        help("The file must be valid TOML matching the sidekick config schema")
    )]
    ConfigParseFailed {
        path: PathBuf,
        #[source]
        cause: Box<toml::de::Error>,
    },

    #[error("Session store read failed for key '{key}'")]
    #[diagnostic(
        code(sidekick_core::store_read_failed),
        help("The session manager treats this as 'no session'; a check-in will be requested")
    )]
    StoreReadFailed {
        key: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Session store write failed for key '{key}'")]
    #[diagnostic(
        code(sidekick_core::store_write_failed),
        help("Check permissions on the session store file and its parent directory")
    )]
    StoreWriteFailed {
        key: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SidekickError {
    pub fn store_read(
        key: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::StoreReadFailed {
            key: key.into(),
            cause: Box::new(cause),
        }
    }

    pub fn store_write(
        key: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::StoreWriteFailed {
            key: key.into(),
            cause: Box::new(cause),
        }
    }
}

pub type Result<T> = std::result::Result<T, SidekickError>;
