use tokio_postgres::error::SqlState;

use crate::db::{BB8Error, DBError};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("browser: {0}")]
    Browser(String),
}

impl FetchError {
    pub fn browser(err: impl core::fmt::Display) -> Self {
        Self::Browser(format!("{err:#}"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("a record with the given unique value already exists")]
    Conflict(#[source] DBError),
    #[error("no database connection: {0}")]
    Pool(#[from] BB8Error),
    #[error("database error: {0}")]
    Database(#[source] DBError),
}

impl From<DBError> for PersistError {
    fn from(err: DBError) -> Self {
        if err.code() == Some(&SqlState::UNIQUE_VIOLATION) {
            Self::Conflict(err)
        } else {
            Self::Database(err)
        }
    }
}

/// Terminal outcome of a failed run. No per-page status survives.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to fetch page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: FetchError,
    },
    #[error("failed to start browser: {0}")]
    Browser(String),
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl RunError {
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Persist(PersistError::Conflict(_)))
    }
}
