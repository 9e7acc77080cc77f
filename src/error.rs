use mongodb::error::{Error as DriverError, ErrorKind, WriteFailure};
use thiserror::Error;

/// Server error code for a duplicate key on a unique index.
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot reach MongoDB: {0}")]
    Connection(#[source] DriverError),

    #[error("duplicate key inserting into `{collection}`: {source}")]
    DuplicateKey {
        collection: String,
        #[source]
        source: DriverError,
    },

    #[error("existing documents violate unique index `{index}`: {source}")]
    ConstraintViolation {
        index: String,
        #[source]
        source: DriverError,
    },

    #[error("database error: {0}")]
    Database(#[source] DriverError),

    #[error("invalid user id `{0}`")]
    InvalidId(String),
}

impl SeedError {
    /// Classifies a driver error raised by an insert into `collection`.
    pub fn on_insert(collection: &str, err: DriverError) -> Self {
        if is_duplicate_key(&err) {
            SeedError::DuplicateKey {
                collection: collection.to_string(),
                source: err,
            }
        } else {
            err.into()
        }
    }

    /// Classifies a driver error raised while building index `index`.
    pub fn on_index(index: &str, err: DriverError) -> Self {
        if is_duplicate_key(&err) {
            SeedError::ConstraintViolation {
                index: index.to_string(),
                source: err,
            }
        } else {
            err.into()
        }
    }
}

impl From<DriverError> for SeedError {
    fn from(err: DriverError) -> Self {
        if is_connection(&err) {
            SeedError::Connection(err)
        } else {
            SeedError::Database(err)
        }
    }
}

fn is_duplicate_key(err: &DriverError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::BulkWrite(failure) => failure
            .write_errors
            .as_ref()
            .is_some_and(|errs| errs.iter().any(|e| e.code == DUPLICATE_KEY_CODE)),
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

fn is_connection(err: &DriverError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::Authentication { .. }
    )
}
