//! Error type shared by the synchronization engine and its transport.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("schema violation: {list}[{index}] read but the snapshot has {len} entries")]
    SchemaViolation {
        list: &'static str,
        index: usize,
        len: usize,
    },

    #[error("schema violation: {field} has {actual} entries, topology was built for {expected}")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("widget #{0} does not exist")]
    MissingWidget(usize),

    #[error("widget #{index} belongs to generation {handle} but the arena is at {current}")]
    StaleWidget {
        index: usize,
        handle: u64,
        current: u64,
    },

    #[error("widget #{index} is not a {expected}")]
    WidgetKind {
        index: usize,
        expected: &'static str,
    },

    #[error("unknown effect option #{0}")]
    UnknownEffect(usize),

    #[error("cannot decode message: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
}

pub type SyncResult<T> = Result<T, SyncError>;
