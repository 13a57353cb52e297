use thiserror::Error;

use crate::transport::TransportError;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TrashError {
    #[error("Error aggregation")]
    Aggregate(Vec<TrashError>),
    #[error("A batch operation is still in flight")]
    Busy,
    #[error("Operation on the trash collection failed")]
    CollectionOperationFailed {
        ids: Vec<u64>,
        #[source]
        source: TransportError,
    },
    #[error("Operation on entry {name} failed")]
    EntryOperationFailed {
        id: u64,
        name: String,
        #[source]
        source: TransportError,
    },
    #[error("Path is invalid: {0}")]
    InvalidPath(String),
    #[error("Loading trash listing for {path} failed")]
    ListingFailed {
        path: String,
        #[source]
        source: TransportError,
    },
}
