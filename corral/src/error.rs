use std::error::Error as StdError;
use std::result::Result as StdResult;

pub type BoxDynError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("resource creation failed after {registered} resources were registered")]
    ResourceCreation {
        registered: usize,
        #[source]
        source: BoxDynError,
    },

    #[error("resource handle {0} is not tracked by this store")]
    UnknownHandle(u64),
}

pub type Result<T> = StdResult<T, Error>;
