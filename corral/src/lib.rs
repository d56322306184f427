//! Concurrent capacity-bounded store for pooled resources
mod error;
mod handle;
pub mod resource;
mod store;

pub use error::{BoxDynError, Error, Result};
pub use handle::ResourceHandle;
pub use resource::{Allocator, Handler, PassThroughHandler};
pub use store::PoolStore;
