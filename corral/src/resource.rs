use crate::handle::ResourceHandle;
use std::error::Error;

/// Constructs raw resources on demand.
pub trait Allocator: Sync {
    type Resource: Send + Sync;
    type Error: Error + Send + Sync + 'static;

    fn create_resource(&self) -> Result<Self::Resource, Self::Error>;
}

/// Turns an allocator's raw resource into a tracked handle.
pub trait Handler<A: Allocator>: Sync {
    fn create_resource(&self, allocator: &A) -> Result<ResourceHandle<A::Resource>, A::Error>;
}

/// Wraps whatever the allocator produces, untouched.
pub struct PassThroughHandler;

impl<A: Allocator> Handler<A> for PassThroughHandler {
    fn create_resource(&self, allocator: &A) -> Result<ResourceHandle<A::Resource>, A::Error> {
        Ok(ResourceHandle::new(allocator.create_resource()?))
    }
}
