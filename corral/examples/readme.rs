use corral::{Allocator, PassThroughHandler, PoolStore};
use std::convert::Infallible;

pub struct IntAllocator;

impl Allocator for IntAllocator {
    type Resource = i32;
    type Error = Infallible;

    fn create_resource(&self) -> Result<Self::Resource, Self::Error> {
        Ok(0)
    }
}

fn main() {
    env_logger::init();

    let store = PoolStore::new(2);
    let created = store.create(&IntAllocator, &PassThroughHandler, 2).unwrap();
    dbg!(created); // 2

    // borrow a resource; the store keeps tracking it as checked out.
    let handle = store.borrow().unwrap();
    dbg!(*handle); // 0
    dbg!(store.free_len()); // 1

    // put it back into the free subset.
    store.release(handle).unwrap();
    dbg!(store.free_len()); // 2

    // shrinking the bound below the population evicts nothing.
    store.resize(1);
    dbg!(store.create(&IntAllocator, &PassThroughHandler, 1).unwrap()); // 0
    dbg!(store.len()); // 2

    // retire one resource for good.
    let handle = store.borrow().unwrap();
    store.destroy(handle).unwrap();
    dbg!(store.len()); // 1

    // shutdown path: drop everything at once.
    store.clear();
    dbg!(store.len()); // 0
    dbg!(store.borrow().is_none()); // true
}
