use crate::error::{Error, Result};
use crate::handle::ResourceHandle;
use crate::resource::{Allocator, Handler};
use crossbeam_queue::SegQueue;
use crossbeam_utils::sync::{ShardedLock, ShardedLockReadGuard, ShardedLockWriteGuard};
use log::{debug, trace, warn};
use std::sync::{Arc, PoisonError};

/// Concurrent store for pooled resource handles.
///
/// Owns two views over the same set of handles: every live handle, and the
/// free subset available for borrowing. Membership changes (`create`,
/// `destroy`, `clear`, `resize`) take the write side of a sharded lock;
/// borrow/release traffic and queries share the read side, with the free
/// queue carrying its own synchronization.
pub struct PoolStore<R> {
    inner: Arc<Inner<R>>,
}

impl<R> Clone for PoolStore<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct Inner<R> {
    shelf: ShardedLock<Shelf<R>>,
}

struct Shelf<R> {
    all: Vec<ResourceHandle<R>>,
    free: SegQueue<ResourceHandle<R>>,
    capacity: usize,
}

impl<R> Shelf<R> {
    fn tracks(&self, handle: &ResourceHandle<R>) -> bool {
        self.all.iter().any(|tracked| tracked == handle)
    }
}

impl<R> PoolStore<R> {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                shelf: ShardedLock::new(Shelf {
                    all: Vec::with_capacity(capacity),
                    free: SegQueue::new(),
                    capacity,
                }),
            }),
        }
    }

    /// Builds up to `requested` new resources and registers them as free.
    ///
    /// Attempts are capped at the remaining capacity, so the return value may
    /// be less than `requested` (0 once the store is full); that is how
    /// capacity exhaustion is reported. A factory failure aborts the batch:
    /// handles registered before the failure stay in the store, and the error
    /// carries their count.
    pub fn create<A, H>(&self, allocator: &A, handler: &H, requested: usize) -> Result<usize>
    where
        A: Allocator<Resource = R>,
        H: Handler<A>,
    {
        let mut shelf = self.write();
        let headroom = shelf.capacity.saturating_sub(shelf.all.len());
        let attempts = requested.min(headroom);
        for registered in 0..attempts {
            let handle = match handler.create_resource(allocator) {
                Ok(handle) => handle,
                Err(source) => {
                    warn!(
                        "resource creation failed, batch aborted after {} of {} registrations",
                        registered, attempts
                    );
                    return Err(Error::ResourceCreation {
                        registered,
                        source: Box::new(source),
                    });
                }
            };
            trace!("registered resource {}", handle.id());
            handle.set_available(true);
            shelf.free.push(handle.clone());
            shelf.all.push(handle);
        }
        debug!(
            "registered {} of {} requested resources, {} live",
            attempts,
            requested,
            shelf.all.len()
        );
        Ok(attempts)
    }

    /// Takes one arbitrary free handle, or `None` if nothing is free right
    /// now. Never blocks and never creates; the caller must hand the handle
    /// back through [`release`](Self::release) or [`destroy`](Self::destroy).
    pub fn borrow(&self) -> Option<ResourceHandle<R>> {
        let shelf = self.read();
        let handle = shelf.free.pop()?;
        handle.set_available(false);
        Some(handle)
    }

    /// Puts a borrowed handle back into the free subset.
    ///
    /// Refused for a handle this store does not track and for a handle that
    /// is already free; double-release detection is best-effort when stale
    /// clones race a fresh borrow of the same handle.
    pub fn release(&self, handle: ResourceHandle<R>) -> Result<()> {
        let shelf = self.read();
        if !shelf.tracks(&handle) || !handle.try_make_available() {
            return Err(Error::UnknownHandle(handle.id()));
        }
        shelf.free.push(handle);
        Ok(())
    }

    /// Permanently removes a live handle, free or checked out.
    pub fn destroy(&self, handle: ResourceHandle<R>) -> Result<()> {
        let mut shelf = self.write();
        let index = shelf
            .all
            .iter()
            .position(|tracked| *tracked == handle)
            .ok_or_else(|| Error::UnknownHandle(handle.id()))?;
        let removed = shelf.all.remove(index);
        if removed.is_available() {
            // The queue has no random removal; drain and re-push survivors.
            let mut survivors = Vec::with_capacity(shelf.free.len());
            while let Some(free) = shelf.free.pop() {
                if free != removed {
                    survivors.push(free);
                }
            }
            for free in survivors {
                shelf.free.push(free);
            }
        }
        trace!("destroyed resource {}", removed.id());
        Ok(())
    }

    /// Drops every handle at once, free and checked out alike. No destructor
    /// hook runs; outstanding clones keep their resource alive until dropped.
    pub fn clear(&self) {
        let mut shelf = self.write();
        let dropped = shelf.all.len();
        shelf.all.clear();
        while shelf.free.pop().is_some() {}
        debug!("cleared {} resources", dropped);
    }

    /// Replaces the capacity bound. Shrinking below the current population
    /// evicts nothing; it only blocks growth until destroys catch up.
    pub fn resize(&self, capacity: usize) {
        let mut shelf = self.write();
        debug!("capacity {} -> {}", shelf.capacity, capacity);
        shelf.capacity = capacity;
    }

    /// Point-in-time copy of every live handle, in registration order.
    pub fn snapshot(&self) -> Vec<ResourceHandle<R>> {
        self.read().all.clone()
    }

    pub fn len(&self) -> usize {
        self.read().all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().all.is_empty()
    }

    pub fn free_len(&self) -> usize {
        self.read().free.len()
    }

    pub fn capacity(&self) -> usize {
        self.read().capacity
    }

    // Poisoning only happens if factory code panicked inside `create`, which
    // mutates nothing before the factory call returns; the shelf is intact.
    fn read(&self) -> ShardedLockReadGuard<'_, Shelf<R>> {
        self.inner
            .shelf
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> ShardedLockWriteGuard<'_, Shelf<R>> {
        self.inner
            .shelf
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
