use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// One pooled resource together with its store-wide identity.
///
/// Clones share the same underlying resource; the store keeps a clone in its
/// registry while a borrower holds another. Equality and hashing compare the
/// identity only.
pub struct ResourceHandle<R> {
    shared: Arc<Shared<R>>,
}

struct Shared<R> {
    id: u64,
    available: AtomicBool,
    resource: R,
}

impl<R> ResourceHandle<R> {
    /// Wraps a raw resource into a handle with a fresh identity.
    pub fn new(resource: R) -> Self {
        Self {
            shared: Arc::new(Shared {
                id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
                available: AtomicBool::new(false),
                resource,
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.shared.id
    }

    pub(crate) fn set_available(&self, available: bool) {
        self.shared.available.store(available, Ordering::Release);
    }

    pub(crate) fn is_available(&self) -> bool {
        self.shared.available.load(Ordering::Acquire)
    }

    // Flips checked-out to free; fails if the handle is already free.
    pub(crate) fn try_make_available(&self) -> bool {
        self.shared
            .available
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl<R> Clone for ResourceHandle<R> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<R> Deref for ResourceHandle<R> {
    type Target = R;

    fn deref(&self) -> &Self::Target {
        &self.shared.resource
    }
}

impl<R> PartialEq for ResourceHandle<R> {
    fn eq(&self, other: &Self) -> bool {
        self.shared.id == other.shared.id
    }
}

impl<R> Eq for ResourceHandle<R> {}

impl<R> Hash for ResourceHandle<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shared.id.hash(state);
    }
}

impl<R> fmt::Debug for ResourceHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("id", &self.shared.id)
            .field("available", &self.is_available())
            .finish()
    }
}
