//! Debug-build record of every allocation handed to the host.
//!
//! Each pointer transferred out is recorded as live. A release removes it;
//! releasing a pointer that is not live (already released, or never ours)
//! is refused and counted as a violation, so it never reaches the
//! allocator. Pointers that stay live after the host is done with them are
//! leaks.
//!
//! Active in debug builds and with the `ownership-ledger` feature. In other
//! builds nothing is recorded and every release proceeds.

use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::error;

static VIOLATIONS: AtomicUsize = AtomicUsize::new(0);

#[cfg(any(debug_assertions, feature = "ownership-ledger"))]
mod live {
    use std::collections::HashSet;
    use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

    static LIVE: LazyLock<Mutex<HashSet<usize>>> = LazyLock::new(|| Mutex::new(HashSet::new()));

    fn set() -> MutexGuard<'static, HashSet<usize>> {
        LIVE.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn insert(addr: usize) {
        set().insert(addr);
    }

    pub(super) fn remove(addr: usize) -> bool {
        set().remove(&addr)
    }

    pub(super) fn contains(addr: usize) -> bool {
        set().contains(&addr)
    }

    pub(super) fn len() -> usize {
        set().len()
    }
}

#[cfg(not(any(debug_assertions, feature = "ownership-ledger")))]
mod live {
    pub(super) fn insert(_: usize) {}

    pub(super) fn remove(_: usize) -> bool {
        true
    }

    pub(super) fn contains(_: usize) -> bool {
        false
    }

    pub(super) fn len() -> usize {
        0
    }
}

/// Whether this build tracks ownership.
pub const fn enabled() -> bool {
    cfg!(any(debug_assertions, feature = "ownership-ledger"))
}

/// Records `ptr` as handed out. Null pointers are ignored.
pub(crate) fn record<T>(ptr: *const T) {
    if !ptr.is_null() {
        live::insert(ptr as usize);
    }
}

/// Claims `ptr` for release. Returns false if the release must not go
/// ahead.
pub(crate) fn release<T>(ptr: *const T) -> bool {
    if live::remove(ptr as usize) {
        return true;
    }
    VIOLATIONS.fetch_add(1, Ordering::SeqCst);
    error!("refused to release {ptr:p}: not a live allocation");
    false
}

/// Whether `ptr` was handed out and not yet released.
pub fn is_live<T>(ptr: *const T) -> bool {
    live::contains(ptr as usize)
}

/// Number of allocations currently held by the host.
pub fn live_allocations() -> usize {
    live::len()
}

/// Number of refused releases since process start.
pub fn violations() -> usize {
    VIOLATIONS.load(Ordering::SeqCst)
}
