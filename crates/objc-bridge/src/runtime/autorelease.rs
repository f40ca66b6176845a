//! Scoped autorelease pools.
//!
//! [`autoreleasepool`] pushes a pool, runs a closure once, and pops the pool
//! on every way out of the closure: normal return, early return of an
//! `Err`, or a panic unwinding through it. The pop is tied to a guard's
//! `Drop`, so there is no path that leaves the runtime's pool stack
//! unbalanced.
//!
//! # Example
//!
//! ```rust
//! use objc_bridge::autoreleasepool;
//!
//! let len = autoreleasepool(|_pool| {
//!     // work that creates temporary runtime objects
//!     "temporary".len()
//! });
//! assert_eq!(len, 9);
//! ```

use crate::runtime::ffi;
use crate::runtime::handle::OpaqueHandle;
use std::marker::PhantomData;

/// A handle to a pushed autorelease pool.
///
/// Pool handles are only meaningful on the thread that pushed them, so this
/// type is neither `Send` nor `Sync`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PoolHandle {
    raw: OpaqueHandle,
    _not_send: PhantomData<*const ()>,
}

impl PoolHandle {
    /// Wraps a raw value returned by a pool-push primitive.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: OpaqueHandle) -> Self {
        Self {
            raw,
            _not_send: PhantomData,
        }
    }

    /// The raw runtime value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> OpaqueHandle {
        self.raw
    }
}

/// The push/pop primitives a pool scope is built on.
///
/// [`RuntimePool`] is the implementation used by [`autoreleasepool`]; other
/// implementations let callers substitute their own pool bookkeeping.
pub trait PoolBackend {
    /// Pushes a pool and returns its handle.
    fn push(&self) -> PoolHandle;

    /// Pops a pool.
    ///
    /// # Safety
    ///
    /// `handle` must have been returned by [`push`](Self::push) on this
    /// backend and thread, and must not have been popped already.
    unsafe fn pop(&self, handle: PoolHandle);
}

/// The active runtime's pool primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimePool;

impl PoolBackend for RuntimePool {
    fn push(&self) -> PoolHandle {
        PoolHandle::from_raw(ffi::pool_push())
    }

    unsafe fn pop(&self, handle: PoolHandle) {
        // SAFETY: forwarded from the caller.
        unsafe { ffi::pool_pop(handle.raw()) }
    }
}

/// Proof that the current code runs inside an autorelease pool.
///
/// Only [`autoreleasepool`] and [`autoreleasepool_in`] create one, and only
/// lend it to their closure by reference.
#[derive(Debug)]
pub struct AutoreleasePool {
    handle: PoolHandle,
}

impl AutoreleasePool {
    /// Handle of the pool this scope pushed.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> PoolHandle {
        self.handle
    }
}

/// Pops its pool when dropped.
struct PopGuard<'a, B: PoolBackend + ?Sized> {
    backend: &'a B,
    handle: PoolHandle,
}

impl<B: PoolBackend + ?Sized> Drop for PopGuard<'_, B> {
    fn drop(&mut self) {
        // SAFETY: `handle` was pushed on this backend by the scope that
        // owns the guard, on this thread, and the guard runs exactly once.
        unsafe { self.backend.pop(self.handle) };
    }
}

/// Runs `work` inside a fresh autorelease pool of the active runtime.
///
/// `work` runs exactly once and synchronously. The pool is popped after it
/// returns or unwinds, and its return value is handed back to the caller.
///
/// ```rust
/// use objc_bridge::autoreleasepool;
///
/// let parsed: Result<u32, std::num::ParseIntError> =
///     autoreleasepool(|_| "42".parse());
/// assert_eq!(parsed, Ok(42));
/// ```
pub fn autoreleasepool<R, F>(work: F) -> R
where
    F: FnOnce(&AutoreleasePool) -> R,
{
    autoreleasepool_in(&RuntimePool, work)
}

/// Runs `work` inside a pool pushed on `backend`.
///
/// Same guarantees as [`autoreleasepool`]: one push before `work`, one pop
/// after it on every exit path.
pub fn autoreleasepool_in<B, R, F>(backend: &B, work: F) -> R
where
    B: PoolBackend + ?Sized,
    F: FnOnce(&AutoreleasePool) -> R,
{
    let handle = backend.push();
    let _guard = PopGuard { backend, handle };
    let pool = AutoreleasePool { handle };
    work(&pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Push(usize),
        Work,
        Pop(usize),
    }

    /// Records every primitive call instead of touching a runtime.
    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<Event>>,
        next: RefCell<usize>,
    }

    impl Recorder {
        fn record(&self, event: Event) {
            self.events.borrow_mut().push(event);
        }

        fn events(&self) -> Vec<Event> {
            self.events.borrow().clone()
        }
    }

    impl PoolBackend for Recorder {
        fn push(&self) -> PoolHandle {
            let mut next = self.next.borrow_mut();
            *next += 1;
            self.record(Event::Push(*next));
            PoolHandle::from_raw(OpaqueHandle::from_ptr(
                std::ptr::without_provenance(*next),
            ))
        }

        unsafe fn pop(&self, handle: PoolHandle) {
            self.record(Event::Pop(handle.raw().addr()));
        }
    }

    #[test]
    fn test_push_work_pop_order() {
        let recorder = Recorder::default();
        let value = autoreleasepool_in(&recorder, |pool| {
            recorder.record(Event::Work);
            pool.handle().raw().addr()
        });

        assert_eq!(value, 1);
        assert_eq!(
            recorder.events(),
            vec![Event::Push(1), Event::Work, Event::Pop(1)]
        );
    }

    #[test]
    fn test_pop_runs_when_work_panics() {
        let recorder = Recorder::default();
        let result = catch_unwind(AssertUnwindSafe(|| {
            autoreleasepool_in::<_, (), _>(&recorder, |_| {
                recorder.record(Event::Work);
                panic!("work failed");
            })
        }));

        assert!(result.is_err());
        assert_eq!(
            recorder.events(),
            vec![Event::Push(1), Event::Work, Event::Pop(1)]
        );
    }

    #[test]
    fn test_pop_runs_when_work_returns_error() {
        fn fallible(recorder: &Recorder) -> Result<(), String> {
            autoreleasepool_in(recorder, |_| {
                recorder.record(Event::Work);
                Err::<(), _>("work failed".to_string())
            })?;
            recorder.record(Event::Work);
            Ok(())
        }

        let recorder = Recorder::default();
        assert_eq!(fallible(&recorder), Err("work failed".to_string()));
        assert_eq!(
            recorder.events(),
            vec![Event::Push(1), Event::Work, Event::Pop(1)]
        );
    }

    #[test]
    fn test_nested_scopes_pop_innermost_first() {
        let recorder = Recorder::default();
        autoreleasepool_in(&recorder, |_| {
            autoreleasepool_in(&recorder, |_| recorder.record(Event::Work));
        });

        assert_eq!(
            recorder.events(),
            vec![
                Event::Push(1),
                Event::Push(2),
                Event::Work,
                Event::Pop(2),
                Event::Pop(1),
            ]
        );
    }

    #[test]
    fn test_dyn_backend() {
        let recorder = Recorder::default();
        let backend: &dyn PoolBackend = &recorder;
        autoreleasepool_in(backend, |_| ());
        assert_eq!(recorder.events(), vec![Event::Push(1), Event::Pop(1)]);
    }

    #[test]
    fn test_runtime_pool_scope() {
        let handle = autoreleasepool(|pool| pool.handle());
        assert!(!handle.raw().is_null());
    }

    #[cfg(any(not(target_vendor = "apple"), feature = "host-runtime"))]
    #[test]
    fn test_runtime_pool_balances_host_stack() {
        use crate::runtime::host::pool;

        pool::reset_stats();
        let depth_inside = autoreleasepool(|_| pool::depth());
        let stats = pool::stats();

        assert_eq!(depth_inside, 1);
        assert_eq!(stats.pushes, 1);
        assert_eq!(stats.pops, 1);
        assert_eq!(stats.depth, 0);
    }
}
