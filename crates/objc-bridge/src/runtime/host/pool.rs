//! Thread-local autorelease pool stack for the host runtime.
//!
//! Each thread owns a stack of pool frames. Pushing returns a token that is
//! unique on that thread; popping a token pops every frame above it as well,
//! so releasing an outer pool also drains any inner pools left open.
//! Values handed to [`autorelease`] are owned by the innermost frame and
//! dropped when that frame is popped, most recent first.
//!
//! # Example
//!
//! ```rust
//! use objc_bridge::runtime::host::pool;
//!
//! let token = pool::push();
//! pool::autorelease(String::from("temporary")).unwrap();
//! assert_eq!(pool::depth(), 1);
//!
//! pool::pop(token).unwrap();
//! assert_eq!(pool::depth(), 0);
//! ```

use crate::error::{Error, Result};
use crate::runtime::handle::OpaqueHandle;
use objc_bridge_log::{trace, warn};
use std::any::Any;
use std::cell::RefCell;
use std::ffi::c_void;

thread_local! {
    static POOL_STACK: RefCell<PoolStack> = const { RefCell::new(PoolStack::new()) };
}

/// One pushed pool and the values it will release.
struct Frame {
    token: usize,
    deferred: Vec<Box<dyn Any>>,
}

struct PoolStack {
    frames: Vec<Frame>,
    next_token: usize,
    stats: PoolStats,
}

impl PoolStack {
    const fn new() -> Self {
        Self {
            frames: Vec::new(),
            next_token: 1,
            stats: PoolStats::new(),
        }
    }

    fn push(&mut self) -> usize {
        let token = self.next_token;
        self.next_token += 1;
        self.frames.push(Frame {
            token,
            deferred: Vec::new(),
        });
        self.stats.pushes += 1;
        self.stats.depth = self.frames.len();
        token
    }

    /// Detaches the frame for `token` and everything above it.
    fn split_at_token(&mut self, token: usize) -> Result<Vec<Frame>> {
        let Some(index) = self.frames.iter().rposition(|f| f.token == token)
        else {
            self.stats.unknown_pops += 1;
            return Err(Error::UnknownPool { handle: token });
        };

        let popped = self.frames.split_off(index);
        self.stats.pops += 1;
        self.stats.depth = self.frames.len();
        self.stats.drained += popped.iter().map(|f| f.deferred.len()).sum::<usize>();
        Ok(popped)
    }
}

/// Per-thread pool counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Pools pushed on this thread.
    pub pushes: usize,
    /// Successful pop calls; one pop may remove several nested frames.
    pub pops: usize,
    /// Pop calls naming a token that was not on the stack.
    pub unknown_pops: usize,
    /// Frames currently on the stack.
    pub depth: usize,
    /// Autoreleased values dropped by pops.
    pub drained: usize,
}

impl PoolStats {
    const fn new() -> Self {
        Self {
            pushes: 0,
            pops: 0,
            unknown_pops: 0,
            depth: 0,
            drained: 0,
        }
    }
}

fn token_handle(token: usize) -> OpaqueHandle {
    OpaqueHandle::from_ptr(std::ptr::without_provenance::<c_void>(token))
}

/// Pushes a new pool on the current thread and returns its handle.
///
/// Returns the null handle if the thread's pool storage has already been
/// torn down (during thread exit).
pub fn push() -> OpaqueHandle {
    POOL_STACK
        .try_with(|stack| {
            let token = stack.borrow_mut().push();
            trace!("pushed autorelease pool {token:#x}");
            token_handle(token)
        })
        .unwrap_or_default()
}

/// Pops the pool identified by `handle` together with every pool pushed
/// after it, then drops their autoreleased values.
///
/// # Errors
///
/// Returns [`Error::UnknownPool`] if `handle` is not on this thread's stack.
/// The stack is left untouched in that case.
pub fn pop(handle: OpaqueHandle) -> Result<()> {
    let token = handle.addr();
    let popped = POOL_STACK
        .try_with(|stack| stack.borrow_mut().split_at_token(token))
        .map_err(|_| Error::UnknownPool { handle: token })??;

    trace!(
        "popped autorelease pool {token:#x} ({} frame(s))",
        popped.len()
    );

    // Drop outside the borrow: a released value may itself push, pop or
    // autorelease.
    for mut frame in popped.into_iter().rev() {
        while let Some(value) = frame.deferred.pop() {
            drop(value);
        }
    }
    Ok(())
}

/// Hands `value` to the innermost pool on this thread.
///
/// # Errors
///
/// Returns [`Error::NoActivePool`] if no pool is pushed; `value` is dropped
/// immediately in that case.
pub fn autorelease<T: Any>(value: T) -> Result<()> {
    let boxed: Box<dyn Any> = Box::new(value);
    let rejected = POOL_STACK
        .try_with(|stack| {
            let mut stack = stack.borrow_mut();
            match stack.frames.last_mut() {
                Some(frame) => {
                    frame.deferred.push(boxed);
                    None
                }
                None => Some(boxed),
            }
        })
        .map_err(|_| Error::NoActivePool)?;

    match rejected {
        None => Ok(()),
        Some(value) => {
            warn!("autorelease with no pool in place; dropping value now");
            drop(value);
            Err(Error::NoActivePool)
        }
    }
}

/// Number of pools pushed and not yet popped on this thread.
#[must_use]
pub fn depth() -> usize {
    POOL_STACK
        .try_with(|stack| stack.borrow().frames.len())
        .unwrap_or(0)
}

/// Counters for the current thread.
#[must_use]
pub fn stats() -> PoolStats {
    POOL_STACK
        .try_with(|stack| stack.borrow().stats)
        .unwrap_or_default()
}

/// Zeroes this thread's counters, keeping `depth` accurate.
pub fn reset_stats() {
    let _ = POOL_STACK.try_with(|stack| {
        let mut stack = stack.borrow_mut();
        let depth = stack.frames.len();
        stack.stats = PoolStats {
            depth,
            ..PoolStats::default()
        };
    });
}
