//! Opaque runtime handles.
//!
//! The Objective-C runtime hands out pointer-sized values (selectors, zones,
//! pool tokens) that callers must treat as identifiers. [`OpaqueHandle`]
//! stores one such value without ever dereferencing it, and the typed
//! wrappers built on it keep the different kinds of handle from being mixed
//! up at the FFI boundary.

use std::ffi::c_void;
use std::fmt;

/// A pointer-sized identifier owned by the runtime.
///
/// The bridge never reads through the pointer and exposes no arithmetic on
/// it. Equality and hashing on `OpaqueHandle` itself compare the raw bits;
/// types such as [`Selector`](crate::Selector) layer runtime-defined
/// equality on top.
///
/// # Representation
///
/// `#[repr(transparent)]`, so it has the layout of `*const c_void` and can
/// appear directly in `extern "C"` signatures.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct OpaqueHandle(*const c_void);

// SAFETY: the pointer is an identifier and is never dereferenced by the
// bridge, so moving or sharing the bits between threads cannot race.
unsafe impl Send for OpaqueHandle {}
unsafe impl Sync for OpaqueHandle {}

impl OpaqueHandle {
    /// The null handle.
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        OpaqueHandle(std::ptr::null())
    }

    /// Wraps a raw value received from the runtime.
    #[inline]
    #[must_use]
    pub const fn from_ptr(ptr: *const c_void) -> Self {
        OpaqueHandle(ptr)
    }

    /// Returns the raw value for passing back to the runtime.
    #[inline]
    #[must_use]
    pub const fn as_ptr(self) -> *const c_void {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    /// Address of the handle, for diagnostics.
    #[inline]
    #[must_use]
    pub fn addr(self) -> usize {
        self.0.addr()
    }
}

impl Default for OpaqueHandle {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for OpaqueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpaqueHandle({:#x})", self.addr())
    }
}
