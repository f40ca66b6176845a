//! The runtime primitives the bridge is built on.
//!
//! Everything above this module talks to the Objective-C runtime through
//! these five functions. On Apple targets they call `libobjc` directly;
//! elsewhere, or with the `host-runtime` feature, they call the in-process
//! [`host`](crate::runtime::host) runtime.

use crate::runtime::handle::OpaqueHandle;
use objc_bridge_log::trace;
use std::ffi::CStr;

/// Which implementation of the runtime primitives is compiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// The platform's `libobjc`.
    System,
    /// The in-process host runtime.
    Host,
}

#[cfg(all(target_vendor = "apple", not(feature = "host-runtime")))]
mod imp {
    use crate::runtime::ObjCBool;
    use std::ffi::{c_char, c_void};

    pub(super) const BACKEND: super::Backend = super::Backend::System;

    #[link(name = "objc", kind = "dylib")]
    unsafe extern "C" {
        #[link_name = "sel_registerName"]
        pub(super) fn sel_register_name(name: *const c_char) -> *const c_void;
        #[link_name = "sel_getName"]
        pub(super) fn sel_get_name(sel: *const c_void) -> *const c_char;
        #[link_name = "sel_isEqual"]
        pub(super) fn sel_is_equal(
            lhs: *const c_void,
            rhs: *const c_void,
        ) -> ObjCBool;
        #[link_name = "objc_autoreleasePoolPush"]
        pub(super) fn pool_push() -> *mut c_void;
        #[link_name = "objc_autoreleasePoolPop"]
        pub(super) fn pool_pop(handle: *mut c_void);
    }
}

#[cfg(not(all(target_vendor = "apple", not(feature = "host-runtime"))))]
mod imp {
    pub(super) const BACKEND: super::Backend = super::Backend::Host;

    pub(super) use crate::runtime::host::{
        pool_pop, pool_push, sel_get_name, sel_is_equal, sel_register_name,
    };
}

/// Returns the backend the primitives dispatch to.
#[must_use]
pub const fn active_backend() -> Backend {
    imp::BACKEND
}

// Host primitives are safe fns, so some unsafe blocks below are redundant
// on that backend.

/// Interns `name` and returns the runtime's handle for it.
///
/// The borrowed buffer only has to live for this call; the runtime copies
/// or interns what it needs before returning.
#[allow(unused_unsafe)]
pub(crate) fn register_name(name: &CStr) -> OpaqueHandle {
    // SAFETY: `name` is NUL-terminated and borrowed for the whole call.
    let raw = unsafe { imp::sel_register_name(name.as_ptr()) };
    trace!("sel_registerName({name:?}) -> {raw:p}");
    OpaqueHandle::from_ptr(raw)
}

/// Resolves a non-null selector handle to its name.
///
/// Returns `None` when the runtime has no name for the handle.
#[allow(unused_unsafe)]
pub(crate) fn get_name(sel: OpaqueHandle) -> Option<&'static CStr> {
    debug_assert!(!sel.is_null());
    // SAFETY: `sel` came from the runtime. Selector names are interned for
    // the life of the process, which justifies the `'static` borrow.
    unsafe {
        let raw = imp::sel_get_name(sel.as_ptr());
        if raw.is_null() {
            None
        } else {
            Some(CStr::from_ptr(raw))
        }
    }
}

/// The runtime's definition of selector equality.
#[allow(unused_unsafe)]
pub(crate) fn is_equal(lhs: OpaqueHandle, rhs: OpaqueHandle) -> bool {
    // SAFETY: both handles are runtime selectors or null; `sel_isEqual`
    // does not dereference them.
    let equal = unsafe { imp::sel_is_equal(lhs.as_ptr(), rhs.as_ptr()) };
    equal.as_bool()
}

/// Pushes an autorelease pool on the current thread.
#[allow(unused_unsafe)]
pub(crate) fn pool_push() -> OpaqueHandle {
    // SAFETY: no preconditions.
    let raw = unsafe { imp::pool_push() };
    trace!("objc_autoreleasePoolPush() -> {raw:p}");
    OpaqueHandle::from_ptr(raw.cast_const())
}

/// Pops a pool previously returned by [`pool_push`].
///
/// # Safety
///
/// `handle` must come from [`pool_push`] on the current thread and must not
/// have been popped already.
#[allow(unused_unsafe)]
pub(crate) unsafe fn pool_pop(handle: OpaqueHandle) {
    trace!("objc_autoreleasePoolPop({handle:?})");
    // SAFETY: guaranteed by the caller.
    unsafe {
        imp::pool_pop(handle.as_ptr().cast_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_matches_target() {
        let expected = if cfg!(all(
            target_vendor = "apple",
            not(feature = "host-runtime")
        )) {
            Backend::System
        } else {
            Backend::Host
        };
        assert_eq!(active_backend(), expected);
    }

    #[test]
    fn test_register_and_resolve() {
        let handle = register_name(c"ffi:resolve:");
        assert!(!handle.is_null());
        assert_eq!(get_name(handle), Some(c"ffi:resolve:"));
    }

    #[test]
    fn test_equality_follows_registration() {
        let a = register_name(c"ffi:equal:");
        let b = register_name(c"ffi:equal:");
        let c = register_name(c"ffi:different:");

        assert!(is_equal(a, b));
        assert!(!is_equal(a, c));
    }

    #[test]
    fn test_pool_round_trip() {
        let handle = pool_push();
        assert!(!handle.is_null());
        unsafe { pool_pop(handle) };
    }
}
