//! In-process implementation of the runtime primitives.
//!
//! Used on targets without a system Objective-C runtime, and on Apple
//! targets when the `host-runtime` feature is enabled. It provides the same
//! five primitives as `libobjc`, with the same C-shaped signatures:
//!
//! | primitive | system symbol |
//! |-----------|---------------|
//! | [`sel_register_name`] | `sel_registerName` |
//! | [`sel_get_name`] | `sel_getName` |
//! | [`sel_is_equal`] | `sel_isEqual` |
//! | [`pool_push`] | `objc_autoreleasePoolPush` |
//! | [`pool_pop`] | `objc_autoreleasePoolPop` |
//!
//! The implementations live in [`registry`] and [`pool`]; those modules also
//! expose host-only extras such as [`pool::autorelease`] and
//! [`pool::stats`].

pub mod pool;
pub mod registry;

use crate::runtime::ObjCBool;
use objc_bridge_log::error;
use std::ffi::{CStr, c_char, c_void};

/// Registers a NUL-terminated name and returns its selector handle.
///
/// # Safety
///
/// `name` must point to a NUL-terminated string that stays valid for the
/// duration of the call.
pub unsafe fn sel_register_name(name: *const c_char) -> *const c_void {
    // SAFETY: guaranteed by the caller.
    let name = unsafe { CStr::from_ptr(name) };
    registry::register(name).as_ptr().cast()
}

/// Returns the name of a selector, or null if the handle is not one this
/// runtime issued.
pub fn sel_get_name(sel: *const c_void) -> *const c_char {
    registry::lookup(sel.cast())
        .map_or(std::ptr::null(), CStr::as_ptr)
}

/// Selector identity. Interning makes handle identity the definition.
pub fn sel_is_equal(lhs: *const c_void, rhs: *const c_void) -> ObjCBool {
    ObjCBool::new(std::ptr::eq(lhs, rhs))
}

/// Pushes an autorelease pool on the current thread.
pub fn pool_push() -> *mut c_void {
    pool::push().as_ptr().cast_mut()
}

/// Pops an autorelease pool. Unknown handles are logged and ignored.
pub fn pool_pop(handle: *mut c_void) {
    let handle = crate::runtime::OpaqueHandle::from_ptr(handle.cast_const());
    if let Err(err) = pool::pop(handle) {
        error!("ignoring pool pop: {err}");
    }
}
