//! `objc-bridge`: typed Objective-C runtime bridging for Rust
//!
//! This crate maps the Objective-C runtime's small value types onto Rust
//! types and wraps its autorelease pools in a scoped helper:
//!
//! - [`ObjCBool`] for `BOOL`, with the platform's encoding hidden
//! - [`Selector`] for `SEL`, with runtime-defined equality and naming
//! - [`Zone`] for `NSZone *` (null only)
//! - [`autoreleasepool`] for push/run/pop with a guaranteed pop
//!
//! # Example
//!
//! ```rust
//! use objc_bridge::{ObjCBool, Selector, autoreleasepool, sel};
//!
//! let name = autoreleasepool(|_| {
//!     let sel = sel!("isEqual:");
//!     assert_eq!(sel, Selector::register("isEqual:"));
//!     sel.to_string()
//! });
//! assert_eq!(name, "isEqual:");
//!
//! let flag = ObjCBool::from(true);
//! assert!(bool::from(flag));
//! ```
//!
//! `BOOL`'s legacy `YES`/`NO` spellings are intentionally not provided;
//! use `true` and `false`.
//!
//! # Logging
//!
//! Runtime calls are logged through `objc-bridge-log` at `trace` level.
//! Call [`objc_bridge_log::init_from_env`] to configure the level from
//! `OBJC_BRIDGE_LOG`.

pub mod error;
pub mod runtime;

pub use error::{Error, Result};
pub use runtime::{
    AutoreleasePool, Backend, ObjCBool, OpaqueHandle, PoolBackend, PoolHandle,
    RuntimePool, Selector, Zone, active_backend, autoreleasepool,
    autoreleasepool_in,
};
