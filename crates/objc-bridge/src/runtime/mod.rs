//! Runtime bridging types.
//!
//! # Architecture
//!
//! - [`handle`]: opaque pointer-sized handles
//! - [`boolean`]: `BOOL` encoding
//! - [`selector`]: `SEL` registration, equality and naming
//! - [`zone`]: `NSZone *`
//! - [`autorelease`]: scoped autorelease pools
//! - [`ffi`]: the five runtime primitives everything above is built on
//! - [`host`]: the in-process runtime used where `libobjc` is unavailable
//!
//! # Backends
//!
//! On Apple targets the primitives link against the system `libobjc`. On
//! every other target, and on Apple targets built with the `host-runtime`
//! feature, they are served by [`host`]. [`active_backend`] reports which
//! one is compiled in.

pub mod autorelease;
pub mod boolean;
pub mod ffi;
pub mod handle;
pub mod host;
pub mod selector;
pub mod zone;

pub use autorelease::{
    AutoreleasePool, PoolBackend, PoolHandle, RuntimePool, autoreleasepool,
    autoreleasepool_in,
};
pub use boolean::{ObjCBool, RawBool};
pub use ffi::{Backend, active_backend};
pub use handle::OpaqueHandle;
pub use selector::{NULL_SELECTOR_TEXT, Selector};
pub use zone::Zone;
