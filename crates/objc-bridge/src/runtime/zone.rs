//! `NSZone *` bridging.
//!
//! Memory zones are a legacy allocation API; modern runtimes ignore the zone
//! argument entirely. The bridge only ever produces the null zone, but keeps
//! a distinct type so zone parameters cannot be confused with other handles.

use crate::runtime::handle::OpaqueHandle;

/// A memory zone handle. Only the null zone is supported.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Zone(OpaqueHandle);

impl Zone {
    /// The null zone, which the runtime treats as the default zone.
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Zone(OpaqueHandle::null())
    }

    #[inline]
    #[must_use]
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    /// The underlying handle, for `extern "C"` calls taking an `NSZone *`.
    #[inline]
    #[must_use]
    pub const fn handle(self) -> OpaqueHandle {
        self.0
    }
}
