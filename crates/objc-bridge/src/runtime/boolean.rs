//! `BOOL` bridging.
//!
//! Objective-C's `BOOL` is a C `bool` on some ABIs (arm64 Apple platforms)
//! and a `signed char` everywhere else. [`ObjCBool`] hides that difference:
//! the representation is picked once per target by the private `encoding`
//! module and the public API is identical on every platform.
//!
//! There are deliberately no `YES`/`NO` constants. Use `true`/`false`:
//!
//! ```compile_fail
//! use objc_bridge::YES;
//! ```
//!
//! ```compile_fail
//! let _ = objc_bridge::ObjCBool::NO;
//! ```
//!
//! ```rust
//! use objc_bridge::ObjCBool;
//!
//! let flag: ObjCBool = true.into();
//! assert!(flag.as_bool());
//! assert_eq!(flag.to_string(), "true");
//! ```

use std::fmt;

#[cfg(all(target_vendor = "apple", target_arch = "aarch64"))]
mod encoding {
    /// Native `bool` ABI.
    pub(super) type Repr = bool;

    #[inline]
    pub(super) const fn encode(value: bool) -> Repr {
        value
    }

    #[inline]
    pub(super) const fn decode(raw: Repr) -> bool {
        raw
    }
}

#[cfg(not(all(target_vendor = "apple", target_arch = "aarch64")))]
mod encoding {
    /// `signed char` ABI; any nonzero byte is true.
    pub(super) type Repr = i8;

    #[inline]
    pub(super) const fn encode(value: bool) -> Repr {
        value as Repr
    }

    #[inline]
    pub(super) const fn decode(raw: Repr) -> bool {
        raw != 0
    }
}

/// The foreign representation of `BOOL` on the current target.
pub type RawBool = encoding::Repr;

/// An Objective-C `BOOL` value.
///
/// `#[repr(transparent)]` over [`RawBool`], so it can be used directly in
/// `extern "C"` signatures that take or return `BOOL`.
#[repr(transparent)]
#[derive(Copy, Clone)]
pub struct ObjCBool(RawBool);

impl ObjCBool {
    /// Encodes a Rust `bool`.
    #[inline]
    #[must_use]
    pub const fn new(value: bool) -> Self {
        ObjCBool(encoding::encode(value))
    }

    /// Wraps a value exactly as received from foreign code.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: RawBool) -> Self {
        ObjCBool(raw)
    }

    /// Returns the stored foreign representation unchanged.
    #[inline]
    #[must_use]
    pub const fn as_raw(self) -> RawBool {
        self.0
    }

    /// Decodes to a Rust `bool` using the platform rule.
    #[inline]
    #[must_use]
    pub const fn as_bool(self) -> bool {
        encoding::decode(self.0)
    }
}

impl Default for ObjCBool {
    fn default() -> Self {
        Self::new(false)
    }
}

impl From<bool> for ObjCBool {
    #[inline]
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl From<ObjCBool> for bool {
    #[inline]
    fn from(value: ObjCBool) -> Self {
        value.as_bool()
    }
}

impl PartialEq for ObjCBool {
    fn eq(&self, other: &Self) -> bool {
        self.as_bool() == other.as_bool()
    }
}

impl Eq for ObjCBool {}

impl PartialEq<bool> for ObjCBool {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == *other
    }
}

impl std::hash::Hash for ObjCBool {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_bool().hash(state);
    }
}

impl fmt::Display for ObjCBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_bool(), f)
    }
}

impl fmt::Debug for ObjCBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_bool(), f)
    }
}
