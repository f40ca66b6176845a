//! `SEL` bridging.
//!
//! A [`Selector`] wraps the runtime's opaque selector handle. Construction
//! goes through the runtime's registration primitive, equality through its
//! equality primitive, and rendering through its name lookup. The bridge
//! never second-guesses the runtime: there is no string comparison and no
//! pointer-equality shortcut.
//!
//! # Example
//!
//! ```rust
//! use objc_bridge::{Selector, sel};
//!
//! let init = Selector::register("initWithFrame:");
//! assert_eq!(init, sel!("initWithFrame:"));
//! assert_eq!(init.to_string(), "initWithFrame:");
//!
//! assert_eq!(Selector::default().to_string(), "<NULL>");
//! ```

use crate::error::{Error, Result};
use crate::runtime::ffi;
use crate::runtime::handle::OpaqueHandle;
use std::borrow::Cow;
use std::convert::Infallible;
use std::ffi::{CStr, c_void};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Text rendered for a selector the runtime cannot name.
pub const NULL_SELECTOR_TEXT: &str = "<NULL>";

/// A runtime-registered method name.
///
/// Selectors are interned by the runtime for the life of the process, so a
/// `Selector` is a plain `Copy` value that is safe to share between threads.
///
/// # Equality and hashing
///
/// `==` asks the runtime (`sel_isEqual`). [`Hash`] uses the handle bits,
/// never the name, so hashes are only meaningful within one process and
/// agree with `==` whenever the runtime's equality is handle identity.
///
/// # Representation
///
/// `#[repr(transparent)]` over the runtime handle, so it can appear directly
/// as a `SEL` parameter in `extern "C"` signatures.
#[repr(transparent)]
#[derive(Copy, Clone, Default)]
pub struct Selector(OpaqueHandle);

impl Selector {
    /// The null selector, meaning "no selector".
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Selector(OpaqueHandle::null())
    }

    /// Registers `name` with the runtime and returns its selector.
    ///
    /// The runtime reads a C string, so a name containing an interior NUL
    /// registers only the part before the first NUL.
    ///
    /// ```rust
    /// use objc_bridge::Selector;
    ///
    /// assert_eq!(Selector::register("alloc\0ignored"), Selector::register("alloc"));
    /// ```
    #[must_use]
    pub fn register(name: &str) -> Self {
        let prefix = name.split('\0').next().unwrap_or_default();

        let mut buf = Vec::with_capacity(prefix.len() + 1);
        buf.extend_from_slice(prefix.as_bytes());
        buf.push(0);

        // SAFETY: `prefix` contains no NUL and exactly one is appended.
        let c_name = unsafe { CStr::from_bytes_with_nul_unchecked(&buf) };

        // `buf` outlives the registration call, which is all the runtime
        // needs; it interns its own copy.
        Self::register_c(c_name)
    }

    /// Registers a name that is already a C string, without copying it.
    #[must_use]
    pub fn register_c(name: &CStr) -> Self {
        Selector(ffi::register_name(name))
    }

    #[inline]
    #[must_use]
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    /// The underlying runtime handle.
    #[inline]
    #[must_use]
    pub const fn handle(self) -> OpaqueHandle {
        self.0
    }

    /// The raw `SEL` value for passing to foreign code.
    #[inline]
    #[must_use]
    pub const fn as_ptr(self) -> *const c_void {
        self.0.as_ptr()
    }

    /// Wraps a raw `SEL` received from foreign code.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a selector handle issued by the active runtime.
    #[inline]
    #[must_use]
    pub const unsafe fn from_ptr(ptr: *const c_void) -> Self {
        Selector(OpaqueHandle::from_ptr(ptr))
    }

    fn c_name(self) -> Result<&'static CStr> {
        if self.is_null() {
            return Err(Error::NullSelector);
        }
        ffi::get_name(self.0).ok_or(Error::MissingName {
            handle: self.0.addr(),
        })
    }

    fn describe(self) -> Cow<'static, str> {
        match self.c_name() {
            Ok(name) => name.to_string_lossy(),
            Err(_) => Cow::Borrowed(NULL_SELECTOR_TEXT),
        }
    }

    /// Renders the selector for display. Never fails.
    ///
    /// Returns [`NULL_SELECTOR_TEXT`] for the null selector or a handle the
    /// runtime cannot name, and repairs ill-formed UTF-8 with U+FFFD.
    #[must_use]
    pub fn to_text(self) -> String {
        self.describe().into_owned()
    }

    /// Returns the selector's canonical name.
    ///
    /// Ill-formed UTF-8 is repaired as in [`to_text`](Self::to_text).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullSelector`] for the null selector and
    /// [`Error::MissingName`] if the runtime has no name for the handle.
    pub fn try_name(self) -> Result<String> {
        self.c_name().map(|name| name.to_string_lossy().into_owned())
    }
}

impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        ffi::is_equal(self.0, other.0)
    }
}

impl Eq for Selector {}

impl Hash for Selector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Self::register(name)
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Self::register(&name)
    }
}

impl From<&CStr> for Selector {
    fn from(name: &CStr) -> Self {
        Self::register_c(name)
    }
}

impl FromStr for Selector {
    type Err = Infallible;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::register(name))
    }
}

/// Extracts the canonical name.
///
/// # Panics
///
/// Panics if the selector is null or the runtime has no name for it. Use
/// [`Selector::try_name`] to handle that case, or `to_string()` for text
/// that is always available.
impl From<Selector> for String {
    fn from(sel: Selector) -> Self {
        match sel.try_name() {
            Ok(name) => name,
            Err(err) => panic!("cannot convert selector to String: {err}"),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("name", &self.describe())
            .field("handle", &format_args!("{:#x}", self.0.addr()))
            .finish()
    }
}

/// Registers a selector from a string literal once and caches it.
///
/// Each call site keeps its own cache, so the runtime is consulted on first
/// use only.
///
/// ```rust
/// use objc_bridge::sel;
///
/// fn description() -> objc_bridge::Selector {
///     sel!("description")
/// }
///
/// assert_eq!(description(), description());
/// assert_eq!(description().to_string(), "description");
/// ```
#[macro_export]
macro_rules! sel {
    ($name:literal) => {{
        static CACHED: ::std::sync::OnceLock<$crate::Selector> =
            ::std::sync::OnceLock::new();
        *CACHED.get_or_init(|| $crate::Selector::register($name))
    }};
}
