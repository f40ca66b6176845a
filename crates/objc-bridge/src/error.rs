//! Error types for the bridge.
//!
//! Almost every bridging operation is total. The few that can fail are the
//! strict selector-name lookup and the host runtime's pool bookkeeping.

use std::fmt;

/// Errors reported by the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The selector handle is null ("no selector").
    NullSelector,

    /// The runtime returned no name for a non-null selector handle.
    MissingName {
        /// Address of the selector handle.
        handle: usize,
    },

    /// A pool pop named a handle that is not on the current thread's stack.
    UnknownPool {
        /// Address of the pool handle.
        handle: usize,
    },

    /// A value was autoreleased while no pool was pushed.
    NoActivePool,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NullSelector => write!(f, "Selector is null"),
            Error::MissingName { handle } => {
                write!(f, "Runtime has no name for selector {handle:#x}")
            }
            Error::UnknownPool { handle } => {
                write!(
                    f,
                    "Autorelease pool {handle:#x} is not on this thread's pool stack"
                )
            }
            Error::NoActivePool => {
                write!(f, "No autorelease pool is active on this thread")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type for bridge operations.
pub type Result<T> = std::result::Result<T, Error>;
