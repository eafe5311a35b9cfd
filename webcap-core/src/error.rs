//! Common error types.
//!
//! There is a single failure class, "capability unavailable", split by what exactly was
//! missing. None of these are fatal: the adapter logs them and returns control to the caller.

use std::{error, fmt};

use smol_str::SmolStr;

use crate::Capability;

/// Which adapter operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Acquire,
    Release,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Operation::Acquire => "acquire",
            Operation::Release => "release",
        })
    }
}

/// The error type for when a capability can't be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// No browser document is reachable from the current thread.
    NoDocument,
    /// No element matched the target selector.
    NoElement { selector: SmolStr },
    /// None of the candidate names exist.
    Unsupported { capability: Capability, operation: Operation },
    /// The browser threw while invoking the selected method.
    Rejected { method: &'static str, message: String },
}

impl fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityError::NoDocument => f.write_str("no document is available"),
            CapabilityError::NoElement { selector } => {
                write!(f, "no element found for selector `{selector}`")
            },
            CapabilityError::Unsupported { capability, operation } => {
                write!(f, "{capability} API not supported (tried to {operation})")
            },
            CapabilityError::Rejected { method, message } => {
                write!(f, "`{method}` failed: {message}")
            },
        }
    }
}

impl error::Error for CapabilityError {}

#[cfg(test)]
mod tests {
    #![allow(clippy::redundant_clone)]

    use super::*;

    #[test]
    fn ensure_fmt_does_not_panic() {
        let _ = format!(
            "{:?}, {}",
            CapabilityError::NoDocument,
            CapabilityError::NoDocument.clone()
        );
    }

    #[test]
    fn messages() {
        let err = CapabilityError::NoElement { selector: SmolStr::new_static("canvas") };
        assert_eq!(err.to_string(), "no element found for selector `canvas`");

        let err = CapabilityError::Unsupported {
            capability: Capability::PointerLock,
            operation: Operation::Acquire,
        };
        assert_eq!(err.to_string(), "pointer lock API not supported (tried to acquire)");

        let err = CapabilityError::Rejected {
            method: "requestPointerLock",
            message: "WrongDocumentError".into(),
        };
        assert_eq!(err.to_string(), "`requestPointerLock` failed: WrongDocumentError");
    }

    #[test]
    fn release_message() {
        let err = CapabilityError::Unsupported {
            capability: Capability::PointerLock,
            operation: Operation::Release,
        };
        assert_eq!(err.to_string(), "pointer lock API not supported (tried to release)");
        assert_eq!(format!("{:>8}", Operation::Acquire), " acquire");
    }
}
