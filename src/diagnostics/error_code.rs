//! Error code types for the diagnostics system

use std::fmt;

use serde::{Deserialize, Serialize};

/// The exception kinds supplied by the type/exception registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExceptionKind {
    TypeError,
    KeyError,
    ValueError,
    AttributeError,
    NameError,
    SyntaxError,
    RuntimeError,
    SystemError,
}

impl ExceptionKind {
    /// Returns the user-visible exception class name.
    pub fn name(&self) -> &'static str {
        match self {
            ExceptionKind::TypeError => "TypeError",
            ExceptionKind::KeyError => "KeyError",
            ExceptionKind::ValueError => "ValueError",
            ExceptionKind::AttributeError => "AttributeError",
            ExceptionKind::NameError => "NameError",
            ExceptionKind::SyntaxError => "SyntaxError",
            ExceptionKind::RuntimeError => "RuntimeError",
            ExceptionKind::SystemError => "SystemError",
        }
    }
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error code with message template and optional hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    pub code: &'static str,
    pub title: &'static str,
    pub kind: ExceptionKind,
    pub message: &'static str,
    pub hint: Option<&'static str>,
}
