//! Diagnostics module.
//!
//! Every error this crate raises is described by a static [`ErrorCode`]: a
//! stable code, a title, the exception kind it maps to and a message template
//! with positional `{}` placeholders. Collaborator errors (compiler, evaluator)
//! never pass through here; they are propagated untouched.

pub mod error_code;
pub mod format;
pub mod registry;
pub mod runtime_errors;

pub use error_code::{ErrorCode, ExceptionKind};
pub use format::format_message;
pub use registry::{ERROR_CODES, lookup_error_code};

pub use runtime_errors::*;
