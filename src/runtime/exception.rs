use thiserror::Error;

use crate::diagnostics::{ErrorCode, format_message};

pub use crate::diagnostics::ExceptionKind;

pub type PyResult<T> = Result<T, Exception>;

/// A raised exception: a stable kind plus a rendered message.
///
/// Exceptions raised by this crate carry the registry code they were built
/// from; exceptions raised by collaborators usually do not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct Exception {
    kind: ExceptionKind,
    message: String,
    code: Option<&'static ErrorCode>,
}

impl Exception {
    pub fn new(kind: ExceptionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
        }
    }

    /// Builds an exception from a registry entry, filling its placeholders.
    pub fn from_code(code: &'static ErrorCode, values: &[&str]) -> Self {
        Self {
            kind: code.kind,
            message: format_message(code.message, values),
            code: Some(code),
        }
    }

    pub fn kind(&self) -> ExceptionKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<&'static str> {
        self.code.map(|c| c.code)
    }

    pub fn hint(&self) -> Option<&'static str> {
        self.code.and_then(|c| c.hint)
    }

    pub fn is(&self, kind: ExceptionKind) -> bool {
        self.kind == kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CODE_FREE_VARS_MISMATCH, NAMESPACE_NOT_DICT};

    #[test]
    fn from_code_renders_template() {
        let err = Exception::from_code(&CODE_FREE_VARS_MISMATCH, &["inner", "1", "2"]);
        assert_eq!(err.kind(), ExceptionKind::ValueError);
        assert_eq!(
            err.message(),
            "inner() requires a code object with 1 free vars, not 2"
        );
        assert_eq!(err.code(), Some("E2031"));
    }

    #[test]
    fn display_prefixes_kind() {
        let err = Exception::from_code(&NAMESPACE_NOT_DICT, &["globals"]);
        assert_eq!(err.to_string(), "TypeError: globals must be a dict");
        assert!(err.hint().is_some());
    }

    #[test]
    fn collaborator_exceptions_have_no_code() {
        let err = Exception::new(ExceptionKind::NameError, "name 'x' is not defined");
        assert_eq!(err.code(), None);
        assert!(err.is(ExceptionKind::NameError));
    }
}
