use super::error_code::{ErrorCode, ExceptionKind};

pub const DICT_REQUIRED: ErrorCode = ErrorCode {
    code: "E2000",
    title: "DICT REQUIRED",
    kind: ExceptionKind::TypeError,
    message: "a dict is required",
    hint: None,
};

pub const NAMESPACE_NOT_DICT: ErrorCode = ErrorCode {
    code: "E2001",
    title: "NAMESPACE NOT A DICT",
    kind: ExceptionKind::TypeError,
    message: "{} must be a dict",
    hint: Some("Pass a dict, or None to use the caller's namespace."),
};

pub const INVALID_SOURCE: ErrorCode = ErrorCode {
    code: "E2002",
    title: "INVALID SOURCE",
    kind: ExceptionKind::TypeError,
    message: "{}() arg 1 must be a string, bytes or code object",
    hint: None,
};

pub const FREE_VARIABLES_IN_SOURCE: ErrorCode = ErrorCode {
    code: "E2003",
    title: "FREE VARIABLES IN SOURCE",
    kind: ExceptionKind::TypeError,
    message: "code passed to {}() may not contain free variables",
    hint: Some("Only self-contained code units can be evaluated; call the enclosing function instead."),
};

pub const SOURCE_NOT_UTF8: ErrorCode = ErrorCode {
    code: "E2004",
    title: "SOURCE NOT UTF-8",
    kind: ExceptionKind::ValueError,
    message: "{}() source bytes are not valid UTF-8",
    hint: None,
};

pub const TOO_MANY_ARGUMENTS: ErrorCode = ErrorCode {
    code: "E2010",
    title: "TOO MANY ARGUMENTS",
    kind: ExceptionKind::TypeError,
    message: "{}() takes at most {} argument{} ({} given)",
    hint: None,
};

pub const TOO_FEW_ARGUMENTS: ErrorCode = ErrorCode {
    code: "E2011",
    title: "TOO FEW ARGUMENTS",
    kind: ExceptionKind::TypeError,
    message: "{}() takes at least {} argument{} ({} given)",
    hint: None,
};

pub const WRONG_ARGUMENT_COUNT: ErrorCode = ErrorCode {
    code: "E2012",
    title: "WRONG NUMBER OF ARGUMENTS",
    kind: ExceptionKind::TypeError,
    message: "{}() takes exactly {} argument{} ({} given)",
    hint: None,
};

pub const NO_KEYWORD_ARGUMENTS: ErrorCode = ErrorCode {
    code: "E2013",
    title: "NO KEYWORD ARGUMENTS",
    kind: ExceptionKind::TypeError,
    message: "{}() takes no keyword arguments",
    hint: None,
};

pub const UNEXPECTED_KEYWORD: ErrorCode = ErrorCode {
    code: "E2014",
    title: "UNEXPECTED KEYWORD ARGUMENT",
    kind: ExceptionKind::TypeError,
    message: "{}() got an unexpected keyword argument '{}'",
    hint: None,
};

pub const DUPLICATE_ARGUMENT: ErrorCode = ErrorCode {
    code: "E2015",
    title: "DUPLICATE ARGUMENT",
    kind: ExceptionKind::TypeError,
    message: "argument for {}() given by name ('{}') and position ({})",
    hint: None,
};

pub const KEYWORD_NOT_STRING: ErrorCode = ErrorCode {
    code: "E2016",
    title: "KEYWORD NOT A STRING",
    kind: ExceptionKind::TypeError,
    message: "{}() keywords must be strings",
    hint: None,
};

pub const KEY_NOT_FOUND: ErrorCode = ErrorCode {
    code: "E2020",
    title: "KEY NOT FOUND",
    kind: ExceptionKind::KeyError,
    message: "{}",
    hint: None,
};

pub const STRING_KEY_REQUIRED: ErrorCode = ErrorCode {
    code: "E2021",
    title: "STRING KEY REQUIRED",
    kind: ExceptionKind::KeyError,
    message: "dict membership requires a str key, got '{}'",
    hint: Some("Use d.get(key) or d[key] for keys of other types."),
};

pub const ATTRIBUTE_TYPE: ErrorCode = ErrorCode {
    code: "E2030",
    title: "ATTRIBUTE TYPE",
    kind: ExceptionKind::TypeError,
    message: "{} must be set to a {} object",
    hint: None,
};

pub const CODE_FREE_VARS_MISMATCH: ErrorCode = ErrorCode {
    code: "E2031",
    title: "FREE VARIABLE COUNT MISMATCH",
    kind: ExceptionKind::ValueError,
    message: "{}() requires a code object with {} free vars, not {}",
    hint: None,
};

pub const CLOSURE_SIZE_MISMATCH: ErrorCode = ErrorCode {
    code: "E2032",
    title: "CLOSURE SIZE MISMATCH",
    kind: ExceptionKind::ValueError,
    message: "{}() requires a closure of {} cells, not {}",
    hint: None,
};

pub const DESCRIPTOR_MISAPPLIED: ErrorCode = ErrorCode {
    code: "E2033",
    title: "DESCRIPTOR MISAPPLIED",
    kind: ExceptionKind::TypeError,
    message: "descriptor '{}' for '{}' objects doesn't apply to a '{}' object",
    hint: None,
};

pub const CELL_EMPTY: ErrorCode = ErrorCode {
    code: "E2034",
    title: "CELL EMPTY",
    kind: ExceptionKind::ValueError,
    message: "Cell is empty",
    hint: None,
};

pub const NOT_ITERABLE: ErrorCode = ErrorCode {
    code: "E2040",
    title: "NOT ITERABLE",
    kind: ExceptionKind::TypeError,
    message: "'{}' object is not iterable",
    hint: None,
};

pub const NOT_AN_ITERATOR: ErrorCode = ErrorCode {
    code: "E2041",
    title: "NOT AN ITERATOR",
    kind: ExceptionKind::TypeError,
    message: "'{}' object is not an iterator",
    hint: None,
};

pub const NOT_SUBSCRIPTABLE: ErrorCode = ErrorCode {
    code: "E2042",
    title: "NOT SUBSCRIPTABLE",
    kind: ExceptionKind::TypeError,
    message: "'{}' object is not subscriptable",
    hint: None,
};

pub const NO_ITEM_ASSIGNMENT: ErrorCode = ErrorCode {
    code: "E2043",
    title: "NO ITEM ASSIGNMENT",
    kind: ExceptionKind::TypeError,
    message: "'{}' object does not support item assignment",
    hint: None,
};

pub const NO_ITEM_DELETION: ErrorCode = ErrorCode {
    code: "E2044",
    title: "NO ITEM DELETION",
    kind: ExceptionKind::TypeError,
    message: "'{}' object does not support item deletion",
    hint: None,
};

pub const NO_MEMBERSHIP: ErrorCode = ErrorCode {
    code: "E2045",
    title: "NO MEMBERSHIP TEST",
    kind: ExceptionKind::TypeError,
    message: "argument of type '{}' is not iterable",
    hint: None,
};

pub const NOT_CALLABLE: ErrorCode = ErrorCode {
    code: "E2046",
    title: "NOT CALLABLE",
    kind: ExceptionKind::TypeError,
    message: "'{}' object is not callable",
    hint: None,
};

pub const NO_ATTRIBUTE: ErrorCode = ErrorCode {
    code: "E2050",
    title: "NO ATTRIBUTE",
    kind: ExceptionKind::AttributeError,
    message: "'{}' object has no attribute '{}'",
    hint: None,
};

pub const READONLY_ATTRIBUTE: ErrorCode = ErrorCode {
    code: "E2051",
    title: "READONLY ATTRIBUTE",
    kind: ExceptionKind::AttributeError,
    message: "attribute '{}' of '{}' objects is not writable",
    hint: None,
};
