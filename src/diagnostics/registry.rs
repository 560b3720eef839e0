use super::error_code::ErrorCode;
use super::runtime_errors::*;

/// All error codes raised by the runtime, in code order.
pub static ERROR_CODES: &[ErrorCode] = &[
    DICT_REQUIRED,
    NAMESPACE_NOT_DICT,
    INVALID_SOURCE,
    FREE_VARIABLES_IN_SOURCE,
    SOURCE_NOT_UTF8,
    TOO_MANY_ARGUMENTS,
    TOO_FEW_ARGUMENTS,
    WRONG_ARGUMENT_COUNT,
    NO_KEYWORD_ARGUMENTS,
    UNEXPECTED_KEYWORD,
    DUPLICATE_ARGUMENT,
    KEYWORD_NOT_STRING,
    KEY_NOT_FOUND,
    STRING_KEY_REQUIRED,
    ATTRIBUTE_TYPE,
    CODE_FREE_VARS_MISMATCH,
    CLOSURE_SIZE_MISMATCH,
    DESCRIPTOR_MISAPPLIED,
    CELL_EMPTY,
    NOT_ITERABLE,
    NOT_AN_ITERATOR,
    NOT_SUBSCRIPTABLE,
    NO_ITEM_ASSIGNMENT,
    NO_ITEM_DELETION,
    NO_MEMBERSHIP,
    NOT_CALLABLE,
    NO_ATTRIBUTE,
    READONLY_ATTRIBUTE,
];

pub fn lookup_error_code(code: &str) -> Option<&'static ErrorCode> {
    ERROR_CODES.iter().find(|entry| entry.code == code)
}
