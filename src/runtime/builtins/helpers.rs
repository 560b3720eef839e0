use crate::{
    diagnostics::{
        DUPLICATE_ARGUMENT, KEYWORD_NOT_STRING, NO_KEYWORD_ARGUMENTS, TOO_FEW_ARGUMENTS,
        TOO_MANY_ARGUMENTS, UNEXPECTED_KEYWORD, WRONG_ARGUMENT_COUNT,
    },
    runtime::{
        dict::DictRef,
        exception::{Exception, PyResult},
        object::ObjectRef,
        value::as_str,
    },
};

pub(crate) fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn count_error(
    code: &'static crate::diagnostics::ErrorCode,
    name: &str,
    expected: usize,
    got: usize,
) -> Exception {
    Exception::from_code(
        code,
        &[name, &expected.to_string(), plural(expected), &got.to_string()],
    )
}

pub(crate) fn check_arity(name: &str, args: &[ObjectRef], expected: usize) -> PyResult<()> {
    if args.len() != expected {
        return Err(count_error(&WRONG_ARGUMENT_COUNT, name, expected, args.len()));
    }
    Ok(())
}

pub(crate) fn check_arity_range(
    name: &str,
    args: &[ObjectRef],
    min: usize,
    max: usize,
) -> PyResult<()> {
    if args.len() < min {
        return Err(count_error(&TOO_FEW_ARGUMENTS, name, min, args.len()));
    }
    if args.len() > max {
        return Err(count_error(&TOO_MANY_ARGUMENTS, name, max, args.len()));
    }
    Ok(())
}

pub(crate) fn check_no_kwargs(name: &str, kwargs: Option<&DictRef>) -> PyResult<()> {
    match kwargs {
        Some(kw) if !kw.is_empty() => Err(Exception::from_code(&NO_KEYWORD_ARGUMENTS, &[name])),
        _ => Ok(()),
    }
}

/// Matches positional and keyword arguments against `params`.
///
/// The first `required` parameters must be supplied; the result holds one
/// slot per parameter, `None` where an optional one was omitted.
pub(crate) fn parse_args(
    name: &str,
    args: &[ObjectRef],
    kwargs: Option<&DictRef>,
    params: &[&str],
    required: usize,
) -> PyResult<Vec<Option<ObjectRef>>> {
    let nkw = kwargs.map_or(0, |k| k.len());
    let given = args.len() + nkw;
    if given > params.len() {
        return Err(count_error(&TOO_MANY_ARGUMENTS, name, params.len(), given));
    }

    let mut slots: Vec<Option<ObjectRef>> = vec![None; params.len()];
    for (slot, arg) in slots.iter_mut().zip(args) {
        *slot = Some(arg.clone());
    }

    if let Some(kwargs) = kwargs {
        for (key, value) in kwargs.entries() {
            let Some(keyword) = as_str(&key) else {
                return Err(Exception::from_code(&KEYWORD_NOT_STRING, &[name]));
            };
            let Some(index) = params.iter().position(|p| *p == keyword) else {
                return Err(Exception::from_code(&UNEXPECTED_KEYWORD, &[name, keyword]));
            };
            if index < args.len() {
                return Err(Exception::from_code(
                    &DUPLICATE_ARGUMENT,
                    &[name, keyword, &(index + 1).to_string()],
                ));
            }
            slots[index] = Some(value);
        }
    }

    if slots.iter().take(required).any(Option::is_none) {
        return Err(count_error(&TOO_FEW_ARGUMENTS, name, required, given));
    }
    Ok(slots)
}
