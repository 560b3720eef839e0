//! `eval` and `exec`.
//!
//! Both builtins share one dispatcher, parameterised by [`Mode`]: it
//! resolves the namespaces, turns the source into a code unit and hands
//! both to the runtime's evaluator.

use std::rc::Rc;

use crate::{
    diagnostics::{FREE_VARIABLES_IN_SOURCE, INVALID_SOURCE, NAMESPACE_NOT_DICT, SOURCE_NOT_UTF8},
    runtime::{
        code::{Code, Mode},
        context::Runtime,
        dict::{Dict, DictRef, dict_check_exact},
        exception::{Exception, PyResult},
        frame::Frame,
        object::{ObjectRef, downcast, downcast_ref},
        value::{Bytes, as_str, is_none, none},
    },
};

use super::helpers::parse_args;

const PARAMS: &[&str] = &["source", "globals", "locals"];

pub fn builtin_eval(
    rt: &Runtime,
    frame: &Frame,
    args: &[ObjectRef],
    kwargs: Option<&DictRef>,
) -> PyResult<ObjectRef> {
    eval_or_exec(rt, frame, args, kwargs, Mode::Eval)
}

pub fn builtin_exec(
    rt: &Runtime,
    frame: &Frame,
    args: &[ObjectRef],
    kwargs: Option<&DictRef>,
) -> PyResult<ObjectRef> {
    eval_or_exec(rt, frame, args, kwargs, Mode::Exec)
}

#[tracing::instrument(level = "debug", skip_all, fields(mode = mode.as_str()))]
fn eval_or_exec(
    rt: &Runtime,
    frame: &Frame,
    args: &[ObjectRef],
    kwargs: Option<&DictRef>,
    mode: Mode,
) -> PyResult<ObjectRef> {
    let name = mode.as_str();
    let slots = parse_args(name, args, kwargs, PARAMS, 1)?;
    let source = slots[0].clone().unwrap_or_else(none);
    let globals = slots[1].clone().filter(|g| !is_none(g));
    let locals = slots[2].clone().filter(|l| !is_none(l));

    let (globals, locals) = resolve_namespaces(frame, globals, locals)?;
    if !globals.contains_str("__builtins__") {
        tracing::trace!("injecting __builtins__ into globals");
        globals.set_str("__builtins__", frame.builtins.clone());
    }

    let code = resolve_code(rt, &source, mode)?;
    if code.num_free() > 0 {
        return Err(Exception::from_code(&FREE_VARIABLES_IN_SOURCE, &[name]));
    }

    let result = rt.evaluator().execute(rt, &code, &globals, &locals)?;
    Ok(match mode {
        Mode::Exec => none(),
        Mode::Eval | Mode::Single => result,
    })
}

/// Applies the defaulting rules: no globals means the caller's scope, and
/// globals without locals means one dict for both.
fn resolve_namespaces(
    frame: &Frame,
    globals: Option<ObjectRef>,
    locals: Option<ObjectRef>,
) -> PyResult<(DictRef, DictRef)> {
    let caller_globals = frame.globals.clone() as ObjectRef;
    let (globals, locals) = match (globals, locals) {
        (None, None) => (caller_globals, frame.locals.clone() as ObjectRef),
        (None, Some(locals)) => (caller_globals, locals),
        (Some(globals), None) => (globals.clone(), globals),
        (Some(globals), Some(locals)) => (globals, locals),
    };
    Ok((namespace(&globals, "globals")?, namespace(&locals, "locals")?))
}

fn namespace(obj: &ObjectRef, role: &str) -> PyResult<DictRef> {
    let not_dict = || Exception::from_code(&NAMESPACE_NOT_DICT, &[role]);
    if !dict_check_exact(obj) {
        return Err(not_dict());
    }
    downcast::<Dict>(obj).ok_or_else(not_dict)
}

fn resolve_code(rt: &Runtime, source: &ObjectRef, mode: Mode) -> PyResult<Rc<Code>> {
    if let Some(code) = downcast::<Code>(source) {
        tracing::debug!(source = "code", "using precompiled unit");
        return Ok(code);
    }
    let text = if let Some(text) = as_str(source) {
        text
    } else if let Some(bytes) = downcast_ref::<Bytes>(source) {
        std::str::from_utf8(bytes.as_bytes())
            .map_err(|_| Exception::from_code(&SOURCE_NOT_UTF8, &[mode.as_str()]))?
    } else {
        return Err(Exception::from_code(&INVALID_SOURCE, &[mode.as_str()]));
    };
    let text = text.trim_start_matches([' ', '\t']);
    let config = rt.config();
    tracing::debug!(source = "text", len = text.len(), "compiling source");
    rt.compiler().compile(
        text,
        &config.eval_filename,
        mode,
        config.compile_flags,
        config.dont_inherit,
    )
}
