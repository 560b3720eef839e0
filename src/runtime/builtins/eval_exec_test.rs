use std::rc::Rc;

use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{
    config::RuntimeConfig,
    runtime::{
        code::{Code, Mode},
        context::Runtime,
        dict::{Dict, DictRef},
        exception::{ExceptionKind, PyResult},
        frame::Frame,
        object::{ObjectRef, downcast_ref, is},
        test_support::{
            CompileCall, Harness, RecordingCompiler, harness, harness_returning, harness_with,
        },
        value::{Int, bytes, int, is_none, none, string},
    },
};

use super::get_builtin;

fn run(
    h: &Harness,
    name: &str,
    frame: &Frame,
    args: &[ObjectRef],
    kwargs: Option<&DictRef>,
) -> PyResult<ObjectRef> {
    let builtin = get_builtin(name).expect("builtin");
    builtin.call(&h.rt, frame, args, kwargs)
}

fn caller_frame() -> Frame {
    Frame::new(Dict::new(), Dict::new(), Dict::new())
}

fn executed_namespaces(h: &Harness) -> (DictRef, DictRef) {
    let executed = h.evaluator.executed.borrow();
    let (_, g, l) = executed.last().expect("executed");
    (g.clone(), l.clone())
}

fn obj(d: &DictRef) -> ObjectRef {
    d.clone()
}

#[test]
fn builtin_table_lists_eval_and_exec() {
    assert!(get_builtin("eval").is_some());
    assert!(get_builtin("exec").is_some());
    assert!(get_builtin("compile").is_none());
}

#[test]
fn no_namespaces_uses_caller_scope() {
    let h = harness();
    let frame = caller_frame();
    run(&h, "eval", &frame, &[string("x")], None).unwrap();
    let (g, l) = executed_namespaces(&h);
    assert!(Rc::ptr_eq(&g, &frame.globals));
    assert!(Rc::ptr_eq(&l, &frame.locals));
}

#[test]
fn globals_only_doubles_as_locals() {
    let h = harness();
    let frame = caller_frame();
    let g = Dict::new();
    run(&h, "eval", &frame, &[string("x"), obj(&g)], None).unwrap();
    let (eg, el) = executed_namespaces(&h);
    assert!(Rc::ptr_eq(&eg, &g));
    assert!(Rc::ptr_eq(&el, &g));
}

#[test]
fn both_namespaces_used_as_given() {
    let h = harness();
    let frame = caller_frame();
    let g = Dict::new();
    let l = Dict::new();
    run(&h, "eval", &frame, &[string("x"), obj(&g), obj(&l)], None).unwrap();
    let (eg, el) = executed_namespaces(&h);
    assert!(Rc::ptr_eq(&eg, &g));
    assert!(Rc::ptr_eq(&el, &l));
}

#[test]
fn none_globals_with_locals_uses_caller_globals() {
    let h = harness();
    let frame = caller_frame();
    let l = Dict::new();
    run(&h, "eval", &frame, &[string("x"), none(), obj(&l)], None).unwrap();
    let (eg, el) = executed_namespaces(&h);
    assert!(Rc::ptr_eq(&eg, &frame.globals));
    assert!(Rc::ptr_eq(&el, &l));
}

#[test]
fn builtins_injected_when_missing() {
    let h = harness();
    let frame = caller_frame();
    assert!(!frame.globals.contains_str("__builtins__"));
    run(&h, "eval", &frame, &[string("x")], None).unwrap();
    let injected = frame.globals.get_str("__builtins__").expect("injected");
    assert!(is(&injected, &obj(&frame.builtins)));
}

#[test]
fn existing_builtins_are_kept() {
    let h = harness();
    let frame = caller_frame();
    let custom = string("custom");
    let g = Dict::from_pairs([("__builtins__", custom.clone())]);
    run(&h, "exec", &frame, &[string("x"), obj(&g)], None).unwrap();
    assert!(is(&g.get_str("__builtins__").unwrap(), &custom));
}

#[test]
fn namespaces_must_be_dicts() {
    let h = harness();
    let frame = caller_frame();
    let err = run(&h, "eval", &frame, &[string("x"), int(1)], None).unwrap_err();
    assert_snapshot!(err.to_string(), @"TypeError: globals must be a dict");

    let err = run(&h, "exec", &frame, &[string("x"), obj(&Dict::new()), int(1)], None).unwrap_err();
    assert_snapshot!(err.to_string(), @"TypeError: locals must be a dict");
    assert!(h.evaluator.executed.borrow().is_empty());
}

#[test]
fn text_source_is_compiled_with_defaults() {
    let h = harness();
    let frame = caller_frame();
    run(&h, "exec", &frame, &[string(" \t x = 1")], None).unwrap();
    run(&h, "eval", &frame, &[bytes(b"\t1")], None).unwrap();

    let calls = h.compiler.calls.borrow();
    assert_eq!(
        calls[0],
        CompileCall {
            source: "x = 1".to_string(),
            filename: "<string>".to_string(),
            mode: Mode::Exec,
            flags: 0,
            dont_inherit: true,
        }
    );
    assert_eq!(calls[1].source, "1");
    assert_eq!(calls[1].mode, Mode::Eval);
}

#[test]
fn code_source_skips_compiler() {
    let h = harness();
    let frame = caller_frame();
    let code = Rc::new(Code::new("<module>", "m.py"));
    run(&h, "eval", &frame, &[code.clone() as ObjectRef], None).unwrap();
    assert!(h.compiler.calls.borrow().is_empty());
    let executed = h.evaluator.executed.borrow();
    assert!(Rc::ptr_eq(&executed[0].0, &code));
}

#[test]
fn other_source_types_are_rejected() {
    let h = harness();
    let frame = caller_frame();
    let err = run(&h, "eval", &frame, &[int(1)], None).unwrap_err();
    assert_snapshot!(err.to_string(), @"TypeError: eval() arg 1 must be a string, bytes or code object");

    let err = run(&h, "exec", &frame, &[none()], None).unwrap_err();
    assert!(err.message().starts_with("exec()"));
}

#[test]
fn invalid_utf8_bytes_are_a_value_error() {
    let h = harness();
    let frame = caller_frame();
    let err = run(&h, "exec", &frame, &[bytes(&[0xff, 0xfe])], None).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::ValueError);
}

#[test]
fn free_variables_are_rejected() {
    let compiler = RecordingCompiler {
        freevars: vec!["outer".to_string()],
        ..RecordingCompiler::default()
    };
    let h = harness_with(compiler, none());
    let frame = caller_frame();
    let err = run(&h, "exec", &frame, &[string("outer")], None).unwrap_err();
    assert_snapshot!(err.to_string(), @"TypeError: code passed to exec() may not contain free variables");

    let mut code = Code::new("inner", "m.py");
    code.freevars = vec!["x".to_string()];
    let err = run(&h, "eval", &frame, &[Rc::new(code) as ObjectRef], None).unwrap_err();
    assert!(err.message().contains("eval()"));
    assert!(err.message().contains("free variables"));
    assert!(h.evaluator.executed.borrow().is_empty());
}

#[test]
fn eval_returns_result_exec_returns_none() {
    let h = harness_returning(int(42));
    let frame = caller_frame();
    let value = run(&h, "eval", &frame, &[string("40 + 2")], None).unwrap();
    assert_eq!(downcast_ref::<Int>(&value).unwrap().0, 42);
    let value = run(&h, "exec", &frame, &[string("x = 42")], None).unwrap();
    assert!(is_none(&value));
}

#[test]
fn arity_errors_name_the_mode() {
    let h = harness();
    let frame = caller_frame();
    let err = run(&h, "eval", &frame, &[], None).unwrap_err();
    assert_snapshot!(err.message(), @"eval() takes at least 1 argument (0 given)");

    let args = [string("x"), none(), none(), none()];
    let err = run(&h, "exec", &frame, &args, None).unwrap_err();
    assert_snapshot!(err.message(), @"exec() takes at most 3 arguments (4 given)");
}

#[test]
fn keyword_arguments() {
    let h = harness();
    let frame = caller_frame();
    let g = Dict::new();
    let kwargs = Dict::from_pairs([("source", string("x")), ("globals", obj(&g))]);
    run(&h, "eval", &frame, &[], Some(&kwargs)).unwrap();
    let (eg, el) = executed_namespaces(&h);
    assert!(Rc::ptr_eq(&eg, &g));
    assert!(Rc::ptr_eq(&el, &g));

    let bad = Dict::from_pairs([("mode", string("eval"))]);
    let err = run(&h, "eval", &frame, &[string("x")], Some(&bad)).unwrap_err();
    assert_snapshot!(err.message(), @"eval() got an unexpected keyword argument 'mode'");

    let dup = Dict::from_pairs([("source", string("y"))]);
    let err = run(&h, "eval", &frame, &[string("x")], Some(&dup)).unwrap_err();
    assert_snapshot!(err.message(), @"argument for eval() given by name ('source') and position (1)");
}

#[test]
fn configured_filename_reaches_compiler() {
    let compiler = Rc::new(RecordingCompiler::default());
    let h = harness();
    let config = RuntimeConfig {
        eval_filename: "<repl>".to_string(),
        compile_flags: 0x200,
        ..RuntimeConfig::default()
    };
    let rt = Runtime::with_config(compiler.clone(), h.evaluator.clone(), config);
    let builtin = get_builtin("eval").expect("eval");
    builtin
        .call(&rt, &caller_frame(), &[string("1")], None)
        .unwrap();
    let calls = compiler.calls.borrow();
    assert_eq!(calls[0].filename, "<repl>");
    assert_eq!(calls[0].flags, 0x200);
}
