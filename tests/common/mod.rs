//! A toy compiler and evaluator for driving the runtime end to end.
//!
//! The language is tiny: statements separated by newlines or `;`, each one
//! of `name = expr`, `return expr`, `nonlocal a, b` or a bare expression.
//! Expressions are `+`-joined terms; a term is an integer, a `'quoted'`
//! string or a name.
#![allow(dead_code)]

use std::rc::Rc;

use pyrt::runtime::{
    CallRequest, Code, Compiler, Dict, DictRef, Evaluator, Exception, ExceptionKind, Mode,
    ObjectRef, PyResult, Runtime,
    closure::Closure,
    object::downcast_ref,
    value::{Int, Str, int, none, string},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Op {
    LoadConst = 0,
    LoadName = 1,
    StoreName = 2,
    PopTop = 3,
    ReturnValue = 4,
    BinaryAdd = 5,
}

impl Op {
    fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => Op::LoadConst,
            1 => Op::LoadName,
            2 => Op::StoreName,
            3 => Op::PopTop,
            4 => Op::ReturnValue,
            5 => Op::BinaryAdd,
            _ => return None,
        })
    }
}

fn syntax_error(msg: impl Into<String>) -> Exception {
    Exception::new(ExceptionKind::SyntaxError, msg)
}

struct Emitter {
    code: Code,
}

impl Emitter {
    fn new(name: &str, filename: &str) -> Self {
        Self {
            code: Code::new(name, filename),
        }
    }

    fn emit(&mut self, op: Op, operand: usize) {
        self.code.instructions.push(op as u8);
        self.code.instructions.push(operand as u8);
    }

    fn constant(&mut self, value: ObjectRef) -> usize {
        self.code.consts.push(value);
        self.code.consts.len() - 1
    }

    fn name(&mut self, name: &str) -> usize {
        match self.code.names.iter().position(|n| n == name) {
            Some(i) => i,
            None => {
                self.code.names.push(name.to_string());
                self.code.names.len() - 1
            }
        }
    }

    fn expr(&mut self, text: &str) -> PyResult<()> {
        for (i, term) in text.split('+').enumerate() {
            self.term(term.trim())?;
            if i > 0 {
                self.emit(Op::BinaryAdd, 0);
            }
        }
        Ok(())
    }

    fn term(&mut self, term: &str) -> PyResult<()> {
        if let Ok(value) = term.parse::<i64>() {
            let idx = self.constant(int(value));
            self.emit(Op::LoadConst, idx);
        } else if term.len() >= 2 && term.starts_with('\'') && term.ends_with('\'') {
            let idx = self.constant(string(&term[1..term.len() - 1]));
            self.emit(Op::LoadConst, idx);
        } else if !term.is_empty() && term.chars().all(|c| c.is_alphanumeric() || c == '_') {
            let idx = self.name(term);
            self.emit(Op::LoadName, idx);
        } else {
            return Err(syntax_error(format!("invalid syntax: {term:?}")));
        }
        Ok(())
    }

    fn statements(&mut self, source: &str) -> PyResult<()> {
        for stmt in source.split(['\n', ';']).map(str::trim).filter(|s| !s.is_empty()) {
            if let Some(vars) = stmt.strip_prefix("nonlocal ") {
                self.code
                    .freevars
                    .extend(vars.split(',').map(|v| v.trim().to_string()));
            } else if let Some(value) = stmt.strip_prefix("return ") {
                self.expr(value)?;
                self.emit(Op::ReturnValue, 0);
            } else if let Some((target, value)) = stmt.split_once('=') {
                self.expr(value)?;
                let idx = self.name(target.trim());
                self.emit(Op::StoreName, idx);
            } else {
                self.expr(stmt)?;
                self.emit(Op::PopTop, 0);
            }
        }
        let idx = self.constant(none());
        self.emit(Op::LoadConst, idx);
        self.emit(Op::ReturnValue, 0);
        Ok(())
    }
}

pub struct ToyCompiler;

impl Compiler for ToyCompiler {
    fn compile(
        &self,
        source: &str,
        filename: &str,
        mode: Mode,
        _flags: u32,
        _dont_inherit: bool,
    ) -> PyResult<Rc<Code>> {
        let mut emitter = Emitter::new("<module>", filename);
        match mode {
            Mode::Eval => {
                emitter.expr(source.trim())?;
                emitter.emit(Op::ReturnValue, 0);
            }
            Mode::Exec | Mode::Single => emitter.statements(source)?,
        }
        Ok(Rc::new(emitter.code))
    }
}

/// Compiles a function body. `consts[0]` holds the docstring (or `None`).
pub fn compile_function(
    name: &str,
    params: &[&str],
    kwonly: &[&str],
    doc: Option<&str>,
    body: &str,
) -> Rc<Code> {
    let mut emitter = Emitter::new(name, "test.py");
    emitter.constant(doc.map_or_else(none, string));
    emitter.code.argcount = params.len();
    emitter.code.kwonlyargcount = kwonly.len();
    emitter.code.varnames = params.iter().chain(kwonly).map(|p| p.to_string()).collect();
    emitter
        .statements(body)
        .unwrap_or_else(|e| panic!("bad function body: {e}"));
    Rc::new(emitter.code)
}

pub struct ToyEvaluator;

impl ToyEvaluator {
    fn run(
        &self,
        code: &Code,
        globals: &DictRef,
        locals: &DictRef,
        closure: Option<&Closure>,
    ) -> PyResult<ObjectRef> {
        let mut stack: Vec<ObjectRef> = Vec::new();
        let underflow = || Exception::new(ExceptionKind::SystemError, "stack underflow");
        for chunk in code.instructions.chunks(2) {
            let op = Op::from_byte(chunk[0])
                .ok_or_else(|| Exception::new(ExceptionKind::SystemError, "bad opcode"))?;
            let arg = chunk[1] as usize;
            match op {
                Op::LoadConst => stack.push(code.consts[arg].clone()),
                Op::LoadName => stack.push(load_name(code, &code.names[arg], globals, locals, closure)?),
                Op::StoreName => {
                    let value = stack.pop().ok_or_else(underflow)?;
                    let name = &code.names[arg];
                    match cell_for(code, name, closure) {
                        Some(cell) => cell.set(value),
                        None => locals.set_str(name, value),
                    }
                }
                Op::PopTop => {
                    stack.pop().ok_or_else(underflow)?;
                }
                Op::ReturnValue => return stack.pop().ok_or_else(underflow),
                Op::BinaryAdd => {
                    let right = stack.pop().ok_or_else(underflow)?;
                    let left = stack.pop().ok_or_else(underflow)?;
                    stack.push(add(&left, &right)?);
                }
            }
        }
        Ok(none())
    }
}

fn cell_for<'a>(
    code: &Code,
    name: &str,
    closure: Option<&'a Closure>,
) -> Option<&'a Rc<pyrt::runtime::closure::Cell>> {
    let index = code.freevars.iter().position(|v| v == name)?;
    closure?.get(index)
}

fn load_name(
    code: &Code,
    name: &str,
    globals: &DictRef,
    locals: &DictRef,
    closure: Option<&Closure>,
) -> PyResult<ObjectRef> {
    if let Some(value) = locals.get_str(name) {
        return Ok(value);
    }
    if let Some(cell) = cell_for(code, name, closure) {
        return cell.contents();
    }
    if let Some(value) = globals.get_str(name) {
        return Ok(value);
    }
    let builtins = globals
        .get_str("__builtins__")
        .and_then(|b| pyrt::runtime::object::downcast::<Dict>(&b));
    if let Some(value) = builtins.and_then(|b| b.get_str(name)) {
        return Ok(value);
    }
    Err(Exception::new(
        ExceptionKind::NameError,
        format!("name '{name}' is not defined"),
    ))
}

fn add(left: &ObjectRef, right: &ObjectRef) -> PyResult<ObjectRef> {
    if let (Some(a), Some(b)) = (downcast_ref::<Int>(left), downcast_ref::<Int>(right)) {
        return Ok(int(a.0 + b.0));
    }
    if let (Some(a), Some(b)) = (downcast_ref::<Str>(left), downcast_ref::<Str>(right)) {
        return Ok(string(&format!("{}{}", a.as_str(), b.as_str())));
    }
    Err(Exception::new(ExceptionKind::TypeError, "unsupported operand types for +"))
}

fn type_error(msg: String) -> Exception {
    Exception::new(ExceptionKind::TypeError, msg)
}

impl Evaluator for ToyEvaluator {
    fn execute(
        &self,
        _rt: &Runtime,
        code: &Rc<Code>,
        globals: &DictRef,
        locals: &DictRef,
    ) -> PyResult<ObjectRef> {
        self.run(code, globals, locals, None)
    }

    fn execute_call(&self, _rt: &Runtime, call: CallRequest) -> PyResult<ObjectRef> {
        let code = &call.code;
        let name = &code.name;
        let argcount = code.argcount;
        if call.args.len() > argcount {
            return Err(type_error(format!(
                "{name}() takes {argcount} positional arguments but {} were given",
                call.args.len()
            )));
        }
        let keyword = |param: &str| call.kwargs.as_ref().and_then(|k| k.get_str(param));
        let defaults = call.defaults.as_ref().map(|d| d.items().to_vec()).unwrap_or_default();
        let first_default = argcount.saturating_sub(defaults.len());

        for (i, param) in code.varnames.iter().take(argcount).enumerate() {
            let value = match call.args.get(i) {
                Some(value) => value.clone(),
                None => match keyword(param) {
                    Some(value) => value,
                    None if i >= first_default => defaults[i - first_default].clone(),
                    None => {
                        return Err(type_error(format!(
                            "{name}() missing required argument: '{param}'"
                        )));
                    }
                },
            };
            call.locals.set_str(param, value);
        }
        for param in code.varnames.iter().skip(argcount).take(code.kwonlyargcount) {
            let value = keyword(param)
                .or_else(|| call.kwdefaults.as_ref().and_then(|k| k.get_str(param)))
                .ok_or_else(|| {
                    type_error(format!(
                        "{name}() missing required keyword-only argument: '{param}'"
                    ))
                })?;
            call.locals.set_str(param, value);
        }
        if let Some(kwargs) = &call.kwargs {
            for key in kwargs.keys() {
                let key = downcast_ref::<Str>(&key).map(|s| s.as_str().to_string());
                match key {
                    Some(k) if code.varnames.iter().any(|v| *v == k) => {}
                    other => {
                        return Err(type_error(format!(
                            "{name}() got an unexpected keyword argument {other:?}"
                        )));
                    }
                }
            }
        }
        self.run(code, &call.globals, &call.locals, call.closure.as_ref())
    }
}

pub fn runtime() -> Runtime {
    pyrt::logging::init_tracing();
    Runtime::new(Rc::new(ToyCompiler), Rc::new(ToyEvaluator))
}

/// A module namespace with `__name__` set.
pub fn module(name: &str) -> DictRef {
    Dict::from_pairs([("__name__", string(name))])
}

pub fn int_value(obj: &ObjectRef) -> i64 {
    downcast_ref::<Int>(obj)
        .unwrap_or_else(|| panic!("expected int, got {obj:?}"))
        .0
}

pub fn str_value(obj: &ObjectRef) -> String {
    downcast_ref::<Str>(obj)
        .unwrap_or_else(|| panic!("expected str, got {obj:?}"))
        .as_str()
        .to_string()
}
