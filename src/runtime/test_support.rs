//! Recording collaborators for unit tests.

use std::{cell::RefCell, rc::Rc};

use crate::runtime::{
    code::{Code, Mode},
    context::{CallRequest, Compiler, Evaluator, Runtime},
    dict::DictRef,
    exception::PyResult,
    object::ObjectRef,
    value::none,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CompileCall {
    pub source: String,
    pub filename: String,
    pub mode: Mode,
    pub flags: u32,
    pub dont_inherit: bool,
}

#[derive(Default)]
pub(crate) struct RecordingCompiler {
    pub calls: RefCell<Vec<CompileCall>>,
    pub freevars: Vec<String>,
}

impl Compiler for RecordingCompiler {
    fn compile(
        &self,
        source: &str,
        filename: &str,
        mode: Mode,
        flags: u32,
        dont_inherit: bool,
    ) -> PyResult<Rc<Code>> {
        self.calls.borrow_mut().push(CompileCall {
            source: source.to_string(),
            filename: filename.to_string(),
            mode,
            flags,
            dont_inherit,
        });
        let mut code = Code::new("<module>", filename);
        code.freevars = self.freevars.clone();
        Ok(Rc::new(code))
    }
}

pub(crate) struct RecordingEvaluator {
    pub executed: RefCell<Vec<(Rc<Code>, DictRef, DictRef)>>,
    pub calls: RefCell<Vec<CallRequest>>,
    pub result: ObjectRef,
}

impl Evaluator for RecordingEvaluator {
    fn execute(
        &self,
        _rt: &Runtime,
        code: &Rc<Code>,
        globals: &DictRef,
        locals: &DictRef,
    ) -> PyResult<ObjectRef> {
        self.executed
            .borrow_mut()
            .push((code.clone(), globals.clone(), locals.clone()));
        Ok(self.result.clone())
    }

    fn execute_call(&self, _rt: &Runtime, call: CallRequest) -> PyResult<ObjectRef> {
        self.calls.borrow_mut().push(call);
        Ok(self.result.clone())
    }
}

pub(crate) struct Harness {
    pub rt: Runtime,
    pub compiler: Rc<RecordingCompiler>,
    pub evaluator: Rc<RecordingEvaluator>,
}

/// A runtime whose evaluator returns `result` for every request.
pub(crate) fn harness_returning(result: ObjectRef) -> Harness {
    harness_with(RecordingCompiler::default(), result)
}

pub(crate) fn harness() -> Harness {
    harness_returning(none())
}

pub(crate) fn harness_with(compiler: RecordingCompiler, result: ObjectRef) -> Harness {
    crate::logging::init_tracing();
    let compiler = Rc::new(compiler);
    let evaluator = Rc::new(RecordingEvaluator {
        executed: RefCell::new(Vec::new()),
        calls: RefCell::new(Vec::new()),
        result,
    });
    let rt = Runtime::new(compiler.clone(), evaluator.clone());
    Harness {
        rt,
        compiler,
        evaluator,
    }
}
