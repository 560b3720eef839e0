//! Collaborator seams and the runtime handle that carries them.
//!
//! Parsing, bytecode generation and instruction dispatch live outside this
//! crate. They are reached through the [`Compiler`] and [`Evaluator`]
//! traits; a [`Runtime`] bundles one of each with the [`RuntimeConfig`]
//! and is threaded through every call.

use std::{fmt, rc::Rc};

use crate::{
    config::RuntimeConfig,
    runtime::{
        closure::Closure,
        code::{Code, Mode},
        dict::DictRef,
        exception::PyResult,
        object::ObjectRef,
        tuple::Tuple,
    },
};

/// Turns source text into a code unit.
pub trait Compiler {
    fn compile(
        &self,
        source: &str,
        filename: &str,
        mode: Mode,
        flags: u32,
        dont_inherit: bool,
    ) -> PyResult<Rc<Code>>;
}

/// Everything the evaluator needs to run a function body.
///
/// Fields are owned snapshots of the function's state at call time, so the
/// evaluator may freely reassign attributes of the function being called.
#[derive(Debug, Clone)]
pub struct CallRequest {
    pub code: Rc<Code>,
    pub globals: DictRef,
    /// Freshly allocated for this call and never shared.
    pub locals: DictRef,
    pub args: Vec<ObjectRef>,
    pub kwargs: Option<DictRef>,
    pub defaults: Option<Rc<Tuple>>,
    pub kwdefaults: Option<DictRef>,
    pub closure: Option<Closure>,
}

/// Executes code units.
pub trait Evaluator {
    /// Runs a self-contained unit against explicit namespaces.
    fn execute(
        &self,
        rt: &Runtime,
        code: &Rc<Code>,
        globals: &DictRef,
        locals: &DictRef,
    ) -> PyResult<ObjectRef>;

    /// Binds arguments and runs a function body.
    fn execute_call(&self, rt: &Runtime, call: CallRequest) -> PyResult<ObjectRef>;
}

#[derive(Clone)]
pub struct Runtime {
    compiler: Rc<dyn Compiler>,
    evaluator: Rc<dyn Evaluator>,
    config: RuntimeConfig,
}

impl Runtime {
    pub fn new(compiler: Rc<dyn Compiler>, evaluator: Rc<dyn Evaluator>) -> Self {
        Self::with_config(compiler, evaluator, RuntimeConfig::default())
    }

    pub fn with_config(
        compiler: Rc<dyn Compiler>,
        evaluator: Rc<dyn Evaluator>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            compiler,
            evaluator,
            config,
        }
    }

    pub fn compiler(&self) -> &dyn Compiler {
        &*self.compiler
    }

    pub fn evaluator(&self) -> &dyn Evaluator {
        &*self.evaluator
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
