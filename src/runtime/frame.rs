use crate::runtime::dict::{Dict, DictRef};

/// The caller's scope as seen by builtins that act on it.
#[derive(Debug, Clone)]
pub struct Frame {
    pub globals: DictRef,
    pub locals: DictRef,
    pub builtins: DictRef,
}

impl Frame {
    pub fn new(globals: DictRef, locals: DictRef, builtins: DictRef) -> Self {
        Self {
            globals,
            locals,
            builtins,
        }
    }

    /// Module-level frame: locals and globals are the same dict.
    pub fn module(globals: DictRef, builtins: DictRef) -> Self {
        Self::new(globals.clone(), globals, builtins)
    }

    /// Fresh module frame with empty namespaces.
    pub fn empty() -> Self {
        Self::module(Dict::new(), Dict::new())
    }
}
