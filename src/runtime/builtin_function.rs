use std::fmt;

use crate::runtime::{
    context::Runtime, dict::DictRef, exception::PyResult, frame::Frame, object::ObjectRef,
};

/// A builtin that needs the caller's frame as well as its arguments.
pub type BuiltinFn =
    fn(&Runtime, &Frame, &[ObjectRef], Option<&DictRef>) -> PyResult<ObjectRef>;

#[derive(Clone)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub doc: &'static str,
    pub func: BuiltinFn,
}

impl BuiltinFunction {
    pub fn call(
        &self,
        rt: &Runtime,
        frame: &Frame,
        args: &[ObjectRef],
        kwargs: Option<&DictRef>,
    ) -> PyResult<ObjectRef> {
        (self.func)(rt, frame, args, kwargs)
    }
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFunction({})", self.name)
    }
}

impl PartialEq for BuiltinFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
