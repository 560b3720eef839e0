//! Object model, namespaces, functions and the eval/exec entry points.
//!
//! # Ownership
//! Every runtime value is an `Rc<dyn Object>`. Namespaces ([`dict::Dict`])
//! are shared by reference between modules, functions and frames, and are
//! reclaimed when the last holder drops them. Closures capture variables
//! through shared [`closure::Cell`]s rather than by value.
//!
//! Reference cycles (a dict containing itself, a function stored in its own
//! globals) are representable and are not collected; hosts that create them
//! are expected to break them.

pub mod attribute;
pub mod builtin_function;
pub mod builtins;
pub mod class;
pub mod closure;
pub mod code;
pub mod context;
pub mod dict;
pub mod exception;
pub mod frame;
pub mod function;
pub mod hash_key;
pub mod iterator;
pub mod leak_detector;
pub mod method;
pub mod object;
pub mod protocol;
pub mod tuple;
pub mod types;
pub mod value;

pub use builtin_function::BuiltinFn;
pub use code::{Code, Mode};
pub use context::{CallRequest, Compiler, Evaluator, Runtime};
pub use dict::{Dict, DictRef};
pub use exception::{Exception, ExceptionKind, PyResult};
pub use frame::Frame;
pub use function::Function;
pub use object::{Object, ObjectRef};

#[cfg(test)]
mod test_support;
