use crate::runtime::builtin_function::BuiltinFunction;

mod eval_exec;
pub(crate) mod helpers;

pub use eval_exec::{builtin_eval, builtin_exec};

/// Builtins that act on the caller's frame.
pub static BUILTINS: &[BuiltinFunction] = &[
    BuiltinFunction {
        name: "eval",
        doc: "eval(source, globals=None, locals=None)\n\n\
              Evaluate the given source in the context of globals and locals.",
        func: builtin_eval,
    },
    BuiltinFunction {
        name: "exec",
        doc: "exec(source, globals=None, locals=None)\n\n\
              Execute the given source in the context of globals and locals.",
        func: builtin_exec,
    },
];

pub fn get_builtin(name: &str) -> Option<&'static BuiltinFunction> {
    BUILTINS.iter().find(|b| b.name == name)
}

#[cfg(test)]
mod eval_exec_test;
