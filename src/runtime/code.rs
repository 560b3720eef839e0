//! Compiled code units.
//!
//! A [`Code`] is produced by the external compiler and consumed by the
//! external evaluator. This crate only reads its free-variable list, its
//! name and its first constant (the docstring slot); everything else is
//! carried through untouched.

use std::fmt;

use crate::{
    diagnostics::DESCRIPTOR_MISAPPLIED,
    runtime::{
        exception::{Exception, PyResult},
        object::{Object, ObjectRef, Repr, downcast_ref, type_name},
        types::{PropertyDef, Type},
        value::{Str, int, string, tuple},
    },
};

/// How the compiler should treat a source fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// A sequence of statements.
    Exec,
    /// A single expression whose value is returned.
    Eval,
    /// A single interactive statement.
    Single,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Exec => "exec",
            Mode::Eval => "eval",
            Mode::Single => "single",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub static CODE_TYPE: Type = Type {
    name: "code",
    doc: "Create a code object.  Not for the faint of heart.",
    methods: &[],
    properties: &[
        PropertyDef {
            name: "co_name",
            get: code_name,
            set: None,
            delete: None,
        },
        PropertyDef {
            name: "co_filename",
            get: code_filename,
            set: None,
            delete: None,
        },
        PropertyDef {
            name: "co_argcount",
            get: code_argcount,
            set: None,
            delete: None,
        },
        PropertyDef {
            name: "co_varnames",
            get: code_varnames,
            set: None,
            delete: None,
        },
        PropertyDef {
            name: "co_freevars",
            get: code_freevars,
            set: None,
            delete: None,
        },
    ],
};

#[derive(Debug, Clone, Default)]
pub struct Code {
    pub name: String,
    pub filename: String,
    pub first_line: u32,
    pub argcount: usize,
    pub kwonlyargcount: usize,
    /// Parameters first, then other locals.
    pub varnames: Vec<String>,
    pub names: Vec<String>,
    pub freevars: Vec<String>,
    pub cellvars: Vec<String>,
    pub consts: Vec<ObjectRef>,
    pub instructions: Vec<u8>,
}

impl Code {
    pub fn new(name: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            first_line: 1,
            ..Self::default()
        }
    }

    /// Number of free variables, which any closure must match.
    pub fn num_free(&self) -> usize {
        self.freevars.len()
    }

    /// The first constant when it is a `str`.
    pub fn doc(&self) -> Option<ObjectRef> {
        self.consts
            .first()
            .filter(|c| downcast_ref::<Str>(c).is_some())
            .cloned()
    }
}

fn code_of<'a>(this: &'a ObjectRef, attr: &str) -> PyResult<&'a Code> {
    downcast_ref::<Code>(this).ok_or_else(|| {
        Exception::from_code(&DESCRIPTOR_MISAPPLIED, &[attr, "code", type_name(this)])
    })
}

fn names_tuple(names: &[String]) -> ObjectRef {
    tuple(names.iter().map(|n| string(n)).collect())
}

fn code_name(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(string(&code_of(this, "co_name")?.name))
}

fn code_filename(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(string(&code_of(this, "co_filename")?.filename))
}

fn code_argcount(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(int(code_of(this, "co_argcount")?.argcount as i64))
}

fn code_varnames(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(names_tuple(&code_of(this, "co_varnames")?.varnames))
}

fn code_freevars(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(names_tuple(&code_of(this, "co_freevars")?.freevars))
}

impl Object for Code {
    fn type_of(&self) -> &'static Type {
        &CODE_TYPE
    }

    fn as_repr(&self) -> Option<&dyn Repr> {
        Some(self)
    }
}

impl Repr for Code {
    fn repr(&self) -> PyResult<String> {
        Ok(format!(
            "<code object {} at {:#x}, file \"{}\", line {}>",
            self.name, self as *const Self as usize, self.filename, self.first_line
        ))
    }
}
