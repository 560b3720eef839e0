//! Static type descriptors.
//!
//! A [`Type`] carries a name, documentation and two static tables: builtin
//! methods (bound to the receiver on attribute access) and properties
//! (get/set/delete triples). Tables hold plain function pointers so
//! descriptors can live in `static`s.

use std::fmt;

use crate::runtime::{dict::DictRef, exception::PyResult, object::ObjectRef};

pub type MethodFn = fn(&ObjectRef, &[ObjectRef], Option<&DictRef>) -> PyResult<ObjectRef>;
pub type GetterFn = fn(&ObjectRef) -> PyResult<ObjectRef>;
pub type SetterFn = fn(&ObjectRef, ObjectRef) -> PyResult<()>;
pub type DeleterFn = fn(&ObjectRef) -> PyResult<()>;

pub struct MethodDef {
    pub name: &'static str,
    pub doc: &'static str,
    pub func: MethodFn,
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodDef({})", self.name)
    }
}

/// A computed attribute. A missing setter makes the attribute read-only; a
/// missing deleter is resolved by the setter's own policy (see
/// [`crate::runtime::attribute::del_attr`]).
pub struct PropertyDef {
    pub name: &'static str,
    pub get: GetterFn,
    pub set: Option<SetterFn>,
    pub delete: Option<DeleterFn>,
}

impl fmt::Debug for PropertyDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyDef({})", self.name)
    }
}

pub struct Type {
    pub name: &'static str,
    pub doc: &'static str,
    pub methods: &'static [MethodDef],
    pub properties: &'static [PropertyDef],
}

impl Type {
    pub const fn new(name: &'static str, doc: &'static str) -> Self {
        Self {
            name,
            doc,
            methods: &[],
            properties: &[],
        }
    }

    pub fn method(&self, name: &str) -> Option<&'static MethodDef> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn property(&self, name: &str) -> Option<&'static PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class '{}'>", self.name)
    }
}
