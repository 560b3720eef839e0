//! Generic attribute access.
//!
//! Reads resolve in this order: the object's own attribute hook, the type's
//! property table, the per-instance dict, then the type's method table
//! (bound to the receiver). Writes and deletes go to a property when one
//! matches and to the instance dict otherwise.

use crate::{
    diagnostics::{NO_ATTRIBUTE, READONLY_ATTRIBUTE},
    runtime::{
        exception::{Exception, ExceptionKind, PyResult},
        method::BuiltinMethod,
        object::{ObjectRef, type_name},
        value::{none, string},
    },
};

fn no_attribute(obj: &ObjectRef, name: &str) -> Exception {
    Exception::from_code(&NO_ATTRIBUTE, &[type_name(obj), name])
}

fn read_only(obj: &ObjectRef, name: &str) -> Exception {
    Exception::from_code(&READONLY_ATTRIBUTE, &[name, type_name(obj)])
}

pub fn get_attr(obj: &ObjectRef, name: &str) -> PyResult<ObjectRef> {
    if let Some(hook) = obj.as_get_attr() {
        if let Some(value) = hook.get_attr(obj, name)? {
            return Ok(value);
        }
    }
    let ty = obj.type_of();
    if let Some(prop) = ty.property(name) {
        return (prop.get)(obj);
    }
    if let Some(value) = obj.instance_dict().and_then(|d| d.get_str(name)) {
        return Ok(value);
    }
    if let Some(def) = ty.method(name) {
        return Ok(BuiltinMethod::new(obj.clone(), def) as ObjectRef);
    }
    Err(no_attribute(obj, name))
}

/// Like [`get_attr`] but maps `AttributeError` to `None`.
pub fn lookup_attr(obj: &ObjectRef, name: &str) -> PyResult<Option<ObjectRef>> {
    match get_attr(obj, name) {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is(ExceptionKind::AttributeError) => Ok(None),
        Err(err) => Err(err),
    }
}

pub fn set_attr(obj: &ObjectRef, name: &str, value: ObjectRef) -> PyResult<()> {
    let ty = obj.type_of();
    if let Some(prop) = ty.property(name) {
        return match prop.set {
            Some(set) => set(obj, value),
            None => Err(read_only(obj, name)),
        };
    }
    match obj.instance_dict() {
        Some(dict) => {
            dict.set_str(name, value);
            Ok(())
        }
        None if ty.method(name).is_some() => Err(read_only(obj, name)),
        None => Err(no_attribute(obj, name)),
    }
}

/// Deletes an attribute. A property without a deleter hands `None` to its
/// setter, which either clears the slot or rejects the value.
pub fn del_attr(obj: &ObjectRef, name: &str) -> PyResult<()> {
    let ty = obj.type_of();
    if let Some(prop) = ty.property(name) {
        return match (prop.delete, prop.set) {
            (Some(delete), _) => delete(obj),
            (None, Some(set)) => set(obj, none()),
            (None, None) => Err(read_only(obj, name)),
        };
    }
    let Some(dict) = obj.instance_dict() else {
        return Err(no_attribute(obj, name));
    };
    if !dict.contains_str(name) {
        return Err(no_attribute(obj, name));
    }
    dict.remove(&string(name)).map(|_| ())
}
