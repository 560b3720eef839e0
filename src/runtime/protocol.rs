//! Capability-dispatched operations.
//!
//! Each function probes its operand for the relevant capability at call time
//! and applies the documented fallback when the capability is absent.
//! Failures raised by a capability implementation are returned unchanged.

use crate::{
    diagnostics::{
        NO_ITEM_ASSIGNMENT, NO_ITEM_DELETION, NO_MEMBERSHIP, NOT_AN_ITERATOR, NOT_CALLABLE,
        NOT_ITERABLE, NOT_SUBSCRIPTABLE,
    },
    runtime::{
        context::Runtime,
        dict::DictRef,
        exception::{Exception, PyResult},
        hash_key::hash_key,
        object::{ObjectRef, is, type_name},
    },
};

/// `a == b`: left operand first, then the reflected operand, then identity.
pub fn equals(a: &ObjectRef, b: &ObjectRef) -> PyResult<bool> {
    if let Some(eq) = a.as_rich_eq() {
        if let Some(result) = eq.rich_eq(b)? {
            return Ok(result);
        }
    }
    if let Some(eq) = b.as_rich_eq() {
        if let Some(result) = eq.rich_eq(a)? {
            return Ok(result);
        }
    }
    Ok(is(a, b))
}

/// `a != b`, with the same operand order and fallback as [`equals`].
pub fn not_equals(a: &ObjectRef, b: &ObjectRef) -> PyResult<bool> {
    if let Some(eq) = a.as_rich_eq() {
        if let Some(result) = eq.rich_ne(b)? {
            return Ok(result);
        }
    }
    if let Some(eq) = b.as_rich_eq() {
        if let Some(result) = eq.rich_ne(a)? {
            return Ok(result);
        }
    }
    Ok(!is(a, b))
}

pub fn hash(obj: &ObjectRef) -> PyResult<u64> {
    hash_key(obj)
}

fn generic_repr(obj: &ObjectRef) -> String {
    format!("<{} object>", type_name(obj))
}

pub fn repr(obj: &ObjectRef) -> PyResult<String> {
    match obj.as_repr() {
        Some(r) => r.repr(),
        None => Ok(generic_repr(obj)),
    }
}

/// `str(obj)`: the stringify capability, else the representation.
pub fn str(obj: &ObjectRef) -> PyResult<String> {
    if let Some(s) = obj.as_stringify() {
        return s.to_str();
    }
    repr(obj)
}

pub fn iterate(obj: &ObjectRef) -> PyResult<ObjectRef> {
    match obj.as_iterable() {
        Some(iterable) => iterable.iter(obj),
        None => Err(Exception::from_code(&NOT_ITERABLE, &[type_name(obj)])),
    }
}

pub fn next(iterator: &ObjectRef) -> PyResult<Option<ObjectRef>> {
    match iterator.as_iterator() {
        Some(it) => it.next(),
        None => Err(Exception::from_code(&NOT_AN_ITERATOR, &[type_name(iterator)])),
    }
}

/// Drains `obj`'s iterator into a vector.
pub fn collect(obj: &ObjectRef) -> PyResult<Vec<ObjectRef>> {
    let iterator = iterate(obj)?;
    let mut items = Vec::new();
    while let Some(item) = next(&iterator)? {
        items.push(item);
    }
    Ok(items)
}

pub fn get_item(obj: &ObjectRef, key: &ObjectRef) -> PyResult<ObjectRef> {
    match obj.as_get_item() {
        Some(g) => g.get_item(key),
        None => Err(Exception::from_code(&NOT_SUBSCRIPTABLE, &[type_name(obj)])),
    }
}

pub fn set_item(obj: &ObjectRef, key: ObjectRef, value: ObjectRef) -> PyResult<()> {
    match obj.as_set_item() {
        Some(s) => s.set_item(key, value),
        None => Err(Exception::from_code(&NO_ITEM_ASSIGNMENT, &[type_name(obj)])),
    }
}

pub fn del_item(obj: &ObjectRef, key: &ObjectRef) -> PyResult<()> {
    match obj.as_del_item() {
        Some(d) => d.del_item(key),
        None => Err(Exception::from_code(&NO_ITEM_DELETION, &[type_name(obj)])),
    }
}

/// `item in container`. Without a containment capability, falls back to a
/// linear scan of the container's iterator.
pub fn contains(container: &ObjectRef, item: &ObjectRef) -> PyResult<bool> {
    if let Some(c) = container.as_contains() {
        return c.contains(item);
    }
    if container.as_iterable().is_none() {
        return Err(Exception::from_code(&NO_MEMBERSHIP, &[type_name(container)]));
    }
    let iterator = iterate(container)?;
    while let Some(candidate) = next(&iterator)? {
        if is(&candidate, item) || equals(&candidate, item)? {
            return Ok(true);
        }
    }
    Ok(false)
}

pub fn call(
    rt: &Runtime,
    callable: &ObjectRef,
    args: &[ObjectRef],
    kwargs: Option<&DictRef>,
) -> PyResult<ObjectRef> {
    match callable.as_callable() {
        Some(c) => c.call(rt, args, kwargs),
        None => Err(Exception::from_code(&NOT_CALLABLE, &[type_name(callable)])),
    }
}

/// Runs the descriptor dispatch if `attr` supports it, else returns `attr`.
pub fn descriptor_get(
    attr: &ObjectRef,
    instance: &ObjectRef,
    owner: &ObjectRef,
) -> PyResult<ObjectRef> {
    match attr.as_descriptor() {
        Some(d) => d.descriptor_get(attr, instance, owner),
        None => Ok(attr.clone()),
    }
}
