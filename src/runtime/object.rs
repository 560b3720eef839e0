//! The universal object interface and its optional capabilities.
//!
//! Every runtime datum is an [`ObjectRef`], a shared `Rc<dyn Object>`. The
//! [`Object`] trait itself only reports a static [`Type`]; each optional
//! behaviour lives in its own narrow trait and is reached through an
//! `as_*` probe that returns `None` unless the concrete type opts in.
//! Generic operations in [`crate::runtime::protocol`] probe at call time and
//! fall back to a default policy when a capability is absent.

use std::{any::Any, fmt, rc::Rc};

use crate::runtime::{context::Runtime, dict::DictRef, exception::PyResult, types::Type};

pub type ObjectRef = Rc<dyn Object>;

/// Upcasting glue so `dyn Object` values can be downcast to concrete types.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

pub trait Object: AsAny + fmt::Debug {
    fn type_of(&self) -> &'static Type;

    fn as_rich_eq(&self) -> Option<&dyn RichEq> {
        None
    }

    fn as_hashable(&self) -> Option<&dyn Hashable> {
        None
    }

    fn as_repr(&self) -> Option<&dyn Repr> {
        None
    }

    fn as_stringify(&self) -> Option<&dyn Stringify> {
        None
    }

    fn as_iterable(&self) -> Option<&dyn Iterable> {
        None
    }

    fn as_iterator(&self) -> Option<&dyn IteratorNext> {
        None
    }

    fn as_get_item(&self) -> Option<&dyn GetItem> {
        None
    }

    fn as_set_item(&self) -> Option<&dyn SetItem> {
        None
    }

    fn as_del_item(&self) -> Option<&dyn DelItem> {
        None
    }

    fn as_contains(&self) -> Option<&dyn Contains> {
        None
    }

    fn as_callable(&self) -> Option<&dyn Callable> {
        None
    }

    fn as_descriptor(&self) -> Option<&dyn Descriptor> {
        None
    }

    fn as_get_attr(&self) -> Option<&dyn GetAttr> {
        None
    }

    /// The per-instance attribute table, for types that carry one.
    fn instance_dict(&self) -> Option<DictRef> {
        None
    }
}

/// Equality. `Ok(None)` means "not applicable to this operand", which lets
/// the generic operation retry with the other side.
pub trait RichEq {
    fn rich_eq(&self, other: &ObjectRef) -> PyResult<Option<bool>>;

    fn rich_ne(&self, other: &ObjectRef) -> PyResult<Option<bool>> {
        Ok(self.rich_eq(other)?.map(|equal| !equal))
    }
}

/// Content hashing. Must agree with [`RichEq`]: equal values hash equal.
pub trait Hashable {
    fn hash_value(&self) -> PyResult<u64>;
}

pub trait Repr {
    fn repr(&self) -> PyResult<String>;
}

pub trait Stringify {
    fn to_str(&self) -> PyResult<String>;
}

pub trait Iterable {
    /// Returns a fresh iterator; `this` is the object being iterated.
    fn iter(&self, this: &ObjectRef) -> PyResult<ObjectRef>;
}

pub trait IteratorNext {
    /// Returns the next element, or `None` once exhausted.
    fn next(&self) -> PyResult<Option<ObjectRef>>;
}

pub trait GetItem {
    fn get_item(&self, key: &ObjectRef) -> PyResult<ObjectRef>;
}

pub trait SetItem {
    fn set_item(&self, key: ObjectRef, value: ObjectRef) -> PyResult<()>;
}

pub trait DelItem {
    fn del_item(&self, key: &ObjectRef) -> PyResult<()>;
}

pub trait Contains {
    fn contains(&self, item: &ObjectRef) -> PyResult<bool>;
}

pub trait Callable {
    fn call(&self, rt: &Runtime, args: &[ObjectRef], kwargs: Option<&DictRef>)
    -> PyResult<ObjectRef>;
}

/// Attribute-access customisation used to build bound methods.
///
/// `instance` is the `None` singleton when the attribute is read from the
/// owning type itself rather than from an instance of it.
pub trait Descriptor {
    fn descriptor_get(
        &self,
        this: &ObjectRef,
        instance: &ObjectRef,
        owner: &ObjectRef,
    ) -> PyResult<ObjectRef>;
}

/// Custom attribute resolution for containers that own descriptors.
///
/// Returning `Ok(None)` defers to the generic type-table lookup.
pub trait GetAttr {
    fn get_attr(&self, this: &ObjectRef, name: &str) -> PyResult<Option<ObjectRef>>;
}

/// Borrows `obj` as a concrete `T`.
pub fn downcast_ref<T: Object>(obj: &ObjectRef) -> Option<&T> {
    AsAny::as_any(&**obj).downcast_ref::<T>()
}

/// Returns a typed handle to `obj` if it is a `T`.
pub fn downcast<T: Object>(obj: &ObjectRef) -> Option<Rc<T>> {
    AsAny::into_any_rc(Rc::clone(obj)).downcast::<T>().ok()
}

pub fn is_instance<T: Object>(obj: &ObjectRef) -> bool {
    AsAny::as_any(&**obj).is::<T>()
}

/// Identity comparison (`a is b`).
pub fn is(a: &ObjectRef, b: &ObjectRef) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Stable address of the object, used for identity hashing and reprs.
pub fn address(obj: &ObjectRef) -> usize {
    Rc::as_ptr(obj) as *const () as usize
}

pub fn type_name(obj: &ObjectRef) -> &'static str {
    obj.type_of().name
}
