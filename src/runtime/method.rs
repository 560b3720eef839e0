//! Method objects: builtin methods bound to their receiver, and functions
//! bound to an instance by the descriptor dispatch.

use std::rc::Rc;

use crate::{
    diagnostics::DESCRIPTOR_MISAPPLIED,
    runtime::{
        context::Runtime,
        dict::DictRef,
        exception::{Exception, PyResult},
        function::Function,
        leak_detector,
        object::{Callable, Object, ObjectRef, Repr, RichEq, address, downcast_ref, is, type_name},
        protocol::{self, repr},
        types::{MethodDef, PropertyDef, Type},
    },
};

pub static BUILTIN_METHOD_TYPE: Type = Type::new(
    "builtin_function_or_method",
    "A builtin method bound to its receiver.",
);

pub static METHOD_TYPE: Type = Type {
    name: "method",
    doc: "method(function, instance)\n\nCreate a bound instance method object.",
    methods: &[],
    properties: &[
        PropertyDef {
            name: "__self__",
            get: bound_self,
            set: None,
            delete: None,
        },
        PropertyDef {
            name: "__func__",
            get: bound_func,
            set: None,
            delete: None,
        },
    ],
};

/// An entry of a type's method table, bound to a receiver.
#[derive(Debug)]
pub struct BuiltinMethod {
    receiver: ObjectRef,
    def: &'static MethodDef,
}

impl BuiltinMethod {
    pub fn new(receiver: ObjectRef, def: &'static MethodDef) -> Rc<Self> {
        Rc::new(Self { receiver, def })
    }

    pub fn name(&self) -> &'static str {
        self.def.name
    }
}

impl Object for BuiltinMethod {
    fn type_of(&self) -> &'static Type {
        &BUILTIN_METHOD_TYPE
    }

    fn as_repr(&self) -> Option<&dyn Repr> {
        Some(self)
    }

    fn as_callable(&self) -> Option<&dyn Callable> {
        Some(self)
    }
}

impl Callable for BuiltinMethod {
    fn call(
        &self,
        _rt: &Runtime,
        args: &[ObjectRef],
        kwargs: Option<&DictRef>,
    ) -> PyResult<ObjectRef> {
        (self.def.func)(&self.receiver, args, kwargs)
    }
}

impl Repr for BuiltinMethod {
    fn repr(&self) -> PyResult<String> {
        Ok(format!(
            "<built-in method {} of {} object at {:#x}>",
            self.def.name,
            type_name(&self.receiver),
            address(&self.receiver)
        ))
    }
}

/// A callable paired with the instance it was read from. Calling it
/// prepends the instance to the positional arguments.
#[derive(Debug)]
pub struct BoundMethod {
    receiver: ObjectRef,
    func: ObjectRef,
}

impl BoundMethod {
    pub fn new(receiver: ObjectRef, func: ObjectRef) -> Rc<Self> {
        leak_detector::record_bound_method();
        Rc::new(Self { receiver, func })
    }

    pub fn receiver(&self) -> &ObjectRef {
        &self.receiver
    }

    pub fn func(&self) -> &ObjectRef {
        &self.func
    }
}

impl Object for BoundMethod {
    fn type_of(&self) -> &'static Type {
        &METHOD_TYPE
    }

    fn as_rich_eq(&self) -> Option<&dyn RichEq> {
        Some(self)
    }

    fn as_repr(&self) -> Option<&dyn Repr> {
        Some(self)
    }

    fn as_callable(&self) -> Option<&dyn Callable> {
        Some(self)
    }
}

impl Callable for BoundMethod {
    fn call(
        &self,
        rt: &Runtime,
        args: &[ObjectRef],
        kwargs: Option<&DictRef>,
    ) -> PyResult<ObjectRef> {
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push(self.receiver.clone());
        full.extend_from_slice(args);
        protocol::call(rt, &self.func, &full, kwargs)
    }
}

impl RichEq for BoundMethod {
    fn rich_eq(&self, other: &ObjectRef) -> PyResult<Option<bool>> {
        Ok(downcast_ref::<BoundMethod>(other)
            .map(|o| is(&o.receiver, &self.receiver) && is(&o.func, &self.func)))
    }
}

impl Repr for BoundMethod {
    fn repr(&self) -> PyResult<String> {
        let name = match downcast_ref::<Function>(&self.func) {
            Some(f) => f.qualname(),
            None => repr(&self.func)?,
        };
        Ok(format!(
            "<bound method {} of {}>",
            name,
            repr(&self.receiver)?
        ))
    }
}

fn bound_of<'a>(this: &'a ObjectRef, attr: &str) -> PyResult<&'a BoundMethod> {
    downcast_ref::<BoundMethod>(this).ok_or_else(|| {
        Exception::from_code(&DESCRIPTOR_MISAPPLIED, &[attr, "method", type_name(this)])
    })
}

fn bound_self(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(bound_of(this, "__self__")?.receiver.clone())
}

fn bound_func(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(bound_of(this, "__func__")?.func.clone())
}
