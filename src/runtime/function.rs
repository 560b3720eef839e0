//! User-defined functions.
//!
//! A [`Function`] binds a compiled [`Code`] unit to the globals of its
//! defining module plus any positional defaults, keyword-only defaults and
//! closure cells. Calling it forwards all of that, together with a fresh
//! locals dict, to the runtime's evaluator. Argument binding itself is the
//! evaluator's job.

use std::{cell::RefCell, rc::Rc};

use crate::{
    diagnostics::{
        ATTRIBUTE_TYPE, CLOSURE_SIZE_MISMATCH, CODE_FREE_VARS_MISMATCH, DESCRIPTOR_MISAPPLIED,
    },
    runtime::{
        closure::{Closure, closure_tuple},
        code::Code,
        context::{CallRequest, Runtime},
        dict::{Dict, DictRef},
        exception::{Exception, PyResult},
        leak_detector,
        method::BoundMethod,
        object::{Callable, Descriptor, Object, ObjectRef, Repr, downcast, downcast_ref, type_name},
        tuple::Tuple,
        types::{PropertyDef, Type},
        value::{Str, is_none, none, string},
    },
};

pub static FUNCTION_TYPE: Type = Type {
    name: "function",
    doc: "function(code, globals, qualname) -> function\n\n\
          Create a function object bound to a code unit and a globals dict.",
    methods: &[],
    properties: &[
        PropertyDef {
            name: "__code__",
            get: get_code,
            set: Some(set_code),
            delete: None,
        },
        PropertyDef {
            name: "__defaults__",
            get: get_defaults,
            set: Some(set_defaults),
            delete: Some(del_defaults),
        },
        PropertyDef {
            name: "__kwdefaults__",
            get: get_kwdefaults,
            set: Some(set_kwdefaults),
            delete: Some(del_kwdefaults),
        },
        PropertyDef {
            name: "__annotations__",
            get: get_annotations,
            set: Some(set_annotations),
            delete: Some(del_annotations),
        },
        PropertyDef {
            name: "__dict__",
            get: get_dict,
            set: Some(set_dict),
            delete: None,
        },
        PropertyDef {
            name: "__name__",
            get: get_name,
            set: Some(set_name),
            delete: None,
        },
        PropertyDef {
            name: "__qualname__",
            get: get_qualname,
            set: Some(set_qualname),
            delete: None,
        },
        PropertyDef {
            name: "__doc__",
            get: get_doc,
            set: Some(set_doc),
            delete: None,
        },
        PropertyDef {
            name: "__module__",
            get: get_module,
            set: Some(set_module),
            delete: None,
        },
        PropertyDef {
            name: "__globals__",
            get: get_globals,
            set: None,
            delete: None,
        },
        PropertyDef {
            name: "__closure__",
            get: get_closure,
            set: None,
            delete: None,
        },
    ],
};

#[derive(Debug)]
pub struct Function {
    code: RefCell<Rc<Code>>,
    globals: DictRef,
    defaults: RefCell<Option<Rc<Tuple>>>,
    kwdefaults: RefCell<Option<DictRef>>,
    closure: RefCell<Option<Closure>>,
    doc: RefCell<ObjectRef>,
    name: RefCell<String>,
    qualname: RefCell<String>,
    dict: RefCell<DictRef>,
    module: RefCell<ObjectRef>,
    annotations: RefCell<Option<DictRef>>,
}

impl Function {
    /// Creates a function for `code` in the module namespace `globals`.
    ///
    /// An empty `qualname` falls back to the code's name. The docstring is the
    /// code's first constant when that is a `str`, and the module is
    /// `globals["__name__"]`; both are `None` otherwise. Neither `code` nor
    /// `globals` is modified.
    pub fn new(code: Rc<Code>, globals: DictRef, qualname: &str) -> Rc<Self> {
        leak_detector::record_function();
        let name = code.name.clone();
        let qualname = if qualname.is_empty() {
            name.clone()
        } else {
            qualname.to_string()
        };
        let doc = code.doc().unwrap_or_else(none);
        let module = globals.get_str("__name__").unwrap_or_else(none);
        Rc::new(Self {
            code: RefCell::new(code),
            globals,
            defaults: RefCell::new(None),
            kwdefaults: RefCell::new(None),
            closure: RefCell::new(None),
            doc: RefCell::new(doc),
            name: RefCell::new(name),
            qualname: RefCell::new(qualname),
            dict: RefCell::new(Dict::new()),
            module: RefCell::new(module),
            annotations: RefCell::new(None),
        })
    }

    pub fn code(&self) -> Rc<Code> {
        Rc::clone(&self.code.borrow())
    }

    pub fn globals(&self) -> &DictRef {
        &self.globals
    }

    pub fn defaults(&self) -> Option<Rc<Tuple>> {
        self.defaults.borrow().clone()
    }

    pub fn kwdefaults(&self) -> Option<DictRef> {
        self.kwdefaults.borrow().clone()
    }

    pub fn closure(&self) -> Option<Closure> {
        self.closure.borrow().clone()
    }

    pub fn annotations(&self) -> Option<DictRef> {
        self.annotations.borrow().clone()
    }

    pub fn dict(&self) -> DictRef {
        Rc::clone(&self.dict.borrow())
    }

    pub fn doc(&self) -> ObjectRef {
        self.doc.borrow().clone()
    }

    pub fn module(&self) -> ObjectRef {
        self.module.borrow().clone()
    }

    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    pub fn qualname(&self) -> String {
        self.qualname.borrow().clone()
    }

    fn closure_len(&self) -> usize {
        self.closure.borrow().as_ref().map_or(0, |c| c.len())
    }

    /// Replaces the code unit. Its free-variable count must equal the
    /// current closure length; on mismatch nothing changes.
    pub fn set_code(&self, code: Rc<Code>) -> PyResult<()> {
        let nclosure = self.closure_len();
        let nfree = code.num_free();
        if nfree != nclosure {
            return Err(Exception::from_code(
                &CODE_FREE_VARS_MISMATCH,
                &[&self.name(), &nclosure.to_string(), &nfree.to_string()],
            ));
        }
        *self.code.borrow_mut() = code;
        Ok(())
    }

    /// Installs closure cells. Their count must equal the code's
    /// free-variable count; `None` counts as zero cells.
    pub fn set_closure(&self, closure: Option<Closure>) -> PyResult<()> {
        let nfree = self.code.borrow().num_free();
        let ncells = closure.as_ref().map_or(0, |c| c.len());
        if ncells != nfree {
            return Err(Exception::from_code(
                &CLOSURE_SIZE_MISMATCH,
                &[&self.name(), &nfree.to_string(), &ncells.to_string()],
            ));
        }
        *self.closure.borrow_mut() = closure;
        Ok(())
    }

    pub fn set_defaults(&self, defaults: Option<Rc<Tuple>>) {
        *self.defaults.borrow_mut() = defaults;
    }

    pub fn set_kwdefaults(&self, kwdefaults: Option<DictRef>) {
        *self.kwdefaults.borrow_mut() = kwdefaults;
    }

    pub fn set_annotations(&self, annotations: Option<DictRef>) {
        *self.annotations.borrow_mut() = annotations;
    }

    pub fn set_dict(&self, dict: DictRef) {
        *self.dict.borrow_mut() = dict;
    }

    pub fn set_name(&self, name: &str) {
        *self.name.borrow_mut() = name.to_string();
    }

    pub fn set_qualname(&self, qualname: &str) {
        *self.qualname.borrow_mut() = qualname.to_string();
    }

    pub fn set_doc(&self, doc: ObjectRef) {
        *self.doc.borrow_mut() = doc;
    }

    pub fn set_module(&self, module: ObjectRef) {
        *self.module.borrow_mut() = module;
    }

    /// Snapshot of everything the evaluator needs for one invocation.
    pub fn call_request(
        &self,
        rt: &Runtime,
        args: &[ObjectRef],
        kwargs: Option<&DictRef>,
    ) -> CallRequest {
        CallRequest {
            code: self.code(),
            globals: Rc::clone(&self.globals),
            locals: Dict::with_capacity(rt.config().locals_capacity),
            args: args.to_vec(),
            kwargs: kwargs.cloned(),
            defaults: self.defaults(),
            kwdefaults: self.kwdefaults(),
            closure: self.closure(),
        }
    }
}

impl Object for Function {
    fn type_of(&self) -> &'static Type {
        &FUNCTION_TYPE
    }

    fn as_repr(&self) -> Option<&dyn Repr> {
        Some(self)
    }

    fn as_callable(&self) -> Option<&dyn Callable> {
        Some(self)
    }

    fn as_descriptor(&self) -> Option<&dyn Descriptor> {
        Some(self)
    }

    fn instance_dict(&self) -> Option<DictRef> {
        Some(self.dict())
    }
}

impl Callable for Function {
    fn call(
        &self,
        rt: &Runtime,
        args: &[ObjectRef],
        kwargs: Option<&DictRef>,
    ) -> PyResult<ObjectRef> {
        let request = self.call_request(rt, args, kwargs);
        tracing::debug!(
            function = %self.qualname.borrow(),
            positional = args.len(),
            keywords = kwargs.map_or(0, |k| k.len()),
            "calling function"
        );
        rt.evaluator().execute_call(rt, request)
    }
}

impl Descriptor for Function {
    /// Class-level access (`instance` is `None`) returns the function
    /// itself; instance access binds it.
    fn descriptor_get(
        &self,
        this: &ObjectRef,
        instance: &ObjectRef,
        _owner: &ObjectRef,
    ) -> PyResult<ObjectRef> {
        if is_none(instance) {
            return Ok(this.clone());
        }
        Ok(BoundMethod::new(instance.clone(), this.clone()) as ObjectRef)
    }
}

impl Repr for Function {
    fn repr(&self) -> PyResult<String> {
        Ok(format!(
            "<function {} at {:#x}>",
            self.qualname.borrow(),
            self as *const Self as usize
        ))
    }
}

fn function_of<'a>(this: &'a ObjectRef, attr: &str) -> PyResult<&'a Function> {
    downcast_ref::<Function>(this).ok_or_else(|| {
        Exception::from_code(&DESCRIPTOR_MISAPPLIED, &[attr, "function", type_name(this)])
    })
}

fn attribute_type(attr: &str, expected: &str) -> Exception {
    Exception::from_code(&ATTRIBUTE_TYPE, &[attr, expected])
}

fn optional<T>(value: Option<Rc<T>>) -> ObjectRef
where
    T: Object,
{
    match value {
        Some(v) => v as ObjectRef,
        None => none(),
    }
}

fn get_code(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(function_of(this, "__code__")?.code() as ObjectRef)
}

fn set_code(this: &ObjectRef, value: ObjectRef) -> PyResult<()> {
    let f = function_of(this, "__code__")?;
    let code = downcast::<Code>(&value).ok_or_else(|| attribute_type("__code__", "code"))?;
    f.set_code(code)
}

fn get_defaults(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(optional(function_of(this, "__defaults__")?.defaults()))
}

fn set_defaults(this: &ObjectRef, value: ObjectRef) -> PyResult<()> {
    let f = function_of(this, "__defaults__")?;
    if is_none(&value) {
        f.set_defaults(None);
        return Ok(());
    }
    let defaults =
        downcast::<Tuple>(&value).ok_or_else(|| attribute_type("__defaults__", "tuple"))?;
    f.set_defaults(Some(defaults));
    Ok(())
}

fn del_defaults(this: &ObjectRef) -> PyResult<()> {
    function_of(this, "__defaults__")?.set_defaults(None);
    Ok(())
}

fn get_kwdefaults(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(optional(function_of(this, "__kwdefaults__")?.kwdefaults()))
}

fn set_kwdefaults(this: &ObjectRef, value: ObjectRef) -> PyResult<()> {
    let f = function_of(this, "__kwdefaults__")?;
    if is_none(&value) {
        f.set_kwdefaults(None);
        return Ok(());
    }
    let kwdefaults =
        downcast::<Dict>(&value).ok_or_else(|| attribute_type("__kwdefaults__", "dict"))?;
    f.set_kwdefaults(Some(kwdefaults));
    Ok(())
}

fn del_kwdefaults(this: &ObjectRef) -> PyResult<()> {
    function_of(this, "__kwdefaults__")?.set_kwdefaults(None);
    Ok(())
}

fn get_annotations(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(optional(function_of(this, "__annotations__")?.annotations()))
}

fn set_annotations(this: &ObjectRef, value: ObjectRef) -> PyResult<()> {
    let f = function_of(this, "__annotations__")?;
    if is_none(&value) {
        f.set_annotations(None);
        return Ok(());
    }
    let annotations =
        downcast::<Dict>(&value).ok_or_else(|| attribute_type("__annotations__", "dict"))?;
    f.set_annotations(Some(annotations));
    Ok(())
}

fn del_annotations(this: &ObjectRef) -> PyResult<()> {
    function_of(this, "__annotations__")?.set_annotations(None);
    Ok(())
}

fn get_dict(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(function_of(this, "__dict__")?.dict() as ObjectRef)
}

fn set_dict(this: &ObjectRef, value: ObjectRef) -> PyResult<()> {
    let f = function_of(this, "__dict__")?;
    let dict = downcast::<Dict>(&value).ok_or_else(|| attribute_type("__dict__", "dict"))?;
    f.set_dict(dict);
    Ok(())
}

fn get_name(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(string(&function_of(this, "__name__")?.name()))
}

fn set_name(this: &ObjectRef, value: ObjectRef) -> PyResult<()> {
    let f = function_of(this, "__name__")?;
    let name = downcast_ref::<Str>(&value).ok_or_else(|| attribute_type("__name__", "string"))?;
    f.set_name(name.as_str());
    Ok(())
}

fn get_qualname(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(string(&function_of(this, "__qualname__")?.qualname()))
}

fn set_qualname(this: &ObjectRef, value: ObjectRef) -> PyResult<()> {
    let f = function_of(this, "__qualname__")?;
    let qualname =
        downcast_ref::<Str>(&value).ok_or_else(|| attribute_type("__qualname__", "string"))?;
    f.set_qualname(qualname.as_str());
    Ok(())
}

fn get_doc(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(function_of(this, "__doc__")?.doc())
}

fn set_doc(this: &ObjectRef, value: ObjectRef) -> PyResult<()> {
    function_of(this, "__doc__")?.set_doc(value);
    Ok(())
}

fn get_module(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(function_of(this, "__module__")?.module())
}

fn set_module(this: &ObjectRef, value: ObjectRef) -> PyResult<()> {
    function_of(this, "__module__")?.set_module(value);
    Ok(())
}

fn get_globals(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(function_of(this, "__globals__")?.globals().clone() as ObjectRef)
}

fn get_closure(this: &ObjectRef) -> PyResult<ObjectRef> {
    Ok(match function_of(this, "__closure__")?.closure() {
        Some(closure) => closure_tuple(&closure),
        None => none(),
    })
}
