//! A minimal class/instance pair.
//!
//! Classes hold a namespace dict and create instances when called.
//! Attribute reads on either side run the descriptor dispatch on whatever
//! the class namespace yields, which is how functions stored on a class
//! become bound methods. There is no inheritance.

use std::rc::{Rc, Weak};

use crate::{
    diagnostics::{NO_ATTRIBUTE, WRONG_ARGUMENT_COUNT},
    runtime::{
        context::Runtime,
        dict::{Dict, DictRef},
        exception::{Exception, PyResult},
        object::{Callable, GetAttr, Object, ObjectRef, Repr},
        protocol::{call, descriptor_get},
        types::Type,
        value::none,
    },
};

pub static CLASS_TYPE: Type = Type::new("type", "type(name, dict) -> a new class");
pub static INSTANCE_TYPE: Type = Type::new("object", "An instance of a user-defined class.");

#[derive(Debug)]
pub struct Class {
    name: String,
    dict: DictRef,
    this: Weak<Class>,
}

impl Class {
    pub fn new(name: &str, dict: DictRef) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            name: name.to_string(),
            dict,
            this: this.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dict(&self) -> &DictRef {
        &self.dict
    }

    /// Looks `name` up in the class namespace and runs the descriptor
    /// dispatch on it for `instance` (`None` for class-level access).
    fn lookup(&self, name: &str, instance: &ObjectRef) -> PyResult<Option<ObjectRef>> {
        let Some(attr) = self.dict.get_str(name) else {
            return Ok(None);
        };
        let owner: ObjectRef = match self.this.upgrade() {
            Some(class) => class as ObjectRef,
            None => none(),
        };
        descriptor_get(&attr, instance, &owner).map(Some)
    }
}

impl Object for Class {
    fn type_of(&self) -> &'static Type {
        &CLASS_TYPE
    }

    fn as_repr(&self) -> Option<&dyn Repr> {
        Some(self)
    }

    fn as_callable(&self) -> Option<&dyn Callable> {
        Some(self)
    }

    fn as_get_attr(&self) -> Option<&dyn GetAttr> {
        Some(self)
    }

    fn instance_dict(&self) -> Option<DictRef> {
        Some(self.dict.clone())
    }
}

impl GetAttr for Class {
    fn get_attr(&self, _this: &ObjectRef, name: &str) -> PyResult<Option<ObjectRef>> {
        self.lookup(name, &none())
    }
}

impl Callable for Class {
    /// Creates an instance and runs `__init__` on it when the class
    /// defines one.
    fn call(
        &self,
        rt: &Runtime,
        args: &[ObjectRef],
        kwargs: Option<&DictRef>,
    ) -> PyResult<ObjectRef> {
        let Some(class) = self.this.upgrade() else {
            return Ok(none());
        };
        let instance: ObjectRef = Rc::new(Instance {
            class,
            dict: Dict::new(),
        });
        match self.lookup("__init__", &instance)? {
            Some(init) => {
                call(rt, &init, args, kwargs)?;
            }
            None => {
                let given = args.len() + kwargs.map_or(0, |k| k.len());
                if given > 0 {
                    return Err(Exception::from_code(
                        &WRONG_ARGUMENT_COUNT,
                        &[&self.name, "0", "s", &given.to_string()],
                    ));
                }
            }
        }
        Ok(instance)
    }
}

impl Repr for Class {
    fn repr(&self) -> PyResult<String> {
        Ok(format!("<class '{}'>", self.name))
    }
}

#[derive(Debug)]
pub struct Instance {
    class: Rc<Class>,
    dict: DictRef,
}

impl Instance {
    pub fn class(&self) -> &Rc<Class> {
        &self.class
    }
}

impl Object for Instance {
    fn type_of(&self) -> &'static Type {
        &INSTANCE_TYPE
    }

    fn as_repr(&self) -> Option<&dyn Repr> {
        Some(self)
    }

    fn as_get_attr(&self) -> Option<&dyn GetAttr> {
        Some(self)
    }

    fn instance_dict(&self) -> Option<DictRef> {
        Some(self.dict.clone())
    }
}

impl GetAttr for Instance {
    /// Own attributes shadow the class namespace.
    fn get_attr(&self, this: &ObjectRef, name: &str) -> PyResult<Option<ObjectRef>> {
        if let Some(value) = self.dict.get_str(name) {
            return Ok(Some(value));
        }
        match self.class.lookup(name, this)? {
            Some(value) => Ok(Some(value)),
            None => Err(Exception::from_code(&NO_ATTRIBUTE, &[&self.class.name, name])),
        }
    }
}

impl Repr for Instance {
    fn repr(&self) -> PyResult<String> {
        Ok(format!(
            "<{} object at {:#x}>",
            self.class.name,
            self as *const Self as usize
        ))
    }
}
