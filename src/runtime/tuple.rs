use std::rc::Rc;

use crate::runtime::{
    exception::PyResult,
    iterator::SeqIterator,
    object::{Iterable, Object, ObjectRef, Repr, RichEq, downcast_ref},
    protocol::{equals, repr},
    types::Type,
};

pub static TUPLE_TYPE: Type = Type::new(
    "tuple",
    "tuple() -> empty tuple\ntuple(iterable) -> tuple initialized from iterable's items",
);

/// An immutable sequence; used here for call arguments, defaults and
/// `(key, value)` pairs.
#[derive(Debug, Clone, Default)]
pub struct Tuple {
    items: Vec<ObjectRef>,
}

impl Tuple {
    pub fn new(items: Vec<ObjectRef>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ObjectRef] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ObjectRef> {
        self.items.get(index)
    }
}

impl Object for Tuple {
    fn type_of(&self) -> &'static Type {
        &TUPLE_TYPE
    }

    fn as_rich_eq(&self) -> Option<&dyn RichEq> {
        Some(self)
    }

    fn as_repr(&self) -> Option<&dyn Repr> {
        Some(self)
    }

    fn as_iterable(&self) -> Option<&dyn Iterable> {
        Some(self)
    }
}

impl RichEq for Tuple {
    fn rich_eq(&self, other: &ObjectRef) -> PyResult<Option<bool>> {
        let Some(other) = downcast_ref::<Tuple>(other) else {
            return Ok(None);
        };
        if self.len() != other.len() {
            return Ok(Some(false));
        }
        for (a, b) in self.items.iter().zip(other.items.iter()) {
            if !equals(a, b)? {
                return Ok(Some(false));
            }
        }
        Ok(Some(true))
    }
}

impl Repr for Tuple {
    fn repr(&self) -> PyResult<String> {
        let parts = self.items.iter().map(repr).collect::<PyResult<Vec<_>>>()?;
        if parts.len() == 1 {
            Ok(format!("({},)", parts[0]))
        } else {
            Ok(format!("({})", parts.join(", ")))
        }
    }
}

impl Iterable for Tuple {
    fn iter(&self, _this: &ObjectRef) -> PyResult<ObjectRef> {
        Ok(Rc::new(SeqIterator::new(self.items.clone())))
    }
}
