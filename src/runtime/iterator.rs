use std::cell::Cell;

use crate::runtime::{
    exception::PyResult,
    object::{Iterable, IteratorNext, Object, ObjectRef},
    types::Type,
};

pub static ITERATOR_TYPE: Type = Type::new("iterator", "A one-shot iterator over a snapshot.");

/// A finite, non-restartable iterator over items captured at creation.
#[derive(Debug)]
pub struct SeqIterator {
    items: Vec<ObjectRef>,
    pos: Cell<usize>,
}

impl SeqIterator {
    pub fn new(items: Vec<ObjectRef>) -> Self {
        Self {
            items,
            pos: Cell::new(0),
        }
    }

    pub fn remaining(&self) -> usize {
        self.items.len() - self.pos.get()
    }
}

impl Object for SeqIterator {
    fn type_of(&self) -> &'static Type {
        &ITERATOR_TYPE
    }

    fn as_iterable(&self) -> Option<&dyn Iterable> {
        Some(self)
    }

    fn as_iterator(&self) -> Option<&dyn IteratorNext> {
        Some(self)
    }
}

impl Iterable for SeqIterator {
    fn iter(&self, this: &ObjectRef) -> PyResult<ObjectRef> {
        Ok(this.clone())
    }
}

impl IteratorNext for SeqIterator {
    fn next(&self) -> PyResult<Option<ObjectRef>> {
        let pos = self.pos.get();
        match self.items.get(pos) {
            Some(item) => {
                self.pos.set(pos + 1);
                Ok(Some(item.clone()))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::runtime::{
        protocol::{collect, iterate, next},
        value::int,
    };

    #[test]
    fn exhausts_once_and_stays_exhausted() {
        let it: ObjectRef = Rc::new(SeqIterator::new(vec![int(1), int(2)]));
        assert_eq!(collect(&it).unwrap().len(), 2);
        assert!(next(&it).unwrap().is_none());
        assert!(collect(&it).unwrap().is_empty());
    }

    #[test]
    fn iterating_an_iterator_returns_itself() {
        let it: ObjectRef = Rc::new(SeqIterator::new(vec![int(1)]));
        let again = iterate(&it).unwrap();
        assert!(crate::runtime::object::is(&it, &again));
    }
}
