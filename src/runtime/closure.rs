use std::{cell::RefCell, rc::Rc};

use crate::{
    diagnostics::{CELL_EMPTY, DESCRIPTOR_MISAPPLIED},
    runtime::{
        exception::{Exception, PyResult},
        leak_detector,
        object::{Object, ObjectRef, Repr, downcast_ref, type_name},
        types::{PropertyDef, Type},
        value::tuple,
    },
};

pub static CELL_TYPE: Type = Type {
    name: "cell",
    doc: "Create a new cell object.",
    methods: &[],
    properties: &[PropertyDef {
        name: "cell_contents",
        get: cell_get_contents,
        set: Some(cell_set_contents),
        delete: Some(cell_del_contents),
    }],
};

/// A shared, mutable slot holding one captured variable.
///
/// Enclosing and nested scopes hold the same `Rc<Cell>`, so a write from
/// either side is visible to the other.
#[derive(Debug, Default)]
pub struct Cell {
    contents: RefCell<Option<ObjectRef>>,
}

/// Ordered cells for a code unit's free variables.
pub type Closure = Rc<[Rc<Cell>]>;

impl Cell {
    pub fn new(value: ObjectRef) -> Rc<Self> {
        leak_detector::record_cell();
        Rc::new(Self {
            contents: RefCell::new(Some(value)),
        })
    }

    pub fn empty() -> Rc<Self> {
        leak_detector::record_cell();
        Rc::new(Self::default())
    }

    pub fn get(&self) -> Option<ObjectRef> {
        self.contents.borrow().clone()
    }

    /// The stored value, or a `ValueError` if the cell is empty.
    pub fn contents(&self) -> PyResult<ObjectRef> {
        self.get()
            .ok_or_else(|| Exception::from_code(&CELL_EMPTY, &[]))
    }

    pub fn set(&self, value: ObjectRef) {
        *self.contents.borrow_mut() = Some(value);
    }

    pub fn clear(&self) {
        self.contents.borrow_mut().take();
    }
}

impl Object for Cell {
    fn type_of(&self) -> &'static Type {
        &CELL_TYPE
    }

    fn as_repr(&self) -> Option<&dyn Repr> {
        Some(self)
    }
}

impl Repr for Cell {
    fn repr(&self) -> PyResult<String> {
        let addr = self as *const Self as usize;
        Ok(match self.get() {
            Some(value) => format!(
                "<cell at {:#x}: {} object at {:#x}>",
                addr,
                type_name(&value),
                crate::runtime::object::address(&value)
            ),
            None => format!("<cell at {:#x}: empty>", addr),
        })
    }
}

/// Builds a closure from captured values, one fresh cell per value.
pub fn closure_from(values: impl IntoIterator<Item = ObjectRef>) -> Closure {
    values.into_iter().map(Cell::new).collect()
}

/// The closure as a tuple of cell objects.
pub fn closure_tuple(closure: &Closure) -> ObjectRef {
    tuple(
        closure
            .iter()
            .map(|cell| Rc::clone(cell) as ObjectRef)
            .collect(),
    )
}

fn cell_of<'a>(this: &'a ObjectRef) -> PyResult<&'a Cell> {
    downcast_ref::<Cell>(this).ok_or_else(|| {
        Exception::from_code(
            &DESCRIPTOR_MISAPPLIED,
            &["cell_contents", "cell", type_name(this)],
        )
    })
}

fn cell_get_contents(this: &ObjectRef) -> PyResult<ObjectRef> {
    cell_of(this)?.contents()
}

fn cell_set_contents(this: &ObjectRef, value: ObjectRef) -> PyResult<()> {
    cell_of(this)?.set(value);
    Ok(())
}

fn cell_del_contents(this: &ObjectRef) -> PyResult<()> {
    cell_of(this)?.clear();
    Ok(())
}
