//! Scalar values the object model depends on: `None`, `bool`, `int`, `str`
//! and `bytes`.
//!
//! These are deliberately minimal. The full numeric and string types belong
//! to the builtin-types layer; the dict, function and eval/exec core only
//! needs textual keys, identity singletons and something hashable that is
//! not a string.

use std::rc::Rc;

use crate::runtime::{
    exception::PyResult,
    hash_key::{bytes_hash, int_hash, str_hash},
    object::{
        Hashable, Object, ObjectRef, Repr, RichEq, Stringify, downcast_ref, is_instance,
    },
    tuple::Tuple,
    types::Type,
};

pub static NONE_TYPE: Type = Type::new("NoneType", "The type of the None singleton.");
pub static BOOL_TYPE: Type = Type::new(
    "bool",
    "bool(x) -> bool\n\nReturns True when the argument x is true, False otherwise.",
);
pub static INT_TYPE: Type = Type::new("int", "int(x=0) -> integer");
pub static STR_TYPE: Type = Type::new("str", "str(object='') -> str");
pub static BYTES_TYPE: Type = Type::new("bytes", "bytes(iterable_of_ints) -> bytes");

thread_local! {
    static NONE: ObjectRef = Rc::new(NoneType);
    static TRUE: ObjectRef = Rc::new(Bool(true));
    static FALSE: ObjectRef = Rc::new(Bool(false));
}

/// The absent-value sentinel.
#[derive(Debug)]
pub struct NoneType;

impl Object for NoneType {
    fn type_of(&self) -> &'static Type {
        &NONE_TYPE
    }

    fn as_repr(&self) -> Option<&dyn Repr> {
        Some(self)
    }
}

impl Repr for NoneType {
    fn repr(&self) -> PyResult<String> {
        Ok("None".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Object for Bool {
    fn type_of(&self) -> &'static Type {
        &BOOL_TYPE
    }

    fn as_rich_eq(&self) -> Option<&dyn RichEq> {
        Some(self)
    }

    fn as_hashable(&self) -> Option<&dyn Hashable> {
        Some(self)
    }

    fn as_repr(&self) -> Option<&dyn Repr> {
        Some(self)
    }
}

impl RichEq for Bool {
    fn rich_eq(&self, other: &ObjectRef) -> PyResult<Option<bool>> {
        Ok(downcast_ref::<Bool>(other).map(|o| o.0 == self.0))
    }
}

impl Hashable for Bool {
    fn hash_value(&self) -> PyResult<u64> {
        Ok(int_hash(i64::from(self.0)))
    }
}

impl Repr for Bool {
    fn repr(&self) -> PyResult<String> {
        Ok(if self.0 { "True" } else { "False" }.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Int(pub i64);

impl Object for Int {
    fn type_of(&self) -> &'static Type {
        &INT_TYPE
    }

    fn as_rich_eq(&self) -> Option<&dyn RichEq> {
        Some(self)
    }

    fn as_hashable(&self) -> Option<&dyn Hashable> {
        Some(self)
    }

    fn as_repr(&self) -> Option<&dyn Repr> {
        Some(self)
    }
}

impl RichEq for Int {
    fn rich_eq(&self, other: &ObjectRef) -> PyResult<Option<bool>> {
        Ok(downcast_ref::<Int>(other).map(|o| o.0 == self.0))
    }
}

impl Hashable for Int {
    fn hash_value(&self) -> PyResult<u64> {
        Ok(int_hash(self.0))
    }
}

impl Repr for Int {
    fn repr(&self) -> PyResult<String> {
        Ok(self.0.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Str(Rc<str>);

impl Str {
    pub fn new(value: impl Into<Rc<str>>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_rc(&self) -> &Rc<str> {
        &self.0
    }
}

impl Object for Str {
    fn type_of(&self) -> &'static Type {
        &STR_TYPE
    }

    fn as_rich_eq(&self) -> Option<&dyn RichEq> {
        Some(self)
    }

    fn as_hashable(&self) -> Option<&dyn Hashable> {
        Some(self)
    }

    fn as_repr(&self) -> Option<&dyn Repr> {
        Some(self)
    }

    fn as_stringify(&self) -> Option<&dyn Stringify> {
        Some(self)
    }
}

impl RichEq for Str {
    fn rich_eq(&self, other: &ObjectRef) -> PyResult<Option<bool>> {
        Ok(downcast_ref::<Str>(other).map(|o| o.0 == self.0))
    }
}

impl Hashable for Str {
    fn hash_value(&self) -> PyResult<u64> {
        Ok(str_hash(&self.0))
    }
}

impl Repr for Str {
    fn repr(&self) -> PyResult<String> {
        Ok(quote_str(&self.0))
    }
}

impl Stringify for Str {
    fn to_str(&self) -> PyResult<String> {
        Ok(self.0.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bytes(Rc<[u8]>);

impl Bytes {
    pub fn new(value: impl Into<Rc<[u8]>>) -> Self {
        Self(value.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Object for Bytes {
    fn type_of(&self) -> &'static Type {
        &BYTES_TYPE
    }

    fn as_rich_eq(&self) -> Option<&dyn RichEq> {
        Some(self)
    }

    fn as_hashable(&self) -> Option<&dyn Hashable> {
        Some(self)
    }

    fn as_repr(&self) -> Option<&dyn Repr> {
        Some(self)
    }
}

impl RichEq for Bytes {
    fn rich_eq(&self, other: &ObjectRef) -> PyResult<Option<bool>> {
        Ok(downcast_ref::<Bytes>(other).map(|o| o.0 == self.0))
    }
}

impl Hashable for Bytes {
    fn hash_value(&self) -> PyResult<u64> {
        Ok(bytes_hash(&self.0))
    }
}

impl Repr for Bytes {
    fn repr(&self) -> PyResult<String> {
        let quote = if self.0.contains(&b'\'') && !self.0.contains(&b'"') {
            '"'
        } else {
            '\''
        };
        let mut out = String::with_capacity(self.0.len() + 3);
        out.push('b');
        out.push(quote);
        for &byte in self.0.iter() {
            match byte {
                b'\\' => out.push_str("\\\\"),
                b'\n' => out.push_str("\\n"),
                b'\r' => out.push_str("\\r"),
                b'\t' => out.push_str("\\t"),
                b if char::from(b) == quote => {
                    out.push('\\');
                    out.push(quote);
                }
                0x20..=0x7e => out.push(char::from(byte)),
                _ => out.push_str(&format!("\\x{:02x}", byte)),
            }
        }
        out.push(quote);
        Ok(out)
    }
}

/// Renders `value` as a quoted string literal.
pub fn quote_str(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

pub fn none() -> ObjectRef {
    NONE.with(Rc::clone)
}

pub fn is_none(obj: &ObjectRef) -> bool {
    is_instance::<NoneType>(obj)
}

pub fn boolean(value: bool) -> ObjectRef {
    if value {
        TRUE.with(Rc::clone)
    } else {
        FALSE.with(Rc::clone)
    }
}

pub fn int(value: i64) -> ObjectRef {
    Rc::new(Int(value))
}

pub fn string(value: &str) -> ObjectRef {
    Rc::new(Str::new(value))
}

pub fn bytes(value: &[u8]) -> ObjectRef {
    Rc::new(Bytes::new(value))
}

pub fn tuple(items: Vec<ObjectRef>) -> ObjectRef {
    Rc::new(Tuple::new(items))
}

/// Returns the text of a `str` object, if `obj` is one.
pub fn as_str(obj: &ObjectRef) -> Option<&str> {
    downcast_ref::<Str>(obj).map(Str::as_str)
}
