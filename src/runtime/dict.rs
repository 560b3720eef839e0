//! The mapping type backing every namespace.
//!
//! A [`Dict`] starts with string-keyed storage, which covers module globals,
//! frame locals and instance attribute tables. The first non-`str` key
//! promotes it to general storage: hash buckets whose keys are compared
//! through the equality capability. Both storages report a type named
//! `dict`; [`dict_check`] and [`dict_check_exact`] accept either.
//!
//! Dicts are shared by reference ([`DictRef`]); mutation through one handle
//! is visible through every other. No borrow of the storage is held while
//! key equality or representation runs, so those may freely re-enter the
//! same dict.

use std::{cell::RefCell, collections::hash_map::Entry, rc::Rc};

use rustc_hash::FxHashMap;

use crate::{
    diagnostics::{DESCRIPTOR_MISAPPLIED, DICT_REQUIRED, KEY_NOT_FOUND, STRING_KEY_REQUIRED},
    runtime::{
        builtins::helpers::{check_arity, check_arity_range, check_no_kwargs},
        exception::{Exception, PyResult},
        hash_key::{hash_key, str_hash},
        iterator::SeqIterator,
        leak_detector,
        object::{
            Contains, DelItem, GetItem, Iterable, Object, ObjectRef, Repr, RichEq, SetItem,
            downcast, downcast_ref, is, type_name,
        },
        protocol::{equals, repr},
        types::{MethodDef, Type},
        value::{Str, none, string, tuple},
    },
};

pub type DictRef = Rc<Dict>;

const DICT_DOC: &str = "dict() -> new empty dictionary";

static DICT_METHODS: &[MethodDef] = &[
    MethodDef {
        name: "get",
        doc: "D.get(k[,d]) -> D[k] if k in D, else d.  d defaults to None.",
        func: dict_get,
    },
    MethodDef {
        name: "items",
        doc: "D.items() -> an iterator over D's (key, value) pairs",
        func: dict_items,
    },
    MethodDef {
        name: "keys",
        doc: "D.keys() -> an iterator over D's keys",
        func: dict_keys,
    },
    MethodDef {
        name: "values",
        doc: "D.values() -> an iterator over D's values",
        func: dict_values,
    },
];

/// Descriptor reported while storage holds only `str` keys.
pub static STRING_DICT_TYPE: Type = Type {
    name: "dict",
    doc: DICT_DOC,
    methods: DICT_METHODS,
    properties: &[],
};

/// Descriptor reported once storage has been promoted.
pub static DICT_TYPE: Type = Type {
    name: "dict",
    doc: DICT_DOC,
    methods: DICT_METHODS,
    properties: &[],
};

type Pair = (ObjectRef, ObjectRef);

#[derive(Debug, Clone)]
enum Storage {
    /// Keyed by text; the original key object is kept alongside the value.
    Strings(FxHashMap<Rc<str>, Pair>),
    General(Buckets),
}

#[derive(Debug, Clone, Default)]
struct Buckets {
    buckets: FxHashMap<u64, Vec<Pair>>,
    len: usize,
}

impl Buckets {
    fn insert_new(&mut self, hash: u64, key: ObjectRef, value: ObjectRef) {
        self.buckets.entry(hash).or_default().push((key, value));
        self.len += 1;
    }

    fn replace(&mut self, hash: u64, existing: &ObjectRef, value: ObjectRef) -> bool {
        let Some(bucket) = self.buckets.get_mut(&hash) else {
            return false;
        };
        match bucket.iter_mut().find(|(k, _)| is(k, existing)) {
            Some(slot) => {
                slot.1 = value;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, hash: u64, existing: &ObjectRef) -> Option<ObjectRef> {
        let bucket = self.buckets.get_mut(&hash)?;
        let pos = bucket.iter().position(|(k, _)| is(k, existing))?;
        let (_, value) = bucket.swap_remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(&hash);
        }
        self.len -= 1;
        Some(value)
    }

    fn find_str(&self, name: &str) -> Option<&Pair> {
        self.buckets
            .get(&str_hash(name))?
            .iter()
            .find(|(k, _)| downcast_ref::<Str>(k).is_some_and(|s| s.as_str() == name))
    }
}

#[derive(Debug)]
pub struct Dict {
    storage: RefCell<Storage>,
}

impl Dict {
    pub fn new() -> DictRef {
        Self::with_capacity(0)
    }

    /// Empty dict pre-sized for `capacity` entries. The size is a hint only.
    pub fn with_capacity(capacity: usize) -> DictRef {
        leak_detector::record_dict();
        let map = FxHashMap::with_capacity_and_hasher(capacity, Default::default());
        Rc::new(Self {
            storage: RefCell::new(Storage::Strings(map)),
        })
    }

    /// Builds a dict from `str`-keyed entries.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, ObjectRef)>) -> DictRef {
        let dict = Self::new();
        for (name, value) in pairs {
            dict.set_str(name, value);
        }
        dict
    }

    pub fn len(&self) -> usize {
        match &*self.storage.borrow() {
            Storage::Strings(map) => map.len(),
            Storage::General(b) => b.len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a non-`str` key has ever been stored.
    pub fn is_promoted(&self) -> bool {
        matches!(&*self.storage.borrow(), Storage::General(_))
    }

    /// Shallow duplicate: same key and value objects, independent storage.
    pub fn copy(&self) -> DictRef {
        leak_detector::record_dict();
        Rc::new(Self {
            storage: RefCell::new(self.storage.borrow().clone()),
        })
    }

    /// Snapshot of the current `(key, value)` pairs, in storage order.
    pub fn entries(&self) -> Vec<Pair> {
        match &*self.storage.borrow() {
            Storage::Strings(map) => map.values().cloned().collect(),
            Storage::General(b) => b.buckets.values().flatten().cloned().collect(),
        }
    }

    pub fn keys(&self) -> Vec<ObjectRef> {
        self.entries().into_iter().map(|(k, _)| k).collect()
    }

    pub fn values(&self) -> Vec<ObjectRef> {
        self.entries().into_iter().map(|(_, v)| v).collect()
    }

    /// Lookup by text. Only `str` keys match.
    pub fn get_str(&self, name: &str) -> Option<ObjectRef> {
        match &*self.storage.borrow() {
            Storage::Strings(map) => map.get(name).map(|(_, v)| v.clone()),
            Storage::General(b) => b.find_str(name).map(|(_, v)| v.clone()),
        }
    }

    pub fn contains_str(&self, name: &str) -> bool {
        self.get_str(name).is_some()
    }

    /// Stores `value` under a `str` key without dispatching equality.
    pub fn set_str(&self, name: &str, value: ObjectRef) {
        let mut storage = self.storage.borrow_mut();
        match &mut *storage {
            Storage::Strings(map) => match map.entry(Rc::from(name)) {
                Entry::Occupied(mut slot) => slot.get_mut().1 = value,
                Entry::Vacant(slot) => {
                    slot.insert((string(name), value));
                }
            },
            Storage::General(b) => {
                let existing = b.find_str(name).map(|(k, _)| k.clone());
                let hash = str_hash(name);
                match existing {
                    Some(key) => {
                        b.replace(hash, &key, value);
                    }
                    None => b.insert_new(hash, string(name), value),
                }
            }
        }
    }

    /// Looks `key` up by identity or equality.
    pub fn lookup(&self, key: &ObjectRef) -> PyResult<Option<ObjectRef>> {
        Ok(self.find(key)?.map(|(_, v)| v))
    }

    pub fn contains_key(&self, key: &ObjectRef) -> PyResult<bool> {
        Ok(self.find(key)?.is_some())
    }

    /// Inserts or replaces. Accepts any key; a non-`str` key promotes the
    /// storage once its hash is known.
    pub fn insert(&self, key: ObjectRef, value: ObjectRef) -> PyResult<()> {
        if let Some(s) = downcast_ref::<Str>(&key) {
            let mut storage = self.storage.borrow_mut();
            if let Storage::Strings(map) = &mut *storage {
                let name = s.as_rc().clone();
                match map.entry(name) {
                    Entry::Occupied(mut slot) => slot.get_mut().1 = value,
                    Entry::Vacant(slot) => {
                        slot.insert((key, value));
                    }
                }
                return Ok(());
            }
        }

        let hash = hash_key(&key)?;
        self.promote();
        match self.find_in_bucket(hash, &key)? {
            Some((existing, _)) => {
                let mut storage = self.storage.borrow_mut();
                if let Storage::General(b) = &mut *storage {
                    if !b.replace(hash, &existing, value.clone()) {
                        b.insert_new(hash, key, value);
                    }
                }
            }
            None => {
                if let Storage::General(b) = &mut *self.storage.borrow_mut() {
                    b.insert_new(hash, key, value);
                }
            }
        }
        Ok(())
    }

    /// Removes `key`, returning its value. An absent key is a `KeyError`.
    pub fn remove(&self, key: &ObjectRef) -> PyResult<ObjectRef> {
        let Some((existing, _)) = self.find(key)? else {
            return Err(key_error(key));
        };
        let hash = if self.is_promoted() {
            Some(hash_key(key)?)
        } else {
            None
        };
        let removed = match (&mut *self.storage.borrow_mut(), hash) {
            (Storage::Strings(map), _) => downcast_ref::<Str>(&existing)
                .and_then(|s| map.remove(s.as_str()))
                .map(|(_, v)| v),
            (Storage::General(b), Some(hash)) => b.remove(hash, &existing),
            (Storage::General(_), None) => None,
        };
        removed.ok_or_else(|| key_error(key))
    }

    fn promote(&self) {
        let mut storage = self.storage.borrow_mut();
        if let Storage::Strings(map) = &mut *storage {
            let mut promoted = Buckets::default();
            for (name, (key, value)) in map.drain() {
                promoted.insert_new(str_hash(&name), key, value);
            }
            tracing::trace!(entries = promoted.len, "promoting dict to general storage");
            *storage = Storage::General(promoted);
        }
    }

    fn find(&self, key: &ObjectRef) -> PyResult<Option<Pair>> {
        if let Some(s) = downcast_ref::<Str>(key) {
            if let Storage::Strings(map) = &*self.storage.borrow() {
                return Ok(map.get(s.as_str()).cloned());
            }
        }
        let hash = hash_key(key)?;
        self.find_in_bucket(hash, key)
    }

    fn find_in_bucket(&self, hash: u64, key: &ObjectRef) -> PyResult<Option<Pair>> {
        let candidates = match &*self.storage.borrow() {
            Storage::General(b) => b.buckets.get(&hash).cloned().unwrap_or_default(),
            // A non-`str` key may still equal a stored `str` with the same hash.
            Storage::Strings(map) => map
                .iter()
                .filter(|(name, _)| str_hash(name) == hash)
                .map(|(_, pair)| pair.clone())
                .collect(),
        };
        for (candidate, value) in candidates {
            if is(&candidate, key) || equals(&candidate, key)? {
                return Ok(Some((candidate, value)));
            }
        }
        Ok(None)
    }
}

fn key_error(key: &ObjectRef) -> Exception {
    match repr(key) {
        Ok(text) => Exception::from_code(&KEY_NOT_FOUND, &[&text]),
        Err(err) => err,
    }
}

impl Object for Dict {
    fn type_of(&self) -> &'static Type {
        if self.is_promoted() {
            &DICT_TYPE
        } else {
            &STRING_DICT_TYPE
        }
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

    fn as_get_item(&self) -> Option<&dyn GetItem> {
        Some(self)
    }

    fn as_set_item(&self) -> Option<&dyn SetItem> {
        Some(self)
    }

    fn as_del_item(&self) -> Option<&dyn DelItem> {
        Some(self)
    }

    fn as_contains(&self) -> Option<&dyn Contains> {
        Some(self)
    }
}

impl RichEq for Dict {
    fn rich_eq(&self, other: &ObjectRef) -> PyResult<Option<bool>> {
        let Some(other) = downcast_ref::<Dict>(other) else {
            return Ok(None);
        };
        if std::ptr::eq(self, other) {
            return Ok(Some(true));
        }
        if self.len() != other.len() {
            return Ok(Some(false));
        }
        for (key, value) in self.entries() {
            match other.lookup(&key)? {
                Some(theirs) if equals(&value, &theirs)? => {}
                _ => return Ok(Some(false)),
            }
        }
        Ok(Some(true))
    }
}

thread_local! {
    static REPR_STACK: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

struct ReprGuard(usize);

impl ReprGuard {
    /// Marks `addr` as being rendered; `None` if it already is.
    fn enter(addr: usize) -> Option<Self> {
        REPR_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.contains(&addr) {
                None
            } else {
                stack.push(addr);
                Some(Self(addr))
            }
        })
    }
}

impl Drop for ReprGuard {
    fn drop(&mut self) {
        REPR_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|a| *a == self.0) {
                stack.remove(pos);
            }
        });
    }
}

impl Repr for Dict {
    fn repr(&self) -> PyResult<String> {
        let Some(_guard) = ReprGuard::enter(self as *const Self as usize) else {
            return Ok("{...}".to_string());
        };
        let mut out = String::from("{");
        for (i, (key, value)) in self.entries().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&repr(key)?);
            out.push_str(": ");
            out.push_str(&repr(value)?);
        }
        out.push('}');
        Ok(out)
    }
}

impl Iterable for Dict {
    fn iter(&self, _this: &ObjectRef) -> PyResult<ObjectRef> {
        Ok(Rc::new(SeqIterator::new(self.keys())))
    }
}

impl GetItem for Dict {
    fn get_item(&self, key: &ObjectRef) -> PyResult<ObjectRef> {
        self.lookup(key)?.ok_or_else(|| key_error(key))
    }
}

impl SetItem for Dict {
    fn set_item(&self, key: ObjectRef, value: ObjectRef) -> PyResult<()> {
        self.insert(key, value)
    }
}

impl DelItem for Dict {
    fn del_item(&self, key: &ObjectRef) -> PyResult<()> {
        self.remove(key).map(|_| ())
    }
}

impl Contains for Dict {
    /// Membership accepts `str` keys only.
    fn contains(&self, item: &ObjectRef) -> PyResult<bool> {
        match downcast_ref::<Str>(item) {
            Some(s) => Ok(self.contains_str(s.as_str())),
            None => Err(Exception::from_code(&STRING_KEY_REQUIRED, &[type_name(item)])),
        }
    }
}

/// Whether `obj` is a dict under either descriptor.
pub fn dict_check(obj: &ObjectRef) -> bool {
    let t = obj.type_of();
    std::ptr::eq(t, &DICT_TYPE) || std::ptr::eq(t, &STRING_DICT_TYPE)
}

/// Exact-type check. Subclassing is not modelled, so this agrees with
/// [`dict_check`].
pub fn dict_check_exact(obj: &ObjectRef) -> bool {
    dict_check(obj)
}

/// Typed handle to `obj`, or a `TypeError` if it is not a dict.
pub fn as_dict(obj: &ObjectRef) -> PyResult<DictRef> {
    downcast::<Dict>(obj).ok_or_else(|| Exception::from_code(&DICT_REQUIRED, &[]))
}

fn receiver(this: &ObjectRef, method: &str) -> PyResult<DictRef> {
    downcast::<Dict>(this).ok_or_else(|| {
        Exception::from_code(&DESCRIPTOR_MISAPPLIED, &[method, "dict", type_name(this)])
    })
}

fn dict_get(this: &ObjectRef, args: &[ObjectRef], kwargs: Option<&DictRef>) -> PyResult<ObjectRef> {
    let dict = receiver(this, "get")?;
    check_no_kwargs("get", kwargs)?;
    check_arity_range("get", args, 1, 2)?;
    let key = &args[0];
    let Some(name) = downcast_ref::<Str>(key) else {
        return Err(key_error(key));
    };
    match dict.get_str(name.as_str()) {
        Some(value) => Ok(value),
        None => Ok(args.get(1).cloned().unwrap_or_else(none)),
    }
}

fn dict_items(
    this: &ObjectRef,
    args: &[ObjectRef],
    kwargs: Option<&DictRef>,
) -> PyResult<ObjectRef> {
    let dict = receiver(this, "items")?;
    check_no_kwargs("items", kwargs)?;
    check_arity("items", args, 0)?;
    let pairs = dict
        .entries()
        .into_iter()
        .map(|(k, v)| tuple(vec![k, v]))
        .collect();
    Ok(Rc::new(SeqIterator::new(pairs)))
}

fn dict_keys(this: &ObjectRef, args: &[ObjectRef], kwargs: Option<&DictRef>) -> PyResult<ObjectRef> {
    let dict = receiver(this, "keys")?;
    check_no_kwargs("keys", kwargs)?;
    check_arity("keys", args, 0)?;
    Ok(Rc::new(SeqIterator::new(dict.keys())))
}

fn dict_values(
    this: &ObjectRef,
    args: &[ObjectRef],
    kwargs: Option<&DictRef>,
) -> PyResult<ObjectRef> {
    let dict = receiver(this, "values")?;
    check_no_kwargs("values", kwargs)?;
    check_arity("values", args, 0)?;
    Ok(Rc::new(SeqIterator::new(dict.values())))
}
