use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::runtime::{
    exception::PyResult,
    object::{ObjectRef, address},
};

pub fn str_hash(value: &str) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

pub fn int_hash(value: i64) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

pub fn bytes_hash(value: &[u8]) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

pub fn identity_hash(obj: &ObjectRef) -> u64 {
    let mut hasher = FxHasher::default();
    address(obj).hash(&mut hasher);
    hasher.finish()
}

/// Hash used for mapping keys: content hash when the key supports it,
/// identity otherwise.
pub fn hash_key(obj: &ObjectRef) -> PyResult<u64> {
    match obj.as_hashable() {
        Some(hashable) => hashable.hash_value(),
        None => Ok(identity_hash(obj)),
    }
}
