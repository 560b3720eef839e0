use std::sync::atomic::{AtomicUsize, Ordering};

/// Cumulative allocation counts per heap-backed runtime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationStats {
    pub dicts: usize,
    pub functions: usize,
    pub bound_methods: usize,
    pub cells: usize,
}

static DICTS: AtomicUsize = AtomicUsize::new(0);
static FUNCTIONS: AtomicUsize = AtomicUsize::new(0);
static BOUND_METHODS: AtomicUsize = AtomicUsize::new(0);
static CELLS: AtomicUsize = AtomicUsize::new(0);

pub fn record_dict() {
    DICTS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_function() {
    FUNCTIONS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_bound_method() {
    BOUND_METHODS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_cell() {
    CELLS.fetch_add(1, Ordering::Relaxed);
}

pub fn snapshot() -> AllocationStats {
    AllocationStats {
        dicts: DICTS.load(Ordering::Relaxed),
        functions: FUNCTIONS.load(Ordering::Relaxed),
        bound_methods: BOUND_METHODS.load(Ordering::Relaxed),
        cells: CELLS.load(Ordering::Relaxed),
    }
}
