use std::cell::Cell;

/// Counter that can be bumped through `&self`.
///
/// Used by read-only operations (`peek`, `recency_rank`) that cannot take a
/// mutable recorder. `Cell` keeps the owning container `Send` but not `Sync`,
/// matching the single-owner model of the containers.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}
