//! Memoized row views
//!
//! Reading a sparse row densely (or a dense row sparsely) costs a pass over
//! the column registry, so the alternate view is kept per row position. Any
//! stored view encodes the column count and order it was built against;
//! the cache records that as a column epoch and is emptied whenever the
//! matrix's epoch has moved on.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::row::SparseRow;

/// A row's alternate representation
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CachedView<T> {
    /// Dense view of a sparse row
    Dense(Arc<[T]>),
    /// Sparse view of a dense row, default-valued entries omitted
    Sparse(Arc<SparseRow<T>>),
}

/// Per-row view cache tagged with the column epoch it is valid for
#[derive(Debug)]
pub(crate) struct MaterializationCache<T> {
    epoch: u64,
    views: HashMap<usize, CachedView<T>>,
}

impl<T> MaterializationCache<T> {
    pub(crate) fn new() -> Self {
        Self {
            epoch: 0,
            views: HashMap::new(),
        }
    }

    /// Cached dense view of row `idx`, if still valid at `epoch`
    pub(crate) fn dense(&self, idx: usize, epoch: u64) -> Option<Arc<[T]>> {
        match self.get(idx, epoch)? {
            CachedView::Dense(values) => Some(Arc::clone(values)),
            CachedView::Sparse(_) => None,
        }
    }

    /// Cached sparse view of row `idx`, if still valid at `epoch`
    pub(crate) fn sparse(&self, idx: usize, epoch: u64) -> Option<Arc<SparseRow<T>>> {
        match self.get(idx, epoch)? {
            CachedView::Sparse(values) => Some(Arc::clone(values)),
            CachedView::Dense(_) => None,
        }
    }

    fn get(&self, idx: usize, epoch: u64) -> Option<&CachedView<T>> {
        if self.epoch != epoch {
            return None;
        }
        self.views.get(&idx)
    }

    /// Store a view built against `epoch`, dropping views from older epochs
    pub(crate) fn insert(&mut self, idx: usize, epoch: u64, view: CachedView<T>) {
        if self.epoch != epoch {
            tracing::trace!(
                stale = self.views.len(),
                from = self.epoch,
                to = epoch,
                "column epoch moved, dropping cached row views"
            );
            self.views.clear();
            self.epoch = epoch;
        }
        self.views.insert(idx, view);
    }

    /// Drop every cached view
    pub(crate) fn clear(&mut self) {
        self.views.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.views.len()
    }
}
