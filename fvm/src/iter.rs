//! Iteration over a matrix
//!
//! A fully keyed matrix iterates its row names; any other matrix iterates
//! its stored rows, which may mix dense and sparse entries.

use crate::row::Row;

/// Item yielded by [`Iter`]
#[derive(Debug, PartialEq)]
pub enum Entry<'a, T> {
    /// Row name, when every row is named
    Key(&'a str),
    /// Stored row, when some row is unnamed
    Row(&'a Row<T>),
}

impl<T> Clone for Entry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Entry<'_, T> {}

impl<'a, T> Entry<'a, T> {
    /// The row name, if this entry is one
    pub fn key(&self) -> Option<&'a str> {
        match *self {
            Entry::Key(name) => Some(name),
            Entry::Row(_) => None,
        }
    }

    /// The stored row, if this entry is one
    pub fn row(&self) -> Option<&'a Row<T>> {
        match *self {
            Entry::Key(_) => None,
            Entry::Row(row) => Some(row),
        }
    }
}

/// Iterator returned by [`Matrix::iter`](crate::Matrix::iter)
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    inner: Inner<'a, T>,
}

#[derive(Debug, Clone)]
enum Inner<'a, T> {
    Keys(std::slice::Iter<'a, String>),
    Rows(std::slice::Iter<'a, Row<T>>),
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn keys(names: &'a [String]) -> Self {
        Self {
            inner: Inner::Keys(names.iter()),
        }
    }

    pub(crate) fn rows(rows: &'a [Row<T>]) -> Self {
        Self {
            inner: Inner::Rows(rows.iter()),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = Entry<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Keys(names) => names.next().map(|name| Entry::Key(name.as_str())),
            Inner::Rows(rows) => rows.next().map(Entry::Row),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::Keys(names) => names.size_hint(),
            Inner::Rows(rows) => rows.size_hint(),
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> std::iter::FusedIterator for Iter<'_, T> {}
