use std::ops::{Index, IndexMut};

use super::coordinate::MatrixCoordinate;
use crate::error::{try_reserve_total, DpResult};

/// Memory order of a [`TwoDimensionalMatrix`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MatrixMajor {
    Row,
    #[default]
    Column,
}

/// Dense `rows × columns` storage in a single buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TwoDimensionalMatrix<T> {
    storage: Vec<T>,
    rows: usize,
    columns: usize,
    major: MatrixMajor,
}

impl<T: Clone> TwoDimensionalMatrix<T> {
    pub fn new(major: MatrixMajor) -> Self {
        Self {
            storage: Vec::new(),
            rows: 0,
            columns: 0,
            major,
        }
    }

    /// Builds a matrix from values listed in its own memory order.
    pub fn from_values(rows: usize, columns: usize, major: MatrixMajor, values: Vec<T>) -> Self {
        debug_assert_eq!(values.len(), rows * columns);
        Self {
            storage: values,
            rows,
            columns,
            major,
        }
    }

    /// Sets new dimensions and fills every cell with `value`.
    ///
    /// Memory is only reallocated if the new size exceeds the current capacity.
    pub fn resize(&mut self, rows: usize, columns: usize, value: T) -> DpResult<()> {
        let len = rows.saturating_mul(columns);
        self.storage.clear();
        try_reserve_total(&mut self.storage, len)?;
        self.storage.resize(len, value);
        self.rows = rows;
        self.columns = columns;
        Ok(())
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn major(&self) -> MatrixMajor {
        self.major
    }

    #[inline]
    fn offset(&self, row: usize, column: usize) -> usize {
        debug_assert!(row < self.rows && column < self.columns);
        match self.major {
            MatrixMajor::Row => row * self.columns + column,
            MatrixMajor::Column => column * self.rows + row,
        }
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        if row < self.rows && column < self.columns {
            Some(&self.storage[self.offset(row, column)])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        if row < self.rows && column < self.columns {
            let offset = self.offset(row, column);
            Some(&mut self.storage[offset])
        } else {
            None
        }
    }

    /// Contiguous column `index`. Only valid for column-major matrices.
    pub fn column(&self, index: usize) -> &[T] {
        debug_assert_eq!(self.major, MatrixMajor::Column);
        let start = index * self.rows;
        &self.storage[start..start + self.rows]
    }

    /// Mutable contiguous column `index`. Only valid for column-major matrices.
    pub fn column_mut(&mut self, index: usize) -> &mut [T] {
        debug_assert_eq!(self.major, MatrixMajor::Column);
        let start = index * self.rows;
        &mut self.storage[start..start + self.rows]
    }

    /// Contiguous row `index`. Only valid for row-major matrices.
    pub fn row(&self, index: usize) -> &[T] {
        debug_assert_eq!(self.major, MatrixMajor::Row);
        let start = index * self.columns;
        &self.storage[start..start + self.columns]
    }

    /// Copies column `from` over column `to` of a column-major matrix.
    pub(crate) fn copy_column(&mut self, from: usize, to: usize)
    where
        T: Copy,
    {
        debug_assert_eq!(self.major, MatrixMajor::Column);
        let rows = self.rows;
        self.storage
            .copy_within(from * rows..(from + 1) * rows, to * rows);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.storage
    }

    /// Returns the same values laid out in the other memory order.
    pub fn transposed_layout(&self) -> Self {
        let major = match self.major {
            MatrixMajor::Row => MatrixMajor::Column,
            MatrixMajor::Column => MatrixMajor::Row,
        };
        let mut storage = Vec::with_capacity(self.storage.len());
        match major {
            MatrixMajor::Row => {
                for row in 0..self.rows {
                    for column in 0..self.columns {
                        storage.push(self[MatrixCoordinate::new(column, row)].clone());
                    }
                }
            }
            MatrixMajor::Column => {
                for column in 0..self.columns {
                    for row in 0..self.rows {
                        storage.push(self[MatrixCoordinate::new(column, row)].clone());
                    }
                }
            }
        }
        Self {
            storage,
            rows: self.rows,
            columns: self.columns,
            major,
        }
    }
}

impl<T: Clone> Index<MatrixCoordinate> for TwoDimensionalMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, coordinate: MatrixCoordinate) -> &T {
        &self.storage[self.offset(coordinate.row, coordinate.column)]
    }
}

impl<T: Clone> IndexMut<MatrixCoordinate> for TwoDimensionalMatrix<T> {
    #[inline]
    fn index_mut(&mut self, coordinate: MatrixCoordinate) -> &mut T {
        let offset = self.offset(coordinate.row, coordinate.column);
        &mut self.storage[offset]
    }
}
