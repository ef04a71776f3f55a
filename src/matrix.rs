/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! A dense matrix stored in row-major order.
//!
//! # Example
//!
//! ```
//! use rs_transport::Matrix;
//!
//! let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
//! assert_eq!(m.num_rows(), 2);
//! assert_eq!(m.num_cols(), 3);
//! assert_eq!(m[(1, 0)], 4);
//! assert_eq!(m.row(0), &[1, 2, 3]);
//! ```

use std::ops::{Index, IndexMut};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A cell of a matrix given by `(row, col)`.
pub type Cell = (usize, usize);

/// A dense `nrows × ncols` matrix.
///
/// All entries are kept in a single vector, the entry `(i, j)` is at
/// position `i * ncols + j`.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Matrix<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// Create a new matrix with all entries set to `value`.
    pub fn new(nrows: usize, ncols: usize, value: T) -> Self {
        Matrix {
            nrows,
            ncols,
            data: vec![value; nrows * ncols],
        }
    }
}

impl<T> Matrix<T> {
    /// Create a matrix from a list of rows.
    ///
    /// Returns `None` if the rows do not have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            if row.len() != ncols {
                return None;
            }
            data.extend(row);
        }
        Some(Matrix { nrows, ncols, data })
    }

    /// Create a matrix whose entries are computed by `f(i, j)`.
    pub fn from_fn<Fs>(nrows: usize, ncols: usize, mut f: Fs) -> Self
    where
        Fs: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Matrix { nrows, ncols, data }
    }

    pub fn num_rows(&self) -> usize {
        self.nrows
    }

    pub fn num_cols(&self) -> usize {
        self.ncols
    }

    /// Return `true` if the matrix has no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return the `i`th row.
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Return an iterator over all rows.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.nrows).map(move |i| self.row(i))
    }

    /// Return an iterator over the entries of column `j`.
    pub fn col(&self, j: usize) -> impl Iterator<Item = &T> + '_ {
        self.data[j..].iter().step_by(self.ncols.max(1)).take(self.nrows)
    }

    /// Return an iterator over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let ncols = self.ncols;
        (0..self.nrows).flat_map(move |i| (0..ncols).map(move |j| (i, j)))
    }

    /// Return an iterator over all cells and entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> + '_ {
        self.cells().zip(self.data.iter())
    }

    /// Return the entries as a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        self.rows().map(|r| r.to_vec()).collect()
    }
}

impl<T> Index<Cell> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): Cell) -> &T {
        debug_assert!(i < self.nrows && j < self.ncols);
        &self.data[i * self.ncols + j]
    }
}

impl<T> IndexMut<Cell> for Matrix<T> {
    fn index_mut(&mut self, (i, j): Cell) -> &mut T {
        debug_assert!(i < self.nrows && j < self.ncols);
        &mut self.data[i * self.ncols + j]
    }
}
