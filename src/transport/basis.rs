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

//! The basis of a transportation plan.
//!
//! The basic cells are the edges of a spanning tree of the bipartite
//! graph with one node for each row and each column. A basic cell may
//! carry zero flow if the plan is degenerate.

use crate::matrix::{Cell, Matrix};
use either::Either;

/// A row or a column of the plan.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Line {
    Row(usize),
    Col(usize),
}

/// The set of basic cells.
#[derive(Clone, Debug)]
pub struct Basis {
    cells: Matrix<bool>,
    len: usize,
}

impl Basis {
    /// Create an empty basis for an `nrows × ncols` plan.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Basis {
            cells: Matrix::new(nrows, ncols, false),
            len: 0,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.cells.num_rows()
    }

    pub fn num_cols(&self) -> usize {
        self.cells.num_cols()
    }

    /// The number of basic cells.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return `true` if the basis has `nrows + ncols - 1` cells.
    pub fn is_complete(&self) -> bool {
        self.len + 1 == self.num_rows() + self.num_cols()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells[cell]
    }

    /// Add a cell to the basis.
    ///
    /// Returns `false` if the cell has already been basic.
    pub fn insert(&mut self, cell: Cell) -> bool {
        if self.cells[cell] {
            false
        } else {
            self.cells[cell] = true;
            self.len += 1;
            true
        }
    }

    /// Remove a cell from the basis.
    ///
    /// Returns `false` if the cell has not been basic.
    pub fn remove(&mut self, cell: Cell) -> bool {
        if self.cells[cell] {
            self.cells[cell] = false;
            self.len -= 1;
            true
        } else {
            false
        }
    }

    /// Return an iterator over all basic cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().filter(|&(_, &b)| b).map(|(c, _)| c)
    }

    /// Return an iterator over the basic cells of a line.
    pub fn line(&self, line: Line) -> impl Iterator<Item = Cell> + '_ {
        match line {
            Line::Row(i) => Either::Left((0..self.num_cols()).map(move |j| (i, j))),
            Line::Col(j) => Either::Right((0..self.num_rows()).map(move |i| (i, j))),
        }
        .filter(move |&c| self.cells[c])
    }
}

#[cfg(test)]
mod tests {
    use super::{Basis, Line};

    #[test]
    fn test_insert_remove() {
        let mut b = Basis::new(2, 3);
        assert!(b.is_empty());
        assert!(b.insert((0, 1)));
        assert!(!b.insert((0, 1)));
        assert!(b.insert((1, 1)));
        assert!(b.insert((1, 2)));
        assert!(b.insert((0, 0)));
        assert_eq!(b.len(), 4);
        assert!(b.is_complete());
        assert!(b.remove((1, 1)));
        assert!(!b.remove((1, 1)));
        assert!(!b.contains((1, 1)));
        assert_eq!(b.iter().collect::<Vec<_>>(), vec![(0, 0), (0, 1), (1, 2)]);
    }

    #[test]
    fn test_lines() {
        let mut b = Basis::new(3, 3);
        for &c in &[(0, 1), (2, 1), (2, 0), (2, 2)] {
            b.insert(c);
        }
        assert_eq!(b.line(Line::Row(2)).collect::<Vec<_>>(), vec![(2, 0), (2, 1), (2, 2)]);
        assert_eq!(b.line(Line::Col(1)).collect::<Vec<_>>(), vec![(0, 1), (2, 1)]);
        assert_eq!(b.line(Line::Row(1)).count(), 0);
    }
}
