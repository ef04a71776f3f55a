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

//! Stepping-stone cycles.
//!
//! # Example
//!
//! ```
//! use rs_transport::transport::{find_cycle, Basis};
//!
//! let mut basis = Basis::new(2, 2);
//! basis.insert((0, 0));
//! basis.insert((0, 1));
//! basis.insert((1, 1));
//!
//! let cycle = find_cycle(&basis, (1, 0)).unwrap();
//! assert_eq!(cycle, vec![(1, 0), (0, 0), (0, 1), (1, 1)]);
//! ```

use super::basis::{Basis, Line};
use crate::matrix::{Cell, Matrix};

/// Find the cycle closed by a non-basic cell.
///
/// The returned cycle starts at `entering`, its second cell is in the
/// same column and from then on consecutive cells alternate between
/// sharing a row and sharing a column. The last cell shares its row
/// with `entering`. All cells except `entering` are basic. The length
/// is even and at least 4.
///
/// The search is a depth-first search with an explicit stack. Each
/// stack entry contains a cell on the current path together with the
/// remaining candidates for the next move, so the stack never grows
/// beyond the length of a path in the basis.
///
/// Returns `None` if there is no such cycle, which happens only if the
/// basis does not connect the row and the column of `entering`.
pub fn find_cycle(basis: &Basis, entering: Cell) -> Option<Vec<Cell>> {
    let (i0, j0) = entering;
    let mut visited = Matrix::new(basis.num_rows(), basis.num_cols(), false);
    visited[entering] = true;

    let mut stack = vec![(entering, basis.line(Line::Col(j0)))];

    loop {
        let next = match stack.last_mut() {
            Some((_, candidates)) => candidates.find(|&c| !visited[c]),
            None => return None,
        };

        match next {
            Some(cell) => {
                visited[cell] = true;
                // cells at odd positions have been reached by a column move
                let colmove = stack.len() % 2 == 1;
                if colmove && cell.0 == i0 {
                    let mut cycle = stack.into_iter().map(|(c, _)| c).collect::<Vec<_>>();
                    cycle.push(cell);
                    return Some(cycle);
                }
                let line = if colmove { Line::Row(cell.0) } else { Line::Col(cell.1) };
                stack.push((cell, basis.line(line)));
            }
            None => {
                stack.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::find_cycle;
    use crate::transport::Basis;

    fn basis(cells: &[(usize, usize)], nrows: usize, ncols: usize) -> Basis {
        let mut basis = Basis::new(nrows, ncols);
        for &c in cells {
            basis.insert(c);
        }
        basis
    }

    fn assert_alternating(cycle: &[(usize, usize)]) {
        assert!(cycle.len() >= 4);
        assert_eq!(cycle.len() % 2, 0);
        for k in 0..cycle.len() {
            let a = cycle[k];
            let b = cycle[(k + 1) % cycle.len()];
            if k % 2 == 0 {
                assert_eq!(a.1, b.1, "{:?} and {:?} must share a column", a, b);
            } else {
                assert_eq!(a.0, b.0, "{:?} and {:?} must share a row", a, b);
            }
        }
    }

    #[test]
    fn test_cycle_with_backtracking() {
        let b = basis(&[(1, 0), (2, 0), (2, 2), (0, 1), (1, 1)], 3, 3);
        // (0, 1) is a dead end, the search must backtrack to (1, 1)
        let cycle = find_cycle(&b, (2, 1)).unwrap();
        assert_eq!(cycle, vec![(2, 1), (1, 1), (1, 0), (2, 0)]);
        assert_alternating(&cycle);
    }

    #[test]
    fn test_long_cycle() {
        let b = basis(&[(0, 1), (0, 2), (1, 1), (2, 0), (2, 2)], 3, 3);
        let cycle = find_cycle(&b, (1, 0)).unwrap();
        assert_eq!(cycle, vec![(1, 0), (2, 0), (2, 2), (0, 2), (0, 1), (1, 1)]);
        assert_alternating(&cycle);
    }

    #[test]
    fn test_cycle_in_staircase() {
        // north-west corner basis of a 3x3 problem
        let b = basis(&[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)], 3, 3);
        let cycle = find_cycle(&b, (0, 2)).unwrap();
        assert_eq!(cycle, vec![(0, 2), (2, 2), (2, 1), (1, 1), (1, 0), (0, 0)]);
        assert_alternating(&cycle);
    }

    #[test]
    fn test_no_cycle() {
        let b = basis(&[(0, 2), (1, 1), (2, 0), (2, 2)], 3, 3);
        assert_eq!(find_cycle(&b, (0, 1)), None);
        assert_eq!(find_cycle(&b, (1, 0)), None);
    }
}
