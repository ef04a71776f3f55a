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

//! Row and column potentials of a basis.

use super::basis::Basis;
use super::error::{Result, SolverError};
use crate::matrix::Matrix;
use num_traits::Float;

/// Compute the potentials `(u, v)` of the rows and columns.
///
/// The potentials satisfy `u[i] + v[j] == costs[(i, j)]` for each
/// basic cell `(i, j)` and `u[0] == 0`. Known values are propagated
/// along the basic cells until nothing changes, which takes at most
/// `nrows + ncols` sweeps for a spanning tree.
///
/// If the basis does not connect all rows and columns, some
/// potentials cannot be determined and
/// [`SolverError::PotentialsDivergence`] is returned.
pub fn potentials<F: Float>(costs: &Matrix<F>, basis: &Basis) -> Result<(Vec<F>, Vec<F>)> {
    let nrows = basis.num_rows();
    let ncols = basis.num_cols();
    let mut u: Vec<Option<F>> = vec![None; nrows];
    let mut v: Vec<Option<F>> = vec![None; ncols];

    if nrows == 0 || ncols == 0 {
        return Ok((vec![], vec![]));
    }

    u[0] = Some(F::zero());

    let cells = basis.iter().collect::<Vec<_>>();
    for _ in 0..nrows + ncols {
        let mut changed = false;
        for &(i, j) in &cells {
            match (u[i], v[j]) {
                (Some(ui), None) => {
                    v[j] = Some(costs[(i, j)] - ui);
                    changed = true;
                }
                (None, Some(vj)) => {
                    u[i] = Some(costs[(i, j)] - vj);
                    changed = true;
                }
                _ => (),
            }
        }
        if !changed {
            break;
        }
    }

    let rows = (0..nrows).filter(|&i| u[i].is_none()).collect::<Vec<_>>();
    let cols = (0..ncols).filter(|&j| v[j].is_none()).collect::<Vec<_>>();
    if !rows.is_empty() || !cols.is_empty() {
        return Err(SolverError::PotentialsDivergence { rows, cols });
    }

    Ok((
        u.into_iter().map(|x| x.unwrap_or_else(F::nan)).collect(),
        v.into_iter().map(|x| x.unwrap_or_else(F::nan)).collect(),
    ))
}
