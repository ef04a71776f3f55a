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

//! Initial basic feasible plans.

use super::basis::Basis;
use crate::matrix::{Cell, Matrix};
use num_traits::Float;
use std::cmp::Ordering;

/// The method used to compute the initial plan.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InitialPlan {
    /// Allocate to the cheapest remaining cell first.
    LeastCost,
    /// Allocate starting in the top-left cell, moving right and down.
    NorthWestCorner,
}

impl Default for InitialPlan {
    fn default() -> Self {
        InitialPlan::LeastCost
    }
}

impl InitialPlan {
    /// Compute an initial plan and a complete basis.
    pub fn build<F: Float>(self, costs: &Matrix<F>, supply: &[F], demand: &[F]) -> (Matrix<F>, Basis) {
        let (plan, mut basis) = match self {
            InitialPlan::LeastCost => least_cost(costs, supply, demand),
            InitialPlan::NorthWestCorner => north_west_corner(supply, demand),
        };
        let nadded = complete_basis(costs, &mut basis);
        if nadded > 0 {
            log::warn!("Initial plan is degenerate, added {} zero cells to the basis", nadded);
        }
        (plan, basis)
    }
}

/// Compute an initial plan with the least-cost method.
///
/// In each step the cheapest cell whose row has residual supply and
/// whose column has residual demand receives as much flow as
/// possible. On ties the first cell in row-major order is chosen.
/// Each allocation leaves exactly zero on the exhausted side, so a
/// line with any positive residual is still eligible.
///
/// The returned basis contains the allocated cells. It is not
/// necessarily complete, see [`complete_basis`].
pub fn least_cost<F: Float>(costs: &Matrix<F>, supply: &[F], demand: &[F]) -> (Matrix<F>, Basis) {
    let nrows = supply.len();
    let ncols = demand.len();
    let mut plan = Matrix::new(nrows, ncols, F::zero());
    let mut basis = Basis::new(nrows, ncols);
    let mut supply = supply.to_vec();
    let mut demand = demand.to_vec();

    while supply.iter().any(|&s| s > F::zero()) {
        let mut best: Option<(F, Cell)> = None;
        for ((i, j), &c) in costs.iter() {
            if supply[i] > F::zero() && demand[j] > F::zero() && best.map(|(min, _)| c < min).unwrap_or(true) {
                best = Some((c, (i, j)));
            }
        }

        let (i, j) = match best {
            Some((_, cell)) => cell,
            // all remaining demand is exhausted
            None => break,
        };

        allocate(&mut plan, &mut basis, &mut supply, &mut demand, (i, j));
    }

    (plan, basis)
}

/// Compute an initial plan with the north-west corner method.
pub fn north_west_corner<F: Float>(supply: &[F], demand: &[F]) -> (Matrix<F>, Basis) {
    let nrows = supply.len();
    let ncols = demand.len();
    let mut plan = Matrix::new(nrows, ncols, F::zero());
    let mut basis = Basis::new(nrows, ncols);
    let mut supply = supply.to_vec();
    let mut demand = demand.to_vec();

    let (mut i, mut j) = (0, 0);
    while i < nrows && j < ncols {
        if supply[i] > F::zero() && demand[j] > F::zero() {
            allocate(&mut plan, &mut basis, &mut supply, &mut demand, (i, j));
        }
        if supply[i] <= F::zero() {
            i += 1;
        } else {
            j += 1;
        }
    }

    (plan, basis)
}

/// Move as much flow as possible to `cell` and update the residuals.
fn allocate<F: Float>(plan: &mut Matrix<F>, basis: &mut Basis, supply: &mut [F], demand: &mut [F], (i, j): Cell) {
    let amount = supply[i].min(demand[j]);
    plan[(i, j)] = amount;
    basis.insert((i, j));
    supply[i] = supply[i] - amount;
    demand[j] = demand[j] - amount;
    log::trace!("Allocate {} to cell ({}, {})", amount.to_f64().unwrap_or(f64::NAN), i, j);
}

/// Union-Find data-structure for the rows and columns.
#[derive(Clone, Copy)]
enum Component {
    /// The root element with the tree's depth.
    Root(usize),
    /// An inner node with the parent node.
    Node(usize),
}

/// Return the root node and the tree's depth of node `u`.
fn find_root(comps: &[Component], u: usize) -> (usize, usize) {
    let mut v = u;
    loop {
        match comps[v] {
            Component::Node(parent) => v = parent,
            Component::Root(depth) => return (v, depth),
        }
    }
}

/// Join the components of `u` and `v`.
///
/// Returns `false` if both are already in the same component.
fn union(comps: &mut [Component], u: usize, v: usize) -> bool {
    let (uroot, udepth) = find_root(comps, u);
    let (vroot, vdepth) = find_root(comps, v);
    if uroot == vroot {
        return false;
    }
    if udepth < vdepth {
        comps[uroot] = Component::Node(vroot);
    } else {
        comps[vroot] = Component::Node(uroot);
        if udepth == vdepth {
            comps[uroot] = Component::Root(udepth + 1);
        }
    }
    true
}

/// Extend the basis to a spanning tree.
///
/// Row `i` is node `i` and column `j` is node `nrows + j` of the
/// bipartite graph. The basic cells are joined first, then the
/// remaining cells are added in the order of increasing cost (ties in
/// row-major order) whenever they connect two components, i.e.
/// Kruskal's algorithm starting from the current basis.
///
/// Returns the number of cells added to the basis.
pub fn complete_basis<F: Float>(costs: &Matrix<F>, basis: &mut Basis) -> usize {
    let nrows = basis.num_rows();
    let ncols = basis.num_cols();
    let mut comps = vec![Component::Root(0); nrows + ncols];

    for (i, j) in basis.iter() {
        union(&mut comps, i, nrows + j);
    }

    if basis.is_complete() {
        return 0;
    }

    let mut cells: Vec<Cell> = costs.cells().filter(|&c| !basis.contains(c)).collect();
    // sort is stable, so ties stay in row-major order
    cells.sort_by(|&a, &b| costs[a].partial_cmp(&costs[b]).unwrap_or(Ordering::Equal));

    let mut nadded = 0;
    for (i, j) in cells {
        if basis.len() + 1 >= nrows + ncols {
            break;
        }
        if union(&mut comps, i, nrows + j) {
            basis.insert((i, j));
            nadded += 1;
        }
    }

    nadded
}
