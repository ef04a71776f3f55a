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

//! Transportation problem algorithms.
//!
//! A transportation problem consists of `n` sources with supplies,
//! `m` destinations with demands and a cost for each unit shipped
//! from a source to a destination. The task is to find a plan that
//! ships all supplies to the destinations with minimal (or maximal)
//! total cost.
//!
//! The solver starts with a basic feasible plan, computes node
//! potentials for the current basis and pivots a non-basic cell with
//! improving reduced cost into the basis by shifting flow along the
//! unique cycle it closes (stepping-stone method).
//!
//! # Example
//!
//! ```
//! use rs_transport::transport::{solve, Objective};
//! use rs_transport::Matrix;
//!
//! let costs: Matrix<f64> = Matrix::from_rows(vec![
//!     vec![8.0, 6.0, 10.0],
//!     vec![9.0, 4.0, 8.0],
//!     vec![3.0, 6.0, 7.0],
//! ]).unwrap();
//! let supply = vec![20.0, 30.0, 50.0];
//! let demand = vec![30.0, 30.0, 40.0];
//!
//! let sol = solve(costs, supply, demand, Objective::Minimize).unwrap();
//! assert!((sol.value - 550.0).abs() < 1e-9);
//! ```

pub mod basis;
pub mod cycle;
pub mod error;
pub mod initial;
pub mod potentials;
pub mod simplex;

pub use self::basis::Basis;
pub use self::cycle::find_cycle;
pub use self::error::{Result, SolverError};
pub use self::initial::InitialPlan;
pub use self::potentials::potentials;
pub use self::simplex::{solve, Solution, Step, TransportSimplex};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The direction of optimization.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Objective {
    /// Minimize the total cost.
    Minimize,
    /// Maximize the total cost (e.g. profit).
    Maximize,
}

impl Default for Objective {
    fn default() -> Self {
        Objective::Minimize
    }
}

/// The state of the solve driver.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// The problem has not been solved, yet
    Unsolved,
    /// The input or the current plan is being validated
    Validating,
    /// An improvement step is being performed
    Improving,
    /// The current plan is optimal
    Optimal,
}
