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

//! Errors of the transportation solver.

use thiserror::Error;

/// Error when solving a transportation problem.
///
/// None of the errors can be recovered within the same solve call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The problem data or the current plan is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The basis is disconnected, the potentials of the listed rows
    /// and columns could not be derived.
    #[error("potentials could not be computed for rows {rows:?} and columns {cols:?}")]
    PotentialsDivergence { rows: Vec<usize>, cols: Vec<usize> },

    /// No cycle through the entering cell exists in the basis.
    #[error("no cycle through cell ({row}, {col})")]
    CycleNotFound { row: usize, col: usize },

    /// The iteration limit has been exceeded.
    #[error("no optimal plan found after {0} iterations")]
    NonConvergence(usize),
}

pub type Result<T> = std::result::Result<T, SolverError>;
