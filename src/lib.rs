// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

#![forbid(unsafe_code)]

//! A library for solving transportation problems.

// # Data structures

pub mod matrix;
pub use self::matrix::{Cell, Matrix};

// # Algorithms

pub mod transport;
pub use self::transport::{solve, Objective, Solution, SolverError, TransportSimplex};

// # File formats

#[cfg(feature = "dimacs")]
pub mod dimacs;
