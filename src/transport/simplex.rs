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

//! A primal transportation simplex (stepping-stone / MODI method).

use super::basis::Basis;
use super::cycle::find_cycle;
use super::error::{Result, SolverError};
use super::initial::InitialPlan;
use super::potentials::potentials;
use super::{Objective, Phase};
use crate::matrix::{Cell, Matrix};
use num_traits::{Float, NumAssign};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The result of a single improvement step.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Step<F> {
    /// The current plan is optimal, nothing has been changed.
    Optimal,
    /// A pivot has been performed.
    Improved {
        /// The cell that entered the basis.
        entering: Cell,
        /// The cell that left the basis.
        leaving: Cell,
        /// The amount of flow moved along the cycle.
        flow: F,
    },
}

/// An optimal plan and its objective value.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Solution<F> {
    /// The amount shipped from each source to each destination.
    pub plan: Matrix<F>,
    /// The total cost of the plan.
    pub value: F,
}

/// A primal simplex algorithm for the transportation problem.
pub struct TransportSimplex<F> {
    costs: Matrix<F>,
    supply: Vec<F>,
    demand: Vec<F>,
    objective: Objective,

    plan: Matrix<F>,
    basis: Basis,
    row_potentials: Vec<F>,
    col_potentials: Vec<F>,

    /// The method for computing the initial plan.
    pub initial: InitialPlan,
    /// The tolerance for reduced costs. Defaults to `1e-6`.
    pub zero: F,
    /// The maximal number of pivots.
    ///
    /// If `None` (the default) the limit is `2 * (n + m) * max(n, m)`
    /// for `n` sources and `m` destinations.
    pub max_iterations: Option<usize>,

    niter: usize,
    phase: Phase,
}

impl<F> TransportSimplex<F>
where
    F: Float + NumAssign,
{
    /// Create a new solver.
    ///
    /// The data is checked when the problem is solved.
    pub fn new(costs: Matrix<F>, supply: Vec<F>, demand: Vec<F>) -> Self {
        let nrows = costs.num_rows();
        let ncols = costs.num_cols();
        TransportSimplex {
            plan: Matrix::new(nrows, ncols, F::zero()),
            basis: Basis::new(nrows, ncols),
            row_potentials: vec![F::nan(); nrows],
            col_potentials: vec![F::nan(); ncols],
            costs,
            supply,
            demand,
            objective: Objective::Minimize,

            initial: InitialPlan::LeastCost,
            zero: F::from(1e-6).unwrap_or_else(F::epsilon),
            max_iterations: None,

            niter: 0,
            phase: Phase::Unsolved,
        }
    }

    pub fn costs(&self) -> &Matrix<F> {
        &self.costs
    }

    pub fn supply(&self) -> &[F] {
        &self.supply
    }

    pub fn demand(&self) -> &[F] {
        &self.demand
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = objective;
        self.phase = Phase::Unsolved;
    }

    /// The current plan.
    pub fn plan(&self) -> &Matrix<F> {
        &self.plan
    }

    /// The flow in cell `(i, j)` of the current plan.
    pub fn flow(&self, i: usize, j: usize) -> F {
        self.plan[(i, j)]
    }

    /// Return `true` if `(i, j)` is in the current basis.
    pub fn is_basic(&self, i: usize, j: usize) -> bool {
        self.basis.contains((i, j))
    }

    /// Return the value of the current plan.
    pub fn value(&self) -> F {
        let mut v = F::zero();
        for (c, &x) in self.plan.iter() {
            v += x * self.costs[c];
        }
        v
    }

    /// The row and column potentials computed in the latest step.
    ///
    /// All potentials are NaN if no step has been done, yet.
    pub fn potentials(&self) -> (&[F], &[F]) {
        (&self.row_potentials, &self.col_potentials)
    }

    /// The reduced cost of cell `(i, j)` w.r.t. the latest potentials.
    pub fn reduced_cost(&self, i: usize, j: usize) -> F {
        self.costs[(i, j)] - self.row_potentials[i] - self.col_potentials[j]
    }

    /// The number of pivots in the latest solve.
    pub fn num_iterations(&self) -> usize {
        self.niter
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Solve the transportation problem.
    ///
    /// On success the current plan is optimal.
    pub fn solve(&mut self) -> Result<()> {
        self.initialize()?;

        let nrows = self.costs.num_rows();
        let ncols = self.costs.num_cols();
        let max_iterations = self
            .max_iterations
            .unwrap_or(2 * (nrows + ncols) * nrows.max(ncols));

        loop {
            self.phase = Phase::Validating;
            self.validate_plan()?;

            self.phase = Phase::Improving;
            match self.step()? {
                Step::Optimal => break,
                Step::Improved { .. } => {
                    if self.niter > max_iterations {
                        log::warn!("Iteration limit of {} exceeded", max_iterations);
                        return Err(SolverError::NonConvergence(self.niter));
                    }
                }
            }
        }

        self.phase = Phase::Optimal;
        log::info!(
            "Optimal plan found after {} iterations, value {}",
            self.niter,
            num(self.value())
        );

        Ok(())
    }

    /// Validate the problem data and compute the initial plan.
    pub fn initialize(&mut self) -> Result<()> {
        self.niter = 0;
        self.phase = Phase::Validating;
        self.validate_input()?;

        let (plan, basis) = self.initial.build(&self.costs, &self.supply, &self.demand);
        self.plan = plan;
        self.basis = basis;

        log::debug!(
            "Initial plan ({:?}): value {}, {} basic cells",
            self.initial,
            num(self.value()),
            self.basis.len()
        );

        Ok(())
    }

    /// Perform one improvement step.
    ///
    /// The potentials of the current basis are computed and the first
    /// non-basic cell in row-major order whose reduced cost improves
    /// the objective by more than `zero` enters the basis.
    pub fn step(&mut self) -> Result<Step<F>> {
        let (u, v) = potentials(&self.costs, &self.basis)?;
        self.row_potentials = u;
        self.col_potentials = v;
        log::trace!(
            "Potentials u = {:?}, v = {:?}",
            self.row_potentials.iter().map(|&x| num(x)).collect::<Vec<_>>(),
            self.col_potentials.iter().map(|&x| num(x)).collect::<Vec<_>>()
        );

        let entering = match self
            .costs
            .cells()
            .find(|&(i, j)| !self.basis.contains((i, j)) && self.is_improving(self.reduced_cost(i, j)))
        {
            Some(cell) => cell,
            None => return Ok(Step::Optimal),
        };

        let cycle = find_cycle(&self.basis, entering).ok_or(SolverError::CycleNotFound {
            row: entering.0,
            col: entering.1,
        })?;
        log::trace!("Cycle {:?}", cycle);

        let (flow, k) = cycle_flow(&self.plan, &cycle);
        let leaving = cycle[k];
        apply_cycle(&mut self.plan, &cycle, flow, self.zero);
        self.plan[leaving] = F::zero();
        self.basis.remove(leaving);
        self.basis.insert(entering);

        self.niter += 1;
        if flow <= F::zero() {
            log::warn!(
                "Degenerate pivot in iteration {}: cell {:?} enters with zero flow",
                self.niter,
                entering
            );
        }
        log::debug!(
            "Iteration {}: cell {:?} enters, cell {:?} leaves, flow {}, value {}",
            self.niter,
            entering,
            leaving,
            num(flow),
            num(self.value())
        );

        Ok(Step::Improved { entering, leaving, flow })
    }

    /// Consume the solver and return the current plan.
    pub fn into_solution(self) -> Solution<F> {
        let value = self.value();
        Solution { plan: self.plan, value }
    }

    fn is_improving(&self, reduced_cost: F) -> bool {
        match self.objective {
            Objective::Minimize => reduced_cost < -self.zero,
            Objective::Maximize => reduced_cost > self.zero,
        }
    }

    fn validate_input(&self) -> Result<()> {
        let nrows = self.costs.num_rows();
        let ncols = self.costs.num_cols();

        if self.costs.is_empty() {
            return Err(SolverError::InvalidInput("the cost matrix is empty".to_string()));
        }
        if nrows != self.supply.len() {
            return Err(SolverError::InvalidInput(format!(
                "the cost matrix has {} rows but there are {} supplies",
                nrows,
                self.supply.len()
            )));
        }
        if ncols != self.demand.len() {
            return Err(SolverError::InvalidInput(format!(
                "the cost matrix has {} columns but there are {} demands",
                ncols,
                self.demand.len()
            )));
        }

        for ((i, j), &c) in self.costs.iter() {
            if !c.is_finite() || c < F::zero() {
                return Err(SolverError::InvalidInput(format!(
                    "invalid cost {} in cell ({}, {})",
                    num(c),
                    i,
                    j
                )));
            }
        }
        for (i, &s) in self.supply.iter().enumerate() {
            if !s.is_finite() || s < F::zero() {
                return Err(SolverError::InvalidInput(format!("invalid supply {} of source {}", num(s), i)));
            }
        }
        for (j, &d) in self.demand.iter().enumerate() {
            if !d.is_finite() || d < F::zero() {
                return Err(SolverError::InvalidInput(format!(
                    "invalid demand {} of destination {}",
                    num(d),
                    j
                )));
            }
        }

        let total_supply = self.supply.iter().fold(F::zero(), |s, &x| s + x);
        let total_demand = self.demand.iter().fold(F::zero(), |s, &x| s + x);
        // only round-off of the summation is tolerated
        let tolerance = F::epsilon() * F::from(nrows + ncols).unwrap_or_else(F::one) * total_supply.max(total_demand);
        if (total_supply - total_demand).abs() > tolerance {
            return Err(SolverError::InvalidInput(format!(
                "total supply {} differs from total demand {}",
                num(total_supply),
                num(total_demand)
            )));
        }

        Ok(())
    }

    fn validate_plan(&self) -> Result<()> {
        for ((i, j), &x) in self.plan.iter() {
            if !x.is_finite() || x < F::zero() {
                return Err(SolverError::InvalidInput(format!(
                    "invalid flow {} in cell ({}, {}) of the plan",
                    num(x),
                    i,
                    j
                )));
            }
        }
        Ok(())
    }
}

/// Return the flow that can be moved along a cycle.
///
/// The cells at odd positions lose flow. Returns the minimal flow on
/// these cells and the position of the first cell attaining it.
pub fn cycle_flow<F: Float>(plan: &Matrix<F>, cycle: &[Cell]) -> (F, usize) {
    let mut flow = F::infinity();
    let mut pos = 1;
    for (k, &c) in cycle.iter().enumerate().skip(1).step_by(2) {
        if plan[c] < flow {
            flow = plan[c];
            pos = k;
        }
    }
    (flow, pos)
}

/// Move `flow` along a cycle.
///
/// The cells at even positions (starting with the entering cell)
/// gain `flow`, the cells at odd positions lose `flow`. Results
/// slightly below zero (at most `zero`) are set to zero.
pub fn apply_cycle<F: Float + NumAssign>(plan: &mut Matrix<F>, cycle: &[Cell], flow: F, zero: F) {
    for (k, &c) in cycle.iter().enumerate() {
        if k % 2 == 0 {
            plan[c] += flow;
        } else {
            plan[c] -= flow;
            if plan[c] < F::zero() && plan[c] >= -zero {
                plan[c] = F::zero();
            }
        }
    }
}

fn num<F: Float>(x: F) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

/// Solve a transportation problem.
///
/// The function returns the optimal plan and its objective value.
///
/// # Example
///
/// ```
/// use rs_transport::transport::{solve, Objective};
/// use rs_transport::Matrix;
///
/// let costs = Matrix::from_rows(vec![vec![4.0, 1.0], vec![2.0, 3.0]]).unwrap();
/// let sol = solve(costs, vec![5.0, 5.0], vec![5.0, 5.0], Objective::Minimize).unwrap();
/// assert_eq!(sol.plan.to_rows(), vec![vec![0.0, 5.0], vec![5.0, 0.0]]);
/// assert_eq!(sol.value, 15.0);
/// ```
pub fn solve<F>(costs: Matrix<F>, supply: Vec<F>, demand: Vec<F>, objective: Objective) -> Result<Solution<F>>
where
    F: Float + NumAssign,
{
    let mut spx = TransportSimplex::new(costs, supply, demand);
    spx.set_objective(objective);
    spx.solve()?;
    Ok(spx.into_solution())
}
