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

use std::collections::HashMap;
use std::error::Error;
use std::fs::read_dir;
use std::path::Path;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rs_transport::dimacs;
use rs_transport::transport::{solve, InitialPlan, Objective, Phase, SolverError, Step, TransportSimplex};
use rs_transport::Matrix;

const EPS: f64 = 1e-6;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_instance(seed: u64, nrows: usize, ncols: usize, fractional: bool) -> (Matrix<f64>, Vec<f64>, Vec<f64>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let costs = Matrix::from_fn(nrows, ncols, |_, _| rng.gen_range(1..=50u32) as f64);
    let mut supply = (0..nrows).map(|_| rng.gen_range(10..=60u32) as f64).collect::<Vec<_>>();
    if fractional {
        for s in supply.iter_mut() {
            *s /= 4.0;
        }
    }
    let total = supply.iter().sum::<f64>();
    let mut demand = vec![0.0; ncols];
    for d in demand.iter_mut().take(ncols - 1) {
        *d = if fractional {
            total / ncols as f64
        } else {
            (total / ncols as f64).floor()
        };
    }
    demand[ncols - 1] = total - demand[..ncols - 1].iter().sum::<f64>();
    (costs, supply, demand)
}

fn scenario_a() -> (Matrix<f64>, Vec<f64>, Vec<f64>) {
    (
        Matrix::from_rows(vec![vec![8.0, 6.0, 10.0], vec![9.0, 4.0, 8.0], vec![3.0, 6.0, 7.0]]).unwrap(),
        vec![20.0, 30.0, 50.0],
        vec![30.0, 30.0, 40.0],
    )
}

/// Check the row and column sums relative to the total supply.
fn assert_feasible(plan: &Matrix<f64>, supply: &[f64], demand: &[f64]) {
    let tol = 1e-9 * supply.iter().sum::<f64>();
    for (i, &s) in supply.iter().enumerate() {
        let total = plan.row(i).iter().sum::<f64>();
        assert!((total - s).abs() <= tol, "row {}: {} != {}", i, total, s);
    }
    for (j, &d) in demand.iter().enumerate() {
        let total = plan.col(j).sum::<f64>();
        assert!((total - d).abs() <= tol, "column {}: {} != {}", j, total, d);
    }
    for ((i, j), &x) in plan.iter() {
        assert!(x >= 0.0, "negative flow {} in cell ({}, {})", x, i, j);
    }
}

fn assert_optimal(spx: &TransportSimplex<f64>) {
    let (u, v) = spx.potentials();
    for ((i, j), &c) in spx.costs().iter() {
        if spx.is_basic(i, j) {
            assert!((u[i] + v[j] - c).abs() < EPS);
        } else {
            let r = spx.reduced_cost(i, j);
            match spx.objective() {
                Objective::Minimize => assert!(r >= -EPS, "reduced cost {} in cell ({}, {})", r, i, j),
                Objective::Maximize => assert!(r <= EPS, "reduced cost {} in cell ({}, {})", r, i, j),
            }
        }
    }
}

#[test]
fn test_instances() -> Result<(), Box<dyn Error>> {
    init_logger();
    let mut values = HashMap::new();

    for entry in read_dir(Path::new("tests/transport"))? {
        let entry = entry?;
        if entry.path().extension().map(|ext| ext == "sol").unwrap_or(false) {
            let (value, _) = dimacs::read_solution_from_file::<f64>(&entry.path().to_string_lossy())?;
            if let Some(file_stem) = entry.path().file_stem().map(|s| s.to_string_lossy().to_string()) {
                values.insert(file_stem, value);
            }
        }
    }

    let mut ninstances = 0;
    for entry in read_dir(Path::new("tests/transport"))? {
        let entry = entry?;
        if entry.path().extension().map(|ext| ext == "trn").unwrap_or(false) {
            let instance = dimacs::read_from_file::<f64>(&entry.path().to_string_lossy())?;
            let supply = instance.supply.clone();
            let demand = instance.demand.clone();

            let mut spx = TransportSimplex::new(instance.costs, instance.supply, instance.demand);
            spx.solve()?;
            assert_eq!(spx.phase(), Phase::Optimal);
            assert_feasible(spx.plan(), &supply, &demand);
            assert_optimal(&spx);

            if let Some(value) = entry
                .path()
                .file_name()
                .and_then(|s| values.get(s.to_string_lossy().as_ref()))
            {
                assert!((*value - spx.value()).abs() < EPS, "{:?}", entry.path());
            } else {
                panic!("Can't find solution file for {:?}", entry.path());
            }
            ninstances += 1;
        }
    }
    assert_eq!(ninstances, 5);

    Ok(())
}

#[test]
fn test_scenario_a_minimize() {
    init_logger();
    let (costs, supply, demand) = scenario_a();
    let sol = solve(costs, supply.clone(), demand.clone(), Objective::Minimize).unwrap();
    assert_feasible(&sol.plan, &supply, &demand);
    assert_eq!(sol.value, 550.0);
}

#[test]
fn test_scenario_b_single_cell() {
    let costs = Matrix::from_rows(vec![vec![12.5]]).unwrap();
    let sol = solve(costs, vec![8.0], vec![8.0], Objective::Minimize).unwrap();
    assert_eq!(sol.plan[(0, 0)], 8.0);
    assert_eq!(sol.value, 8.0 * 12.5);

    let costs = Matrix::from_rows(vec![vec![12.5]]).unwrap();
    let sol = solve(costs, vec![8.0], vec![8.0], Objective::Maximize).unwrap();
    assert_eq!(sol.value, 100.0);
}

#[test]
fn test_scenario_c_tie_break() {
    init_logger();
    // (0, 0) and (1, 0) have the same minimal cost, (0, 0) must be filled first
    let costs = Matrix::from_rows(vec![vec![1.0, 5.0, 4.0], vec![1.0, 6.0, 3.0]]).unwrap();
    let mut spx = TransportSimplex::new(costs, vec![8.0, 7.0], vec![5.0, 5.0, 5.0]);
    spx.initialize().unwrap();
    assert_eq!(spx.plan().to_rows(), vec![vec![5.0, 3.0, 0.0], vec![0.0, 2.0, 5.0]]);
    assert!(!spx.is_basic(1, 0));
}

#[test]
fn test_scenario_d_maximize() {
    init_logger();
    let (costs, supply, demand) = scenario_a();
    let min = solve(costs.clone(), supply.clone(), demand.clone(), Objective::Minimize).unwrap();
    let max = solve(costs, supply.clone(), demand.clone(), Objective::Maximize).unwrap();
    assert_feasible(&max.plan, &supply, &demand);
    assert!(max.value >= min.value);
    assert_eq!(max.value, 790.0);
}

#[test]
fn test_monotonic_improvement() {
    init_logger();
    for &objective in &[Objective::Minimize, Objective::Maximize] {
        for seed in 1..=5 {
            let (costs, supply, demand) = random_instance(seed, 8, 10, false);
            let mut spx = TransportSimplex::new(costs, supply.clone(), demand.clone());
            spx.set_objective(objective);
            spx.initialize().unwrap();
            assert_feasible(spx.plan(), &supply, &demand);

            let mut value = spx.value();
            let mut niter = 0;
            while let Step::Improved { flow, .. } = spx.step().unwrap() {
                niter += 1;
                assert!(flow >= 0.0);
                assert_feasible(spx.plan(), &supply, &demand);
                let new_value = spx.value();
                match objective {
                    Objective::Minimize => assert!(new_value <= value + EPS),
                    Objective::Maximize => assert!(new_value >= value - EPS),
                }
                value = new_value;
                assert!(niter < 1000);
            }
            assert_optimal(&spx);
        }
    }
}

#[test]
fn test_random_instances() {
    init_logger();
    for seed in 1..=10 {
        for &fractional in &[false, true] {
            for &objective in &[Objective::Minimize, Objective::Maximize] {
                let (costs, supply, demand) = random_instance(seed, 8, 10, fractional);
                let mut spx = TransportSimplex::new(costs, supply.clone(), demand.clone());
                spx.set_objective(objective);
                spx.solve().unwrap();
                assert_feasible(spx.plan(), &supply, &demand);
                assert_optimal(&spx);

                // the potentials certify the objective value
                let (u, v) = spx.potentials();
                let dual = supply.iter().zip(u).map(|(s, u)| s * u).sum::<f64>()
                    + demand.iter().zip(v).map(|(d, v)| d * v).sum::<f64>();
                assert!((dual - spx.value()).abs() < 1e-6 * spx.value().max(1.0));
            }
        }
    }
}

#[test]
fn test_determinism() {
    for seed in 1..=3 {
        let (costs, supply, demand) = random_instance(seed, 6, 7, true);
        let first = solve(costs.clone(), supply.clone(), demand.clone(), Objective::Minimize).unwrap();
        let second = solve(costs, supply, demand, Objective::Minimize).unwrap();
        assert_eq!(first.value.to_bits(), second.value.to_bits());
        for ((c, x), (_, y)) in first.plan.iter().zip(second.plan.iter()) {
            assert_eq!(x.to_bits(), y.to_bits(), "cell {:?}", c);
        }
    }
}

#[test]
fn test_degenerate_initial_plan() {
    init_logger();
    // every allocation of the least-cost method exhausts a row and a column
    let costs = Matrix::from_rows(vec![vec![1.0, 7.0, 3.0], vec![6.0, 2.0, 8.0], vec![4.0, 9.0, 5.0]]).unwrap();
    let mut spx = TransportSimplex::new(costs, vec![10.0, 20.0, 30.0], vec![10.0, 20.0, 30.0]);
    spx.solve().unwrap();
    assert_eq!(spx.value(), 10.0 + 40.0 + 150.0);
    assert_optimal(&spx);
}

#[test]
fn test_zero_supply() {
    let costs = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let sol = solve(costs, vec![0.0, 6.0], vec![2.0, 4.0], Objective::Minimize).unwrap();
    assert_eq!(sol.plan.to_rows(), vec![vec![0.0, 0.0], vec![2.0, 4.0]]);
    assert_eq!(sol.value, 22.0);
}

#[test]
fn test_small_quantities() {
    init_logger();
    let (costs, supply, demand) = scenario_a();
    for &scale in &[1e-7, 1e-8] {
        let supply = supply.iter().map(|s| s * scale).collect::<Vec<_>>();
        let demand = demand.iter().map(|d| d * scale).collect::<Vec<_>>();
        for &(objective, expected) in &[(Objective::Minimize, 550.0), (Objective::Maximize, 790.0)] {
            for &initial in &[InitialPlan::LeastCost, InitialPlan::NorthWestCorner] {
                let mut spx = TransportSimplex::new(costs.clone(), supply.clone(), demand.clone());
                spx.set_objective(objective);
                spx.initial = initial;
                spx.solve().unwrap();
                assert_feasible(spx.plan(), &supply, &demand);
                assert!((spx.value() / scale - expected).abs() < 1e-6, "{:?} {:?}", objective, initial);
            }
        }
    }
}

#[test]
fn test_errors() {
    let (costs, supply, demand) = scenario_a();

    let err = solve(costs.clone(), supply.clone(), vec![30.0, 30.0], Objective::Minimize).unwrap_err();
    assert!(matches!(err, SolverError::InvalidInput(_)));
    assert!(err.to_string().starts_with("invalid input"));

    let err = solve(costs.clone(), vec![20.0, -30.0, 50.0], demand.clone(), Objective::Minimize).unwrap_err();
    assert!(matches!(err, SolverError::InvalidInput(_)));

    let err = solve(costs, supply, vec![30.0, 30.0, 41.0], Objective::Maximize).unwrap_err();
    assert!(matches!(err, SolverError::InvalidInput(_)));

    // unbalanced by much less than the totals
    let err = solve(
        Matrix::from_rows(vec![vec![1.0, 2.0]]).unwrap(),
        vec![1e6],
        vec![500_000.0, 499_999.5],
        Objective::Minimize,
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("invalid input: total supply"));

    let err = SolverError::PotentialsDivergence {
        rows: vec![1],
        cols: vec![],
    };
    assert_eq!(err.to_string(), "potentials could not be computed for rows [1] and columns []");
    assert_eq!(
        SolverError::CycleNotFound { row: 2, col: 3 }.to_string(),
        "no cycle through cell (2, 3)"
    );
}

#[cfg(feature = "serialize")]
#[test]
fn test_serialize_solution() {
    let (costs, supply, demand) = scenario_a();
    let sol = solve(costs, supply, demand, Objective::Minimize).unwrap();
    let serialized = serde_json::to_string(&sol).unwrap();
    let deserialized: rs_transport::Solution<f64> = serde_json::from_str(&serialized).unwrap();
    assert_eq!(sol, deserialized);
}
