/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

use rs_transport::dimacs;
use rs_transport::transport::{InitialPlan, Objective, TransportSimplex};
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::result::Result;

use rustop::opts;
use time::OffsetDateTime;

fn run(filename: &str, objective: Objective, initial: InitialPlan, zero: f64) -> Result<(), Box<dyn Error>> {
    let tstart = OffsetDateTime::now_utc();
    let instance = dimacs::read_from_file::<f64>(filename)?;
    let tend = OffsetDateTime::now_utc();

    println!("Instance            : {}", filename);
    println!("Read Time (seconds) : {}", (tend - tstart).as_seconds_f64());
    println!("Number of sources   : {}", instance.supply.len());
    println!("Number of sinks     : {}", instance.demand.len());
    println!("Objective           : {:?}", objective);
    println!("Initial plan        : {:?}", initial);

    let mut spx = TransportSimplex::new(instance.costs, instance.supply, instance.demand);
    spx.set_objective(objective);
    spx.initial = initial;
    spx.zero = zero;

    let tstart = OffsetDateTime::now_utc();
    let result = spx.solve();
    let tend = OffsetDateTime::now_utc();
    let soltime = (tend - tstart).as_seconds_f64();

    println!();
    println!("Solution state      : {:?}", spx.phase());
    println!("Time (seconds)      : {:.2}", soltime);
    println!("Iterations (total)  : {}", spx.num_iterations());
    result?;
    println!("Value               : {:.2}", spx.value());
    println!();
    println!("Write solution to   : {}.sol", filename);

    let solfile = PathBuf::from(format!("{}.sol", filename));
    let f = &mut std::fs::File::create(&solfile)?;
    let fname = solfile
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| "".into());
    writeln!(f, "c Solved with a transportation simplex")?;
    writeln!(f, "c instance            : {}", fname)?;
    writeln!(f, "c solution time       : {:.2} seconds", soltime)?;
    writeln!(f, "c number of iterations: {}", spx.num_iterations())?;
    dimacs::write_solution(f, spx.plan(), spx.value())?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Solve a transportation problem with the stepping-stone method.";
        param file:String, desc:"Instance file name";
        opt maximize:bool, desc:"Maximize the objective instead of minimizing";
        opt north_west:bool, desc:"Start with the north-west corner method";
        opt zero:f64=1e-6, desc:"Tolerance for reduced costs";
    }
    .parse_or_exit();

    let objective = if args.maximize {
        Objective::Maximize
    } else {
        Objective::Minimize
    };

    let initial = if args.north_west {
        InitialPlan::NorthWestCorner
    } else {
        InitialPlan::LeastCost
    };

    run(&args.file, objective, initial, args.zero)
}
