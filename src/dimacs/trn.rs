// Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! This module implements read and write functions for transportation
//! problems. A file must look as follows.
//!
//! 1. empty lines are allowed and ignored
//! 2. a line starting with `c` is a comment line and is ignored
//! 3. the first non-comment line must have the form `p trn <n> <m>`,
//!    where `<n>` is an integer > 0 denoting the number of sources and
//!    `<m>` an integer > 0 denoting the number of destinations.
//! 4. after the problem line there must follow supply lines `s <i>
//!    <supply>` and demand lines `d <j> <demand>`, where `<i>` is a
//!    source in `1..n` and `<j>` a destination in `1..m`. Sources and
//!    destinations without such a line have supply or demand 0.
//! 5. after these lines there must be exactly `n * m` cost lines `a
//!    <i> <j> <c>`, one for each pair of source and destination.
//!
//! Solutions consist of exactly one line `s <value>` with the
//! objective value and lines `f <i> <j> <flow>` for each cell with
//! non-zero flow.
//!
//! # Example
//!
//! ```
//! use rs_transport::dimacs;
//! use std::io::Cursor;
//!
//! let instance = dimacs::read::<_, f64>(Cursor::new("
//! p trn 2 1
//! s 1 3
//! s 2 4
//! d 1 7
//! a 1 1 2
//! a 2 1 5
//! ")).unwrap();
//!
//! assert_eq!(instance.supply, vec![3.0, 4.0]);
//! assert_eq!(instance.demand, vec![7.0]);
//! assert_eq!(instance.costs[(1, 0)], 5.0);
//! ```

use super::{DimacsReader, Error, Result};
use crate::matrix::Matrix;
use num_traits::Zero;
use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;

/// A transportation problem instance.
pub struct Instance<T> {
    /// The cost matrix, rows are sources and columns destinations.
    pub costs: Matrix<T>,
    /// The supply of each source.
    pub supply: Vec<T>,
    /// The demand of each destination.
    pub demand: Vec<T>,
}

pub fn read<R: Read, T>(r: R) -> Result<Instance<T>>
where
    T: FromStr + Zero + Clone,
    T::Err: Display,
{
    let mut reader = DimacsReader::new(r);

    // Read the problem line.
    let mut pline = reader.expect_line("p")?;
    pline.expect("trn")?;
    let nrows: usize = pline.number()?;
    let ncols: usize = pline.number()?;
    pline.end()?;

    if nrows == 0 || ncols == 0 {
        return Err(Error::Data {
            line: pline.line,
            msg: "the numbers of sources and destinations must be positive".to_string(),
        });
    }

    let mut supply = vec![T::zero(); nrows];
    let mut demand = vec![T::zero(); ncols];
    let mut costs: Matrix<Option<T>> = Matrix::new(nrows, ncols, None);
    let mut ncosts = 0;

    while let Some((d, mut toks)) = reader.read_one_line_of(&["s", "d", "a"])? {
        match d {
            "s" => {
                let i = toks.index(nrows, "source")?;
                supply[i] = toks.number()?;
            }
            "d" => {
                let j = toks.index(ncols, "destination")?;
                demand[j] = toks.number()?;
            }
            _ => {
                let i = toks.index(nrows, "source")?;
                let j = toks.index(ncols, "destination")?;
                let c: T = toks.number()?;
                if costs[(i, j)].is_some() {
                    return Err(Error::Data {
                        line: toks.line,
                        msg: format!("duplicate cost for cell ({}, {})", i + 1, j + 1),
                    });
                }
                costs[(i, j)] = Some(c);
                ncosts += 1;
            }
        }

        toks.end()?;
    }

    if ncosts != nrows * ncols {
        let (i, j) = costs
            .iter()
            .find(|(_, c)| c.is_none())
            .map(|(cell, _)| cell)
            .unwrap_or((0, 0));
        return Err(Error::Format {
            line: 0,
            msg: format!(
                "expected {} cost lines, got {} (missing cell ({}, {}))",
                nrows * ncols,
                ncosts,
                i + 1,
                j + 1
            ),
        });
    }

    let costs = Matrix::from_fn(nrows, ncols, |i, j| costs[(i, j)].clone().unwrap_or_else(T::zero));

    Ok(Instance { costs, supply, demand })
}

pub fn read_from_file<T>(filename: &str) -> Result<Instance<T>>
where
    T: FromStr + Zero + Clone,
    T::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write a transportation problem instance.
pub fn write<W, T>(mut w: W, instance: &Instance<T>) -> std::io::Result<()>
where
    W: Write,
    T: Zero + Display,
{
    writeln!(w, "p trn {} {}", instance.supply.len(), instance.demand.len())?;
    for (i, s) in instance.supply.iter().enumerate() {
        if !s.is_zero() {
            writeln!(w, "s {} {}", i + 1, s)?;
        }
    }
    for (j, d) in instance.demand.iter().enumerate() {
        if !d.is_zero() {
            writeln!(w, "d {} {}", j + 1, d)?;
        }
    }
    for ((i, j), c) in instance.costs.iter() {
        writeln!(w, "a {} {} {}", i + 1, j + 1, c)?;
    }

    Ok(())
}

/// Write a transportation problem instance to a named file.
pub fn write_to_file<T>(filename: &str, instance: &Instance<T>) -> std::io::Result<()>
where
    T: Zero + Display,
{
    write(&mut std::fs::File::create(filename)?, instance)
}

/// Write a solution of a transportation problem.
pub fn write_solution<W, T>(mut w: W, plan: &Matrix<T>, value: T) -> std::io::Result<()>
where
    W: Write,
    T: Display + Zero,
{
    writeln!(w, "s {}", value)?;
    for ((i, j), x) in plan.iter() {
        if !x.is_zero() {
            writeln!(w, "f {} {} {}", i + 1, j + 1, x)?;
        }
    }

    Ok(())
}

/// Write a solution of a transportation problem to a named file.
pub fn write_solution_to_file<T>(filename: &str, plan: &Matrix<T>, value: T) -> std::io::Result<()>
where
    T: Display + Zero,
{
    write_solution(&mut std::fs::File::create(filename)?, plan, value)
}

/// Read a solution of a transportation problem.
///
/// Returns the objective value and the list of non-zero cells
/// `(i, j, flow)` with 0-based indices.
pub fn read_solution<R, T>(r: R) -> Result<(T, Vec<(usize, usize, T)>)>
where
    R: Read,
    T: FromStr,
    T::Err: Display,
{
    let mut reader = DimacsReader::new(r);
    let mut flows = vec![];
    let mut sol = None;

    while let Some((d, mut toks)) = reader.read_one_line_of(&["f", "s"])? {
        if d == "f" {
            let i = toks.index(usize::MAX, "source")?;
            let j = toks.index(usize::MAX, "destination")?;
            flows.push((i, j, toks.number()?));
        } else {
            if sol.is_some() {
                return Err(Error::Format {
                    line: toks.line,
                    msg: "The solution value must be specified exactly once".to_string(),
                });
            }
            sol = Some(toks.number()?);
        }
        toks.end()?;
    }

    Ok((
        sol.ok_or_else(|| Error::Format {
            line: 0,
            msg: "Missing solution value".to_string(),
        })?,
        flows,
    ))
}

/// Read a solution of a transportation problem from a named file.
pub fn read_solution_from_file<T>(filename: &str) -> Result<(T, Vec<(usize, usize, T)>)>
where
    T: FromStr,
    T::Err: Display,
{
    read_solution(std::fs::File::open(filename)?)
}

#[cfg(test)]
mod tests {
    use crate::dimacs::{self, Error};
    use crate::matrix::Matrix;
    use std::io::Cursor;

    #[test]
    fn parse_file_test() {
        let file = "c this is a test file

p trn 3 3
s 1 20
s 2 30
s 3 50
d 1 30
d 2 30
d 3 40

c there might be empty lines

a 1 1 8
a 1 2 6
a 1 3 10
a 2 1 9
a 2 2 4
a 2 3 8
a 3 1 3
a 3 2 6
a 3 3 7

c end of the file
";
        let instance = dimacs::read::<_, f64>(Cursor::new(file)).unwrap();
        assert_eq!(instance.supply, vec![20.0, 30.0, 50.0]);
        assert_eq!(instance.demand, vec![30.0, 30.0, 40.0]);
        assert_eq!(
            instance.costs.to_rows(),
            vec![vec![8.0, 6.0, 10.0], vec![9.0, 4.0, 8.0], vec![3.0, 6.0, 7.0]]
        );
    }

    #[test]
    fn parse_errors() {
        let missing = "p trn 2 2\ns 1 1\nd 1 1\na 1 1 1\na 1 2 1\na 2 1 1\n";
        match dimacs::read::<_, f64>(Cursor::new(missing)) {
            Err(Error::Format { msg, .. }) => assert!(msg.contains("missing cell (2, 2)")),
            _ => panic!("missing cost line not detected"),
        }

        let invalid = "p trn 2 2\ns 3 1\n";
        match dimacs::read::<_, f64>(Cursor::new(invalid)) {
            Err(Error::Data { line, .. }) => assert_eq!(line, 2),
            _ => panic!("invalid source not detected"),
        }

        let duplicate = "p trn 1 1\na 1 1 1\na 1 1 2\n";
        assert!(matches!(
            dimacs::read::<_, f64>(Cursor::new(duplicate)),
            Err(Error::Data { line: 3, .. })
        ));

        let wrong_problem = "p min 1 1\n";
        assert!(matches!(
            dimacs::read::<_, f64>(Cursor::new(wrong_problem)),
            Err(Error::Format { line: 1, .. })
        ));
    }

    #[test]
    fn write_test_file() {
        let instance = dimacs::Instance {
            costs: Matrix::from_rows(vec![vec![4, 1], vec![2, 3]]).unwrap(),
            supply: vec![5, 5],
            demand: vec![10, 0],
        };

        let mut buf = Cursor::new(Vec::new());
        dimacs::trn::write(&mut buf, &instance).unwrap();

        assert_eq!(
            String::from_utf8(buf.into_inner()).unwrap(),
            "p trn 2 2
s 1 5
s 2 5
d 1 10
a 1 1 4
a 1 2 1
a 2 1 2
a 2 2 3
"
        );
    }

    #[test]
    fn write_solution_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let plan = Matrix::from_rows(vec![vec![0, 5], vec![5, 0]]).unwrap();

        let mut buf = Cursor::new(Vec::new());
        dimacs::trn::write_solution(&mut buf, &plan, 15)?;

        let soltxt = String::from_utf8(buf.into_inner())?;
        assert_eq!(soltxt, "s 15\nf 1 2 5\nf 2 1 5\n");

        let (value, flows) = dimacs::read_solution::<_, isize>(Cursor::new(soltxt))?;
        assert_eq!(value, 15);
        assert_eq!(flows, vec![(0, 1, 5), (1, 0, 5)]);

        Ok(())
    }
}
