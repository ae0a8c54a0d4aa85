//! Interactive route advisor.
//!
//! Reads `BOARDING-DESTINATION` lines and answers each with the cheapest
//! route, e.g. `GRU-CDG` gives `best route: GRU - BRC - SCL - ORL - CDG > $40`.

use std::io::{self, BufRead, Write};

use tracing::info;

use crate::planner::best_route;
use crate::store::Stores;

pub const PROMPT: &str = "please enter the route: ";

/// Split a query line into boarding and destination.
///
/// Anything other than exactly one `-` yields two empty codes, which the
/// planner then rejects as invalid.
pub fn parse_query(line: &str) -> (&str, &str) {
    let line = line.trim();
    let mut parts = line.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(boarding), Some(destination), None) => (boarding.trim(), destination.trim()),
        _ => ("", ""),
    }
}

/// Answer queries from `input` until it is exhausted.
pub fn run<R, W>(stores: &Stores, input: R, mut output: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    info!("starting advisor");

    let mut lines = input.lines();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let (boarding, destination) = parse_query(&line);
        match best_route(stores, boarding, destination) {
            Ok(best) => writeln!(output, "best route: {best}")?,
            Err(e) => writeln!(output, "{e}")?,
        }
    }

    writeln!(output)?;
    info!("advisor input closed");
    Ok(())
}
