use std::error::Error;
use std::fs;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use clap::ArgMatches;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::dimacs::read_from_file;
use crate::graph::{Graph, GraphInstance};

/// parameters shared by every command of the binary
#[derive(Debug)]
pub struct Params {
    /// instance filename
    pub inst_filename: String,
    /// graph read from the instance
    pub instance: Graph<usize>,
    /// time budget (seconds)
    pub time: f32,
    /// where to write the solution (if any)
    pub sol_file: Option<String>,
    /// where to write the statistics (if any)
    pub perf_file: Option<String>,
}

/// longest time budget waited for (seconds)
const MAX_BUDGET:f32 = 1e9;

/// parses a time budget in seconds: a finite non-negative number
pub fn parse_time(s:&str) -> Result<f32, String> {
    let time = s.trim().parse::<f32>()
        .map_err(|e| format!("unable to parse the time given: {}", e))?;
    if !time.is_finite() || time < 0. {
        return Err(format!("invalid time budget: {}", s));
    }
    Ok(time)
}

/** reads command line input: instance name, time, solution_filename, stats_filename */
pub fn read_params(main_args:&ArgMatches) -> Result<Params, Box<dyn Error>> {
    let inst_filename = main_args.value_of("instance").ok_or("missing instance")?;
    let time = parse_time(main_args.value_of("time").unwrap_or("60"))?;
    let sol_file = main_args.value_of("solution").map(|e| e.to_string());
    if let Some(e) = &sol_file {
        info!("printing solutions in: {}", e);
    }
    let perf_file = main_args.value_of("perf").map(|e| e.to_string());
    if let Some(e) = &perf_file {
        info!("printing perfs in: {}", e);
    }
    info!("reading instance: {}", inst_filename);
    let instance = read_from_file(inst_filename)?;
    instance.display_statistics();
    Ok(Params { inst_filename: inst_filename.to_string(), instance, time, sol_file, perf_file })
}

/** writes a string encoding the solution: each line is a group of nodes */
pub fn solution_to_string(solution:&[Vec<usize>]) -> String {
    let mut res = String::default();
    for e in solution {
        let line:Vec<String> = e.iter().map(|v| v.to_string()).collect();
        res += line.join(" ").as_str();
        res += "\n";
    }
    res
}

/// exports search results to files
pub fn export_results(
    solution:&[Vec<usize>],
    stats:&Value,
    perf_file:Option<&str>,
    sol_file:Option<&str>,
) -> Result<(), Box<dyn Error>> {
    if let Some(filename) = perf_file {
        fs::write(filename, serde_json::to_string(stats)?)?;
    }
    if let Some(filename) = sol_file {
        fs::write(filename, solution_to_string(solution))?;
    }
    Ok(())
}

/**
runs f in a worker thread and waits at most `time` seconds for its result.
Returns None if the time budget is exhausted (the worker is left running and its result dropped)
or if the worker stops without a result (panic).
*/
pub fn run_with_budget<T, F>(time:f32, f:F) -> Option<T>
where T:Send+'static, F:FnOnce() -> T + Send + 'static {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        // the receiver may be gone if the budget is exhausted
        let _ = sender.send(f());
    });
    let budget = Duration::from_secs_f32(time.max(0.).min(MAX_BUDGET));
    match receiver.recv_timeout(budget) {
        Ok(res) => Some(res),
        Err(RecvTimeoutError::Timeout) => {
            warn!(time, "time budget exhausted");
            None
        }
        Err(RecvTimeoutError::Disconnected) => {
            error!("worker stopped without a result");
            None
        }
    }
}
