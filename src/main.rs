//! Command line interface: maximum clique search and graph class recognition on DIMACS instances

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

use std::error::Error;
use std::time::Instant;

use clap::{App, ArgMatches, load_yaml};
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use clique_qt::check::{is_prime, is_quasi_threshold, is_quasi_threshold_2, is_split, quasi_threshold_obstructions, split_partition};
use clique_qt::divanc::divanc;
use clique_qt::graph::Graph;
use clique_qt::search::bron_kerbosch::maximum_clique_and_count;
use clique_qt::search::branch_and_bound::branch_and_bound;
use clique_qt::search::coloring::ColoringStrategy;
use clique_qt::search::max_clique::{MaxCliqueSearch, PruningPolicy};
use clique_qt::util::{export_results, read_params, run_with_budget, Params};

/// is_prime enumerates every subset, larger graphs are not tested
const PRIME_TEST_MAX_NODES:usize = 20;

/// sorted node list
fn sorted<I:IntoIterator<Item=usize>>(nodes:I) -> Vec<usize> {
    let mut res:Vec<usize> = nodes.into_iter().collect();
    res.sort_unstable();
    res
}

/// parses a comma separated list of nodes
fn parse_seeds(s:&str) -> Result<Vec<usize>, Box<dyn Error>> {
    let mut res = Vec::new();
    for e in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        res.push(e.parse::<usize>().map_err(|err| format!("invalid seed node {:?}: {}", e, err))?);
    }
    Ok(res)
}

/// maximum clique using the iterative search within the time budget
fn run_clique(params:Params, sub_args:&ArgMatches) -> Result<(), Box<dyn Error>> {
    let strategy = sub_args.value_of("coloring").unwrap_or("largest_first").parse::<ColoringStrategy>()?;
    let policy = PruningPolicy::parse(sub_args.value_of("policy").unwrap_or("cardinality"), strategy)?;
    let seeds = match sub_args.value_of("seeds") {
        None => Vec::new(),
        Some(s) => parse_seeds(s)?,
    };
    info!(%policy, ?seeds, "searching a maximum clique");
    let t_start = Instant::now();
    let time = params.time;
    let instance = params.instance;
    let outcome = run_with_budget(time, move || {
        MaxCliqueSearch::new(policy).with_seeds(&seeds).run(&instance)
    });
    let duration = t_start.elapsed().as_secs_f32();
    let (clique, stats) = match outcome {
        None => return Err(format!("no result within {} seconds", time).into()),
        Some(res) => res?,
    };
    let clique = sorted(clique);
    info!("search took {:.3} seconds. clique size: {}", duration, clique.len());
    println!("{:?}", clique);
    let stats = json!({
        "primal_list": vec![clique.len()],
        "time_searched": duration,
        "inst_name": params.inst_filename,
        "search": stats,
    });
    export_results(&[clique], &stats, params.perf_file.as_deref(), params.sol_file.as_deref())
}

/// maximum clique using Bron–Kerbosch or the branch & bound
fn run_enumerate(params:Params, sub_args:&ArgMatches) -> Result<(), Box<dyn Error>> {
    let method = sub_args.value_of("method").unwrap_or("bron_kerbosch").to_string();
    let t_start = Instant::now();
    let time = params.time;
    let instance = params.instance;
    let worker_method = method.clone();
    let outcome = run_with_budget(time, move || {
        match worker_method.as_str() {
            "branch_and_bound" => (branch_and_bound(&instance), None),
            _ => {
                let (clique, nb) = maximum_clique_and_count(&instance);
                (clique, Some(nb))
            }
        }
    });
    let duration = t_start.elapsed().as_secs_f32();
    let (clique, nb_maximal) = outcome
        .ok_or_else(|| format!("no result within {} seconds", time))?;
    let clique = sorted(clique);
    info!("{} took {:.3} seconds. clique size: {}", method, duration, clique.len());
    if let Some(nb) = nb_maximal {
        info!("{} maximal cliques", nb);
    }
    println!("{:?}", clique);
    let stats = json!({
        "primal_list": vec![clique.len()],
        "time_searched": duration,
        "inst_name": params.inst_filename,
        "method": method,
        "nb_maximal_cliques": nb_maximal,
    });
    export_results(&[clique], &stats, params.perf_file.as_deref(), params.sol_file.as_deref())
}

/// every induced P4 and C4, one per line
fn run_patterns(params:Params) -> Result<(), Box<dyn Error>> {
    let (p4s, c4s) = quasi_threshold_obstructions(&params.instance);
    info!(nb_p4 = p4s.len(), nb_c4 = c4s.len(), "patterns found");
    for w in p4s.iter() {
        println!("P4 {:?}", w.nodes());
    }
    for w in c4s.iter() {
        println!("C4 {:?}", w.nodes());
    }
    let solution:Vec<Vec<usize>> = p4s.iter().chain(c4s.iter()).map(|w| w.to_vec()).collect();
    let stats = json!({
        "inst_name": params.inst_filename,
        "nb_p4": p4s.len(),
        "nb_c4": c4s.len(),
    });
    export_results(&solution, &stats, params.perf_file.as_deref(), params.sol_file.as_deref())
}

/// graph classes of the instance
fn run_classify(params:Params) -> Result<(), Box<dyn Error>> {
    let g:&Graph<usize> = &params.instance;
    let chordal = g.is_chordal();
    let split = is_split(g);
    let quasi_threshold = is_quasi_threshold(g);
    if quasi_threshold != is_quasi_threshold_2(g) {
        error!("quasi-threshold tests disagree");
    }
    let prime = if g.node_count() <= PRIME_TEST_MAX_NODES {
        Some(is_prime(g))
    } else {
        info!("more than {} nodes, primality not tested", PRIME_TEST_MAX_NODES);
        None
    };
    println!("chordal:         {}", chordal);
    println!("split:           {}", split);
    println!("quasi-threshold: {}", quasi_threshold);
    match prime {
        None => println!("prime:           not tested"),
        Some(p) => println!("prime:           {}", p),
    }
    let solution = match split_partition(g) {
        None => Vec::new(),
        Some((clique, independent)) => vec![clique, independent],
    };
    let stats = json!({
        "inst_name": params.inst_filename,
        "chordal": chordal,
        "split": split,
        "quasi_threshold": quasi_threshold,
        "prime": prime,
    });
    export_results(&solution, &stats, params.perf_file.as_deref(), params.sol_file.as_deref())
}

/// parts of diameter at most 2, one per line
fn run_divanc(params:Params) -> Result<(), Box<dyn Error>> {
    let t_start = Instant::now();
    let parts = divanc(&params.instance);
    let duration = t_start.elapsed().as_secs_f32();
    let solution:Vec<Vec<usize>> = parts.iter().map(|p| sorted(p.nodes().iter().copied())).collect();
    info!("divanc took {:.3} seconds. {} parts", duration, solution.len());
    for part in solution.iter() {
        println!("{:?}", part);
    }
    let stats = json!({
        "inst_name": params.inst_filename,
        "time_searched": duration,
        "nb_parts": solution.len(),
    });
    export_results(&solution, &stats, params.perf_file.as_deref(), params.sol_file.as_deref())
}

fn run(main_args:&ArgMatches) -> Result<(), Box<dyn Error>> {
    let params = read_params(main_args)?;
    match main_args.subcommand() {
        ("clique", Some(sub_args)) => run_clique(params, sub_args),
        ("enumerate", Some(sub_args)) => run_enumerate(params, sub_args),
        ("patterns", _) => run_patterns(params),
        ("classify", _) => run_classify(params),
        ("divanc", _) => run_divanc(params),
        _ => Err("no command given (clique, enumerate, patterns, classify or divanc)".into()),
    }
}

/**
reads an instance, takes the time limit as a parameter, and runs the requested command.
Logs go to stderr (level set by RUST_LOG, info by default).
*/
pub fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
