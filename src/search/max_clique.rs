use std::collections::HashSet;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use std::mem;

use bit_set::BitSet;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::graph::{intersection_size, Graph, GraphInstance, VertexId};
use crate::search::coloring::{nb_colors, ColoringStrategy};
use crate::search::{loopless_adjacency, pop_first};

/// errors of the maximum clique search
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliqueError {
    /// the seed nodes given to the search are not pairwise adjacent (or not in the graph)
    #[error("the given `nodes` {nodes} do not form a clique")]
    NotAClique {
        /// the offending seed list
        nodes: String
    },
}

/// unknown pruning policy name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown pruning policy: {0} (expected unbounded, cardinality, greedy or partial_greedy)")]
pub struct ParsePolicyError(pub String);

/**
Decides whether the search descends into a branch.
A branch extends the partial clique Q with candidates cand_q; it is explored only if it may
still beat the incumbent.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PruningPolicy {
    /// descend whenever cand_q is not empty
    Unbounded,
    /// descend iff |Q| + |cand_q| > |best|
    Cardinality,
    /// descend iff |Q| + χ_greedy(cand_q) > |best|
    GreedyColour(ColoringStrategy),
    /// greedy colour bound when |Q| is a multiple of 3, cardinality bound otherwise
    PartialGreedyColour(ColoringStrategy),
}

impl Default for PruningPolicy {
    fn default() -> Self { Self::Cardinality }
}

impl fmt::Display for PruningPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => write!(f, "unbounded"),
            Self::Cardinality => write!(f, "cardinality"),
            Self::GreedyColour(s) => write!(f, "greedy({})", s),
            Self::PartialGreedyColour(s) => write!(f, "partial_greedy({})", s),
        }
    }
}

impl PruningPolicy {
    /// builds a policy from its name (the coloring strategy is used by the colour bounds only)
    pub fn parse(name:&str, strategy:ColoringStrategy) -> Result<Self, ParsePolicyError> {
        match name {
            "unbounded" => Ok(Self::Unbounded),
            "cardinality" => Ok(Self::Cardinality),
            "greedy" => Ok(Self::GreedyColour(strategy)),
            "partial_greedy" => Ok(Self::PartialGreedyColour(strategy)),
            _ => Err(ParsePolicyError(name.to_string()))
        }
    }

    /// true iff the branch (Q of size clique_len, candidates cand_q) may beat an incumbent of size best_len
    pub fn admits<G:GraphInstance+?Sized>(&self, inst:&G, clique_len:usize, cand_q:&BitSet, best_len:usize) -> bool {
        match self {
            Self::Unbounded => !cand_q.is_empty(),
            Self::Cardinality => clique_len + cand_q.len() > best_len,
            Self::GreedyColour(s) => clique_len + nb_colors(inst, cand_q, *s) > best_len,
            Self::PartialGreedyColour(s) => {
                if clique_len % 3 == 0 {
                    clique_len + nb_colors(inst, cand_q, *s) > best_len
                } else {
                    clique_len + cand_q.len() > best_len
                }
            }
        }
    }
}

/// result of a search on vertex ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// best clique found (seeds first)
    pub clique: Vec<VertexId>,
    /// number of iterations of the search loop
    pub steps: usize,
}

/// statistics of a labelled search (exported by the CLI)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// pruning policy used
    pub policy: String,
    /// number of iterations of the search loop
    pub steps: usize,
    /// size of the clique returned
    pub clique_size: usize,
}

/// search state saved when descending into a branch
#[derive(Debug)]
struct Frame {
    subg: BitSet,
    cand: BitSet,
    ext_u: BitSet,
}

/**
pivot u of subg maximizing |cand ∩ N(u)| (first one in id order),
returns the extension set cand \ N(u)
*/
fn extension(adj:&[BitSet], subg:&BitSet, cand:&BitSet) -> BitSet {
    let mut best:Option<(VertexId, usize)> = None;
    for u in subg.iter() {
        let score = intersection_size(&adj[u], cand);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((u, score));
        }
    }
    let mut res = cand.clone();
    if let Some((u,_)) = best {
        res.difference_with(&adj[u]);
    }
    res
}

/**
iterative maximum clique search (candidate/extension sets with pivoting, explicit stack).
The partial clique starts from `seeds`.
returns None if the seeds are not a clique of the instance.
*/
pub fn max_clique_ids<G:GraphInstance+?Sized>(inst:&G, seeds:&[VertexId], policy:PruningPolicy) -> Option<SearchOutcome> {
    let n = inst.nb_vertices();
    if n == 0 {
        return if seeds.is_empty() { Some(SearchOutcome::default()) } else { None };
    }
    let adj = loopless_adjacency(inst);
    let mut clique:Vec<VertexId> = Vec::with_capacity(n);
    let mut cand:BitSet = inst.vertices().collect();
    for s in seeds {
        if !cand.contains(*s) {
            return None;
        }
        cand.intersect_with(&adj[*s]);
        clique.push(*s);
    }
    if cand.is_empty() {
        return Some(SearchOutcome { clique, steps: 0 });
    }
    let mut subg = cand.clone();
    let mut stack:Vec<Frame> = Vec::new();
    let mut ext_u = extension(&adj, &subg, &cand);
    let mut best = clique.clone();
    let mut steps:usize = 0;
    loop {
        steps += 1;
        match pop_first(&mut ext_u) {
            Some(q) => {
                cand.remove(q);
                clique.push(q);
                let mut subg_q = subg.clone();
                subg_q.intersect_with(&adj[q]);
                if subg_q.is_empty() {
                    if clique.len() > best.len() {
                        best = clique.clone();
                        debug!(size = best.len(), steps, "new incumbent clique");
                    }
                    clique.pop();
                    continue;
                }
                let mut cand_q = cand.clone();
                cand_q.intersect_with(&adj[q]);
                if policy.admits(inst, clique.len(), &cand_q, best.len()) {
                    trace!(depth = clique.len(), candidates = cand_q.len(), "branch");
                    stack.push(Frame {
                        subg: mem::replace(&mut subg, subg_q),
                        cand: mem::replace(&mut cand, cand_q),
                        ext_u: mem::take(&mut ext_u),
                    });
                    ext_u = extension(&adj, &subg, &cand);
                } else {
                    trace!(depth = clique.len(), "pruned");
                    clique.pop();
                }
            },
            None => {
                // backtrack: no more extension vertex to try
                match stack.pop() {
                    None => break,
                    Some(frame) => {
                        clique.pop();
                        subg = frame.subg;
                        cand = frame.cand;
                        ext_u = frame.ext_u;
                    }
                }
            }
        }
    }
    Some(SearchOutcome { clique: best, steps })
}

/**
Maximum clique search on a labelled graph.
The search can be started from a list of seed nodes that must form a clique.
*/
#[derive(Debug, Clone, Default)]
pub struct MaxCliqueSearch<N> {
    policy: PruningPolicy,
    seeds: Vec<N>,
}

impl<N:Hash+Eq+Clone+Debug> MaxCliqueSearch<N> {
    /// search without seed nodes
    pub fn new(policy:PruningPolicy) -> Self {
        Self { policy, seeds: Vec::new() }
    }

    /// starts the search from the given seed nodes
    pub fn with_seeds(mut self, seeds:&[N]) -> Self {
        self.seeds = seeds.to_vec();
        self
    }

    /// pruning policy used by the search
    pub fn policy(&self) -> PruningPolicy { self.policy }

    /** runs the search. Returns the maximum clique containing the seeds and the search statistics.
    Fails if the seeds are not a clique of g. */
    pub fn run(&self, g:&Graph<N>) -> Result<(HashSet<N>, SearchStats), CliqueError> {
        let not_a_clique = || CliqueError::NotAClique { nodes: format!("{:?}", self.seeds) };
        let seeds = g.ids_of(&self.seeds).ok_or_else(not_a_clique)?;
        let outcome = max_clique_ids(g, &seeds, self.policy).ok_or_else(not_a_clique)?;
        let stats = SearchStats {
            policy: self.policy.to_string(),
            steps: outcome.steps,
            clique_size: outcome.clique.len(),
        };
        info!(policy = %stats.policy, steps = stats.steps, size = stats.clique_size, "max clique search done");
        Ok((g.labels_of(&outcome.clique).into_iter().collect(), stats))
    }
}

/// maximum clique (cardinality bound), optionally extending seed nodes
pub fn max_clique<N:Hash+Eq+Clone+Debug>(g:&Graph<N>, nodes:&[N]) -> Result<HashSet<N>, CliqueError> {
    max_clique_with_steps(g, nodes).map(|(clique, _)| clique)
}

/// maximum clique (cardinality bound) and the number of search steps
pub fn max_clique_with_steps<N:Hash+Eq+Clone+Debug>(g:&Graph<N>, nodes:&[N]) -> Result<(HashSet<N>, usize), CliqueError> {
    run_policy(g, PruningPolicy::Cardinality, nodes)
}

/// maximum clique without any bound (every non-empty branch is explored)
pub fn unbounded_max_clique<N:Hash+Eq+Clone+Debug>(g:&Graph<N>, nodes:&[N]) -> Result<(HashSet<N>, usize), CliqueError> {
    run_policy(g, PruningPolicy::Unbounded, nodes)
}

/// maximum clique, pruning with a greedy coloring of the candidates at every branch
pub fn custom_with_greedy<N:Hash+Eq+Clone+Debug>(g:&Graph<N>, strategy:ColoringStrategy, nodes:&[N]) -> Result<HashSet<N>, CliqueError> {
    custom_with_greedy_steps(g, strategy, nodes).map(|(clique, _)| clique)
}

/// same as [`custom_with_greedy`], also returns the number of search steps
pub fn custom_with_greedy_steps<N:Hash+Eq+Clone+Debug>(g:&Graph<N>, strategy:ColoringStrategy, nodes:&[N]) -> Result<(HashSet<N>, usize), CliqueError> {
    run_policy(g, PruningPolicy::GreedyColour(strategy), nodes)
}

/// maximum clique, pruning with a greedy coloring every 3rd depth (cardinality otherwise)
pub fn custom_with_partial_greedy<N:Hash+Eq+Clone+Debug>(g:&Graph<N>, strategy:ColoringStrategy, nodes:&[N]) -> Result<HashSet<N>, CliqueError> {
    custom_with_partial_greedy_steps(g, strategy, nodes).map(|(clique, _)| clique)
}

/// same as [`custom_with_partial_greedy`], also returns the number of search steps
pub fn custom_with_partial_greedy_steps<N:Hash+Eq+Clone+Debug>(g:&Graph<N>, strategy:ColoringStrategy, nodes:&[N]) -> Result<(HashSet<N>, usize), CliqueError> {
    run_policy(g, PruningPolicy::PartialGreedyColour(strategy), nodes)
}

fn run_policy<N:Hash+Eq+Clone+Debug>(g:&Graph<N>, policy:PruningPolicy, nodes:&[N]) -> Result<(HashSet<N>, usize), CliqueError> {
    MaxCliqueSearch::new(policy)
        .with_seeds(nodes)
        .run(g)
        .map(|(clique, stats)| (clique, stats.steps))
}
