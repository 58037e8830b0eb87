use std::cmp::{Ordering, Reverse};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use std::str::FromStr;

use bit_set::BitSet;
use priority_queue::PriorityQueue;
use thiserror::Error;

use crate::graph::{intersection_size, Graph, GraphError, GraphInstance, VertexId};

/** Solution of a graph coloring problem
(represented as a partition into color classes, class c holds the vertices of color c).
*/
pub type Solution = Vec<Vec<VertexId>>;

/// unknown coloring strategy name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown coloring strategy: {0}")]
pub struct ParseStrategyError(pub String);

/**
Order (or construction) used by the greedy coloring. Every strategy produces a proper coloring
of the requested vertex subset.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColoringStrategy {
    /// decreasing degree (within the colored subset)
    LargestFirst,
    /// repeatedly remove a minimum degree vertex, color in reverse removal order
    SmallestLast,
    /// seeded random permutation
    RandomSequential(u64),
    /// breadth-first order of each connected component
    ConnectedSequentialBfs,
    /// depth-first order of each connected component
    ConnectedSequentialDfs,
    /// DSATUR: vertex seeing the most colors first (ties: largest degree)
    SaturationLargestFirst,
    /// recursive largest first: colors one maximal independent set at a time
    IndependentSet,
}

impl Default for ColoringStrategy {
    fn default() -> Self { Self::LargestFirst }
}

impl fmt::Display for ColoringStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LargestFirst => "largest_first",
            Self::SmallestLast => "smallest_last",
            Self::RandomSequential(_) => "random_sequential",
            Self::ConnectedSequentialBfs => "connected_sequential_bfs",
            Self::ConnectedSequentialDfs => "connected_sequential_dfs",
            Self::SaturationLargestFirst => "saturation_largest_first",
            Self::IndependentSet => "independent_set",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ColoringStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "largest_first" => Ok(Self::LargestFirst),
            "smallest_last" => Ok(Self::SmallestLast),
            "random_sequential" => Ok(Self::RandomSequential(0)),
            "connected_sequential_bfs" | "connected_sequential" => Ok(Self::ConnectedSequentialBfs),
            "connected_sequential_dfs" => Ok(Self::ConnectedSequentialDfs),
            "saturation_largest_first" | "DSATUR" | "dsatur" => Ok(Self::SaturationLargestFirst),
            "independent_set" => Ok(Self::IndependentSet),
            _ => Err(ParseStrategyError(s.to_string()))
        }
    }
}

/// degree of u restricted to the vertices of subset
fn subset_degree<G:GraphInstance+?Sized>(inst:&G, subset:&BitSet, u:VertexId) -> usize {
    intersection_size(inst.neighbors(u), subset)
}

/**
assigns each vertex of `order` (in that order) the smallest color not used by an already
colored neighbor. Vertices repeated in `order` keep their first color.
returns colors[v] (None for the vertices not in `order`)
*/
pub fn greedy_color_in_order<G:GraphInstance+?Sized>(inst:&G, order:&[VertexId]) -> Vec<Option<usize>> {
    let mut colors:Vec<Option<usize>> = vec![None ; inst.nb_vertices()];
    let mut used = BitSet::new();
    for u in order {
        if colors[*u].is_some() { continue; }
        used.clear();
        for v in inst.neighbors(*u).iter() {
            if let Some(c) = colors[v] { used.insert(c); }
        }
        let mut color:usize = 0;
        while used.contains(color) { color += 1; }
        colors[*u] = Some(color);
    }
    colors
}

/// builds the color classes from a color assignment
pub fn to_solution(colors:&[Option<usize>]) -> Solution {
    let nb_colors = colors.iter().flatten().max().map_or(0, |c| c+1);
    let mut res = vec![vec![] ; nb_colors];
    for (u,c) in colors.iter().enumerate() {
        if let Some(c) = c {
            res[*c].push(u);
        }
    }
    res
}

/// vertices of the subset by decreasing degree (within the subset), ties by id
fn largest_first_order<G:GraphInstance+?Sized>(inst:&G, subset:&BitSet) -> Vec<VertexId> {
    let mut res:Vec<VertexId> = subset.iter().collect();
    res.sort_by_key(|u| Reverse(subset_degree(inst, subset, *u)));
    res
}

/// repeatedly removes a vertex of minimum remaining degree, returns the reversed removal order
fn smallest_last_order<G:GraphInstance+?Sized>(inst:&G, subset:&BitSet) -> Vec<VertexId> {
    let mut remaining = subset.clone();
    let mut degrees:HashMap<VertexId, usize> = subset.iter()
        .map(|u| (u, subset_degree(inst, subset, u)))
        .collect();
    let mut res = Vec::with_capacity(degrees.len());
    while let Some(u) = remaining.iter().min_by_key(|u| degrees[u]) {
        remaining.remove(u);
        for v in inst.neighbors(u).intersection(&remaining) {
            if let Some(d) = degrees.get_mut(&v) { *d -= 1; }
        }
        res.push(u);
    }
    res.reverse();
    res
}

/// seeded random permutation of the subset
fn random_sequential_order(subset:&BitSet, seed:u64) -> Vec<VertexId> {
    let mut res:Vec<VertexId> = subset.iter().collect();
    fastrand::Rng::with_seed(seed).shuffle(&mut res);
    res
}

/// BFS (or DFS) traversal of every connected component of the subset, starting from the smallest id
fn connected_sequential_order<G:GraphInstance+?Sized>(inst:&G, subset:&BitSet, depth_first:bool) -> Vec<VertexId> {
    let mut visited = BitSet::with_capacity(inst.nb_vertices());
    let mut res = Vec::new();
    for s in subset.iter() {
        if visited.contains(s) { continue; }
        let mut frontier:VecDeque<VertexId> = VecDeque::new();
        frontier.push_back(s);
        if !depth_first { visited.insert(s); }
        while let Some(u) = if depth_first { frontier.pop_back() } else { frontier.pop_front() } {
            if depth_first {
                if !visited.insert(u) { continue; }
            }
            res.push(u);
            for v in inst.neighbors(u).intersection(subset) {
                if visited.contains(v) { continue; }
                if !depth_first { visited.insert(v); }
                frontier.push_back(v);
            }
        }
    }
    res
}

#[derive(PartialEq, Eq)]
struct DSatInfo {
    dsat: usize,
    degree: usize,
    id: Reverse<VertexId>,
}

impl Ord for DSatInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dsat.cmp(&other.dsat)
            .then_with(|| self.degree.cmp(&other.degree))
            .then_with(|| self.id.cmp(&other.id))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for DSatInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/** greedy DSATUR restricted to a vertex subset.
    1. choose an uncolored vertex that sees the most colors (break ties by the largest degree)
    2. add it to the first color available
    3. mark all its neighbors seeing this color
    4. repeat until every vertex of the subset is colored
*/
pub fn greedy_dsatur<G:GraphInstance+?Sized>(inst:&G, subset:&BitSet) -> Solution {
    let mut remaining_vertices:PriorityQueue<VertexId, DSatInfo> = PriorityQueue::new();
    for u in subset.iter() {
        remaining_vertices.push(u, DSatInfo { dsat:0, degree:subset_degree(inst, subset, u), id:Reverse(u) });
    }
    let mut colors:Vec<Option<usize>> = vec![None ; inst.nb_vertices()];
    let mut adj_colors:HashMap<VertexId, BitSet> = HashMap::new(); // adj_colors[u] -> colors u sees
    while let Some((current_vertex, _)) = remaining_vertices.pop() {
        // assign it a color
        let mut color:usize = 0;
        if let Some(seen) = adj_colors.get(&current_vertex) {
            while seen.contains(color) { color += 1; }
        }
        colors[current_vertex] = Some(color);
        // update saturation degree information
        for conflict_vertex in inst.neighbors(current_vertex).intersection(subset)
        .filter(|conflict_vertex| colors[*conflict_vertex].is_none()) {
            let seen = adj_colors.entry(conflict_vertex).or_insert_with(BitSet::new);
            if seen.insert(color) {
                remaining_vertices.change_priority_by(&conflict_vertex, |p| { p.dsat += 1; });
            }
        }
    }
    to_solution(&colors)
}

/** greedy RLF restricted to a vertex subset. Colors vertices one color at a time
    1. selects the uncolored vertex with the largest degree and mark it colored
    2. mark its neighbors unreachable
    3. select a reachable vertex that has the most neighbors among the unreachable ones
       (ties: most neighbors among the reachable ones)
    4. when there are no reachable vertices, start over with a new color
*/
pub fn greedy_rlf<G:GraphInstance+?Sized>(inst:&G, subset:&BitSet) -> Solution {
    let mut uncolored = subset.clone();
    let mut res:Solution = Vec::new();
    while !uncolored.is_empty() {
        let mut reachable = uncolored.clone();
        let mut unreachable = BitSet::new();
        let mut current_class = Vec::new();
        loop {
            let next = reachable.iter().max_by(|a,b| {
                intersection_size(inst.neighbors(*a), &unreachable)
                    .cmp(&intersection_size(inst.neighbors(*b), &unreachable))
                    .then_with(|| intersection_size(inst.neighbors(*a), &reachable)
                        .cmp(&intersection_size(inst.neighbors(*b), &reachable)))
                    .then_with(|| b.cmp(a))
            });
            let current_vertex = match next {
                None => break, // no more reachable vertex, start a new color
                Some(v) => v
            };
            current_class.push(current_vertex);
            reachable.remove(current_vertex);
            uncolored.remove(current_vertex);
            for v in inst.neighbors(current_vertex).intersection(subset) {
                if reachable.remove(v) { unreachable.insert(v); }
            }
        }
        res.push(current_class);
    }
    res
}

/// colors the vertices of subset (the other vertices are ignored) using the given strategy
pub fn color_subset<G:GraphInstance+?Sized>(inst:&G, subset:&BitSet, strategy:ColoringStrategy) -> Solution {
    let order = match strategy {
        ColoringStrategy::SaturationLargestFirst => return greedy_dsatur(inst, subset),
        ColoringStrategy::IndependentSet => return greedy_rlf(inst, subset),
        ColoringStrategy::LargestFirst => largest_first_order(inst, subset),
        ColoringStrategy::SmallestLast => smallest_last_order(inst, subset),
        ColoringStrategy::RandomSequential(seed) => random_sequential_order(subset, seed),
        ColoringStrategy::ConnectedSequentialBfs => connected_sequential_order(inst, subset, false),
        ColoringStrategy::ConnectedSequentialDfs => connected_sequential_order(inst, subset, true),
    };
    to_solution(&greedy_color_in_order(inst, &order))
}

/// number of colors used by the strategy on subset (upper bound on any clique inside subset)
pub fn nb_colors<G:GraphInstance+?Sized>(inst:&G, subset:&BitSet, strategy:ColoringStrategy) -> usize {
    color_subset(inst, subset, strategy).len()
}

/**
returns None if the solution is not a proper coloring of exactly the vertices of subset
returns the number of colors otherwise
*/
pub fn checker<G:GraphInstance+?Sized>(inst:&G, subset:&BitSet, sol:&[Vec<VertexId>]) -> Option<usize> {
    let mut visited = BitSet::new();
    for c in sol {
        for v in c {
            if !visited.insert(*v) {
                return None; // already added
            }
        }
    }
    if !(visited.is_subset(subset) && subset.is_subset(&visited)) {
        return None;
    }
    for c in sol {
        for v1 in c {
            for v2 in c {
                if inst.are_adjacent(*v1, *v2) { return None }
            }
        }
    }
    Some(sol.len())
}

/**
greedy coloring of the labelled graph, processing the nodes in the order given by the caller.
Fails if some node of the order is not in the graph.
*/
pub fn greedy_coloring<N:Hash+Eq+Clone+Debug>(g:&Graph<N>, order:&[N]) -> Result<HashMap<N,usize>, GraphError> {
    let mut ids = Vec::with_capacity(order.len());
    for u in order {
        match g.index_of(u) {
            None => return Err(GraphError::NodeNotFound(format!("{:?}", u))),
            Some(id) => ids.push(id)
        }
    }
    let colors = greedy_color_in_order(g, &ids);
    Ok(ids.iter().filter_map(|u| colors[*u].map(|c| (g.label(*u).clone(), c))).collect())
}

/// colors every node of the labelled graph with the given strategy
pub fn color_graph<N:Hash+Eq+Clone>(g:&Graph<N>, strategy:ColoringStrategy) -> HashMap<N,usize> {
    let all:BitSet = g.vertices().collect();
    let mut res = HashMap::new();
    for (c, class) in color_subset(g, &all, strategy).iter().enumerate() {
        for u in class {
            res.insert(g.label(*u).clone(), c);
        }
    }
    res
}
