//! Search algorithms for the maximum clique problem.

use bit_set::BitSet;

use crate::graph::{GraphInstance, VertexId};

/// greedy coloring heuristics (clique size upper bounds)
pub mod coloring;

/// iterative maximum clique search with pluggable pruning policies
pub mod max_clique;

/// explicit-stack Bron–Kerbosch enumeration of the maximal cliques
pub mod bron_kerbosch;

/// branch & bound ordered by a greedy coloring
pub mod branch_and_bound;


/// adjacency bitsets with self-loops removed
pub(crate) fn loopless_adjacency<G:GraphInstance+?Sized>(inst:&G) -> Vec<BitSet> {
    inst.vertices().map(|u| {
        let mut res = inst.neighbors(u).clone();
        res.remove(u);
        res
    }).collect()
}

/// removes and returns the smallest element of the set
pub(crate) fn pop_first(set:&mut BitSet) -> Option<VertexId> {
    let res = set.iter().next()?;
    set.remove(res);
    Some(res)
}
