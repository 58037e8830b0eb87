use std::cmp::Reverse;
use std::hash::Hash;

use bit_set::BitSet;
use itertools::Itertools;
use tracing::debug;

use crate::find::{c4_quads, find_all_c4_bfs, find_all_p4_bfs, is_c4_ids, is_p4_ids, p4_quads, private_neighborhoods, Witness};
use crate::graph::{intersection_size, Graph, GraphInstance, VertexId};

/// vertex ids of nodes. None if a node is missing or repeated
fn distinct_ids<N:Hash+Eq+Clone>(g:&Graph<N>, nodes:&[N]) -> Option<Vec<VertexId>> {
    let ids = g.ids_of(nodes)?;
    let mut seen = BitSet::with_capacity(g.nb_vertices());
    if ids.iter().all(|u| seen.insert(*u)) { Some(ids) } else { None }
}

/// vertex ids of exactly 4 distinct nodes of the graph
fn quad_ids<N:Hash+Eq+Clone>(g:&Graph<N>, nodes:&[N]) -> Option<[VertexId; 4]> {
    if nodes.len() != 4 {
        return None;
    }
    let ids = distinct_ids(g, nodes)?;
    Some([ids[0], ids[1], ids[2], ids[3]])
}

/// true iff the nodes are distinct nodes of g and pairwise adjacent (the empty list is a clique)
pub fn is_clique<N:Hash+Eq+Clone>(g:&Graph<N>, nodes:&[N]) -> bool {
    match distinct_ids(g, nodes) {
        None => false,
        Some(ids) => ids.iter().enumerate()
            .all(|(i,u)| ids[i+1..].iter().all(|v| g.are_adjacent(*u, *v)))
    }
}

/// true iff the nodes are 4 distinct nodes of g inducing a path
pub fn is_p4<N:Hash+Eq+Clone>(g:&Graph<N>, nodes:&[N]) -> bool {
    quad_ids(g, nodes).map_or(false, |quad| is_p4_ids(g, &quad))
}

/// true iff the nodes are 4 distinct nodes of g inducing a cycle
pub fn is_c4<N:Hash+Eq+Clone>(g:&Graph<N>, nodes:&[N]) -> bool {
    quad_ids(g, nodes).map_or(false, |quad| is_c4_ids(g, &quad))
}

/// true iff every vertex outside the subset sees all of it or none of it
pub fn is_module_ids<G:GraphInstance+?Sized>(inst:&G, subset:&BitSet) -> bool {
    let size = subset.len();
    inst.vertices()
        .filter(|v| !subset.contains(*v))
        .all(|v| {
            let seen = intersection_size(inst.neighbors(v), subset);
            seen == 0 || seen == size
        })
}

/**
true iff the subset is a module of g: every node outside it is adjacent to all of it or to none of it.
Repeated nodes are ignored; a node absent from g makes the answer false.
The empty set, singletons and the whole node set are modules.
*/
pub fn is_module<N:Hash+Eq+Clone>(g:&Graph<N>, subset:&[N]) -> bool {
    match g.ids_of(subset) {
        None => false,
        Some(ids) => is_module_ids(g, &ids.into_iter().collect())
    }
}

/// true iff both g and its complement are chordal
pub fn is_split<N:Hash+Eq+Clone>(g:&Graph<N>) -> bool {
    g.is_chordal() && g.complement().is_chordal()
}

/**
partition of a split graph into a clique and an independent set (Hammer & Simeone).
    1. sort the vertices by non-increasing degree d_1 ≥ … ≥ d_n
    2. m = max { i : d_i ≥ i-1 }; the graph is split iff ∑_{i≤m} d_i = m(m-1) + ∑_{i>m} d_i
    3. the m first vertices form the clique, the others the independent set
    4. clique vertices without neighbors in the independent set are moved to it
returns None if the graph is not split. Both sides are given in node order.
*/
pub fn split_partition<N:Hash+Eq+Clone>(g:&Graph<N>) -> Option<(Vec<N>, Vec<N>)> {
    let mut order:Vec<VertexId> = g.vertices().collect();
    order.sort_by_key(|u| Reverse(g.degree(*u)));
    let mut m = 0;
    for (i,u) in order.iter().enumerate() {
        if g.degree(*u) < i { break; }
        m = i+1;
    }
    let sum_clique:usize = order[..m].iter().map(|u| g.degree(*u)).sum();
    let sum_independent:usize = order[m..].iter().map(|u| g.degree(*u)).sum();
    if sum_clique != m * m.saturating_sub(1) + sum_independent {
        return None;
    }
    let mut independent:BitSet = order[m..].iter().copied().collect();
    let mut clique:BitSet = order[..m].iter().copied().collect();
    for u in order[..m].iter() {
        if g.neighbors(*u).intersection(&independent).next().is_none() {
            clique.remove(*u);
            independent.insert(*u);
        }
    }
    let clique_ids:Vec<VertexId> = clique.iter().collect();
    let independent_ids:Vec<VertexId> = independent.iter().collect();
    Some((g.labels_of(&clique_ids), g.labels_of(&independent_ids)))
}

/// induced P4 and C4 of the graph (both empty iff the graph is quasi-threshold)
pub fn quasi_threshold_obstructions<N:Hash+Eq+Clone>(g:&Graph<N>) -> (Vec<Witness<N>>, Vec<Witness<N>>) {
    (find_all_p4_bfs(g), find_all_c4_bfs(g))
}

/// true iff g has no induced P4 and no induced C4 (full enumeration of both patterns)
pub fn is_quasi_threshold<N:Hash+Eq+Clone>(g:&Graph<N>) -> bool {
    let p4s = p4_quads(g);
    let c4s = c4_quads(g);
    if !p4s.is_empty() || !c4s.is_empty() {
        debug!(nb_p4 = p4s.len(), nb_c4 = c4s.len(), "not quasi-threshold");
        return false;
    }
    true
}

/**
local quasi-threshold test: g is rejected as soon as an edge (x,y) has both private
neighborhoods non-empty. Such an edge is the middle of a P4 or the side of a C4, and every
P4 (resp. C4) has such an edge, so this is equivalent to [`is_quasi_threshold`].
*/
pub fn is_quasi_threshold_2<N:Hash+Eq+Clone>(g:&Graph<N>) -> bool {
    for (x,y) in g.edges() {
        let (left, right) = private_neighborhoods(g, x, y);
        if !left.is_empty() && !right.is_empty() {
            debug!(x, y, "edge with two private neighborhoods");
            return false;
        }
    }
    true
}

/**
true iff g is connected, has at least 2 nodes and no module of size in [2, n-1].
Exhaustive over the subsets: only usable on small graphs.
*/
pub fn is_prime<N:Hash+Eq+Clone>(g:&Graph<N>) -> bool {
    let n = g.nb_vertices();
    if n < 2 || !g.is_connected() {
        return false;
    }
    for size in 2..n {
        let found = (0..n).combinations(size)
            .any(|subset| is_module_ids(g, &subset.into_iter().collect()));
        if found {
            debug!(size, "non-trivial module found");
            return false;
        }
    }
    true
}
