use std::collections::HashSet;
use std::hash::Hash;

use bit_set::BitSet;
use tracing::debug;

use crate::graph::{Graph, GraphInstance, VertexId};
use crate::search::{loopless_adjacency, pop_first};

/** represents a node of the enumeration (current clique, candidates, excluded vertices) */
#[derive(Debug)]
struct Node {
    /// vertices in the clique
    clique: Vec<VertexId>,
    /// vertices that can still extend the clique
    candidates: BitSet,
    /// vertices adjacent to the whole clique already handled by a sibling branch
    excluded: BitSet,
}

/**
enumerates every maximal clique (Bron–Kerbosch without pivoting, explicit stack).
Each node branches on its smallest candidate v:
 - v is added to the clique (candidates and excluded are restricted to N(v))
 - v is moved from the candidates to the excluded vertices
A node without candidates nor excluded vertices is a maximal clique.
The empty graph has a single maximal clique: the empty one.
*/
pub fn maximal_cliques_ids<G:GraphInstance+?Sized>(inst:&G) -> Vec<Vec<VertexId>> {
    let adj = loopless_adjacency(inst);
    let mut res = Vec::new();
    let mut stack = vec![Node {
        clique: Vec::new(),
        candidates: inst.vertices().collect(),
        excluded: BitSet::new(),
    }];
    while let Some(mut node) = stack.pop() {
        if node.candidates.is_empty() && node.excluded.is_empty() {
            res.push(node.clique);
            continue;
        }
        let v = match pop_first(&mut node.candidates) {
            None => continue, // every extension was handled by a sibling: not maximal
            Some(v) => v
        };
        let mut with_v = Node {
            clique: node.clique.clone(),
            candidates: node.candidates.clone(),
            excluded: node.excluded.clone(),
        };
        with_v.clique.push(v);
        with_v.candidates.intersect_with(&adj[v]);
        with_v.excluded.intersect_with(&adj[v]);
        node.excluded.insert(v);
        stack.push(node);
        stack.push(with_v);
    }
    debug!(nb_cliques = res.len(), "maximal cliques enumerated");
    res
}

/// every maximal clique of the labelled graph
pub fn all_maximal_cliques<N:Hash+Eq+Clone>(g:&Graph<N>) -> Vec<HashSet<N>> {
    maximal_cliques_ids(g).iter()
        .map(|c| g.labels_of(c).into_iter().collect())
        .collect()
}

/// maximum clique obtained by enumerating every maximal clique (first largest one found)
pub fn bron_kerbosch<N:Hash+Eq+Clone>(g:&Graph<N>) -> HashSet<N> {
    maximum_clique_and_count(g).0
}

/// maximum clique and number of maximal cliques, from a single enumeration
pub fn maximum_clique_and_count<N:Hash+Eq+Clone>(g:&Graph<N>) -> (HashSet<N>, usize) {
    let cliques = maximal_cliques_ids(g);
    let mut best:&[VertexId] = &[];
    for c in cliques.iter() {
        if c.len() > best.len() {
            best = c;
        }
    }
    (g.labels_of(best).into_iter().collect(), cliques.len())
}
