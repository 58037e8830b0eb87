use std::cmp::Reverse;
use std::hash::Hash;

use ordered_float::OrderedFloat;
use tracing::{debug, info};

use crate::graph::{intersection_size, Graph, GraphInstance, VertexId};

/**
niche centrality of the edge (u,v):
    (p4 + deg) / (triangles + 1)
with
 - p4: number of pairs x ∈ N(u)\{v}, y ∈ N(v)\{u}, x ≠ y, x not adjacent to y
 - deg: min(d(u)-1, d(v)-1)
 - triangles: |N(u) ∩ N(v)|
*/
pub fn edge_score<G:GraphInstance+?Sized>(inst:&G, u:VertexId, v:VertexId) -> f64 {
    let mut p4 = 0;
    for x in inst.neighbors(u).iter().filter(|x| *x != v) {
        // y ∈ N(v) \ N(x) \ {u, x}
        let mut others = inst.neighbors(v).clone();
        others.difference_with(inst.neighbors(x));
        others.remove(u);
        others.remove(x);
        p4 += others.len();
    }
    let deg = inst.degree(u).min(inst.degree(v)).saturating_sub(1);
    let triangles = intersection_size(inst.neighbors(u), inst.neighbors(v));
    (p4 + deg) as f64 / (triangles + 1) as f64
}

/// niche centrality of every edge, in edge order (u < v)
pub fn edge_niche_centrality_ids<G:GraphInstance+?Sized>(inst:&G) -> Vec<((VertexId,VertexId), f64)> {
    inst.edges().into_iter()
        .map(|(u,v)| ((u,v), edge_score(inst, u, v)))
        .collect()
}

/// niche centrality of every edge of the labelled graph, in edge order
pub fn edge_niche_centrality<N:Hash+Eq+Clone>(g:&Graph<N>) -> Vec<((N,N), f64)> {
    edge_niche_centrality_ids(g).into_iter()
        .map(|((u,v), score)| ((g.label(u).clone(), g.label(v).clone()), score))
        .collect()
}

/// true iff some connected component has a diameter larger than 2
fn has_wide_component<N>(g:&Graph<N>) -> bool {
    g.connected_components().iter().any(|c| g.diameter_of(c) > 2)
}

/**
splits the graph into parts of diameter at most 2.
    1. while a connected component has a diameter larger than 2:
       remove the edge of maximum niche centrality (first one in edge order on ties)
    2. return the subgraphs induced by the connected components
The input graph is not modified. Isolated nodes give single-node parts.
*/
pub fn divanc<N:Hash+Eq+Clone>(g:&Graph<N>) -> Vec<Graph<N>> {
    divanc_with_removed(g).0
}

/// same as divanc, also returns the removed edges in removal order
pub fn divanc_with_removed<N:Hash+Eq+Clone>(g:&Graph<N>) -> (Vec<Graph<N>>, Vec<(N,N)>) {
    let mut g = g.clone();
    let mut removed = Vec::new();
    while has_wide_component(&g) {
        let scores = edge_niche_centrality_ids(&g);
        let best = scores.iter().enumerate()
            .max_by_key(|(i,(_,score))| (OrderedFloat(*score), Reverse(*i)))
            .map(|(_,(e,score))| (*e, *score));
        match best {
            None => break,
            Some(((u,v), score)) => {
                debug!(u, v, score, "removing edge");
                g.remove_edge_ids(u, v);
                removed.push((g.label(u).clone(), g.label(v).clone()));
            }
        }
    }
    let res:Vec<Graph<N>> = g.connected_components().iter()
        .map(|c| g.induced_subgraph(c))
        .collect();
    info!(nb_removed = removed.len(), nb_parts = res.len(), "divanc done");
    (res, removed)
}
