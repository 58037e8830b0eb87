use std::collections::HashSet;
use std::hash::Hash;

use tracing::debug;

use crate::graph::{Graph, GraphInstance, VertexId};
use crate::search::coloring::greedy_color_in_order;

/** represents a node of the branch & bound (clique, ordered candidates, upper bound) */
#[derive(Debug)]
struct Node {
    /// vertices in the clique
    clique: Vec<VertexId>,
    /// candidates (all adjacent to the clique), in coloring order
    candidates: Vec<VertexId>,
    /// upper bound on the size of any clique in the subtree
    bound: usize,
}

/**
branch & bound for the maximum clique problem.
    1. color the graph greedily (vertex id order) and sort the vertices by color
    2. a node adds one of its candidates v to the clique, the new candidates are the
       candidates placed after v that are adjacent to v
    3. a node is pruned when |clique| + (max color among its candidates) + 1 ≤ |best|
Uses an explicit stack, children are explored in candidate order.
*/
pub fn branch_and_bound_ids<G:GraphInstance+?Sized>(inst:&G) -> Vec<VertexId> {
    let mut order:Vec<VertexId> = inst.vertices().collect();
    let colors:Vec<usize> = greedy_color_in_order(inst, &order).into_iter()
        .map(|c| c.unwrap_or(0))
        .collect();
    order.sort_by_key(|u| colors[*u]);
    let mut best:Vec<VertexId> = Vec::new();
    let mut stack = vec![Node { clique: Vec::new(), candidates: order, bound: usize::MAX }];
    while let Some(node) = stack.pop() {
        if node.bound <= best.len() { continue; }
        if node.candidates.is_empty() {
            if node.clique.len() > best.len() {
                debug!(size = node.clique.len(), "new best clique");
                best = node.clique;
            }
            continue;
        }
        for (i,v) in node.candidates.iter().enumerate().rev() {
            let new_candidates:Vec<VertexId> = node.candidates[i+1..].iter()
                .filter(|w| **w != *v && inst.are_adjacent(*v, **w))
                .copied()
                .collect();
            let max_color = new_candidates.iter().map(|w| colors[*w] + 1).max().unwrap_or(0);
            let bound = node.clique.len() + 1 + max_color;
            if bound <= best.len() { continue; }
            let mut clique = node.clique.clone();
            clique.push(*v);
            stack.push(Node { clique, candidates: new_candidates, bound });
        }
    }
    best
}

/// maximum clique of the labelled graph using the coloring-based branch & bound
pub fn branch_and_bound<N:Hash+Eq+Clone>(g:&Graph<N>) -> HashSet<N> {
    g.labels_of(&branch_and_bound_ids(g)).into_iter().collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_edgeless() {
        let mut g:Graph<usize> = Graph::new();
        assert!(branch_and_bound(&g).is_empty());
        g.add_nodes_from(0..3);
        assert_eq!(branch_and_bound(&g).len(), 1);
    }

    #[test]
    fn test_wheel() {
        // wheel: hub 0 and rim 1..=6, ω = 3
        let mut g = Graph::new();
        for i in 1..=6 {
            g.add_edge(0, i);
            g.add_edge(i, i % 6 + 1);
        }
        let clique = branch_and_bound(&g);
        assert_eq!(clique.len(), 3);
        assert!(clique.contains(&0));
    }

    #[test]
    fn test_planted_clique() {
        // path 0..10 with a K5 planted on {2,4,6,8,9}
        let mut g = Graph::from_edges((1..10).map(|i| (i-1, i)));
        let planted = [2, 4, 6, 8, 9];
        for a in planted.iter() { for b in planted.iter() { if a < b { g.add_edge(*a, *b); } } }
        let expected:HashSet<usize> = planted.iter().copied().collect();
        assert_eq!(branch_and_bound(&g), expected);
    }
}
