use std::cmp::Reverse;

use bit_set::BitSet;
use priority_queue::PriorityQueue;

use crate::graph::{GraphInstance, VertexId};

/**
Maximum Cardinality Search (Tarjan & Yannakakis).
    1. choose an unvisited vertex adjacent to the most visited vertices (break ties by the smallest id)
    2. mark it visited and increase the score of its unvisited neighbors
    3. repeat until every vertex is visited

returns the vertices in visit order
*/
pub fn maximum_cardinality_search<G:GraphInstance+?Sized>(inst:&G) -> Vec<VertexId> {
    let n = inst.nb_vertices();
    let mut remaining:PriorityQueue<VertexId, (usize, Reverse<VertexId>)> = PriorityQueue::new();
    for u in inst.vertices() {
        remaining.push(u, (0, Reverse(u)));
    }
    let mut visited = BitSet::with_capacity(n);
    let mut res = Vec::with_capacity(n);
    while let Some((u, _)) = remaining.pop() {
        visited.insert(u);
        res.push(u);
        for v in inst.neighbors(u).iter().filter(|v| !visited.contains(*v)) {
            remaining.change_priority_by(&v, |p| { p.0 += 1; });
        }
    }
    res
}

/**
returns true iff `order` is a perfect elimination ordering: for every vertex v, the
neighbors of v placed after v in the order form a clique.
Checked in O(m) adjacency tests by only comparing to the earliest later neighbor.
*/
pub fn is_perfect_elimination_ordering<G:GraphInstance+?Sized>(inst:&G, order:&[VertexId]) -> bool {
    let mut position = vec![0 ; inst.nb_vertices()];
    for (i,u) in order.iter().enumerate() {
        position[*u] = i;
    }
    for v in order {
        let later:Vec<VertexId> = inst.neighbors(*v).iter()
            .filter(|u| position[*u] > position[*v])
            .collect();
        let follower = match later.iter().min_by_key(|u| position[**u]) {
            None => continue,
            Some(f) => *f
        };
        if later.iter().any(|u| *u != follower && !inst.are_adjacent(follower, *u)) {
            return false;
        }
    }
    true
}

/// true iff the graph has no induced cycle of length at least 4
pub fn is_chordal<G:GraphInstance+?Sized>(inst:&G) -> bool {
    let mut order = maximum_cardinality_search(inst);
    order.reverse();
    is_perfect_elimination_ordering(inst, &order)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn cycle(n:usize) -> Graph<usize> {
        Graph::from_edges((0..n).map(|i| (i, (i+1)%n)))
    }

    #[test]
    fn test_cycles() {
        assert!(is_chordal(&cycle(3)));
        assert!(!is_chordal(&cycle(4)));
        assert!(!is_chordal(&cycle(5)));
        assert!(!is_chordal(&cycle(6)));
    }

    #[test]
    fn test_chorded_cycle() {
        let mut g = cycle(4);
        g.add_edge(0, 2);
        assert!(is_chordal(&g));
        // C5 with a single chord still has an induced C4
        let mut h = cycle(5);
        h.add_edge(0, 2);
        assert!(!is_chordal(&h));
    }

    #[test]
    fn test_trivial_graphs() {
        assert!(is_chordal(&Graph::<usize>::new()));
        let mut g = Graph::new();
        g.add_nodes_from(0..4);
        assert!(is_chordal(&g));
        let tree = Graph::from_edges(vec![(0,1), (0,2), (2,3), (2,4)]);
        assert!(is_chordal(&tree));
    }

    #[test]
    fn test_mcs_visits_everything_once() {
        let g = cycle(6);
        let mut order = maximum_cardinality_search(&g);
        assert_eq!(order[0], 0);
        order.sort_unstable();
        assert_eq!(order, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_peo() {
        // triangle 0-1-2 with pendant 3 on 2
        let g = Graph::from_edges(vec![(0,1), (1,2), (0,2), (2,3)]);
        assert!(is_perfect_elimination_ordering(&g, &[3, 0, 1, 2]));
        // eliminating 2 first: its later neighbors 0,1,3 are not a clique
        assert!(!is_perfect_elimination_ordering(&g, &[2, 0, 1, 3]));
    }
}
