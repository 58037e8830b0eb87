use std::collections::HashSet;
use std::hash::Hash;

use bit_set::BitSet;
use itertools::Itertools;

use crate::graph::{Graph, GraphInstance, VertexId};

/**
Four nodes forming an induced pattern (P4 or C4).
Nodes are stored in vertex id order, so two witnesses on the same nodes are equal
whatever the edge they were discovered from.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Witness<N> {
    nodes: [N; 4],
}

impl<N:Clone> Witness<N> {
    /// the four nodes
    pub fn nodes(&self) -> &[N; 4] { &self.nodes }

    /// the four nodes as a vector
    pub fn to_vec(&self) -> Vec<N> { self.nodes.to_vec() }
}

impl<N:PartialEq> Witness<N> {
    /// true iff u is one of the four nodes
    pub fn contains(&self, u:&N) -> bool { self.nodes.contains(u) }
}

/// sorted copy of a quadruple
fn canonical(mut quad:[VertexId; 4]) -> [VertexId; 4] {
    quad.sort_unstable();
    quad
}

/// appends the quadruple if it was not found before
fn push_unique(seen:&mut HashSet<[VertexId; 4]>, res:&mut Vec<[VertexId; 4]>, quad:[VertexId; 4]) {
    let quad = canonical(quad);
    if seen.insert(quad) {
        res.push(quad);
    }
}

/**
private neighborhoods of the edge (x,y):
left = N(x) \ N(y) \ {y}, right = N(y) \ N(x) \ {x}
*/
pub fn private_neighborhoods<G:GraphInstance+?Sized>(inst:&G, x:VertexId, y:VertexId) -> (BitSet, BitSet) {
    let mut left = inst.neighbors(x).clone();
    left.difference_with(inst.neighbors(y));
    left.remove(y);
    left.remove(x);
    let mut right = inst.neighbors(y).clone();
    right.difference_with(inst.neighbors(x));
    right.remove(x);
    right.remove(y);
    (left, right)
}

/// (number of edges, sorted degrees) of the subgraph induced by 4 distinct vertices
fn induced_profile<G:GraphInstance+?Sized>(inst:&G, quad:&[VertexId; 4]) -> (usize, [usize; 4]) {
    let mut degrees = [0 ; 4];
    let mut nb_edges = 0;
    for i in 0..4 {
        for j in i+1..4 {
            if inst.are_adjacent(quad[i], quad[j]) {
                degrees[i] += 1;
                degrees[j] += 1;
                nb_edges += 1;
            }
        }
    }
    degrees.sort_unstable();
    (nb_edges, degrees)
}

/// true iff the 4 vertex ids are distinct and valid
fn is_valid_quad<G:GraphInstance+?Sized>(inst:&G, quad:&[VertexId; 4]) -> bool {
    let n = inst.nb_vertices();
    quad.iter().all(|u| *u < n) && canonical(*quad).windows(2).all(|w| w[0] != w[1])
}

/// true iff the 4 vertices induce a path (3 edges, degrees {1,1,2,2})
pub fn is_p4_ids<G:GraphInstance+?Sized>(inst:&G, quad:&[VertexId; 4]) -> bool {
    is_valid_quad(inst, quad) && induced_profile(inst, quad) == (3, [1, 1, 2, 2])
}

/// true iff the 4 vertices induce a cycle (every induced degree is 2)
pub fn is_c4_ids<G:GraphInstance+?Sized>(inst:&G, quad:&[VertexId; 4]) -> bool {
    is_valid_quad(inst, quad) && induced_profile(inst, quad).1 == [2, 2, 2, 2]
}

/// every combination of 4 vertices accepted by the predicate (in lexicographic order)
fn brute_force_quads<G, F>(inst:&G, accept:F) -> Vec<[VertexId; 4]>
where G:GraphInstance+?Sized, F:Fn(&G, &[VertexId; 4]) -> bool {
    inst.vertices().combinations(4)
        .map(|c| [c[0], c[1], c[2], c[3]])
        .filter(|quad| accept(inst, quad))
        .collect()
}

/**
every induced P4 found by the edge-centered scan: for every edge (x,y) taken as the middle
edge, every v in left(x,y) and w in right(x,y) with v not adjacent to w gives the path v-x-y-w.
O(m·Δ²).
*/
pub fn p4_quads<G:GraphInstance+?Sized>(inst:&G) -> Vec<[VertexId; 4]> {
    let mut seen = HashSet::new();
    let mut res = Vec::new();
    for (x,y) in inst.edges() {
        let (left, right) = private_neighborhoods(inst, x, y);
        for v in left.iter() {
            for w in right.iter() {
                if !inst.are_adjacent(v, w) {
                    push_unique(&mut seen, &mut res, [v, x, y, w]);
                }
            }
        }
    }
    res
}

/**
every induced C4 found by the edge-centered scan: for every edge (x,y), every v in left(x,y)
and w in right(x,y) with v adjacent to w gives the cycle v-x-y-w-v.
Each cycle is reached from its 4 edges and reported once. The graph is never modified.
*/
pub fn c4_quads<G:GraphInstance+?Sized>(inst:&G) -> Vec<[VertexId; 4]> {
    let mut seen = HashSet::new();
    let mut res = Vec::new();
    for (x,y) in inst.edges() {
        let (left, right) = private_neighborhoods(inst, x, y);
        for v in left.iter() {
            for w in right.intersection(inst.neighbors(v)) {
                push_unique(&mut seen, &mut res, [v, x, y, w]);
            }
        }
    }
    res
}

/// witness of a canonical (sorted) quadruple of vertex ids
fn witness_of<N:Hash+Eq+Clone>(g:&Graph<N>, quad:&[VertexId; 4]) -> Witness<N> {
    Witness { nodes: [
        g.label(quad[0]).clone(),
        g.label(quad[1]).clone(),
        g.label(quad[2]).clone(),
        g.label(quad[3]).clone(),
    ]}
}

fn to_witnesses<N:Hash+Eq+Clone>(g:&Graph<N>, quads:&[[VertexId; 4]]) -> Vec<Witness<N>> {
    quads.iter().map(|q| witness_of(g, q)).collect()
}

/// every induced P4, checking every combination of 4 nodes (O(n⁴), reference implementation)
pub fn find_all_p4<N:Hash+Eq+Clone>(g:&Graph<N>) -> Vec<Witness<N>> {
    to_witnesses(g, &brute_force_quads(g, is_p4_ids))
}

/// every induced P4, using the edge-centered scan
pub fn find_all_p4_bfs<N:Hash+Eq+Clone>(g:&Graph<N>) -> Vec<Witness<N>> {
    to_witnesses(g, &p4_quads(g))
}

/// every induced C4, checking every combination of 4 nodes (O(n⁴), reference implementation)
pub fn find_all_c4<N:Hash+Eq+Clone>(g:&Graph<N>) -> Vec<Witness<N>> {
    to_witnesses(g, &brute_force_quads(g, is_c4_ids))
}

/// every induced C4, using the edge-centered scan
pub fn find_all_c4_bfs<N:Hash+Eq+Clone>(g:&Graph<N>) -> Vec<Witness<N>> {
    to_witnesses(g, &c4_quads(g))
}


#[cfg(test)]
mod tests {
    use super::*;

    fn path(n:usize) -> Graph<usize> {
        Graph::from_edges((1..n).map(|i| (i-1, i)))
    }

    fn cycle(n:usize) -> Graph<usize> {
        Graph::from_edges((0..n).map(|i| (i, (i+1)%n)))
    }

    fn as_sets<N:Hash+Eq+Clone>(witnesses:&[Witness<N>]) -> HashSet<Witness<N>> {
        witnesses.iter().cloned().collect()
    }

    #[test]
    fn test_p4_on_path() {
        let g = path(4);
        let found = find_all_p4_bfs(&g);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].nodes(), &[0, 1, 2, 3]);
        assert!(find_all_c4(&g).is_empty());
        // a path on 6 nodes has 3 induced P4
        assert_eq!(find_all_p4_bfs(&path(6)).len(), 3);
    }

    #[test]
    fn test_c4_on_cycle() {
        let g = cycle(4);
        let found = find_all_c4(&g);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains(&2));
        assert_eq!(find_all_c4_bfs(&g), found);
        assert!(find_all_p4_bfs(&g).is_empty());
    }

    #[test]
    fn test_c5_has_p4_but_no_c4() {
        let g = cycle(5);
        assert!(find_all_c4(&g).is_empty());
        assert!(find_all_c4_bfs(&g).is_empty());
        assert_eq!(find_all_p4_bfs(&g).len(), 5);
    }

    #[test]
    fn test_scan_matches_brute_force() {
        // K_{2,3} plus a pendant path: mixes C4s and P4s
        let g = Graph::from_edges(vec![
            (0,2), (0,3), (0,4), (1,2), (1,3), (1,4), (4,5), (5,6), (2,6),
        ]);
        assert_eq!(as_sets(&find_all_p4_bfs(&g)), as_sets(&find_all_p4(&g)));
        assert_eq!(as_sets(&find_all_c4_bfs(&g)), as_sets(&find_all_c4(&g)));
        assert!(!find_all_c4(&g).is_empty());
        assert!(!find_all_p4(&g).is_empty());
    }

    #[test]
    fn test_removing_edges_does_not_hide_c4() {
        // two C4 sharing the edge 1-2: 0-1-2-3-0 and 1-2-4-5-1
        let g = Graph::from_edges(vec![(0,1), (1,2), (2,3), (3,0), (2,4), (4,5), (5,1)]);
        assert_eq!(as_sets(&find_all_c4_bfs(&g)), as_sets(&find_all_c4(&g)));
        assert_eq!(find_all_c4(&g).len(), 2);
    }

    #[test]
    fn test_quad_predicates() {
        let g = path(4);
        assert!(is_p4_ids(&g, &[3, 1, 0, 2]));
        assert!(!is_p4_ids(&g, &[0, 1, 2, 2]));
        assert!(!is_p4_ids(&g, &[0, 1, 2, 9]));
        let star = Graph::from_edges(vec![(0,1), (0,2), (0,3)]);
        assert!(!is_p4_ids(&star, &[0, 1, 2, 3]));
        assert!(is_c4_ids(&cycle(4), &[0, 2, 1, 3]));
        assert!(!is_c4_ids(&path(4), &[0, 1, 2, 3]));
    }

    #[test]
    fn test_brute_force_order() {
        let found:Vec<Vec<usize>> = find_all_p4(&path(6)).iter()
            .map(|w| w.nodes().to_vec())
            .collect();
        assert_eq!(found, vec![vec![0,1,2,3], vec![1,2,3,4], vec![2,3,4,5]]);
        assert!(find_all_p4(&path(3)).is_empty());
    }

    #[test]
    fn test_empty_graph() {
        let g:Graph<usize> = Graph::new();
        assert!(find_all_p4(&g).is_empty());
        assert!(find_all_p4_bfs(&g).is_empty());
        assert!(find_all_c4(&g).is_empty());
        assert!(find_all_c4_bfs(&g).is_empty());
    }
}
