use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Range;

use bit_set::BitSet;
use thiserror::Error;
use tracing::info;

use crate::chordal;

/** Vertex Id */
pub type VertexId = usize;

/// |a ∩ b|, computed on the blocks of a copy of a
pub fn intersection_size(a:&BitSet, b:&BitSet) -> usize {
    let mut res = a.clone();
    res.intersect_with(b);
    res.len()
}

/// errors raised by labelled graph queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// the label is not a node of the graph
    #[error("node {0} is not in the graph")]
    NodeNotFound(String),
}

/**
Graph interface consumed by the algorithms of the crate.
Vertices are the dense indices 0..n. Implementations must keep the adjacency symmetric.
*/
pub trait GraphInstance {
    /// number of vertices
    fn nb_vertices(&self) -> usize;

    /// number of edges
    fn nb_edges(&self) -> usize;

    /// bitset of the vertices adjacent to u
    fn neighbors(&self, u:VertexId) -> &BitSet;

    /// vertex ids of the graph
    fn vertices(&self) -> Range<VertexId> { 0..self.nb_vertices() }

    /// number of vertices adjacent to u
    fn degree(&self, u:VertexId) -> usize { self.neighbors(u).len() }

    /// true iff u and v are adjacent
    fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool { self.neighbors(u).contains(v) }

    /// edge list, every edge (u,v) given once with u < v
    fn edges(&self) -> Vec<(VertexId,VertexId)> {
        let mut res = Vec::new();
        for u in self.vertices() {
            for v in self.neighbors(u).iter() {
                if u < v {
                    res.push((u,v));
                }
            }
        }
        res
    }

    /// logs statistics of the instance
    fn display_statistics(&self) {
        let degrees:Vec<usize> = self.vertices().map(|u| self.degree(u)).collect();
        info!(
            vertices = self.nb_vertices(),
            edges = self.nb_edges(),
            min_degree = degrees.iter().min().copied().unwrap_or(0),
            max_degree = degrees.iter().max().copied().unwrap_or(0),
            "instance statistics"
        );
    }
}


/**
Undirected simple graph over labels of type N.
Labels are kept in insertion order and mapped to dense vertex ids.
Self-loops are never stored.
*/
#[derive(Debug, Clone)]
pub struct Graph<N> {
    /// labels[i]: label of vertex i
    labels: Vec<N>,
    /// index[label]: vertex id of the label
    index: HashMap<N, VertexId>,
    /// adj_matrix[i] represents a bitset of its neighbors
    adj_matrix: Vec<BitSet>,
    /// nb edges
    m: usize,
}

impl<N> GraphInstance for Graph<N> {
    fn nb_vertices(&self) -> usize { self.labels.len() }

    fn nb_edges(&self) -> usize { self.m }

    fn neighbors(&self, u:VertexId) -> &BitSet { &self.adj_matrix[u] }
}

impl<N:Hash+Eq+Clone> Default for Graph<N> {
    fn default() -> Self { Self::new() }
}

impl<N:Hash+Eq+Clone> Graph<N> {

    /// empty graph
    pub fn new() -> Self {
        Self { labels: Vec::new(), index: HashMap::new(), adj_matrix: Vec::new(), m: 0 }
    }

    /// builds a graph from an edge list (nodes are added in order of appearance)
    pub fn from_edges<I:IntoIterator<Item=(N,N)>>(edges:I) -> Self {
        let mut res = Self::new();
        for (u,v) in edges {
            res.add_edge(u, v);
        }
        res
    }

    /// adds a node (no-op if it already exists), returns its vertex id
    pub fn add_node(&mut self, u:N) -> VertexId {
        if let Some(id) = self.index.get(&u) {
            return *id;
        }
        let id = self.labels.len();
        self.index.insert(u.clone(), id);
        self.labels.push(u);
        self.adj_matrix.push(BitSet::default());
        id
    }

    /// adds every node of the iterator
    pub fn add_nodes_from<I:IntoIterator<Item=N>>(&mut self, nodes:I) {
        for u in nodes {
            self.add_node(u);
        }
    }

    /** adds the edge {u,v}, creating missing endpoints.
    A self-loop only creates the node. */
    pub fn add_edge(&mut self, u:N, v:N) {
        let a = self.add_node(u);
        let b = self.add_node(v);
        self.add_edge_ids(a, b);
    }

    /// adds the edge {a,b} between two existing vertex ids
    pub fn add_edge_ids(&mut self, a:VertexId, b:VertexId) {
        if a == b || self.adj_matrix[a].contains(b) {
            return;
        }
        self.adj_matrix[a].insert(b);
        self.adj_matrix[b].insert(a);
        self.m += 1;
    }

    /// removes the edge {u,v}. Returns false if it does not exist
    pub fn remove_edge(&mut self, u:&N, v:&N) -> bool {
        match (self.index_of(u), self.index_of(v)) {
            (Some(a), Some(b)) => self.remove_edge_ids(a, b),
            _ => false
        }
    }

    /// removes the edge {a,b} between two vertex ids. Returns false if it does not exist
    pub fn remove_edge_ids(&mut self, a:VertexId, b:VertexId) -> bool {
        if !self.adj_matrix[a].remove(b) {
            return false;
        }
        self.adj_matrix[b].remove(a);
        self.m -= 1;
        true
    }

    /// true iff u is a node of the graph
    pub fn has_node(&self, u:&N) -> bool { self.index.contains_key(u) }

    /// true iff {u,v} is an edge of the graph
    pub fn has_edge(&self, u:&N, v:&N) -> bool {
        match (self.index_of(u), self.index_of(v)) {
            (Some(a), Some(b)) => self.are_adjacent(a, b),
            _ => false
        }
    }

    /// vertex id of a label
    pub fn index_of(&self, u:&N) -> Option<VertexId> { self.index.get(u).copied() }

    /// label of a vertex id
    pub fn label(&self, u:VertexId) -> &N { &self.labels[u] }

    /// labels of a list of vertex ids
    pub fn labels_of(&self, ids:&[VertexId]) -> Vec<N> {
        ids.iter().map(|u| self.labels[*u].clone()).collect()
    }

    /// vertex ids of a list of labels. None if some label is not in the graph
    pub fn ids_of(&self, nodes:&[N]) -> Option<Vec<VertexId>> {
        nodes.iter().map(|u| self.index_of(u)).collect()
    }

    /// nodes in insertion order
    pub fn nodes(&self) -> &[N] { &self.labels }

    /// number of nodes
    pub fn node_count(&self) -> usize { self.labels.len() }

    /// number of edges
    pub fn edge_count(&self) -> usize { self.m }

    /// labels of the neighbors of u
    pub fn neighbors_of(&self, u:&N) -> Result<Vec<N>, GraphError> where N:Debug {
        match self.index_of(u) {
            None => Err(GraphError::NodeNotFound(format!("{:?}", u))),
            Some(a) => Ok(self.adj_matrix[a].iter().map(|b| self.labels[b].clone()).collect())
        }
    }

    /// edges as label pairs, in edge-list order
    pub fn edge_labels(&self) -> Vec<(N,N)> {
        self.edges().into_iter()
            .map(|(a,b)| (self.labels[a].clone(), self.labels[b].clone()))
            .collect()
    }

    /** induced subgraph on a set of labels. Labels absent from the graph are ignored.
    Nodes keep the relative order they have in self. */
    pub fn subgraph(&self, nodes:&[N]) -> Self {
        let ids:Vec<VertexId> = nodes.iter().filter_map(|u| self.index_of(u)).collect();
        self.induced_subgraph(&ids)
    }

    /// induced subgraph on a set of vertex ids (same node order as in self)
    pub fn induced_subgraph(&self, ids:&[VertexId]) -> Self {
        let mut kept = BitSet::with_capacity(self.nb_vertices());
        for u in ids {
            kept.insert(*u);
        }
        let mut res = Self::new();
        for a in kept.iter() {
            res.add_node(self.labels[a].clone());
        }
        for a in kept.iter() {
            for b in self.adj_matrix[a].intersection(&kept) {
                if a < b {
                    res.add_edge(self.labels[a].clone(), self.labels[b].clone());
                }
            }
        }
        res
    }

    /// complement graph (same nodes, exactly the non-edges of self)
    pub fn complement(&self) -> Self {
        let n = self.nb_vertices();
        let mut res = Self::new();
        res.add_nodes_from(self.labels.iter().cloned());
        for a in 0..n {
            for b in a+1..n {
                if !self.adj_matrix[a].contains(b) {
                    res.add_edge_ids(a, b);
                }
            }
        }
        res
    }

    /// true iff the graph has no induced cycle of length ≥ 4
    pub fn is_chordal(&self) -> bool { chordal::is_chordal(self) }
}

impl<N> Graph<N> {
    /** connected components. Each component is sorted by vertex id and the
    components are sorted by their smallest vertex */
    pub fn connected_components(&self) -> Vec<Vec<VertexId>> {
        let n = self.nb_vertices();
        let mut visited = BitSet::with_capacity(n);
        let mut res = Vec::new();
        for s in 0..n {
            if visited.contains(s) { continue; }
            visited.insert(s);
            let mut component = vec![s];
            let mut queue = VecDeque::new();
            queue.push_back(s);
            while let Some(u) = queue.pop_front() {
                for v in self.adj_matrix[u].iter() {
                    if visited.insert(v) {
                        component.push(v);
                        queue.push_back(v);
                    }
                }
            }
            component.sort_unstable();
            res.push(component);
        }
        res
    }

    /// true iff the graph is non-empty and has a single connected component
    pub fn is_connected(&self) -> bool {
        self.nb_vertices() > 0 && self.connected_components().len() == 1
    }

    /// BFS distances from s (None for unreachable vertices)
    pub fn distances_from(&self, s:VertexId) -> Vec<Option<usize>> {
        let mut dist = vec![None ; self.nb_vertices()];
        dist[s] = Some(0);
        let mut queue = VecDeque::new();
        queue.push_back((s, 0));
        while let Some((u, d)) = queue.pop_front() {
            for v in self.adj_matrix[u].iter() {
                if dist[v].is_none() {
                    dist[v] = Some(d+1);
                    queue.push_back((v, d+1));
                }
            }
        }
        dist
    }

    /** diameter of a connected component (largest eccentricity among its vertices).
    A single vertex has diameter 0 */
    pub fn diameter_of(&self, component:&[VertexId]) -> usize {
        component.iter()
            .map(|s| {
                let dist = self.distances_from(*s);
                component.iter().filter_map(|v| dist[*v]).max().unwrap_or(0)
            })
            .max()
            .unwrap_or(0)
    }
}
