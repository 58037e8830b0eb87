use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::graph::{Graph, VertexId};

/// pending work of the generator
#[derive(Debug, Clone, Copy)]
enum Task {
    /// build a trivially perfect graph on `size` fresh nodes
    Build(usize),
    /// merge the two last built parts (disjoint union)
    Union,
    /// add a fresh node adjacent to every node of the last built part
    Join,
}

/**
Random trivially perfect graph generator.
A trivially perfect graph is built recursively from single nodes by two operations:
 - disjoint union of two trivially perfect graphs
 - adding a universal node to a trivially perfect graph
Every generated graph is P4-free and C4-free.
*/
#[derive(Debug)]
pub struct TrivPerfectGenerator {
    /// random source
    rng: StdRng,
    /// label of the next created node
    node_counter: usize,
}

impl TrivPerfectGenerator {
    /// generator with a fixed seed (reproducible)
    pub fn new(seed:u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), node_counter: 0 }
    }

    /// generator seeded from the system entropy
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy(), node_counter: 0 }
    }

    fn new_node(&mut self, g:&mut Graph<usize>) -> VertexId {
        let res = g.add_node(self.node_counter);
        self.node_counter += 1;
        res
    }

    /**
    generates a trivially perfect graph on exactly n nodes labelled 0..n.
    Each composite step picks union or join with probability 1/2. A union splits the
    size uniformly in [1, size-1].
    */
    pub fn generate(&mut self, n:usize) -> Graph<usize> {
        self.node_counter = 0;
        let mut g = Graph::new();
        if n == 0 {
            return g;
        }
        let mut tasks = vec![Task::Build(n)];
        let mut parts:Vec<Vec<VertexId>> = Vec::new();
        while let Some(task) = tasks.pop() {
            match task {
                Task::Build(1) => {
                    let u = self.new_node(&mut g);
                    parts.push(vec![u]);
                },
                Task::Build(size) => {
                    if self.rng.gen_bool(0.5) {
                        let left = self.rng.gen_range(1..size);
                        tasks.push(Task::Union);
                        tasks.push(Task::Build(size - left));
                        tasks.push(Task::Build(left));
                    } else {
                        tasks.push(Task::Join);
                        tasks.push(Task::Build(size - 1));
                    }
                },
                Task::Union => {
                    if let (Some(right), Some(mut left)) = (parts.pop(), parts.pop()) {
                        left.extend(right);
                        parts.push(left);
                    }
                },
                Task::Join => {
                    if let Some(mut part) = parts.pop() {
                        let u = self.new_node(&mut g);
                        for v in part.iter() {
                            g.add_edge_ids(u, *v);
                        }
                        part.push(u);
                        parts.push(part);
                    }
                },
            }
        }
        debug!(n, m = g.edge_count(), "trivially perfect graph generated");
        g
    }
}

/// random trivially perfect graph on n nodes (seeded from the system entropy if seed is None)
pub fn generate_trivially_perfect_graph(n:usize, seed:Option<u64>) -> Graph<usize> {
    let mut generator = match seed {
        None => TrivPerfectGenerator::from_entropy(),
        Some(s) => TrivPerfectGenerator::new(s),
    };
    generator.generate(n)
}
