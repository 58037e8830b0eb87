//! Property-based tests over small random graphs

use std::collections::HashSet;

use proptest::prelude::*;

use clique_qt::check::{is_c4, is_clique, is_module, is_p4, is_quasi_threshold, is_quasi_threshold_2, is_split, split_partition};
use clique_qt::divanc::divanc;
use clique_qt::find::{find_all_c4, find_all_c4_bfs, find_all_p4, find_all_p4_bfs, Witness};
use clique_qt::generate::TrivPerfectGenerator;
use clique_qt::graph::{Graph, GraphInstance};
use clique_qt::search::branch_and_bound::branch_and_bound;
use clique_qt::search::bron_kerbosch::bron_kerbosch;
use clique_qt::search::coloring::{color_graph, ColoringStrategy};
use clique_qt::search::max_clique::{max_clique, MaxCliqueSearch, PruningPolicy};

const MAX_NODES:usize = 9;

const STRATEGIES:[ColoringStrategy; 7] = [
    ColoringStrategy::LargestFirst,
    ColoringStrategy::SmallestLast,
    ColoringStrategy::RandomSequential(3),
    ColoringStrategy::ConnectedSequentialBfs,
    ColoringStrategy::ConnectedSequentialDfs,
    ColoringStrategy::SaturationLargestFirst,
    ColoringStrategy::IndependentSet,
];

// ============================================================================
// Helper functions
// ============================================================================

/// graph on 0..n, the pair (i,j) (i<j, lexicographic order) is an edge iff mask says so
fn graph_from_mask(n:usize, mask:&[bool]) -> Graph<usize> {
    let mut g = Graph::new();
    g.add_nodes_from(0..n);
    let mut k = 0;
    for i in 0..n {
        for j in i+1..n {
            if mask[k] { g.add_edge(i, j); }
            k += 1;
        }
    }
    g
}

fn arb_graph() -> impl Strategy<Value = Graph<usize>> {
    (0..=MAX_NODES).prop_flat_map(|n| {
        proptest::collection::vec(any::<bool>(), n * n.saturating_sub(1) / 2)
            .prop_map(move |mask| graph_from_mask(n, &mask))
    })
}

fn as_set(witnesses:&[Witness<usize>]) -> HashSet<Witness<usize>> {
    witnesses.iter().cloned().collect()
}

fn policies() -> Vec<PruningPolicy> {
    let mut res = vec![PruningPolicy::Unbounded, PruningPolicy::Cardinality];
    for s in STRATEGIES.iter() {
        res.push(PruningPolicy::GreedyColour(*s));
        res.push(PruningPolicy::PartialGreedyColour(*s));
    }
    res
}

// ============================================================================
// Clique search
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_max_clique_is_a_maximum_clique(g in arb_graph()) {
        let clique:Vec<usize> = max_clique(&g, &[]).unwrap().into_iter().collect();
        prop_assert!(is_clique(&g, &clique));
        prop_assert!(clique.iter().all(|u| g.has_node(u)));
        prop_assert_eq!(clique.len(), bron_kerbosch(&g).len());
    }

    #[test]
    fn prop_policies_agree(g in arb_graph()) {
        let expected = bron_kerbosch(&g).len();
        for policy in policies() {
            let (clique, stats) = MaxCliqueSearch::new(policy).run(&g).unwrap();
            prop_assert_eq!(clique.len(), expected, "policy {}", policy);
            prop_assert_eq!(stats.clique_size, expected);
        }
        prop_assert_eq!(branch_and_bound(&g).len(), expected);
    }

    #[test]
    fn prop_seeded_search_contains_seeds(g in arb_graph(), seed in 0..MAX_NODES) {
        if g.has_node(&seed) {
            let clique = max_clique(&g, &[seed]).unwrap();
            prop_assert!(clique.contains(&seed));
            let nodes:Vec<usize> = clique.into_iter().collect();
            prop_assert!(is_clique(&g, &nodes));
        } else {
            prop_assert!(max_clique(&g, &[seed]).is_err());
        }
    }

    #[test]
    fn prop_colorings_are_proper_and_bound_the_clique(g in arb_graph()) {
        let omega = bron_kerbosch(&g).len();
        for s in STRATEGIES.iter() {
            let colors = color_graph(&g, *s);
            prop_assert_eq!(colors.len(), g.node_count());
            for (u,v) in g.edge_labels() {
                prop_assert_ne!(colors[&u], colors[&v], "strategy {}", s);
            }
            let nb_colors = colors.values().collect::<HashSet<_>>().len();
            prop_assert!(nb_colors >= omega);
        }
    }
}

// ============================================================================
// Patterns and recognizers
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_patterns_are_sound_and_complete(g in arb_graph()) {
        let p4s = find_all_p4_bfs(&g);
        let c4s = find_all_c4_bfs(&g);
        for w in p4s.iter() {
            prop_assert!(is_p4(&g, &w.to_vec()));
        }
        for w in c4s.iter() {
            prop_assert!(is_c4(&g, &w.to_vec()));
        }
        prop_assert_eq!(as_set(&p4s).len(), p4s.len());
        prop_assert_eq!(as_set(&c4s).len(), c4s.len());
        prop_assert_eq!(as_set(&p4s), as_set(&find_all_p4(&g)));
        prop_assert_eq!(as_set(&c4s), as_set(&find_all_c4(&g)));
    }

    #[test]
    fn prop_quasi_threshold_tests_agree(g in arb_graph()) {
        let free = find_all_p4(&g).is_empty() && find_all_c4(&g).is_empty();
        prop_assert_eq!(is_quasi_threshold(&g), free);
        prop_assert_eq!(is_quasi_threshold_2(&g), free);
    }

    #[test]
    fn prop_toggled_trivially_perfect_graphs(seed in any::<u64>(), n in 1usize..16, a in 0usize..16, b in 0usize..16) {
        let mut g = TrivPerfectGenerator::new(seed).generate(n);
        prop_assert!(is_quasi_threshold(&g));
        prop_assert!(is_quasi_threshold_2(&g));
        let (a, b) = (a % n, b % n);
        if a != b {
            if g.has_edge(&a, &b) { g.remove_edge(&a, &b); } else { g.add_edge(a, b); }
        }
        prop_assert_eq!(is_quasi_threshold(&g), is_quasi_threshold_2(&g));
    }

    #[test]
    fn prop_trivial_modules(g in arb_graph()) {
        prop_assert!(is_module(&g, &[]));
        for u in g.nodes() {
            prop_assert!(is_module(&g, &[*u]));
        }
        prop_assert!(is_module(&g, g.nodes()));
    }

    #[test]
    fn prop_split_partition(g in arb_graph()) {
        let partition = split_partition(&g);
        prop_assert_eq!(is_split(&g), partition.is_some());
        if let Some((clique, independent)) = partition {
            prop_assert!(is_clique(&g, &clique));
            prop_assert_eq!(clique.len() + independent.len(), g.node_count());
            prop_assert!(is_clique(&g.complement(), &independent));
        }
    }

    #[test]
    fn prop_divanc_partitions_the_nodes(g in arb_graph()) {
        let parts = divanc(&g);
        let mut seen = HashSet::new();
        for p in parts.iter() {
            let components = p.connected_components();
            prop_assert_eq!(components.len(), 1);
            prop_assert!(p.diameter_of(&components[0]) <= 2);
            for u in p.nodes() {
                prop_assert!(seen.insert(*u));
            }
        }
        prop_assert_eq!(seen.len(), g.node_count());
    }

    #[test]
    fn prop_deterministic(g in arb_graph()) {
        prop_assert_eq!(max_clique(&g, &[]).unwrap(), max_clique(&g, &[]).unwrap());
        prop_assert_eq!(find_all_p4_bfs(&g), find_all_p4_bfs(&g));
        prop_assert_eq!(find_all_c4_bfs(&g), find_all_c4_bfs(&g));
        prop_assert_eq!(is_split(&g), is_split(&g));
        prop_assert_eq!(g.nb_edges(), g.edge_labels().len());
    }
}
