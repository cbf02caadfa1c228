use face_whispers::graph::distance::edge_weight;
use face_whispers::graph::{build_graph, AdjacencyMatrix, Extraction, Node};
use face_whispers::LabelPropagator;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn extractions(descriptors: &[Option<Vec<f32>>]) -> Vec<Extraction<usize>> {
    descriptors
        .iter()
        .enumerate()
        .map(|(i, d)| match d {
            Some(d) => Extraction::new(i, vec![d.clone()]),
            None => Extraction::failed(i),
        })
        .collect()
}

fn nodes(descriptors: &[Option<Vec<f32>>], threshold: f32) -> Vec<Node<usize>> {
    build_graph(extractions(descriptors), threshold).nodes
}

fn edge_set(nodes: &[Node<usize>]) -> HashSet<(usize, usize)> {
    nodes
        .iter()
        .flat_map(|n| n.neighbors.iter().map(move |&m| (n.id, m)))
        .collect()
}

fn descriptor_sets() -> impl Strategy<Value = Vec<Option<Vec<f32>>>> {
    prop::collection::vec(
        prop::option::weighted(0.8, prop::collection::vec(-1.0f32..1.0, 3)),
        0..16,
    )
}

proptest! {
    #[test]
    fn prop_adjacency_is_symmetric(
        descriptors in descriptor_sets(),
        threshold in 0.0f32..2.0,
        weighted in any::<bool>(),
    ) {
        let nodes = nodes(&descriptors, threshold);
        let matrix = AdjacencyMatrix::from_nodes(&nodes, weighted);

        for i in 0..nodes.len() {
            for j in 0..nodes.len() {
                let (a, b) = (matrix.weight(i, j), matrix.weight(j, i));
                prop_assert!(a == b || (a.is_nan() && b.is_nan()));
            }
        }
    }

    #[test]
    fn prop_neighbor_relation_is_symmetric(
        descriptors in descriptor_sets(),
        threshold in 0.0f32..2.0,
    ) {
        let nodes = nodes(&descriptors, threshold);
        let edges = edge_set(&nodes);
        for &(i, j) in &edges {
            prop_assert!(edges.contains(&(j, i)));
        }
    }

    #[test]
    fn prop_threshold_monotonicity(
        descriptors in descriptor_sets(),
        t1 in -0.5f32..2.0,
        delta in 0.0f32..1.0,
    ) {
        let small = edge_set(&nodes(&descriptors, t1));
        let large = edge_set(&nodes(&descriptors, t1 + delta));
        prop_assert!(small.is_subset(&large));
    }

    #[test]
    fn prop_unclassified_isolation_and_label_range(
        descriptors in descriptor_sets(),
        threshold in 0.0f32..1.5,
        iterations in 0usize..300,
        weighted in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mut nodes = nodes(&descriptors, threshold);
        LabelPropagator::new(iterations, weighted)
            .propagate(&mut nodes, &mut StdRng::seed_from_u64(seed))
            .unwrap();

        let classified: HashSet<usize> = nodes
            .iter()
            .filter(|n| !n.is_unclassified())
            .map(|n| n.id)
            .collect();

        for node in &nodes {
            if node.is_unclassified() {
                prop_assert!(node.neighbors.is_empty());
                prop_assert_eq!(node.label, node.id);
            } else {
                prop_assert!(classified.contains(&node.label));
            }
        }
    }

    #[test]
    fn prop_isolated_nodes_keep_their_label(
        descriptors in descriptor_sets(),
        seed in any::<u64>(),
    ) {
        // threshold 0 forms no edges, so nothing can move
        let mut nodes = nodes(&descriptors, 0.0);
        LabelPropagator::new(100, true)
            .propagate(&mut nodes, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        for node in &nodes {
            prop_assert_eq!(node.label, node.id);
        }
    }

    #[test]
    fn prop_weight_ordering(d1 in 0.001f32..1.5, delta in 0.001f32..0.5) {
        prop_assert!(edge_weight(d1, true) > edge_weight(d1 + delta, true));
    }

    #[test]
    fn prop_pair_converges_outlier_stays(seed in any::<u64>()) {
        let descriptors = vec![
            Some(vec![1.0, 0.0, 0.0]),
            Some(vec![0.9, 0.435_89, 0.0]),
            Some(vec![0.1, 0.022_942, 0.994_73]),
        ];
        let mut nodes = nodes(&descriptors, 0.5);
        prop_assert_eq!(&nodes[0].neighbors, &vec![1]);
        prop_assert!(nodes[2].neighbors.is_empty());

        let propagation = LabelPropagator::new(500, true)
            .propagate(&mut nodes, &mut StdRng::seed_from_u64(seed))
            .unwrap();

        prop_assert!(propagation.converged);
        prop_assert_eq!(propagation.label_changes, 1);
        prop_assert_eq!(nodes[0].label, nodes[1].label);
        prop_assert!(nodes[0].label == 0 || nodes[0].label == 1);
        prop_assert_eq!(nodes[2].label, 2);
    }

    #[test]
    fn prop_converged_collection_stops_immediately(
        size in 2usize..10,
        seed in any::<u64>(),
    ) {
        let descriptors = vec![Some(vec![0.2, 0.7, -0.1]); size];
        let mut nodes = nodes(&descriptors, 0.5);
        for node in nodes.iter_mut() {
            node.label = 0;
        }

        let propagation = LabelPropagator::new(100, true)
            .propagate(&mut nodes, &mut StdRng::seed_from_u64(seed))
            .unwrap();

        prop_assert_eq!(propagation.iterations, 1);
        prop_assert!(propagation.converged);
        prop_assert!(nodes.iter().all(|n| n.label == 0));
    }
}

#[test]
fn test_identical_pair_shares_one_label() {
    let descriptors = vec![Some(vec![0.6, 0.8]); 2];
    let mut nodes = nodes(&descriptors, 0.5);

    let propagation = LabelPropagator::new(200, true)
        .propagate(&mut nodes, &mut StdRng::seed_from_u64(11))
        .unwrap();

    assert!(propagation.converged);
    assert_eq!(nodes[0].label, nodes[1].label);
    assert!(propagation.adjacency.weight(0, 1) > 1e6);
}

#[test]
fn test_zero_iterations_returns_initial_matrix() {
    let descriptors = vec![Some(vec![1.0, 0.0]), Some(vec![1.0, 0.1]), None];
    let mut nodes = nodes(&descriptors, 0.5);
    let expected = AdjacencyMatrix::from_nodes(&nodes, true);

    let propagation = LabelPropagator::new(0, true)
        .propagate(&mut nodes, &mut StdRng::seed_from_u64(0))
        .unwrap();

    assert_eq!(propagation.adjacency, expected);
    assert_eq!(
        nodes.iter().map(|n| n.label).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}
