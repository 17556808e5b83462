//! Property checks over seeded synthetic batches.

use std::collections::BTreeSet;

use convo_cluster_core::{
    cluster_records, AttributeValue, ClusterResponse, ClusteringParams, ConversationRecord,
    FeatureWeights,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const OUTCOMES: [&str; 5] = ["satisfied", "unsatisfied", "unclear", "Satisfied", "escalated"];
const TIERS: [&str; 3] = ["free", "pro", "enterprise"];

fn synthetic_batch(seed: u64, n: usize, dim: usize) -> Vec<ConversationRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let embedding: Vec<f64> = (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect();
            let mut record = ConversationRecord::new(
                format!("conv-{i:03}"),
                embedding,
                OUTCOMES[rng.gen_range(0..OUTCOMES.len())],
            );
            if rng.gen_bool(0.8) {
                record = record.with_attribute("tier", TIERS[rng.gen_range(0..TIERS.len())]);
            }
            if rng.gen_bool(0.5) {
                record = record.with_attribute("turns", rng.gen_range(1..40) as i64);
            }
            if rng.gen_bool(0.3) {
                record = record.with_attribute("escalated", rng.gen_bool(0.5));
            }
            record
        })
        .collect()
}

fn assert_partition(records: &[ConversationRecord], response: &ClusterResponse) {
    let expected: BTreeSet<&str> = records.iter().map(|r| r.id.as_str()).collect();

    let mut seen = BTreeSet::new();
    for (top, subs) in &response.subclusters {
        let mut top_members: BTreeSet<&str> = BTreeSet::new();
        for members in subs.values() {
            assert!(!members.is_empty(), "empty subcluster under {top}");
            for id in members {
                assert!(seen.insert(id.as_str()), "{id} appears twice");
                top_members.insert(id.as_str());
            }
        }
        let listed: BTreeSet<&str> = response.high_level_clusters[top]
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(top_members, listed, "subclusters of {top} do not cover it");
    }
    assert_eq!(seen, expected);
    assert_eq!(
        response.high_level_clusters.keys().collect::<Vec<_>>(),
        response.subclusters.keys().collect::<Vec<_>>()
    );
}

#[test]
fn test_partition_over_random_batches() {
    for seed in 0..8u64 {
        let n = 2 + (seed as usize * 7) % 30;
        let records = synthetic_batch(seed, n, 16);
        let params = ClusteringParams::new(1 + seed as usize % 6, 1 + seed as usize % 4);

        let response =
            cluster_records(&records, FeatureWeights::default(), params).expect("cluster");
        assert_partition(&records, &response);
        assert!(response.cluster_stats.total_clusters <= params.num_high_level_clusters.min(n - 1));
        println!(
            "[PASS] seed={seed} n={n} -> {} clusters",
            response.cluster_stats.total_clusters
        );
    }
}

#[test]
fn test_similarity_symmetric_with_unit_diagonal() {
    let records = synthetic_batch(42, 40, 32);
    let response = cluster_records(&records, FeatureWeights::default(), ClusteringParams::default())
        .expect("cluster");

    let sim = &response.similarity_matrix;
    assert_eq!(sim.len(), 40);
    for i in 0..40 {
        assert_eq!(sim[i].len(), 40);
        assert!((sim[i][i] - 1.0).abs() < 1e-6);
        for j in 0..40 {
            assert!((sim[i][j] - sim[j][i]).abs() < 1e-12);
            assert!((-1.0..=1.0).contains(&sim[i][j]));
        }
    }
    println!("[PASS] 40x40 similarity symmetric, diagonal 1, values in [-1, 1]");
}

#[test]
fn test_deterministic_across_runs() {
    let records = synthetic_batch(7, 25, 24);
    let weights = FeatureWeights::new(0.5, 0.4, 0.1);
    let params = ClusteringParams::new(4, 3);

    let first = cluster_records(&records, weights, params).expect("cluster");
    let second = cluster_records(&records, weights, params).expect("cluster");

    assert_eq!(first, second);
    println!("[PASS] identical input yields identical response");
}

#[test]
fn test_identical_records() {
    let records: Vec<ConversationRecord> = (0..6)
        .map(|i| ConversationRecord::new(format!("dup-{i}"), vec![0.5, 0.5, 0.5], "unclear"))
        .collect();
    let response = cluster_records(&records, FeatureWeights::default(), ClusteringParams::default())
        .expect("cluster");

    assert_partition(&records, &response);
    println!(
        "[PASS] identical records -> {} clusters",
        response.cluster_stats.total_clusters
    );
}

#[test]
fn test_zero_vectors_and_zero_weights() {
    let records = vec![
        ConversationRecord::new("zero", vec![0.0, 0.0, 0.0], "unsatisfied"),
        ConversationRecord::new("a", vec![1.0, 0.0, 0.0], "unsatisfied"),
        ConversationRecord::new("b", vec![0.0, 1.0, 0.0], "unsatisfied"),
    ];
    let response = cluster_records(
        &records,
        FeatureWeights::new(1.0, 0.0, 0.0),
        ClusteringParams::new(2, 2),
    )
    .expect("cluster");

    let sim = &response.similarity_matrix;
    assert_eq!(sim[0], vec![1.0, 0.0, 0.0]);
    assert_close(sim[1][2], 0.0);
    assert_partition(&records, &response);

    let all_zero = cluster_records(
        &records,
        FeatureWeights::new(0.0, 0.0, 0.0),
        ClusteringParams::new(2, 2),
    )
    .expect("all-zero weights still cluster");
    assert_partition(&records, &all_zero);
    println!("[PASS] zero vectors and zero weights degrade without errors");
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

#[test]
fn test_mixed_type_attribute_is_coerced() {
    // "score" is numeric first, so the later text value is parsed.
    let records = vec![
        ConversationRecord::new("a", vec![1.0, 0.0], "unclear").with_attribute("score", 3.0),
        ConversationRecord::new("b", vec![0.0, 1.0], "unclear").with_attribute("score", "7"),
        ConversationRecord::new("c", vec![0.5, 0.5], "unclear")
            .with_attribute("score", AttributeValue::Text("n/a".into())),
    ];
    let response = cluster_records(&records, FeatureWeights::default(), ClusteringParams::default())
        .expect("cluster");
    assert_partition(&records, &response);
    println!("[PASS] mixed-type attribute values coerced into the first-seen kind");
}

#[test]
fn test_extreme_numeric_attributes_keep_semantic_signal() {
    let embeddings = [
        vec![1.0, 0.0],
        vec![0.95, 0.05],
        vec![0.0, 1.0],
        vec![0.05, 0.95],
    ];
    let score_sets: [[AttributeValue; 4]; 2] = [
        [1.0.into(), "inf".into(), 2.0.into(), 3.0.into()],
        [1e308.into(), 1e308.into(), 1.0.into(), 2.0.into()],
    ];

    for scores in score_sets {
        let records: Vec<ConversationRecord> = embeddings
            .iter()
            .zip(scores.clone())
            .enumerate()
            .map(|(i, (emb, score))| {
                ConversationRecord::new(format!("r{i}"), emb.clone(), "unclear")
                    .with_attribute("score", score)
            })
            .collect();
        let response = cluster_records(
            &records,
            FeatureWeights::default(),
            ClusteringParams::new(2, 1),
        )
        .expect("cluster");

        let sim = &response.similarity_matrix;
        assert!(sim.iter().flatten().all(|x| x.is_finite()));
        assert!(sim[0][1] > 0.5, "row0 = {:?}", sim[0]);

        let groups: BTreeSet<Vec<String>> =
            response.high_level_clusters.values().cloned().collect();
        let expected: BTreeSet<Vec<String>> = [
            vec!["r0".to_string(), "r1".to_string()],
            vec!["r2".to_string(), "r3".to_string()],
        ]
        .into_iter()
        .collect();
        assert_eq!(groups, expected, "scores {scores:?}");
        println!("[PASS] scores {scores:?} -> {groups:?}");
    }
}
