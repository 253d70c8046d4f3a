use hnsw_core::{HnswIndex, NeighborHeuristic, Params};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;

fn abs_diff(a: &f32, b: &f32) -> f32 {
    (a - b).abs()
}

// S1: an empty build succeeds, and knn on it returns no results rather than
// erroring.
#[test]
fn s1_empty_build_knn_returns_empty() {
    let items: Vec<f32> = vec![];
    let mut rng = StdRng::seed_from_u64(1);
    let index = HnswIndex::build(items, &mut rng, Params::default(), abs_diff).unwrap();
    let result = index.knn(&0.0, 1).unwrap();
    assert_eq!(result, vec![]);
}

// S2: a singleton build has one node at id 0, with no neighbors at any
// layer, and finds itself at distance 0.
#[test]
fn s2_singleton_self_query() {
    let items = vec![3.5f32];
    let mut rng = StdRng::seed_from_u64(1);
    let index = HnswIndex::build(items, &mut rng, Params::default(), abs_diff).unwrap();

    let result = index.knn(&3.5, 1).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 0);
    assert_eq!(result[0].item, 3.5);
    assert_eq!(result[0].distance, 0.0);
}

// S3: with M=4 and only two points, both must end up as each other's only
// layer-0 neighbor.
#[test]
fn s3_two_points_are_mutual_neighbors() {
    let items = vec![0.0f32, 1.0f32];
    let params = Params { m: 4, ..Params::default() };
    let mut rng = StdRng::seed_from_u64(1);
    let index = HnswIndex::build(items, &mut rng, params, abs_diff).unwrap();

    let from_zero = index.knn(&0.0, 2).unwrap();
    let from_one = index.knn(&1.0, 2).unwrap();
    assert_eq!(from_zero.iter().map(|n| n.id).collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(from_one.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1, 0]);
}

// S4: five collinear points, querying near the middle returns the two
// closest by construction, tied in distance.
#[test]
fn s4_collinear_five_query_between_two_points() {
    let items: Vec<f32> = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let params = Params {
        m: 2,
        ef_construction: 10,
        neighbor_heuristic: NeighborHeuristic::SelectSimple,
        ..Params::default()
    };
    let mut rng = StdRng::seed_from_u64(1);
    let index = HnswIndex::build(items, &mut rng, params, abs_diff).unwrap();

    let result = index.knn(&1.5, 2).unwrap();
    let mut ids: Vec<usize> = result.iter().map(|n| n.id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
    for neighbor in &result {
        assert_eq!(neighbor.distance, 0.5);
    }
}

// S5: three duplicate points should all be returned at distance 0, in any
// order among themselves.
#[test]
fn s5_duplicates_all_returned_at_zero_distance() {
    let mut items = vec![1.0f32; 10];
    for (i, v) in items.iter_mut().enumerate() {
        *v = i as f32;
    }
    items[0] = 7.0;
    items[5] = 7.0;
    items[9] = 7.0;

    let mut rng = StdRng::seed_from_u64(1);
    let index = HnswIndex::build(items, &mut rng, Params::default(), abs_diff).unwrap();

    let result = index.knn(&7.0, 3).unwrap();
    let mut ids: Vec<usize> = result.iter().map(|n| n.id).collect();
    ids.sort();
    assert_eq!(ids, vec![0, 5, 9]);
    for neighbor in &result {
        assert_eq!(neighbor.distance, 0.0);
    }
}

fn euclid2(a: &[f32; 2], b: &[f32; 2]) -> f32 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

fn grid_points(side: usize) -> Vec<[f32; 2]> {
    (0..side * side)
        .map(|i| [(i % side) as f32, (i / side) as f32])
        .collect()
}

fn recall_at_10(index: &HnswIndex<[f32; 2], fn(&[f32; 2], &[f32; 2]) -> f32>, queries: &[[f32; 2]], truth: &[Vec<usize>]) -> f32 {
    let mut hits = 0usize;
    for (query, expected) in queries.iter().zip(truth) {
        let got: std::collections::HashSet<usize> = index
            .knn(query, 10)
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        hits += expected.iter().filter(|id| got.contains(id)).count();
    }
    hits as f32 / (queries.len() * 10) as f32
}

fn brute_force_truth(points: &[[f32; 2]], queries: &[[f32; 2]]) -> Vec<Vec<usize>> {
    queries
        .iter()
        .map(|q| {
            let mut ranked: Vec<(usize, f32)> = points
                .iter()
                .enumerate()
                .map(|(i, p)| (i, euclid2(p, q)))
                .collect();
            ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
            ranked.into_iter().take(10).map(|(i, _)| i).collect()
        })
        .collect()
}

// S6: on a regular grid, the diversity-aware heuristic selector should not
// do worse on average recall@10 than plain closest-M selection, at a couple
// of different grid scales.
#[rstest]
#[case(24)]
#[case(32)]
fn s6_heuristic_selector_recall_at_least_simple(#[case] grid_side: usize) {
    let points = grid_points(grid_side);
    let queries = grid_points(10).into_iter().map(|[x, y]| [x + 0.3, y + 0.3]).take(100).collect::<Vec<_>>();
    let truth = brute_force_truth(&points, &queries);

    let simple_params = Params {
        neighbor_heuristic: NeighborHeuristic::SelectSimple,
        ..Params::default()
    };
    let heuristic_params = Params {
        neighbor_heuristic: NeighborHeuristic::SelectHeuristic,
        ..Params::default()
    };

    let mut rng_simple = StdRng::seed_from_u64(123);
    let simple_index: HnswIndex<[f32; 2], fn(&[f32; 2], &[f32; 2]) -> f32> =
        HnswIndex::build(points.clone(), &mut rng_simple, simple_params, euclid2).unwrap();
    let mut rng_heuristic = StdRng::seed_from_u64(123);
    let heuristic_index: HnswIndex<[f32; 2], fn(&[f32; 2], &[f32; 2]) -> f32> =
        HnswIndex::build(points, &mut rng_heuristic, heuristic_params, euclid2).unwrap();

    let simple_recall = recall_at_10(&simple_index, &queries, &truth);
    let heuristic_recall = recall_at_10(&heuristic_index, &queries, &truth);

    assert!(
        heuristic_recall >= simple_recall - 0.02,
        "heuristic recall {heuristic_recall:.4} fell below simple recall {simple_recall:.4}"
    );
}
