use ndarray::ArrayView1;
use tracing::debug;
use wordmap_common::{Result, WordmapError};

use crate::store::EmbeddingStore;
use crate::types::Neighbor;

/// Cosine similarity between two vectors
///
/// Returns a value in [-1, 1]; a zero vector is similar to nothing (0.0).
pub fn cosine_similarity(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    cosine_from_parts(a.dot(&b), a.dot(&a).sqrt(), b.dot(&b).sqrt())
}

/// Cosine similarity from a dot product and the two norms
fn cosine_from_parts(dot: f32, norm_a: f32, norm_b: f32) -> f32 {
    let denom = norm_a * norm_b;
    if denom > 0.0 {
        (dot / denom).clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Rank every other vocabulary entry against `query` and keep the best `k`
///
/// Ties keep vocabulary order. When fewer than `k` candidates exist, all of
/// them are returned.
pub fn top_k_similar(store: &EmbeddingStore, query: &str, k: usize) -> Result<Vec<Neighbor>> {
    let query_idx = store
        .index_of(query)
        .ok_or_else(|| WordmapError::unknown_token(query))?;

    let vectors = store.vectors();
    let norms = store.norms();
    let query_vec = vectors.row(query_idx);
    let query_norm = norms[query_idx];

    let scores = vectors.dot(&query_vec);
    let mut ranked: Vec<(usize, f32)> = scores
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != query_idx)
        .map(|(idx, dot)| (idx, cosine_from_parts(*dot, query_norm, norms[idx])))
        .collect();

    // sort_by is stable, so equal scores stay in vocabulary order
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(k);

    debug!(
        "Ranked {} candidates for '{}' - returning {}",
        store.size().saturating_sub(1),
        query,
        ranked.len()
    );

    let tokens = store.tokens();
    Ok(ranked
        .into_iter()
        .map(|(idx, score)| Neighbor::new(tokens[idx].clone(), score))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    fn animals() -> EmbeddingStore {
        EmbeddingStore::from_entries(vec![
            ("cat", vec![1.0, 0.0, 0.0]),
            ("dog", vec![0.9, 0.1, 0.0]),
            ("car", vec![0.0, 1.0, 0.0]),
            ("kitten", vec![0.8, 0.0, 0.3]),
        ])
        .unwrap()
    }

    #[test]
    fn test_cosine_similarity() {
        let a = arr1(&[1.0f32, 0.0, 0.0]);
        let b = arr1(&[0.9f32, 0.1, 0.0]);
        let c = arr1(&[-2.0f32, 0.0, 0.0]);
        let zero = arr1(&[0.0f32, 0.0, 0.0]);

        assert!((cosine_similarity(a.view(), a.view()) - 1.0).abs() < 1e-6);
        assert!((cosine_similarity(a.view(), b.view()) - 0.99388).abs() < 1e-4);
        assert!((cosine_similarity(a.view(), c.view()) + 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(a.view(), zero.view()), 0.0);
    }

    #[test]
    fn test_single_nearest_neighbor() {
        let store = EmbeddingStore::from_entries(vec![
            ("cat", vec![1.0, 0.0, 0.0]),
            ("dog", vec![0.9, 0.1, 0.0]),
            ("car", vec![0.0, 1.0, 0.0]),
        ])
        .unwrap();

        let result = top_k_similar(&store, "cat", 1).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].word, "dog");
        assert!((result[0].score - 0.994).abs() < 1e-3);
    }

    #[test]
    fn test_exact_k_excludes_query() {
        let store = animals();
        for k in 1..store.size() {
            let result = top_k_similar(&store, "cat", k).unwrap();
            assert_eq!(result.len(), k);
            for n in &result {
                assert_ne!(n.word, "cat");
                assert!((-1.0..=1.0).contains(&n.score));
            }
        }
    }

    #[test]
    fn test_scores_non_increasing() {
        let store = animals();
        for query in store.tokens() {
            let result = top_k_similar(&store, query, 10).unwrap();
            assert!(result.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn test_k_larger_than_vocabulary() {
        let store = animals();
        let result = top_k_similar(&store, "cat", 10).unwrap();
        let words: Vec<&str> = result.iter().map(|n| n.word.as_str()).collect();
        assert_eq!(words, vec!["dog", "kitten", "car"]);
    }

    #[test]
    fn test_ties_keep_vocabulary_order() {
        let store = EmbeddingStore::from_entries(vec![
            ("q", vec![1.0, 0.0]),
            ("b", vec![0.0, 1.0]),
            ("a", vec![0.0, 2.0]),
            ("c", vec![0.0, -1.0]),
            ("d", vec![3.0, 0.0]),
        ])
        .unwrap();

        let result = top_k_similar(&store, "q", 4).unwrap();
        let words: Vec<&str> = result.iter().map(|n| n.word.as_str()).collect();
        assert_eq!(words, vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let store = EmbeddingStore::from_entries(vec![
            ("q", vec![1.0, 0.0]),
            ("zero", vec![0.0, 0.0]),
            ("far", vec![-1.0, 0.0]),
        ])
        .unwrap();
        let result = top_k_similar(&store, "q", 2).unwrap();
        assert_eq!(result[0], Neighbor::new("zero", 0.0));
        assert_eq!(result[1].word, "far");
    }

    #[test]
    fn test_ranking_scores_match_pairwise_cosine() {
        let store = animals();
        let query = store.vector_of("kitten").unwrap();
        for neighbor in top_k_similar(&store, "kitten", 10).unwrap() {
            let other = store.vector_of(&neighbor.word).unwrap();
            assert!((neighbor.score - cosine_similarity(query, other)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_unknown_query() {
        let store = animals();
        let err = top_k_similar(&store, "xyz", 3).unwrap_err();
        assert!(matches!(err, WordmapError::UnknownToken(_)));
    }
}
