use tracing::{debug, info};
use wordmap_common::{Result, WordmapError, DEFAULT_TOP_N};

use crate::projection::project_to_2d;
use crate::similarity::top_k_similar;
use crate::store::EmbeddingStore;
use crate::types::{Exploration, PlotPoint};

/// Effective neighbor count for a raw request value
///
/// Anything that is not an integer >= 1 falls back to [`DEFAULT_TOP_N`].
pub fn parse_top_n(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(DEFAULT_TOP_N)
}

/// Look up `word`, rank its neighbors and project them for plotting
///
/// The word is expected to be trimmed by the caller; an empty word is an
/// invalid input, a missing one an unknown token.
pub fn explore(store: &EmbeddingStore, word: &str, top_n: usize) -> Result<Exploration> {
    if word.trim().is_empty() {
        return Err(WordmapError::invalid_input("empty input"));
    }
    if !store.contains(word) {
        debug!("Word not in vocabulary: {}", word);
        return Err(WordmapError::unknown_token(word));
    }

    let neighbors = top_k_similar(store, word, top_n)?;

    let mut labels: Vec<&str> = Vec::with_capacity(neighbors.len() + 1);
    labels.push(word);
    labels.extend(neighbors.iter().map(|n| n.word.as_str()));

    let samples = store.rows_of(&labels)?;
    let projected = project_to_2d(samples.view())?;

    let points = labels
        .iter()
        .zip(projected)
        .enumerate()
        .map(|(idx, (label, p))| PlotPoint {
            label: label.to_string(),
            x: p.x,
            y: p.y,
            is_query: idx == 0,
        })
        .collect();

    info!(
        "Explored '{}' - {} neighbors (requested {})",
        word,
        neighbors.len(),
        top_n
    );

    Ok(Exploration {
        word: word.to_string(),
        top_n,
        neighbors,
        points,
    })
}
