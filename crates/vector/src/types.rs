use serde::{Deserialize, Serialize};

/// One ranked neighbor of a query word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Vocabulary token
    pub word: String,

    /// Cosine similarity to the query (-1.0 to 1.0)
    pub score: f32,
}

impl Neighbor {
    pub fn new(word: impl Into<String>, score: f32) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// A point in the 2D projection plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Labelled point handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    /// Word shown next to the point
    pub label: String,

    pub x: f64,
    pub y: f64,

    /// True only for the query word (index 0)
    pub is_query: bool,
}

/// Result of exploring one word: ranked neighbors plus their projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exploration {
    /// Query word
    pub word: String,

    /// Number of neighbors that was requested
    pub top_n: usize,

    /// Neighbors in rank order (may be fewer than `top_n`)
    pub neighbors: Vec<Neighbor>,

    /// Query first, then neighbors in rank order
    pub points: Vec<PlotPoint>,
}

impl Exploration {
    /// Labels in plot order
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    /// Title line used by the result page
    pub fn title(&self) -> String {
        format!("Top {} Similar Words to '{}'", self.top_n, self.word)
    }
}
