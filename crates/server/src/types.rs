use serde::{Deserialize, Serialize};
use serde_json::Value;
use wordmap_vector::{Exploration, Neighbor, PlotPoint};

/// HTML form submission
#[derive(Debug, Default, Deserialize)]
pub struct ExploreForm {
    /// Word to look up
    #[serde(default)]
    pub word: Option<String>,

    /// Neighbor count, kept as text so bad values can fall back to the default
    #[serde(default)]
    pub topn: Option<String>,
}

/// JSON lookup request
#[derive(Debug, Deserialize)]
pub struct SimilarRequest {
    /// Word to look up
    #[serde(default)]
    pub word: String,

    /// Neighbor count (number or string)
    #[serde(default)]
    pub topn: Option<Value>,
}

impl SimilarRequest {
    /// Count as text, ready for `parse_top_n`
    pub fn topn_text(&self) -> Option<String> {
        match self.topn.as_ref()? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// JSON lookup response
#[derive(Debug, Serialize)]
pub struct SimilarResponse {
    pub word: String,
    pub topn: usize,
    pub neighbors: Vec<Neighbor>,
    pub points: Vec<PlotPoint>,
}

impl From<Exploration> for SimilarResponse {
    fn from(exploration: Exploration) -> Self {
        Self {
            word: exploration.word,
            topn: exploration.top_n,
            neighbors: exploration.neighbors,
            points: exploration.points,
        }
    }
}

/// Vocabulary statistics
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub vocab_size: usize,
    pub dim: usize,
    pub fingerprint: Option<String>,
    pub source: Option<String>,
}

/// Error body for JSON routes
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topn_text() {
        let parse = |body: &str| serde_json::from_str::<SimilarRequest>(body).unwrap().topn_text();
        assert_eq!(parse(r#"{"word":"a","topn":3}"#), Some("3".to_string()));
        assert_eq!(parse(r#"{"word":"a","topn":"7"}"#), Some("7".to_string()));
        assert_eq!(parse(r#"{"word":"a","topn":null}"#), None);
        assert_eq!(parse(r#"{"word":"a","topn":[1]}"#), None);
        assert_eq!(parse(r#"{"word":"a"}"#), None);
    }
}
