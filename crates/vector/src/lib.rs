//! Wordmap Vector Engine
//!
//! 단어 임베딩 어휘, 코사인 유사도 검색, 2D PCA 투영

pub mod engine;
pub mod projection;
pub mod similarity;
pub mod store;
pub mod types;

pub use engine::{explore, parse_top_n};
pub use projection::project_to_2d;
pub use similarity::{cosine_similarity, top_k_similar};
pub use store::{EmbeddingStore, VocabFormat};
pub use types::{Exploration, Neighbor, PlotPoint, Point2};
