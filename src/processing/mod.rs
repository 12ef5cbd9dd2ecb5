//! Text processing and keyword gap analysis

pub mod stopwords;
pub mod normalizer;
pub mod gap;
pub mod sections;

pub use gap::{Comparison, GapAnalyzer, GapEngine, KeywordGap};
pub use normalizer::{Normalizer, TokenSet};
pub use stopwords::StopwordSet;
