//! Resume keyword gap library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod rewrite;
pub mod server;

pub use config::Config;
pub use error::{Result, ResumeGapError};
pub use input::InputManager;
pub use processing::{GapEngine, KeywordGap, TokenSet};

/// Job-description keywords absent from the resume, using the English stopwords
pub fn compute_keyword_gap(resume_text: &str, job_text: &str) -> KeywordGap {
    GapEngine::default().compute_keyword_gap(resume_text, job_text)
}
