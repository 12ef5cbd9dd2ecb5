//! Generative rewriting of resume sections around the keyword gap

pub mod client;
pub mod prompts;

use crate::error::Result;

pub use client::OpenAiRewriter;
pub use prompts::{RewriteRequest, RewrittenSections};

/// A remote, possibly slow and possibly failing, text rewriter.
pub trait RewriteService {
    fn rewrite(
        &self,
        request: &RewriteRequest,
    ) -> impl std::future::Future<Output = Result<RewrittenSections>> + Send;
}
