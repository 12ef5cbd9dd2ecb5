//! Text normalization into comparable token sets

use crate::processing::stopwords::StopwordSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Unique, lowercase, alphanumeric tokens taken from one document.
///
/// Ordered so that serialized output is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSet(BTreeSet<String>);

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Tokens joined by single spaces, in set order
    pub fn to_text(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }

    pub(crate) fn insert(&mut self, token: String) -> bool {
        self.0.insert(token)
    }
}

impl FromIterator<String> for TokenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for TokenSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

impl IntoIterator for TokenSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Turns raw document text into a [`TokenSet`].
///
/// Holds only a shared, read-only stopword set, so one instance can serve
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stop_words: Arc<StopwordSet>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(StopwordSet::shared_english())
    }
}

impl Normalizer {
    pub fn new(stop_words: Arc<StopwordSet>) -> Self {
        Self { stop_words }
    }

    /// Lowercase, split on Unicode word boundaries, keep alphanumeric
    /// non-stopword tokens.
    ///
    /// Contractions and dotted names ("don't", "node.js") are single
    /// segments containing punctuation and are therefore dropped, while
    /// hyphenated words split into their parts.
    pub fn normalize(&self, text: &str) -> TokenSet {
        let lowered = text.to_lowercase();
        let mut tokens = TokenSet::new();

        for word in lowered.unicode_words() {
            if self.is_significant(word) {
                tokens.insert(word.to_string());
            }
        }

        tokens
    }

    fn is_significant(&self, word: &str) -> bool {
        !word.is_empty()
            && word.chars().all(char::is_alphanumeric)
            && !self.stop_words.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> TokenSet {
        words.iter().copied().collect()
    }

    #[test]
    fn test_stopword_exclusion() {
        let normalizer = Normalizer::default();
        let tokens = normalizer.normalize("the quick fox and the lazy dog");
        assert_eq!(tokens, set(&["quick", "fox", "lazy", "dog"]));
    }

    #[test]
    fn test_case_insensitivity() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize("Python"), set(&["python"]));
        assert_eq!(normalizer.normalize("python"), normalizer.normalize("PYTHON"));
    }

    #[test]
    fn test_punctuation_never_survives() {
        let normalizer = Normalizer::default();
        let tokens = normalizer.normalize("-- ... !!! Rust, (SQL); -- ...");
        assert_eq!(tokens, set(&["rust", "sql"]));
        assert!(tokens.iter().all(|t| t.chars().all(char::is_alphanumeric)));
    }

    #[test]
    fn test_empty_and_blank_text() {
        let normalizer = Normalizer::default();
        assert!(normalizer.normalize("").is_empty());
        assert!(normalizer.normalize("   \n\t  ").is_empty());
        assert!(normalizer.normalize("the and is of").is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let normalizer = Normalizer::default();
        let tokens = normalizer.normalize("Rust rust RUST, Rust.");
        assert_eq!(tokens.len(), 1);
        assert!(tokens.contains("rust"));
    }

    #[test]
    fn test_mixed_alphanumerics_kept() {
        let normalizer = Normalizer::default();
        let tokens = normalizer.normalize("Experience with S3, EC2 and 5 years of Python3");
        assert!(tokens.contains("s3"));
        assert!(tokens.contains("ec2"));
        assert!(tokens.contains("5"));
        assert!(tokens.contains("python3"));
    }

    #[test]
    fn test_hyphens_and_contractions() {
        let normalizer = Normalizer::default();
        let tokens = normalizer.normalize("Full-stack developer who doesn't stop; CI/CD");
        assert!(tokens.contains("full"));
        assert!(tokens.contains("stack"));
        assert!(tokens.contains("ci"));
        assert!(tokens.contains("cd"));
        assert!(!tokens.iter().any(|t| t.contains('\'')));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let normalizer = Normalizer::default();
        let text = "Looking for a Senior Engineer: Python, Django, REST APIs & AWS -- 5+ years!";
        let first = normalizer.normalize(text);
        let second = normalizer.normalize(&first.to_text());
        assert_eq!(first, second);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let normalizer = Normalizer::default();
        let text = "Kubernetes Docker Terraform docker";
        assert_eq!(normalizer.normalize(text), normalizer.normalize(text));
    }

    #[test]
    fn test_custom_stopwords() {
        let normalizer = Normalizer::new(Arc::new(StopwordSet::with_extra(["responsibilities"])));
        let tokens = normalizer.normalize("Responsibilities include Rust");
        assert_eq!(tokens, set(&["include", "rust"]));
    }

    #[test]
    fn test_unicode_letters() {
        let normalizer = Normalizer::default();
        let tokens = normalizer.normalize("Café Münster");
        assert_eq!(tokens, set(&["café", "münster"]));
    }

    #[test]
    fn test_serializes_sorted() {
        let normalizer = Normalizer::default();
        let tokens = normalizer.normalize("zeta alpha mike");
        let json = serde_json::to_string(&tokens).unwrap();
        assert_eq!(json, r#"["alpha","mike","zeta"]"#);
    }
}
