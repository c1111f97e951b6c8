//! Free-text sodium detection

use regex::{Regex, RegexBuilder};
use tensio_core::TensioError;

/// Words that usually mean a salty meal
pub const DEFAULT_SODIUM_KEYWORDS: &[&str] = &[
    "salt",
    "soy sauce",
    "bacon",
    "ham",
    "sausage",
    "salami",
    "pepperoni",
    "pizza",
    "chips",
    "fries",
    "pickle",
    "processed",
    "canned",
    "fast food",
    "deli",
    "ramen",
    "jerky",
    "pretzel",
];

/// Decides whether a meal description suggests high sodium
pub trait SodiumClassifier: Send + Sync {
    fn is_high_sodium(&self, text: &str) -> bool;
}

/// Case-insensitive substring match against a keyword list
#[derive(Debug, Clone)]
pub struct KeywordSodiumClassifier {
    keywords: Vec<String>,
    pattern: Option<Regex>,
}

impl KeywordSodiumClassifier {
    pub fn new<I, S>(keywords: I) -> Result<Self, TensioError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        let pattern = if keywords.is_empty() {
            None
        } else {
            let alternation = keywords.iter().map(|k| regex::escape(k)).collect::<Vec<_>>().join("|");
            let regex = RegexBuilder::new(&alternation)
                .case_insensitive(true)
                .build()
                .map_err(|e| TensioError::config_error(format!("sodium keywords: {}", e)))?;
            Some(regex)
        };

        Ok(Self { keywords, pattern })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for KeywordSodiumClassifier {
    fn default() -> Self {
        // Escaped literals always compile; an empty classifier is the fallback.
        Self::new(DEFAULT_SODIUM_KEYWORDS).unwrap_or(Self { keywords: Vec::new(), pattern: None })
    }
}

impl SodiumClassifier for KeywordSodiumClassifier {
    fn is_high_sodium(&self, text: &str) -> bool {
        self.pattern.as_ref().map_or(false, |p| p.is_match(text))
    }
}
