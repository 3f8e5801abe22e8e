//! Keyword classifier
//!
//! Stands in for a trained NLU model. Recognizes the two in-domain
//! intents of the pizza menu and fills the topping slot by fuzzy lookup
//! against the configured catalog.

use super::ClassifierEngine;
use crate::config::Config;
use crate::dialog::events::{
    ClassificationResult, INTENT_ADD_TOPPING, INTENT_ORDER, TOPPING_SLOT,
};
use crate::utils::fuzzy::{find_in_utterance, normalize_text};
use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

/// Phrases that close the order
const ORDER_PHRASES: &[&str] = &[
    "that's all",
    "that's it",
    "that is all",
    "that is it",
    "place the order",
    "place my order",
    "order it",
    "i'm done",
    "i am done",
    "send it",
    "checkout",
];

/// Words that mean the user is still building the pizza
/// even when no topping was heard
const BUILD_WORDS: &[&str] = &[
    "add", "with", "want", "like", "put", "extra", "some", "and", "also", "no", "not", "remove",
    "without", "actually",
];

/// Intent reported for everything else
pub const INTENT_UNKNOWN: &str = "unknown";

#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    toppings: Vec<String>,
    threshold: f64,
}

impl KeywordClassifier {
    pub fn new(config: &Config) -> Self {
        Self::with_toppings(config.toppings.clone(), config.fuzzy_threshold)
    }

    pub fn with_toppings(toppings: Vec<String>, threshold: f64) -> Self {
        Self {
            toppings,
            threshold,
        }
    }

    /// Synchronous classification used by the async trait method
    pub fn classify_text(&self, text: &str) -> ClassificationResult {
        let normalized = normalize_text(text);
        let topping = find_in_utterance(&normalized, &self.toppings, self.threshold);

        let intent = if ORDER_PHRASES.iter().any(|p| contains_phrase(&normalized, p)) {
            INTENT_ORDER
        } else if topping.is_some()
            || normalized
                .split_whitespace()
                .any(|w| BUILD_WORDS.contains(&w))
        {
            INTENT_ADD_TOPPING
        } else {
            INTENT_UNKNOWN
        };

        let mut result = ClassificationResult::intent(intent);
        if let Some(found) = topping {
            debug!("Topping '{}' matched ({:.2})", found.value, found.score);
            result = result.with_slot(TOPPING_SLOT, &found.value);
        }
        result
    }
}

/// Whole-word phrase match on normalized text
fn contains_phrase(normalized: &str, phrase: &str) -> bool {
    format!(" {} ", normalized).contains(&format!(" {} ", phrase))
}

#[async_trait]
impl ClassifierEngine for KeywordClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        Ok(self.classify_text(text))
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
