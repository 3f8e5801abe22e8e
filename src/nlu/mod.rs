//! NLU (intent/slot classification) Module
//!
//! - Keyword: phrase lists plus fuzzy topping lookup, no model files

pub mod keyword;

use crate::config::Config;
use crate::dialog::ClassificationResult;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub use keyword::KeywordClassifier;

/// Trait for intent/slot classifiers
#[async_trait]
pub trait ClassifierEngine: Send + Sync {
    /// Classify one utterance
    async fn classify(&self, text: &str) -> Result<ClassificationResult>;

    /// Model artifacts that must be provisioned before the session starts
    fn required_models(&self) -> Vec<String> {
        Vec::new()
    }

    /// Get the engine name
    fn name(&self) -> &str;
}

/// Factory to create the configured classifier
pub fn create_engine(config: &Config) -> Arc<dyn ClassifierEngine> {
    Arc::new(KeywordClassifier::new(config))
}
