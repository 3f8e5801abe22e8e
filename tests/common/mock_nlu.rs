//! Mock classifier for Testing
//!
//! Answers from a fixed table, optionally after a per-utterance delay.

use anyhow::Result;
use async_trait::async_trait;
use pizzatalk::dialog::ClassificationResult;
use pizzatalk::nlu::ClassifierEngine;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct MockNlu {
    answers: HashMap<String, ClassificationResult>,
    delays: HashMap<String, Duration>,
    failures: Vec<String>,
    /// Every utterance that was classified
    pub seen: Arc<Mutex<Vec<String>>>,
}

impl MockNlu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, text: &str, result: ClassificationResult) -> Self {
        self.answers.insert(text.to_string(), result);
        self
    }

    pub fn slow(mut self, text: &str, delay: Duration) -> Self {
        self.delays.insert(text.to_string(), delay);
        self
    }

    pub fn fail_on(mut self, text: &str) -> Self {
        self.failures.push(text.to_string());
        self
    }

    pub fn get_seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClassifierEngine for MockNlu {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        self.seen.lock().unwrap().push(text.to_string());
        if let Some(delay) = self.delays.get(text) {
            tokio::time::sleep(*delay).await;
        }
        if self.failures.iter().any(|f| f == text) {
            return Err(anyhow::anyhow!("Mock NLU failure"));
        }
        Ok(self
            .answers
            .get(text)
            .cloned()
            .unwrap_or_else(|| ClassificationResult::intent("unknown")))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
