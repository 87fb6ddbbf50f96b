//! Error recovery pattern extractor
//!
//! Extracts patterns where errors are successfully recovered from.

use super::PatternExtractor as PatternExtractorTrait;
use crate::episode::Episode;
use crate::pattern::Pattern;
use crate::types::{ExecutionResult, TaskOutcome};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

/// Extracts error recovery patterns from episodes
pub struct ErrorRecoveryExtractor {
    confidence_threshold: f32,
}

impl Default for ErrorRecoveryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorRecoveryExtractor {
    /// Create new error recovery extractor
    #[must_use]
    pub fn new() -> Self {
        Self {
            confidence_threshold: 0.7,
        }
    }

    /// Create with custom confidence threshold
    #[must_use]
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            confidence_threshold: threshold,
        }
    }

    /// Calculate success rate based on episode outcome
    fn calculate_success_rate(outcome: &Option<TaskOutcome>) -> f32 {
        match outcome {
            Some(TaskOutcome::Success { .. }) => 1.0,
            Some(TaskOutcome::PartialSuccess { .. }) => 0.5,
            _ => 0.0,
        }
    }
}

#[async_trait]
impl PatternExtractorTrait for ErrorRecoveryExtractor {
    async fn extract(&self, episode: &Episode) -> Result<Vec<Pattern>> {
        let mut patterns = Vec::new();

        // Only extract from complete episodes
        if !episode.is_complete() {
            return Ok(patterns);
        }

        let mut recovery_sequences = Vec::new();

        // Look for error -> success patterns
        for i in 0..episode.steps.len().saturating_sub(1) {
            let current = &episode.steps[i];
            let next = &episode.steps[i + 1];

            // Found an error followed by success
            if !current.is_success() && next.is_success() {
                let error_type = if let Some(ExecutionResult::Error { message }) = &current.result {
                    message.clone()
                } else {
                    "Unknown error".to_string()
                };

                let recovery_step = format!("{}: {}", next.tool, next.action);
                recovery_sequences.push((error_type, recovery_step));
            }
        }

        if recovery_sequences.is_empty() {
            return Ok(patterns);
        }

        // Group by error type
        let mut error_recoveries: HashMap<String, Vec<String>> = HashMap::new();
        for (error_type, recovery) in recovery_sequences {
            error_recoveries
                .entry(error_type)
                .or_default()
                .push(recovery);
        }

        // Create pattern for each error type
        for (error_type, recovery_steps) in error_recoveries {
            let success_rate = Self::calculate_success_rate(&episode.outcome);

            // Only include if above threshold
            if success_rate >= self.confidence_threshold {
                patterns.push(Pattern::ErrorRecovery {
                    id: Uuid::new_v4(),
                    error_type,
                    recovery_steps,
                    success_rate,
                    context: episode.context.clone(),
                    effectiveness: crate::pattern::PatternEffectiveness::new(),
                });
            }
        }

        Ok(patterns)
    }

    fn name(&self) -> &'static str {
        "ErrorRecoveryExtractor"
    }

    fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }
}
