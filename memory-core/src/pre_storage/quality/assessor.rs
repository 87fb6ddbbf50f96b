//! Quality assessor implementation.
//!
//! Contains the `QualityAssessor` struct and its assessment methods.

use super::types::{QualityConfig, QualityFeature};
use crate::episode::Episode;
use std::collections::HashSet;

/// Assess episode quality before storage.
///
/// Implements the `PREMem` quality assessment algorithm using multiple
/// quality features to determine if an episode is worth storing.
///
/// # Examples
///
/// ```no_run
/// use memory_core::pre_storage::{QualityAssessor, QualityConfig};
/// use memory_core::{Episode, TaskContext, TaskType};
///
/// let assessor = QualityAssessor::new(QualityConfig::default());
///
/// let episode = Episode::new(
///     "Complex task".to_string(),
///     TaskContext::default(),
///     TaskType::CodeGeneration,
/// );
///
/// let score = assessor.assess_episode(&episode);
/// println!("Quality score: {:.2}", score);
/// ```
#[derive(Debug, Clone)]
pub struct QualityAssessor {
    config: QualityConfig,
}

impl QualityAssessor {
    /// Create a new quality assessor with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Quality configuration including threshold and weights
    ///
    /// # Examples
    ///
    /// ```
    /// use memory_core::pre_storage::{QualityAssessor, QualityConfig};
    ///
    /// let assessor = QualityAssessor::new(QualityConfig::default());
    /// ```
    #[must_use]
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Assess the quality of an episode.
    ///
    /// Computes a weighted quality score from multiple features. The score
    /// ranges from 0.0 (lowest quality) to 1.0 (highest quality).
    ///
    /// # Arguments
    ///
    /// * `episode` - The episode to assess
    ///
    /// # Returns
    ///
    /// Quality score in range 0.0-1.0
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use memory_core::pre_storage::{QualityAssessor, QualityConfig};
    /// use memory_core::{Episode, TaskContext, TaskType};
    ///
    /// let assessor = QualityAssessor::new(QualityConfig::default());
    /// let episode = Episode::new(
    ///     "Test task".to_string(),
    ///     TaskContext::default(),
    ///     TaskType::Testing,
    /// );
    ///
    /// let score = assessor.assess_episode(&episode);
    /// assert!(score >= 0.0 && score <= 1.0);
    /// ```
    #[must_use]
    pub fn assess_episode(&self, episode: &Episode) -> f32 {
        let task_complexity = self.assess_task_complexity(episode);
        let step_diversity = self.assess_step_diversity(episode);
        let error_rate = self.assess_error_rate(episode);
        let reflection_depth = self.assess_reflection_depth(episode);
        let pattern_novelty = self.assess_pattern_novelty(episode);

        let score = task_complexity * self.config.get_weight(QualityFeature::TaskComplexity)
            + step_diversity * self.config.get_weight(QualityFeature::StepDiversity)
            + error_rate * self.config.get_weight(QualityFeature::ErrorRate)
            + reflection_depth * self.config.get_weight(QualityFeature::ReflectionDepth)
            + pattern_novelty * self.config.get_weight(QualityFeature::PatternNovelty);

        score.clamp(0.0, 1.0)
    }

    /// Check if an episode meets the quality threshold.
    ///
    /// # Arguments
    ///
    /// * `episode` - The episode to check
    ///
    /// # Returns
    ///
    /// `true` if quality score >= threshold, `false` otherwise
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use memory_core::pre_storage::{QualityAssessor, QualityConfig};
    /// use memory_core::{Episode, TaskContext, TaskType};
    ///
    /// let assessor = QualityAssessor::new(QualityConfig::default());
    /// let episode = Episode::new(
    ///     "Test task".to_string(),
    ///     TaskContext::default(),
    ///     TaskType::Testing,
    /// );
    ///
    /// if assessor.should_store(&episode) {
    ///     println!("Episode meets quality threshold");
    /// }
    /// ```
    #[must_use]
    pub fn should_store(&self, episode: &Episode) -> bool {
        self.assess_episode(episode) >= self.config.quality_threshold
    }

    /// Assess task complexity based on number of steps and tool diversity.
    fn assess_task_complexity(&self, episode: &Episode) -> f32 {
        let step_count = episode.steps.len();
        let unique_tools: HashSet<_> = episode.steps.iter().map(|s| &s.tool).collect();
        let tool_diversity = unique_tools.len();

        let step_score = match step_count {
            0..=2 => 0.1,
            3..=5 => 0.25,
            6..=10 => 0.35,
            11..=20 => 0.45,
            _ => 0.5,
        };

        let tool_score = match tool_diversity {
            0..=1 => 0.1,
            2..=3 => 0.25,
            4..=6 => 0.35,
            7..=10 => 0.45,
            _ => 0.5,
        };

        step_score + tool_score
    }

    /// Assess step diversity based on variety of actions and results.
    fn assess_step_diversity(&self, episode: &Episode) -> f32 {
        if episode.steps.is_empty() {
            return 0.0;
        }

        let unique_actions: HashSet<_> = episode.steps.iter().map(|s| &s.action).collect();
        let action_diversity = unique_actions.len() as f32 / episode.steps.len() as f32;

        let success_count = episode.successful_steps_count();
        let error_count = episode.failed_steps_count();
        let result_diversity = if success_count > 0 && error_count > 0 {
            0.5
        } else if success_count > 0 || error_count > 0 {
            0.3
        } else {
            0.0
        };

        (action_diversity * 0.6 + result_diversity * 0.4).clamp(0.0, 1.0)
    }

    /// Assess error handling quality based on error rate and recovery.
    fn assess_error_rate(&self, episode: &Episode) -> f32 {
        let total_steps = episode.steps.len();
        if total_steps == 0 {
            return 0.5;
        }

        let error_count = episode.failed_steps_count();
        let success_count = episode.successful_steps_count();
        let error_rate = error_count as f32 / total_steps as f32;

        if error_rate == 0.0 {
            0.9
        } else if error_rate < 0.2 && success_count > error_count {
            1.0
        } else if error_rate < 0.4 {
            0.6
        } else if error_rate < 0.6 && success_count > 0 {
            0.4
        } else {
            0.2
        }
    }

    /// Assess reflection quality based on depth and insight content.
    fn assess_reflection_depth(&self, episode: &Episode) -> f32 {
        let Some(reflection) = &episode.reflection else {
            return 0.0;
        };

        let total_items =
            reflection.successes.len() + reflection.improvements.len() + reflection.insights.len();

        match total_items {
            0 => 0.0,
            1..=2 => 0.3,
            3..=5 => 0.6,
            6..=10 => 0.8,
            _ => 1.0,
        }
    }

    /// Assess pattern novelty based on number of patterns extracted.
    fn assess_pattern_novelty(&self, episode: &Episode) -> f32 {
        let total_patterns = episode.patterns.len() + episode.heuristics.len();

        match total_patterns {
            0 => 0.2,
            1..=2 => 0.5,
            3..=5 => 0.75,
            _ => 1.0,
        }
    }
}
