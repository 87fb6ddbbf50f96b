//! Pattern clustering and deduplication
//!
//! Provides functionality to deduplicate similar patterns using clustering.

use crate::pattern::Pattern;
use std::collections::HashSet;

mod cluster_types;

/// Deduplicate patterns by removing exact duplicates (same ID)
#[must_use]
pub fn deduplicate_patterns(patterns: Vec<Pattern>) -> Vec<Pattern> {
    let mut unique_patterns = Vec::new();
    let mut seen_ids = HashSet::new();

    for pattern in patterns {
        let id = pattern.id();
        if !seen_ids.contains(&id) {
            seen_ids.insert(id);
            unique_patterns.push(pattern);
        }
    }

    // Sort by success rate (descending)
    unique_patterns.sort_by(|a, b| {
        b.success_rate()
            .partial_cmp(&a.success_rate())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    unique_patterns
}

/// Cluster similar patterns together to avoid redundancy
///
/// This performs a simple similarity-based clustering:
/// - `ToolSequence` patterns with same tools are merged
/// - `DecisionPoint` patterns with same condition are merged
/// - `ErrorRecovery` patterns with same error type are merged
/// - `ContextPattern` patterns with overlapping features are merged
#[must_use]
pub fn cluster_similar_patterns(patterns: Vec<Pattern>) -> Vec<Pattern> {
    let mut clustered = Vec::new();

    // Group by pattern type first
    let mut tool_sequences = Vec::new();
    let mut decision_points = Vec::new();
    let mut error_recoveries = Vec::new();
    let mut context_patterns = Vec::new();

    for pattern in patterns {
        match pattern {
            Pattern::ToolSequence { .. } => tool_sequences.push(pattern),
            Pattern::DecisionPoint { .. } => decision_points.push(pattern),
            Pattern::ErrorRecovery { .. } => error_recoveries.push(pattern),
            Pattern::ContextPattern { .. } => context_patterns.push(pattern),
        }
    }

    // Cluster each type
    clustered.extend(cluster_types::cluster_tool_sequences(tool_sequences));
    clustered.extend(cluster_types::cluster_decision_points(decision_points));
    clustered.extend(cluster_types::cluster_error_recoveries(error_recoveries));
    clustered.extend(cluster_types::cluster_context_patterns(context_patterns));

    // Final deduplication and sorting
    deduplicate_patterns(clustered)
}
