//! Eviction logic for capacity management.
//!
//! Implements different eviction policies for determining which episodes
//! to remove when storage capacity is reached.

use super::super::policy::EvictionPolicy;
use super::scoring::calculate_relevance_score;
use crate::episode::Episode;
use std::cmp::Ordering;
use uuid::Uuid;

/// Determine which episodes to evict if needed.
///
/// Returns episode IDs to evict to make room for new episodes.
/// The number of episodes to evict depends on the current count
/// and the max capacity.
///
/// # Arguments
///
/// * `episodes` - Current episodes in storage
/// * `max_episodes` - Maximum number of episodes allowed
/// * `policy` - Eviction policy to use
///
/// # Returns
///
/// Vector of episode IDs to evict (empty if no eviction needed)
#[must_use]
pub fn evict_if_needed(
    episodes: &[Episode],
    max_episodes: usize,
    policy: EvictionPolicy,
) -> Vec<Uuid> {
    let current_count = episodes.len();

    // No eviction needed if under capacity
    if current_count < max_episodes {
        return Vec::new();
    }

    // Calculate how many to evict (at least 1 to make room for new episodes)
    let eviction_count = (current_count - max_episodes) + 1;

    match policy {
        EvictionPolicy::LRU => evict_lru(episodes, eviction_count),
        EvictionPolicy::RelevanceWeighted => evict_relevance_weighted(episodes, eviction_count),
    }
}

/// Evict episodes using LRU policy.
///
/// Returns the oldest episodes (by `end_time` or `start_time`).
fn evict_lru(episodes: &[Episode], count: usize) -> Vec<Uuid> {
    let mut episodes_with_time: Vec<_> = episodes
        .iter()
        .map(|e| {
            let time = e.end_time.unwrap_or(e.start_time);
            (e.episode_id, time)
        })
        .collect();

    // Sort by time (oldest first)
    episodes_with_time.sort_by(|a, b| a.1.cmp(&b.1));

    // Take the oldest N episodes
    episodes_with_time
        .iter()
        .take(count)
        .map(|(id, _)| *id)
        .collect()
}

/// Evict episodes using relevance-weighted policy.
///
/// Returns episodes with lowest relevance scores.
fn evict_relevance_weighted(episodes: &[Episode], count: usize) -> Vec<Uuid> {
    let mut episodes_with_scores: Vec<_> = episodes
        .iter()
        .map(|e| {
            let score = calculate_relevance_score(e);
            (e.episode_id, score)
        })
        .collect();

    // Sort by relevance score (lowest first)
    episodes_with_scores.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    // Take the lowest-scoring N episodes
    episodes_with_scores
        .iter()
        .take(count)
        .map(|(id, _)| *id)
        .collect()
}
