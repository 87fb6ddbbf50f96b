//! Pattern command implementations
//!
//! This module re-exports from pattern_v2 for backward compatibility.

pub use crate::pattern_v2::PatternCommands;
pub use crate::pattern_v2::PatternType;
pub use crate::pattern_v2::PatternSummary;
pub use crate::pattern_v2::PatternList;
pub use crate::pattern_v2::PatternAnalysis;
pub use crate::pattern_v2::PatternDetail;
pub use crate::pattern_v2::EffectivenessRankings;
pub use crate::pattern_v2::EffectivenessRanking;

pub use crate::pattern_v2::list_patterns;
pub use crate::pattern_v2::view_pattern;
pub use crate::pattern_v2::analyze_pattern;
pub use crate::pattern_v2::pattern_effectiveness;
pub use crate::pattern_v2::decay_patterns;
