//! Optimized Pattern Validator with Enhanced Confidence Thresholds
//!
//! Implements validated Quick Win optimizations for improved success rates.

mod applicator;
mod planned_step;
mod risk;
mod tool;
mod validator;

// Re-exports
pub use applicator::EnhancedPatternApplicator;
pub use planned_step::PlannedStep;
pub use risk::RiskAssessment;
pub use tool::{CompatibilityResult, Tool};
pub use validator::OptimizedPatternValidator;
