//! Episode command module
//!
//! This module provides commands for managing episodes in the memory system.
//! It is split into submodules to keep each file under 500 LOC.

pub mod core;
pub mod relationships;

pub use core::AppliedFilters;
pub use core::DeletionResult;
pub use core::EpisodeCommands;
pub use core::EpisodeDetail;
pub use core::EpisodeList;
pub use core::EpisodeListFiltered;
pub use core::EpisodeSearchResult;
pub use core::EpisodeSortOrder;
pub use core::EpisodeStatus;
pub use core::EpisodeStep;
pub use core::EpisodeSummary;
pub use core::FilterCommands;
pub use core::FilterList;
pub use core::SavedFilter;
pub use core::TaskOutcome;

pub use core::bulk_get_episodes;
pub use core::complete_episode;
pub use core::create_episode;
pub use core::delete;
pub use core::delete_episode;
pub use core::filter;
pub use core::handle_filter_command;
pub use core::list_episodes;
pub use core::log_step;
pub use core::search_episodes;
pub use core::view_episode;

// Re-export relationship commands and types
pub use relationships::add_relationship;
pub use relationships::dependency_graph;
pub use relationships::find_related;
pub use relationships::list_relationships;
pub use relationships::remove_relationship;
pub use relationships::topological_sort;
pub use relationships::validate_cycles;
pub use relationships::AddRelationshipResult;
pub use relationships::DependencyGraphResult;
pub use relationships::DirectionArg;
pub use relationships::FindRelatedResult;
pub use relationships::GraphFormat;
pub use relationships::ListFormat;
pub use relationships::ListRelationshipsResult;
pub use relationships::RelatedEpisodeItem;
pub use relationships::RelationshipCommands;
pub use relationships::RelationshipListItem;
pub use relationships::RelationshipTypeArg;
pub use relationships::RemoveRelationshipResult;
pub use relationships::TopologicalSortResult;
pub use relationships::ValidateCyclesResult;
