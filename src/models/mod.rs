//! Domain models for the feature board.
//!
//! A [`Feature`] is a trackable unit of work. Its [`FeatureStatus`] is the
//! only thing deciding where it is shown: the backlog or one of the three
//! kanban columns.

mod feature;

pub use feature::*;
