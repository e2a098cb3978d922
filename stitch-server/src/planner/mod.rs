//! Itinerary planner.
//!
//! This module implements the core stitching algorithm that answers:
//! "How do I get from here to there using a connector, the trunk line,
//! and another connector?"
//!
//! Candidates are the cross-product of nearby hubs on each side and the
//! allowed connector modes. Each candidate's legs are resolved through a
//! directions provider, then every assembled itinerary is scored, deduped
//! and ranked.

mod config;
mod estimate;
mod generate;
mod plan;
mod rank;
mod resolver;

pub use config::{PlanOptions, PlannerConfig};
pub use estimate::{Estimate, RateTables, estimate};
pub use generate::{CandidateGenerator, CandidateSet};
pub use plan::{PlanError, PlanResult, Planner};
pub use rank::{PRIORITY_BONUS, ScoringWeights, deduplicate, rank_and_label};
pub use resolver::{LegResolver, LegUnavailable};
