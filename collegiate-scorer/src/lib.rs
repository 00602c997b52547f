//! Scoring and ranking for the Collegiate matching engine.
//!
//! A query runs in four steps:
//! - the geo filter in `collegiate-core` picks the `k` nearest institutions;
//! - [`normalize`] standardises the preferences and each candidate into
//!   aligned vectors using the dataset-wide statistics;
//! - a [`SimilarityStrategy`] scores every candidate vector against the
//!   preference vector;
//! - the ranker orders candidates by score, or by distance when the request
//!   carries no preferences at all.
//!
//! [`MatchEngine`] wires the steps together.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use collegiate_core::{FieldOfStudy, Preferences};
//! use collegiate_core::test_support::{MemoryStore, field_shares, institution_at};
//! use collegiate_scorer::MatchEngine;
//!
//! let store = MemoryStore::with_institutions([
//!     institution_at("Arts Academy", 0.0, 0.1).with_field_of_study(field_shares(0.2, 0.8)),
//!     institution_at("Tech Institute", 0.0, 0.2).with_field_of_study(field_shares(0.8, 0.2)),
//! ]);
//! let preferences = Preferences::new().with_field_of_study(FieldOfStudy::Stem);
//!
//! let ranked = MatchEngine::default().find_matches(&store, Coord { x: 0.0, y: 0.0 }, 2, preferences)?;
//! assert_eq!(ranked.names(), vec!["Tech Institute", "Arts Academy"]);
//! # Ok::<(), collegiate_scorer::MatchError>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod engine;
mod error;
mod normalizer;
mod ranker;
mod similarity;

pub use engine::MatchEngine;
pub use error::{MatchError, SimilarityError};
pub use normalizer::{
    CATEGORY_TARGET, DEGENERATE_RANK, Normalized, NormalizedVector, dense_ranks, normalize,
    rank_transform,
};
pub use ranker::{rank_by_distance, rank_by_score};
pub use similarity::{DEFAULT_BANDWIDTH, SimilarityStrategy};
