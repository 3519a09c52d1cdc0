//! Related-content ranking subsystem.
//!
//! # Responsibilities
//! - Score same-language candidates against a subject post
//! - Produce a ranked, size-limited selection with deterministic backfill
//! - Serve the simpler category/tag listing entry points
//!
//! # Design Decisions
//! - Pure functions over an already-loaded pool: no I/O, no hidden state,
//!   identical inputs always give identical output
//! - Term identity comparison uses CMS-supplied stable ids; no normalization
//! - Ties beyond score and date break on id so ordering is fully deterministic

pub mod ranker;
pub mod scoring;

pub use ranker::{posts_in_category, posts_with_tag, related_posts, DEFAULT_RELATED_LIMIT};
pub use scoring::relevance_score;
