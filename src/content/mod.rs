//! Content snapshot subsystem.
//!
//! # Data Flow
//! ```text
//! CMS export pipeline (out of scope)
//!     → JSON snapshot on disk
//!     → index.rs (load, validate, sort)
//!     → ContentIndex (immutable, shared via Arc)
//!     → ranker + API handlers
//! ```
//!
//! # Design Decisions
//! - Content is loaded once at startup; changes require a restart
//! - Ids and term slugs come pre-normalized from the CMS; no cleanup here
//! - Index is immutable after load, so it is shared without locks

pub mod index;
pub mod model;

pub use index::{ContentIndex, IndexError};
pub use model::{ContentItem, Language, TermRef};
