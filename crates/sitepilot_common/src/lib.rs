//! SitePilot common library - intent catalog, resolution and ranking.
//!
//! Everything here is pure and synchronous; the daemon wires it to HTTP,
//! the content store and the completion API.

pub mod analysis;
pub mod api;
pub mod catalog;
pub mod content;
pub mod error;
pub mod keywords;
pub mod language;
pub mod ranking;
pub mod resolver;
pub mod similarity;
pub mod suggest;

pub use analysis::{analyze_prompt, QuestionType};
pub use catalog::{Catalog, Intent, IntentDef};
pub use content::{clean_content, dedup_by_id, ContentRecord};
pub use error::CatalogError;
pub use keywords::extract_keywords;
pub use language::Language;
pub use ranking::{rank, rank_with_prefix};
pub use resolver::{resolve, IntentResolver, MatchMode, Resolution, SynonymMatcher};
pub use similarity::similarity;
pub use suggest::{suggest, suggest_with_rng};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
