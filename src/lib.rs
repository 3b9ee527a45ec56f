//! # skill-triage: routing free-form input over a skill catalog
//!
//! Given any piece of user input (a request, a question, an error message,
//! a code snippet, a URL) and a catalog of skills, decide what to do next:
//! use an existing skill, improve one, create a new one, compose several,
//! or ask for clarification.
//!
//! ## Architecture
//!
//! - **Skills**: the catalog, loaded once from the discovery step's JSON index
//! - **Triage**: classifier, domain detector, scorer, ranker and decision tables
//! - **Report**: the JSON envelope and the human-readable report
//! - **Config / Logging**: TOML configuration and tracing setup for the CLI
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use skill_triage::prelude::*;
//!
//! let index = SkillIndex::from_path(Path::new("skill_index.json"))?;
//! let outcome = triage("do I have a skill for testing?", &index);
//!
//! println!("{}", format_report(&outcome));
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod skills;
pub mod triage;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::TriageConfig;
    pub use crate::error::{TriageError, TriageErrorKind};
    pub use crate::report::{format_report, TriageReport};
    pub use crate::skills::{SkillIndex, SkillRecord};
    pub use crate::triage::{
        classify, decide, detect_domains, rank, score, triage, triage_with_limit, Action,
        ActionPayload, InputCategory, MatchResult, Signals, SkillTriage, TriageOutcome,
    };
}
