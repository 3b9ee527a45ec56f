//! Skill catalog.
//!
//! The triage engine never discovers skills itself: an external discovery
//! step writes a JSON index, and this module turns it into a read-only
//! [`SkillIndex`] of validated [`SkillRecord`]s.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use skill_triage::skills::SkillIndex;
//! use std::path::Path;
//!
//! let index = SkillIndex::from_path(Path::new("skill_index.json"))?;
//! for skill in index.iter() {
//!     println!("Skill: {} - {}", skill.name, skill.description);
//! }
//! ```

mod index;
mod types;

pub use index::SkillIndex;
pub use types::SkillRecord;
