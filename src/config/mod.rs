//! Configuration management for skill-triage.
//!
//! # Configuration File Format
//!
//! Configuration is stored in TOML format. The search order is:
//! 1. `./skill-triage.toml` (project-local)
//! 2. `~/.config/skill-triage/config.toml` (XDG config)
//!
//! # Example Configuration
//!
//! ```toml
//! # Where the discovery step wrote the skill index
//! index_path = "/home/me/.cache/skillrecommender/skill_index.json"
//!
//! # How many ranked matches the decision sees
//! match_limit = 5
//!
//! [logging]
//! enabled = true
//! level = "debug"
//! log_dir = "/tmp/skill-triage-logs"
//! ```
//!
//! Every field is optional. Command-line flags and the
//! `SKILL_TRIAGE_INDEX` environment variable take precedence over the file.

mod file;
mod types;

pub use file::{from_path, from_str, load, search_paths, xdg_config_dir};

pub use types::{default_index_path, TriageConfig};
