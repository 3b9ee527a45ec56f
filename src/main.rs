use anyhow::Result;
use clap::Parser;
use skill_triage::config::{self, TriageConfig};
use skill_triage::error::TriageError;
use skill_triage::logging::{init_and_store_logging, LogLevel};
use skill_triage::report::{format_report, TriageReport};
use skill_triage::triage::SkillTriage;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for a completed triage, whatever the action.
const EXIT_SUCCESS: u8 = 0;

/// Exit code for failures other than a missing catalog.
const EXIT_FAILURE: u8 = 1;

/// Exit code when the skill index is missing or unusable.
const EXIT_CATALOG_UNAVAILABLE: u8 = 2;

#[derive(Parser)]
#[command(name = "skill-triage")]
#[command(about = "Analyze input and recommend a skill action", long_about = None)]
#[command(version)]
#[command(after_help = "Examples:
  skill-triage \"create a skill for database migrations\"
  skill-triage \"help me debug this error\"
  skill-triage \"do I have a skill for testing?\" --json
  skill-triage \"TypeError: Cannot read property 'map' of undefined\"")]
struct Cli {
    /// The user input to analyze
    query: String,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to the skill index
    #[arg(long, env = "SKILL_TRIAGE_INDEX")]
    index: Option<PathBuf>,

    /// Maximum number of ranked matches
    #[arg(long)]
    limit: Option<usize>,

    /// Configuration file (default: ./skill-triage.toml, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = match load_config(cli) {
        Ok(config) => config,
        Err(error) => return report_failure(cli, &error),
    };

    if let Err(e) = init_and_store_logging(&config.logging) {
        eprintln!("Warning: {e}");
    }

    let runner = SkillTriage::new(config);
    let index = match runner.load_index() {
        Ok(index) => index,
        Err(error) => return report_failure(cli, &error),
    };

    let outcome = runner.run_with_index(&cli.query, &index);

    if cli.json {
        let report = TriageReport::success(outcome, index.warnings().to_vec());
        println!("{}", report.to_json()?);
    } else {
        println!("{}", format_report(&outcome));
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

/// Merges the config file with command-line overrides.
fn load_config(cli: &Cli) -> Result<TriageConfig, TriageError> {
    let mut config = match &cli.config {
        Some(path) => config::from_path(path)?,
        None => config::load()?,
    };

    if let Some(ref index) = cli.index {
        config.index_path = Some(index.clone());
    }
    if let Some(limit) = cli.limit {
        config.match_limit = Some(limit);
    }
    if cli.verbose {
        config.logging.level = LogLevel::Debug;
    }

    Ok(config)
}

fn report_failure(cli: &Cli, error: &TriageError) -> Result<ExitCode> {
    tracing::error!(error = %error, "Triage did not run");

    let report = TriageReport::failure(error);
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        eprintln!("Error: {}", report.message);
        for detail in &report.errors {
            eprintln!("  {detail}");
        }
    }

    Ok(ExitCode::from(failure_exit_code(error)))
}

/// Exit code for a triage that could not run.
fn failure_exit_code(error: &TriageError) -> u8 {
    if error.is_catalog_unavailable() {
        EXIT_CATALOG_UNAVAILABLE
    } else {
        EXIT_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_distinguish_missing_catalog() {
        assert_eq!(EXIT_SUCCESS, 0);
        assert_eq!(
            failure_exit_code(&TriageError::catalog_not_found("/tmp/skill_index.json")),
            2
        );
        assert_eq!(
            failure_exit_code(&TriageError::catalog_malformed(None, "bad json")),
            2
        );
        assert_eq!(
            failure_exit_code(&TriageError::configuration("match_limit", "not a number")),
            1
        );
    }

    #[test]
    fn missing_config_file_is_a_general_failure() {
        let cli = Cli::parse_from([
            "skill-triage",
            "--index",
            "/tmp/custom.json",
            "--limit",
            "3",
            "--config",
            "/nonexistent/skill-triage.toml",
            "anything",
        ]);
        assert_eq!(cli.query, "anything");

        let err = load_config(&cli).unwrap_err();
        assert_eq!(failure_exit_code(&err), EXIT_FAILURE);
    }
}
