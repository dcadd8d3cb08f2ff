// xtask - Offline suite checks
//
// `cargo xtask <check>` runs one linter (or all of them) over the suite
// directory and prints the report. Exit status is 0 when no violations
// were found and 1 otherwise, including when a required file cannot be
// read or parsed.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use e2e_locators::{LintOptions, ViolationReport, lint};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "xtask")]
#[command(about = "Offline consistency checks for the end-to-end suite")]
struct Cli {
    #[command(subcommand)]
    command: Check,

    /// Suite root; relative paths below are resolved against it
    #[arg(long, global = true, env = "E2E_ROOT", default_value = "suite")]
    root: PathBuf,

    /// Locator registry source
    #[arg(long, global = true, env = "E2E_REGISTRY")]
    registry: Option<PathBuf>,

    /// Test-data source scanned for hardcoded selectors
    #[arg(long, global = true, env = "E2E_DATA")]
    data: Option<PathBuf>,

    /// Directory holding the test files
    #[arg(long, global = true, env = "E2E_TESTS_DIR")]
    tests_dir: Option<PathBuf>,

    /// Directory holding test-run output
    #[arg(long, global = true, env = "E2E_RESULTS_DIR")]
    results_dir: Option<PathBuf>,

    /// Report format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Check {
    /// Duplicate locators in the registry and hardcoded selectors in test data
    Locators,
    /// File, class, method and test title naming
    Naming,
    /// console.* calls in suite sources and test output
    Console,
    /// Every check, one combined report
    All,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

impl Cli {
    fn lint_options(&self) -> LintOptions {
        let mut options = LintOptions::new().root(&self.root);
        if let Some(path) = &self.registry {
            options = options.registry_path(path);
        }
        if let Some(path) = &self.data {
            options = options.data_path(path);
        }
        if let Some(dir) = &self.tests_dir {
            options = options.tests_dir(dir);
        }
        if let Some(dir) = &self.results_dir {
            options = options.results_dir(dir);
        }
        options
    }
}

fn run(check: Check, options: &LintOptions) -> Result<ViolationReport> {
    let report = match check {
        Check::Locators => lint::validate_locators(options)?,
        Check::Naming => lint::validate_naming(options)?,
        Check::Console => lint::validate_console(options)?,
        Check::All => {
            let mut report = ViolationReport::default();
            report.merge(lint::validate_locators(options)?);
            report.merge(lint::validate_naming(options)?);
            report.merge(lint::validate_console(options)?);
            report
        }
    };
    Ok(report)
}

fn render(report: &ViolationReport, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(report.render_text()),
        Format::Json => Ok(format!("{}\n", report.to_json()?)),
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = cli.lint_options();
    tracing::debug!("Running {:?} over {}", cli.command, options.root.display());

    let report = run(cli.command, &options)
        .with_context(|| format!("{:?} check failed", cli.command))?;
    print!("{}", render(&report, cli.format)?);

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("xtask=debug,e2e_locators=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Reports go to stdout; keep logs off it.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "xtask",
            "locators",
            "--root",
            "e2e",
            "--registry",
            "locators/all.ts",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.command, Check::Locators);
        assert_eq!(cli.format, Format::Json);

        let options = cli.lint_options();
        assert_eq!(options.registry_file(), Path::new("e2e/locators/all.ts"));
        assert_eq!(options.data_file(), Path::new("e2e/data/test-data.ts"));
    }

    #[test]
    fn test_unknown_check_is_rejected() {
        assert!(Cli::try_parse_from(["xtask", "spelling"]).is_err());
    }

    #[test]
    fn test_all_combines_reports() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "locators/index.ts",
            "export const A = {\n  X: { type: 'testid', value: 'x' },\n} as const;\n\
             export const B = {\n  Y: { type: 'testid', value: 'x' },\n} as const;\n",
        );
        write(
            dir.path(),
            "tests/login.spec.ts",
            "test('should log in', () => {\n  console.log('hi');\n});\n",
        );

        let options = LintOptions::new().root(dir.path());
        let report = run(Check::All, &options).unwrap();

        assert_eq!(report.checker, "locators+naming+console");
        assert_eq!(report.len(), 2);

        let json: serde_json::Value =
            serde_json::from_str(&render(&report, Format::Json).unwrap()).unwrap();
        assert_eq!(json["violations"][0]["kind"], "duplicate");
        assert_eq!(json["violations"][1]["kind"], "console_statement");
    }

    #[test]
    fn test_missing_registry_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let options = LintOptions::new().root(dir.path());
        assert!(run(Check::Locators, &options).is_err());
        assert!(run(Check::Naming, &options).unwrap().is_clean());
    }
}
