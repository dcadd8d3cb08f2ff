// Lint example - Run every suite check and print one report
//
// Shows: LintOptions, the three linters, merged reports
//
// Run with: cargo run -p e2e-locators --example lint_suite -- path/to/suite

use e2e_locators::{LintOptions, ViolationReport, lint};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("e2e_locators=info")
        .init();

    let root = std::env::args().nth(1).unwrap_or_else(|| "suite".to_string());
    let options = LintOptions::new().root(&root);

    let mut report = ViolationReport::default();
    report.merge(lint::validate_locators(&options)?);
    report.merge(lint::validate_naming(&options)?);
    report.merge(lint::validate_console(&options)?);

    print!("{}", report.render_text());
    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}
