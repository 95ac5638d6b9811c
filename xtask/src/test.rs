use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// Crates with host tests. `xtask` itself has none.
const CRATES: &[&str] = &["-p", "platform", "-p", "game", "-p", "firmware"];

/// One `cargo test` flavour and whether its failure aborts the run.
struct Suite {
    label: &'static str,
    args: &'static [&'static str],
    fatal: bool,
}

const UNIT: Suite = Suite {
    label: "Unit tests",
    args: &["--lib"],
    fatal: true,
};

/// `--test '*'` builds every `tests/*.rs` target in each crate and nothing else.
const INTEGRATION: Suite = Suite {
    label: "Integration tests",
    args: &["--test", "*"],
    fatal: true,
};

const DOC: Suite = Suite {
    label: "Doc tests",
    args: &["--doc"],
    fatal: false,
};

pub fn run(unit_only: bool, integration_only: bool) -> Result<()> {
    println!();
    println!("{}", "🧪 Running tests...".cyan().bold());
    println!();

    let total_start = Instant::now();

    if !integration_only {
        run_suite(&UNIT)?;
    }
    if !unit_only {
        run_suite(&INTEGRATION)?;
    }
    if !unit_only && !integration_only {
        run_suite(&DOC)?;
    }

    println!(
        "{}",
        format!(
            "✓ All tests completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

fn run_suite(suite: &Suite) -> Result<()> {
    println!("{}", format!("  Running {}...", suite.label.to_lowercase()).cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .arg("test")
        .args(CRATES)
        .args(suite.args)
        .output()
        .with_context(|| format!("Failed to run cargo for {}", suite.label.to_lowercase()))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if output.status.success() {
        println!(
            "{}",
            format!(
                "  ✓ {} passed ({}) in {:.2}s",
                suite.label,
                extract_test_summary(&stdout),
                start.elapsed().as_secs_f64()
            )
            .green()
        );
    } else if suite.fatal {
        eprintln!("{}", format!("  ✗ {} failed", suite.label).red().bold());
        eprintln!();
        for line in stdout.lines() {
            eprintln!("  {}", line);
        }
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("{} failed", suite.label);
    } else {
        eprintln!("{}", format!("  ⚠ {} failed", suite.label).yellow().bold());
    }
    println!();

    Ok(())
}

/// Totals across every "test result:" line cargo prints, one per test binary.
fn extract_test_summary(output: &str) -> String {
    let mut passed = 0u32;
    let mut binaries = 0u32;
    for line in output.lines() {
        let Some(result) = line.split("test result:").nth(1) else {
            continue;
        };
        binaries = binaries.saturating_add(1);
        let count = result
            .split(';')
            .find_map(|part| part.trim().strip_suffix(" passed"))
            .and_then(|count| count.rsplit(' ').next())
            .and_then(|count| count.parse::<u32>().ok())
            .unwrap_or(0);
        passed = passed.saturating_add(count);
    }
    if binaries == 0 {
        return "summary not available".to_string();
    }
    format!("{passed} passed across {binaries} binaries")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_sums_every_binary() {
        let output = "\
running 3 tests
test result: ok. 3 passed; 0 failed; 0 ignored; 0 measured; 0 filtered out; finished in 0.01s
running 12 tests
test result: ok. 12 passed; 0 failed; 1 ignored; 0 measured; 0 filtered out; finished in 0.20s
";
        assert_eq!(extract_test_summary(output), "15 passed across 2 binaries");
    }

    #[test]
    fn summary_without_results() {
        assert_eq!(extract_test_summary("error: no test target"), "summary not available");
    }
}
