// Desktop/tooling crate — unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod flash;
mod test;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Embedded target for the RP2040 (Cortex-M0+).
pub const TARGET: &str = "thumbv6m-none-eabi";

/// probe-rs chip name.
pub const CHIP: &str = "RP2040";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Reflex Aim development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and flash the firmware to the Pico via probe-rs
    Flash {
        /// Build and flash release version
        #[arg(short, long)]
        release: bool,
    },
    /// Check the firmware and the no_std crates for the RP2040 target
    Check,
    /// Run host tests (unit and integration)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Flash { release } => flash::run(release),
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
    }
}
