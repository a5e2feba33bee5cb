//! `jointspace` – inspect and exercise transmission configuration files.
//!
//! ```text
//! jointspace check
//! jointspace convert wrist --direction actuator-to-joint --quantity effort 3.0 1.0
//! ```
//!
//! The file is taken from `--config`, then `JOINTSPACE_CONFIG`, then
//! `./transmissions.toml`.

mod commands;
mod config;
mod telemetry;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use jointspace_transmission::Direction;
use jointspace_types::Quantity;

#[derive(Debug, Parser)]
#[command(name = "jointspace", version, about = "Actuator/joint space transmission tool")]
struct Cli {
    /// Transmissions file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse the file and build every transmission.
    Check,
    /// Convert values through one transmission.
    Convert {
        /// Transmission name.
        name: String,

        #[arg(long, value_enum)]
        direction: DirectionArg,

        #[arg(long, value_enum)]
        quantity: QuantityArg,

        /// One value per input slot.
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    ActuatorToJoint,
    JointToActuator,
}

impl From<DirectionArg> for Direction {
    fn from(d: DirectionArg) -> Self {
        match d {
            DirectionArg::ActuatorToJoint => Direction::ActuatorToJoint,
            DirectionArg::JointToActuator => Direction::JointToActuator,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum QuantityArg {
    Position,
    Velocity,
    Effort,
}

impl From<QuantityArg> for Quantity {
    fn from(q: QuantityArg) -> Self {
        match q {
            QuantityArg::Position => Quantity::Position,
            QuantityArg::Velocity => Quantity::Velocity,
            QuantityArg::Effort => Quantity::Effort,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);

    let path = config::config_path(cli.config);
    let result = match cli.command {
        Command::Check => commands::check(&path),
        Command::Convert {
            name,
            direction,
            quantity,
            values,
        } => commands::run_convert(&path, &name, direction.into(), quantity.into(), &values)
            .map(|out| {
                out.iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            }),
    };

    match result {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}
