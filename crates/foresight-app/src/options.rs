//! Command-line options.

use std::path::PathBuf;

use crate::error::AppError;

pub const DEFAULT_TICKS: u64 = 500;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// JSON planner config. Defaults are used when absent.
    pub config: Option<PathBuf>,
    pub ticks: u64,
    pub seed: u64,
    /// Emit a snapshot every tick instead of only on refresh ticks.
    pub every_tick: bool,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: None,
            ticks: DEFAULT_TICKS,
            seed: DEFAULT_SEED,
            every_tick: false,
            help: false,
        }
    }
}

impl Options {
    /// Parse arguments, excluding the program name.
    pub fn parse(args: &[String]) -> Result<Self, AppError> {
        let mut options = Options::default();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" => options.config = Some(PathBuf::from(value(args, i)?)),
                "--ticks" => options.ticks = number(args, i)?,
                "--seed" => options.seed = number(args, i)?,
                "--every-tick" => {
                    options.every_tick = true;
                    i += 1;
                    continue;
                }
                "help" | "--help" | "-h" => {
                    options.help = true;
                    i += 1;
                    continue;
                }
                other => return Err(AppError::Usage(format!("Unknown argument: {other}"))),
            }
            i += 2;
        }
        Ok(options)
    }
}

fn value(args: &[String], i: usize) -> Result<&str, AppError> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| AppError::Usage(format!("{} needs a value", args[i])))
}

fn number(args: &[String], i: usize) -> Result<u64, AppError> {
    let raw = value(args, i)?;
    raw.parse()
        .map_err(|_| AppError::Usage(format!("{} expects a whole number, got {raw}", args[i])))
}

pub fn usage() -> &'static str {
    "foresight: spacetime path planning demo\n\
     \n\
     Runs the host simulation and writes one JSON snapshot per line to stdout.\n\
     \n\
       --config <path>  Planner config (JSON). Missing fields use defaults.\n\
       --ticks <N>      Ticks to simulate (default: 500)\n\
       --seed <N>       RNG seed for hazard emission (default: 42)\n\
       --every-tick     Write every tick, not only grid/path refresh ticks\n\
     \n\
     Log verbosity follows RUST_LOG (default: info).\n"
}
