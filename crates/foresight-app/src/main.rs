//! foresight: run the host simulation and stream JSON snapshots.
//!
//! Usage:
//!   foresight --config plan.json --ticks 1000 --seed 7

use std::process;

use env_logger::Env;

use foresight_app::{options, run, AppError, Options};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match Options::parse(&args) {
        Ok(options) => options,
        Err(err) => {
            log::error!("{err}");
            eprint!("{}", options::usage());
            process::exit(2);
        }
    };
    if options.help {
        eprint!("{}", options::usage());
        return;
    }

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    if let Err(err) = run(&options, &mut out) {
        log::error!("{err}");
        let code = match err {
            AppError::Usage(_) => 2,
            _ => 1,
        };
        process::exit(code);
    }
}
