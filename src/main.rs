use clap::Parser;
use kml_track_map::config::Config;
use kml_track_map::pipeline::{self, Outcome};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let args = Config::parse();
    log::trace!("config: {:?}", args);
    match pipeline::run(&args) {
        Ok(Outcome::NoCoordinates) => {
            println!("❌ No coordinates found in {}", args.input.display());
            ExitCode::SUCCESS
        }
        Ok(Outcome::Saved(path)) => {
            println!("✅ Map saved to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
