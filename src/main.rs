use log::error;
use recipe_filter::{run, PipelineConfig};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = match PipelineConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Optional positional arguments: INPUT [OUTPUT]
    let args: Vec<String> = env::args().collect();
    if let Some(input) = args.get(1) {
        config.input = PathBuf::from(input);
    }
    if let Some(output) = args.get(2) {
        config.output = PathBuf::from(output);
    }

    match run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Recipe filtering failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
