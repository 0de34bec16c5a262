use clap::Parser;

use log::{error, info};

use sloth2tf::{process_dataset, Args};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !args.json.exists() {
        error!("The specified json file does not exist: {}", args.json.display());
        std::process::exit(1);
    }

    info!("Starting the conversion process...");

    match process_dataset(&args) {
        Ok(_) => info!("Conversion process completed successfully."),
        Err(e) => {
            error!("Failed to process dataset: {}", e);
            std::process::exit(1);
        }
    }
}
