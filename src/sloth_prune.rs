use clap::Parser;

use log::error;

use sloth2tf::{keep_nth_files, PruneArgs};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = PruneArgs::parse();

    if let Err(e) = keep_nth_files(&args.dir, args.keep_every, args.dry_run) {
        error!("Failed to prune {}: {}", args.dir.display(), e);
        std::process::exit(1);
    }
}
