use clap::Parser;

use log::error;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use sloth2tf::{read_sloth_json, remove_deleted, write_sloth_json, FilterArgs, SlothError};

fn run(args: &FilterArgs) -> Result<(), SlothError> {
    let images = read_sloth_json(&args.json)?;
    let images = remove_deleted(images, &args.base_dir, &args.ignore);

    let json_error = |source| SlothError::Json {
        path: args.output.clone().unwrap_or_else(|| "<stdout>".into()),
        source,
    };

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| SlothError::Io {
                path: path.clone(),
                source: e,
            })?;
            let mut writer = BufWriter::new(file);
            write_sloth_json(&images, &mut writer).map_err(json_error)?;
            writer.flush().map_err(|e| SlothError::Io {
                path: path.clone(),
                source: e,
            })
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_sloth_json(&images, &mut writer).map_err(json_error)?;
            writeln!(writer).map_err(|e| SlothError::Io {
                path: "<stdout>".into(),
                source: e,
            })
        }
    }
}

fn main() {
    // Logs go to stderr so the filtered JSON can be redirected from stdout
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = FilterArgs::parse();

    if let Err(e) = run(&args) {
        error!("Failed to filter {}: {}", args.json.display(), e);
        std::process::exit(1);
    }
}
