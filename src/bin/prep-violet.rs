use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use gltf_prep::Config;
use gltf_prep::convert;

/// Convert the downloaded Violet model archive into OBJ meshes and TGA textures.
#[derive(Parser)]
#[command(name = "prep-violet")]
struct Args {
    /// Model archive to read.
    #[arg(long)]
    source_path: Option<PathBuf>,
    /// Directory to write meshes and textures to.  Created if missing.
    #[arg(long)]
    destination_directory: Option<PathBuf>,
    /// Textures larger than this on either side are resized to a square of this size.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_texture_size: Option<u32>,
}

impl Args {
    fn into_config(self) -> Config {
        let mut c = Config::default();
        if let Some(p) = self.source_path {
            c.source_path = p;
        }
        if let Some(d) = self.destination_directory {
            c.destination_directory = d;
        }
        if let Some(s) = self.max_texture_size {
            c.max_texture_size = s;
        }
        c
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Args::parse().into_config();

    match convert::run(&config) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(report) => {
            log::error!("{} of {} outputs failed",
                report.failures.len(),
                report.failures.len() + report.meshes_written.len() + report.textures_written.len());
            ExitCode::FAILURE
        },
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        },
    }
}
