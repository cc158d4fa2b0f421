use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use rand_gps_exif::config::{Config, Flags};
use rand_gps_exif::pipeline;

#[derive(Parser, Debug)]
#[command(
    name = "rand-gps-exif",
    version,
    about = "Randomize, delete or identify the GPS EXIF data of JPEG images"
)]
struct Cli {
    /// JPEG files or directories to process
    #[arg(value_name = "FILE|DIR", required = true)]
    paths: Vec<PathBuf>,

    /// Print per-file headers and hex dumps of the GPS entries found
    #[arg(short, long)]
    verbose: bool,

    /// Write the result to rand_<name> instead of overwriting (ignored with -d or -i)
    #[arg(short = 'n', long = "new-file")]
    new_file: bool,

    /// Delete the GPS entries instead of randomizing them
    #[arg(short, long, conflicts_with = "identify")]
    delete: bool,

    /// Only report whether GPS data is present; never write
    #[arg(short, long)]
    identify: bool,

    /// Recurse into directories
    #[arg(short = 'R', long)]
    recursive: bool,

    /// Print the per-file results as JSON after processing
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // usage errors exit with 1, not clap's default 2
            let _ = e.print();
            std::process::exit(1);
        }
    };

    // -v only adds report output; internal detail stays behind RUST_LOG=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let flags = Flags {
        verbose: cli.verbose,
        create_new: cli.new_file,
        delete: cli.delete,
        identify: cli.identify,
        recursive: cli.recursive,
    };
    let config = match Config::from_flags(&flags) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}\n");
            let _ = Cli::command().write_long_help(&mut std::io::stderr());
            std::process::exit(1);
        }
    };
    log::debug!("config: {config:?}");

    let mut rng = pipeline::wall_clock_rng();
    let reports = pipeline::run(&cli.paths, &config, &mut rng);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}
