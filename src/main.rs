use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use svd2c::{generate, Catalog, OutputSink, Value};

/// Generate C register access macros from SVD files
#[derive(Parser, Debug)]
#[command(name = "svd2c", version, about)]
struct Opts {
    /// Input SVD file
    #[arg(value_name = "FILE")]
    svd_file: PathBuf,

    /// Name of the peripheral to render
    #[arg(value_name = "PERIPHERAL")]
    peripheral: String,

    /// Directory holding the generated <group>.c/<group>.h pair
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Choose which messages to log (overrides RUST_LOG)
    #[arg(short = 'l', long = "log", value_name = "LEVEL")]
    log_level: Option<log::LevelFilter>,
}

fn run() -> Result<()> {
    let opts = Opts::parse();
    setup_logging(opts.log_level);

    let xml = fs::read_to_string(&opts.svd_file)
        .with_context(|| format!("couldn't read the SVD file {}", opts.svd_file.display()))?;
    let tree = Value::parse(&xml)?;
    let catalog = Catalog::from_descriptor(&tree)?;

    // The listing always comes first so a misspelled peripheral name can be
    // corrected from the output.
    println!("Found peripherals:");
    println!("{{");
    for peripheral in &catalog.peripherals {
        println!("  {}", peripheral.name);
    }
    println!("}}");
    println!("count = {}\n", catalog.peripherals.len());

    let output = generate::render(&catalog, &opts.peripheral)?;
    OutputSink::new(&opts.output_dir).append(&output.group, &output.block)?;

    Ok(())
}

fn setup_logging(log_level: Option<log::LevelFilter>) {
    // * Log at info by default.
    // * Allow users the option of setting complex logging filters using
    //   env_logger's `RUST_LOG` environment variable.
    // * Override both of those if the logging level is set via the `--log`
    //   command line argument.
    let env = env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info");
    let mut builder = env_logger::Builder::from_env(env);
    builder.format_timestamp(None);

    let log_lvl_from_env = std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some();

    if log_lvl_from_env {
        log::set_max_level(log::LevelFilter::Trace);
    } else {
        let level = log_level.unwrap_or(log::LevelFilter::Info);
        log::set_max_level(level);
        builder.filter_level(level);
    }

    builder.init();
}

fn main() {
    if let Err(ref e) = run() {
        error!("{}", e);

        for cause in e.chain().skip(1) {
            error!("caused by: {}", cause);
        }

        process::exit(1);
    }
}

#[cfg(test)]
#[test]
pub fn cli_works() {
    use clap::CommandFactory;
    Opts::command().debug_assert();
}
