//! rdelta - Streaming rsync-style binary delta tool

use clap::Parser;
use rdelta::chunker::Chunker;
use rdelta::cli::{Cli, Commands, ConfigArgs, DiffArgs, SignArgs};
use rdelta::config::Config;
use rdelta::delta::compute_delta;
use rdelta::format::{format_count, format_size};
use rdelta::signature::{build_signature, write_signature};
use std::fs::File;
use std::io::BufReader;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Diff(args) => handle_diff_command(args)?,
        Commands::Sign(args) => handle_sign_command(args)?,
        Commands::Config(args) => handle_config_command(args)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::new("rdelta=info"),
        1 => EnvFilter::new("rdelta=debug"),
        2 => EnvFilter::new("rdelta=trace"),
        _ => EnvFilter::new("trace"),
    };

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
}

fn handle_diff_command(args: DiffArgs) -> anyhow::Result<()> {
    let config = args.to_config();
    tracing::info!(
        source = %args.source.display(),
        target = %args.target.display(),
        window_size = config.window_size,
        "Computing delta"
    );

    let source = BufReader::new(File::open(&args.source)?);
    let sig = build_signature(Chunker::new(source, config.window_size))?;

    let target = BufReader::new(File::open(&args.target)?);
    let delta = compute_delta(&sig, Chunker::new(target, config.window_size))?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&delta)?);
    } else {
        for op in &delta.ops {
            println!("{}", op);
        }
    }

    tracing::info!(
        ops = delta.operation_count(),
        reused = %format_count(delta.reused_blocks() as u64, "block", "blocks"),
        literal = %format_size(delta.literal_bytes()),
        "Delta computed"
    );

    Ok(())
}

fn handle_sign_command(args: SignArgs) -> anyhow::Result<()> {
    let window_size = Config::validate_window_size(args.window as usize);
    tracing::info!(file = %args.file.display(), window_size, "Generating signature");

    let reader = BufReader::new(File::open(&args.file)?);
    let sig = build_signature(Chunker::new(reader, window_size))?;

    let output = args
        .output
        .unwrap_or_else(|| args.file.with_extension("rdsig"));
    write_signature(&sig, &output)?;

    tracing::info!(
        output = %output.display(),
        blocks = sig.block_count(),
        "Signature written"
    );

    Ok(())
}

fn handle_config_command(args: ConfigArgs) -> anyhow::Result<()> {
    if args.path {
        println!("{}", Config::default_config_path()?.display());
    } else if args.init {
        let config = Config::default();
        config.save()?;
        println!(
            "Created default configuration at {}",
            Config::default_config_path()?.display()
        );
    } else {
        let config = Config::load().unwrap_or_default();
        println!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}
