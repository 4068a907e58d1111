use bam_untangle::cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("bam_untangle=debug,info")
    } else {
        EnvFilter::new("bam_untangle=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Split(args) => {
            cli::split::run(args, cli.format)?;
        }
        cli::Commands::Remap(args) => {
            cli::remap::run(args, cli.format)?;
        }
    }

    Ok(())
}
