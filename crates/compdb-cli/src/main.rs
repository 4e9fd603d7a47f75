use clap::{Parser, Subcommand};
use compdb_driver::{ConsoleNotifier, GenerateOptions, Generator, ProcessExecutor};
use miette::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "compdb")]
#[command(author, version, about = "Generate a clang compilation database from Bazel targets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the compilation database for the configured targets
    Generate {
        /// Path to the configuration file
        #[arg(short, long, default_value = "compdb.toml")]
        config: PathBuf,

        /// Path to the compdb support repository (overrides the config)
        #[arg(short, long)]
        repository: Option<PathBuf>,
    },

    /// Print the full generation command without running it
    PrintCommand {
        /// Path to the configuration file
        #[arg(short, long, default_value = "compdb.toml")]
        config: PathBuf,

        /// Path to the compdb support repository (overrides the config)
        #[arg(short, long)]
        repository: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { config, repository } => {
            let generator = Generator::new(ProcessExecutor, ConsoleNotifier);
            generator.run(&GenerateOptions {
                config_path: config,
                repository_root: repository,
            })?;
        }

        Commands::PrintCommand { config, repository } => {
            let generator = Generator::new(ProcessExecutor, ConsoleNotifier);
            let rendered = generator.render_command(&GenerateOptions {
                config_path: config,
                repository_root: repository,
            })?;
            println!("{rendered}");
        }
    }

    Ok(())
}
