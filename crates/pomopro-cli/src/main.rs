use clap::{CommandFactory, Parser, Subcommand};
use pomopro_core::Config;

mod commands;
mod logging;
mod view;

#[derive(Parser)]
#[command(name = "pomopro", version, about = "Pomodoro Pro: work/break timer with a goal habit tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive timer session (commands are read from stdin)
    Run {
        /// Wall-clock milliseconds per timer second (overrides scheduler.tick_ms)
        #[arg(long)]
        tick_ms: Option<u64>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    logging::init(&config);

    let result = match cli.command {
        Commands::Run { tick_ms } => commands::run::run(config, tick_ms),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pomopro", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
