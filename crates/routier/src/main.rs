// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Binary entry point for the routier routing proxy.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};
use routier_config::RoutierConfig;

mod classify;
mod serve;
mod shutdown;

/// Difficulty-aware routing proxy for chat-completion requests.
#[derive(Parser, Debug)]
#[command(name = "routier", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the proxy listener (the default when no subcommand is given).
    Serve,
    /// Classify a prompt offline and print the decision as JSON.
    Classify {
        /// Prompt text to classify.
        prompt: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config_or_exit();

    let outcome = match cli.command {
        Some(Command::Classify { prompt }) => classify::run_classify(&config, &prompt),
        Some(Command::Serve) | None => serve::run_serve(config).await,
    };

    if let Err(err) = outcome {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Configuration problems are fatal before any subcommand runs; render the
/// diagnostics and bail.
fn load_config_or_exit() -> RoutierConfig {
    match routier_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            routier_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_wired_as_the_global_allocator() {
        // Advancing the profiling epoch only works when jemalloc is live.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        assert!(stats::allocated::read().unwrap() > 0);
    }

    #[test]
    fn defaults_survive_load_and_validate() {
        let config = routier_config::load_and_validate().unwrap();
        assert_eq!(config.proxy.port, 8401);
        assert_eq!(config.models.simple, "gpt-4.1-nano");
    }
}
