mod cli;
mod commands;
mod config;
mod markup;
mod preview;
mod slider;
mod source;
mod theme;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_tracing(cli.verbose, cli.quiet, !cli.no_color);

    if let Err(e) = cli.run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

/// `-v`/`-q` pick the default level; `RUST_LOG` overrides it.
fn init_tracing(verbose: u8, quiet: bool, ansi: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(verbose, quiet).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(ansi)
                .with_target(false),
        )
        .init();
}

fn default_filter(verbose: u8, quiet: bool) -> String {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    format!("{}={level},warn", env!("CARGO_CRATE_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_targets_this_binary() {
        assert_eq!(default_filter(0, false), "tslider=warn,warn");
        assert_eq!(default_filter(2, false), "tslider=debug,warn");
        assert_eq!(default_filter(7, false), "tslider=trace,warn");
        assert_eq!(default_filter(3, true), "tslider=error,warn");
    }

    #[test]
    fn test_default_filter_parses() {
        for verbose in 0..4 {
            assert!(EnvFilter::try_new(default_filter(verbose, false)).is_ok());
        }
    }
}
