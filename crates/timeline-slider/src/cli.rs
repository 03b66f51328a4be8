use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::slider::Viewport;

#[derive(Parser)]
#[command(name = "tslider")]
#[command(author, version, about)]
#[command(long_about = "A grouped, tabbed timeline slider.\n\n\
    Slides are grouped into pages by viewport width, each page gets a tab strip\n\
    with a progress line, and previous/next walk across tabs and pages.\n\n\
    Examples:\n  \
    tslider slides.md                    Open the live preview\n  \
    tslider inspect slides.md --width 400  Show grouping at a mobile width\n  \
    tslider html slides.yaml -o out.html   Write the slider markup")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Slide source to preview (markdown, YAML or JSON)
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Open in a fixed-size window instead of maximized
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Do not reload the preview when the source file changes
    #[arg(long, global = false)]
    pub no_watch: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Group a slide source and print the resulting slider state
    Inspect {
        /// Slide source (markdown, YAML or JSON)
        file: PathBuf,

        /// Viewport width in pixels, which picks the slides per group
        #[arg(long, default_value = "1024")]
        width: f32,

        /// Container width in pixels (defaults to the viewport width)
        #[arg(long)]
        container: Option<f32>,

        /// Actions to replay before printing, e.g. "next,next,tab:2,resize:400,resize:464/400"
        #[arg(long, value_delimiter = ',')]
        actions: Vec<String>,

        /// Breakpoint table overriding the configured one, e.g. "0:1,425:3"
        #[arg(long)]
        breakpoints: Option<String>,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the slider as an HTML fragment
    Html {
        /// Slide source (markdown, YAML or JSON)
        file: PathBuf,

        /// Viewport width in pixels, which picks the slides per group
        #[arg(long, default_value = "1024")]
        width: f32,

        /// Container width in pixels (defaults to the viewport width)
        #[arg(long)]
        container: Option<f32>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (defaults.theme, breakpoints, preview.resize_debounce_ms, preview.watch)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Inspect {
                file,
                width,
                container,
                actions,
                breakpoints,
                json,
            }) => crate::commands::inspect::run(
                &file,
                Viewport::new(width, container.unwrap_or(width)),
                &actions,
                breakpoints.as_deref(),
                json,
            ),
            Some(Commands::Html {
                file,
                width,
                container,
                output,
            }) => crate::commands::html::run(
                &file,
                Viewport::new(width, container.unwrap_or(width)),
                output.as_deref(),
            ),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::version::run();
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    let watch = self.no_watch.then_some(false);
                    crate::preview::run(file, self.windowed, watch)
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}
