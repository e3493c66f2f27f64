use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "trendcast")]
#[command(about = "Multi-source trend digest notifier with Telegram delivery")]
#[command(version)]
pub struct Cli {
    /// Defaults to `run` so a bare scheduled invocation needs no arguments
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch trends, build the digest and deliver it
    Run {
        /// Dry run - print the digest without delivering or remembering anything
        #[arg(long)]
        dry_run: bool,

        /// Skip delivery but still remember the fetched items as seen
        #[arg(long)]
        skip_notify: bool,
    },

    /// List the enabled trend sources and effective settings
    Sources,

    /// Show the remembered item ids
    Seen {
        /// Clear the remembered ids instead of showing them
        #[arg(long)]
        clear: bool,
    },
}
