use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Color, Styles};
use clap::{Parser, Subcommand};

/// Help colors, matching the message styling
fn help_styles() -> Styles {
    Styles::styled()
        .header(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .usage(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .literal(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .placeholder(anstyle::Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
}

#[derive(Parser)]
#[command(name = "uw")]
#[command(about = "Value-or-default helpers and a per-thread output gate", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
#[command(styles = help_styles())]
#[command(arg_required_else_help = true)]
#[command(after_long_help = "\
Exit status

  0  a value was produced
  1  an error occurred
  2  the lookup produced no value (for example an empty normalized path)")]
pub(crate) struct Cli {
    /// Config file path
    #[arg(
        long,
        global = true,
        value_name = "path",
        display_order = 100,
        help_heading = "Global Options"
    )]
    pub config: Option<PathBuf>,

    /// Show info logs (-v), or debug logs (-vv)
    #[arg(
        long,
        short = 'v',
        global = true,
        action = clap::ArgAction::Count,
        display_order = 101,
        help_heading = "Global Options"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Slash-path helpers
    Path {
        #[command(subcommand)]
        action: PathCommand,
    },

    /// String helpers
    String {
        #[command(subcommand)]
        action: StringCommand,
    },

    /// List the providers registered for a service interface
    ///
    /// Reads `META-INF/services/<INTERFACE>` from every resource root and prints one
    /// provider name per line, first occurrence first.
    Services {
        /// Interface name, e.g. `app.Codec`
        interface: String,

        /// Resource root to search (repeatable; replaces the configured roots)
        #[arg(long = "root", value_name = "dir")]
        roots: Vec<PathBuf>,
    },

    /// Print a text resource
    Resource {
        /// Path relative to a resource root
        path: String,

        /// Resource root to search (repeatable; replaces the configured roots)
        #[arg(long = "root", value_name = "dir")]
        roots: Vec<PathBuf>,

        /// Replace invalid UTF-8 instead of failing
        #[arg(long)]
        lossy: bool,
    },

    /// Write text through the output gate while it is disabled
    ///
    /// Nothing reaches the terminal; a summary of what was suppressed is reported on
    /// stderr afterwards.
    Quiet {
        /// Gate stderr instead of stdout
        #[arg(long)]
        stderr: bool,

        /// Text to write
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub(crate) enum PathCommand {
    /// Normalize separators and strip leading and trailing slashes
    Normalize { path: String },

    /// Print the last segment of a path
    Name { path: String },
}

#[derive(Subcommand)]
pub(crate) enum StringCommand {
    /// Remove DIFF characters from both ends (or, if negative, around the middle)
    Trim {
        text: String,

        #[arg(allow_hyphen_values = true)]
        diff: i32,
    },

    /// Map each character of TEXT from one alphabet to another
    Rebase { text: String, from: String, to: String },
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommand {
    /// Print the effective configuration
    Show,
}
