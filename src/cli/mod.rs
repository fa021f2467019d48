use clap::Parser;

pub mod dispatcher;
pub mod handlers;

/// rawsh: a small interactive shell with in-place line editing.
///
/// Without arguments an interactive session starts. Lines are split on
/// whitespace; `cd` and `exit` are built in and everything else is run as an
/// external program.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run a single command line and exit instead of starting a session.
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    pub command: Option<String>,

    /// Disable colors in the prompt and in error messages.
    #[arg(long)]
    pub no_color: bool,
}
