//! Command-line argument parsing.
//!
//! Every flag is optional; without arguments kubermon starts the interactive
//! menu.

use clap::Parser;

/// Command-line arguments for the kubermon binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use kubermon_cli::cli_args::Args;
///
/// let args = Args::parse_from(["kubermon", "--kubectl", "oc"]);
/// assert_eq!(args.kubectl.as_deref(), Some("oc"));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(version, about, term_width = 0)]
pub struct Args {
    /// Path to the configuration file YAML.
    ///
    /// If not provided, defaults to `~/.kubermon/config.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// The cluster client binary to invoke, overriding the config file.
    #[arg(long, short = 'k')]
    pub kubectl: Option<String>,

    /// The shell used to run command lines, overriding the config file.
    #[arg(long, short = 's')]
    pub shell: Option<String>,

    /// Do not clear the screen before showing the menu.
    #[arg(long, action)]
    pub no_clear: bool,

    /// Run a single action by ID (e.g. `get-nodes`) instead of the menu.
    #[arg(num_args(1))]
    pub action: Option<String>,
}
