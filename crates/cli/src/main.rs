use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use kubermon_cli::cli_args::Args;
use kubermon_cli::handlers::Session;
use kubermon_cli::menu;
use kubermon_cli::selection::TerminalPrompter;
use kubermon_core::actions::Action;
use kubermon_core::config::{self, Config};
use kubermon_core::error::Result;
use kubermon_core::execution::ShellRunner;
use kubermon_core::file_handling;
use kubermon_core::kubectl::Kubectl;

/// Load the config file and apply command-line overrides
fn initialize_config(args: &Args) -> Result<Config> {
    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{config_path}`");

    let config = file_handling::get_config(&config_path)?.with_overrides(
        args.kubectl.as_deref(),
        args.shell.as_deref(),
        args.no_clear,
    );
    info!("Using `{}` through `{}`", config.kubectl, config.shell);

    Ok(config)
}

fn execute() -> Result<()> {
    let args = Args::parse();
    let config = initialize_config(&args)?;

    // Resolve a direct action before touching the terminal
    let action = args
        .action
        .as_deref()
        .map(str::parse::<Action>)
        .transpose()?;

    let runner = ShellRunner::new(config.shell.clone());
    let kubectl = Kubectl::new(&runner, config.kubectl.clone());
    let mut prompter = TerminalPrompter;
    let mut stdout = stdout();
    let mut session = Session::new(kubectl, &mut prompter, &mut stdout);

    match action {
        Some(action) => session.dispatch(action).map(|_| ()),
        None => menu::run_menu(&mut session, config.clear_screen),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
