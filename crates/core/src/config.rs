//! Configuration for kubermon.
//!
//! Settings come from an optional YAML file and can be overridden on the
//! command line. The file is only ever read; kubermon never writes it.

use serde::Deserialize;

/// Default path for the configuration file
const DEFAULT_CONFIG_PATH: &str = "~/.kubermon/config.yml";

/// Default shell to use for command execution
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Default cluster client binary
pub const DEFAULT_KUBECTL: &str = "kubectl";

/// Runtime settings.
///
/// Every key is optional in the file; missing keys fall back to [`Config::default`].
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Binary invoked for every cluster operation.
    pub kubectl: String,
    /// Shell used to run rendered command lines with `-c`.
    pub shell: String,
    /// Clear the terminal before each menu render.
    pub clear_screen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kubectl: DEFAULT_KUBECTL.to_string(),
            shell: DEFAULT_SHELL.to_string(),
            clear_screen: true,
        }
    }
}

impl Config {
    /// Applies command-line overrides on top of the loaded settings.
    #[must_use]
    pub fn with_overrides(
        mut self,
        kubectl: Option<&str>,
        shell: Option<&str>,
        no_clear: bool,
    ) -> Self {
        if let Some(kubectl) = kubectl {
            self.kubectl = kubectl.to_string();
        }

        if let Some(shell) = shell {
            self.shell = shell.to_string();
        }

        if no_clear {
            self.clear_screen = false;
        }

        self.kubectl = shellexpand::tilde(&self.kubectl).to_string();
        self.shell = shellexpand::tilde(&self.shell).to_string();
        self
    }
}

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use kubermon_core::config::get_config_path;
///
/// let default_path = get_config_path(&None);
/// let custom_path = get_config_path(&Some("/path/to/config.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/config.yml");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}
