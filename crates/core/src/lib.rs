//! Kubermon Core Library
//!
//! This crate provides the core functionality for kubermon, an interactive
//! terminal menu that runs common `kubectl` inspection and remediation
//! commands.
//!
//! # Key Features
//!
//! - **Action Catalogue**: The fixed set of menu actions and their identifiers
//! - **Command Templating**: `kubectl` command lines rendered from templates
//! - **Command Execution**: Synchronous subprocess runner with captured output
//! - **Output Formatting**: Context highlighting and image table alignment
//! - **Configuration**: Optional read-only YAML settings
//!
//! # Examples
//!
//! Listing namespaces through the shell runner:
//!
//! ```no_run
//! use kubermon_core::execution::ShellRunner;
//! use kubermon_core::kubectl::{Kubectl, Resource};
//!
//! let runner = ShellRunner::new("/bin/bash");
//! let kubectl = Kubectl::new(&runner, "kubectl");
//! for namespace in kubectl.list(Resource::Namespace, &[])? {
//!     println!("{namespace}");
//! }
//! # Ok::<(), kubermon_core::error::Error>(())
//! ```

pub mod actions;
pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod interpolation;
pub mod kubectl;
pub mod output;
