//! Kubermon CLI Library
//!
//! This crate provides the interactive front end of kubermon: a menu of
//! common `kubectl` operations where every target (namespace, deployment,
//! pod, node, container, service, context) is picked from a list.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`selection`]: The list picker, the yes/no prompt and the [`selection::Prompter`] seam
//! - [`handlers`]: One handler per menu action
//! - [`menu`]: The loop that ties selection, dispatch and the continue prompt together
//!
//! # Examples
//!
//! ```bash
//! # Interactive menu
//! kubermon
//!
//! # Run a single action
//! kubermon get-contexts
//!
//! # Use a different client binary
//! kubermon --kubectl oc
//! ```

pub mod cli_args;
pub mod handlers;
pub mod menu;
pub mod selection;
