//! The `kubectl` command catalogue.
//!
//! Every cluster operation is a command template rendered with the chosen
//! targets and run through a [`CommandRunner`]. Output is treated as opaque
//! text: candidate lists are split on line breaks (or whitespace for the
//! container projection) and nothing else is parsed.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use indexmap::IndexSet;
use log::debug;

use crate::error::Result;
use crate::execution::CommandRunner;
use crate::interpolation::render_command;

/// Command templates, keyed by what they do.
pub mod templates {
    pub const GET_NODES: &str = "{kubectl} get nodes";
    pub const GET_CONTEXTS: &str = "{kubectl} config get-contexts";
    pub const USE_CONTEXT: &str = "{kubectl} config use-context {context}";
    pub const GET_NAMESPACES: &str = "{kubectl} get namespaces";
    pub const NOT_RUNNING_PODS: &str =
        "{kubectl} get pods -n {namespace} --field-selector=status.phase!=Running";
    pub const DELETE_NOT_RUNNING_PODS: &str = "{kubectl} delete pods --namespace {namespace} --field-selector=status.phase!=Running --grace-period=0 --force";
    pub const GET_DEPLOYMENTS: &str = "{kubectl} get deployments -n {namespace}";
    pub const ROLLOUT_STATUS: &str =
        "{kubectl} rollout status deployment/{deployment} -n {namespace}";
    pub const ROLLOUT_RESTART: &str =
        "{kubectl} rollout restart deployment/{deployment} -n {namespace}";
    pub const CORDON_NODE: &str = "{kubectl} cordon {node}";
    pub const PODS_ON_NODE: &str =
        "{kubectl} get pods --field-selector spec.nodeName={node} -n {namespace}";
    pub const PODS_ON_ALL_NODES: &str = "{kubectl} get pod -o=custom-columns=NAME:.metadata.name,STATUS:.status.phase,NODE:.spec.nodeName --all-namespaces";
    pub const POD_IMAGES: &str = "{kubectl} get pods -n {namespace} -o jsonpath={jsonpath}";
    pub const PREVIOUS_POD_LOGS: &str = "{kubectl} logs {pod} -n {namespace} -p";
    pub const EVENTS: &str =
        "{kubectl} get events -n {namespace} --sort-by='.lastTimestamp' -o wide";
    pub const ALL_EVENTS: &str = "{kubectl} get events -A --sort-by='.lastTimestamp' -o wide";
    pub const PODS_WITH_LABELS: &str = "{kubectl} get pods --show-labels -n {namespace}";
    pub const POD_CONTAINERS: &str = "{kubectl} get pod -o='custom-columns=NAME:.metadata.name,INIT-CONTAINERS:.spec.initContainers[].name,CONTAINERS:.spec.containers[].name' -n {namespace}";
    pub const CONTAINER_LOGS: &str = "{kubectl} logs {pod} -n {namespace} -c {container}";
    pub const DEPLOYMENT_LOGS: &str = "{kubectl} logs deployment/{deployment} -n {namespace}";
    pub const SERVICE_LOGS: &str = "{kubectl} logs service/{service} -n {namespace}";

    pub const CONTEXT_NAMES: &str = "{kubectl} config get-contexts -o name";
    pub const NAMESPACE_NAMES: &str =
        "{kubectl} get ns --no-headers -o custom-columns=:metadata.name";
    pub const NODE_NAMES: &str =
        "{kubectl} get nodes --no-headers -o custom-columns=:metadata.name";
    pub const DEPLOYMENT_NAMES: &str =
        "{kubectl} get deployments -n {namespace} --no-headers -o custom-columns=:metadata.name";
    pub const POD_NAMES: &str =
        "{kubectl} get pods -n {namespace} --no-headers -o custom-columns=:metadata.name";
    pub const NOT_RUNNING_POD_NAMES: &str = "{kubectl} get pods -n {namespace} --field-selector=status.phase!=Running --no-headers -o custom-columns=:metadata.name";
    pub const SERVICE_NAMES: &str =
        "{kubectl} get services -n {namespace} --no-headers -o custom-columns=:metadata.name";
    pub const CONTAINER_NAMES: &str = "{kubectl} get pod {pod} -n {namespace} -o jsonpath={jsonpath}";

    /// One `name<TAB>image` line per container, the pod name only on the first.
    pub const POD_IMAGES_JSONPATH: &str = r#"'{range .items[*]}{.metadata.name}{"\t"}{range .spec.containers[*]}{.image}{"\n"}{end}{end}'"#;
    pub const CONTAINER_NAMES_JSONPATH: &str = "'{.spec.containers[*].name}'";
}

/// Kinds of resource the user can be asked to pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Context,
    Namespace,
    Node,
    Deployment,
    Pod,
    Container,
    Service,
}

impl Resource {
    #[must_use]
    pub fn singular(self) -> &'static str {
        match self {
            Resource::Context => "context",
            Resource::Namespace => "namespace",
            Resource::Node => "node",
            Resource::Deployment => "deployment",
            Resource::Pod => "pod",
            Resource::Container => "container",
            Resource::Service => "service",
        }
    }

    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Resource::Context => "contexts",
            Resource::Namespace => "namespaces",
            Resource::Node => "nodes",
            Resource::Deployment => "deployments",
            Resource::Pod => "pods",
            Resource::Container => "containers",
            Resource::Service => "services",
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.singular())
    }
}

/// Splits name-only output into a candidate list.
///
/// Lines are trimmed, blank lines dropped and duplicates removed while
/// keeping the order the client printed them in.
#[must_use]
pub fn parse_names(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Splits a space-separated projection (`{.spec.containers[*].name}`).
#[must_use]
pub fn parse_words(output: &str) -> Vec<String> {
    output
        .split_whitespace()
        .map(ToString::to_string)
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Renders and runs cluster commands against the configured client binary.
pub struct Kubectl<'a> {
    runner: &'a dyn CommandRunner,
    binary: String,
}

impl<'a> Kubectl<'a> {
    pub fn new(runner: &'a dyn CommandRunner, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }

    /// Renders `template` with `{kubectl}` and the given values.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is invalid or a value is missing.
    pub fn render(&self, template: &str, values: &[(&str, &str)]) -> Result<String> {
        let mut context: HashMap<String, String> = values
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        context.insert("kubectl".to_string(), self.binary.clone());

        render_command(template, &context)
    }

    /// Renders and runs a command, returning its raw standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the command exits non-zero.
    pub fn run(&self, template: &str, values: &[(&str, &str)]) -> Result<String> {
        let command_line = self.render(template, values)?;
        debug!("Running `{command_line}`");
        self.runner.run(&command_line)
    }

    /// Lists candidate names of `resource`, scoped by the given values.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing command fails.
    pub fn list(&self, resource: Resource, values: &[(&str, &str)]) -> Result<Vec<String>> {
        let (template, jsonpath) = match resource {
            Resource::Context => (templates::CONTEXT_NAMES, None),
            Resource::Namespace => (templates::NAMESPACE_NAMES, None),
            Resource::Node => (templates::NODE_NAMES, None),
            Resource::Deployment => (templates::DEPLOYMENT_NAMES, None),
            Resource::Pod => (templates::POD_NAMES, None),
            Resource::Service => (templates::SERVICE_NAMES, None),
            Resource::Container => (
                templates::CONTAINER_NAMES,
                Some(templates::CONTAINER_NAMES_JSONPATH),
            ),
        };

        match jsonpath {
            Some(jsonpath) => {
                let mut values = values.to_vec();
                values.push(("jsonpath", jsonpath));
                Ok(parse_words(&self.run(template, &values)?))
            }
            None => Ok(parse_names(&self.run(template, values)?)),
        }
    }

    /// Lists pods of a namespace that are not in the Running phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing command fails.
    pub fn list_not_running_pods(&self, namespace: &str) -> Result<Vec<String>> {
        let output = self.run(templates::NOT_RUNNING_POD_NAMES, &[("namespace", namespace)])?;
        Ok(parse_names(&output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::RefCell;

    struct RecordingRunner {
        output: String,
        commands: RefCell<Vec<String>>,
    }

    impl RecordingRunner {
        fn new(output: &str) -> Self {
            Self {
                output: output.to_string(),
                commands: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, command_line: &str) -> Result<String> {
            self.commands.borrow_mut().push(command_line.to_string());
            Ok(self.output.clone())
        }
    }

    struct FailingRunner;

    impl CommandRunner for FailingRunner {
        fn run(&self, command_line: &str) -> Result<String> {
            Err(Error::sub_process_exit(
                command_line.to_string(),
                Some(1),
                "Unable to connect to the server".to_string(),
            ))
        }
    }

    #[test]
    fn test_parse_names() {
        let names = parse_names("default\nkube-system\n\n  prod  \ndefault\n");
        assert_eq!(names, vec!["default", "kube-system", "prod"]);
    }

    #[test]
    fn test_parse_names_empty() {
        assert!(parse_names("").is_empty());
        assert!(parse_names("\n\n").is_empty());
    }

    #[test]
    fn test_parse_words() {
        assert_eq!(parse_words("web sidecar\n"), vec!["web", "sidecar"]);
        assert!(parse_words("").is_empty());
    }

    #[test]
    fn test_render_uses_binary() {
        let runner = RecordingRunner::new("");
        let kubectl = Kubectl::new(&runner, "/opt/bin/kubectl");

        let rendered = kubectl
            .render(templates::CORDON_NODE, &[("node", "worker-1")])
            .unwrap();
        assert_eq!(rendered, "/opt/bin/kubectl cordon worker-1");
    }

    #[test]
    fn test_list_namespaces() {
        let runner = RecordingRunner::new("default\nstaging\n");
        let kubectl = Kubectl::new(&runner, "kubectl");

        let names = kubectl.list(Resource::Namespace, &[]).unwrap();
        assert_eq!(names, vec!["default", "staging"]);
        assert_eq!(
            runner.commands.borrow().as_slice(),
            ["kubectl get ns --no-headers -o custom-columns=:metadata.name"]
        );
    }

    #[test]
    fn test_list_containers_uses_jsonpath() {
        let runner = RecordingRunner::new("web sidecar");
        let kubectl = Kubectl::new(&runner, "kubectl");

        let names = kubectl
            .list(
                Resource::Container,
                &[("namespace", "prod"), ("pod", "web-7f9")],
            )
            .unwrap();

        assert_eq!(names, vec!["web", "sidecar"]);
        assert_eq!(
            runner.commands.borrow().as_slice(),
            ["kubectl get pod web-7f9 -n prod -o jsonpath='{.spec.containers[*].name}'"]
        );
    }

    #[test]
    fn test_list_not_running_pods() {
        let runner = RecordingRunner::new("job-x\n");
        let kubectl = Kubectl::new(&runner, "kubectl");

        assert_eq!(kubectl.list_not_running_pods("batch").unwrap(), vec!["job-x"]);
        assert_eq!(
            runner.commands.borrow()[0],
            "kubectl get pods -n batch --field-selector=status.phase!=Running --no-headers -o custom-columns=:metadata.name"
        );
    }

    #[test]
    fn test_list_missing_scope_is_render_error() {
        let runner = RecordingRunner::new("");
        let kubectl = Kubectl::new(&runner, "kubectl");

        let result = kubectl.list(Resource::Deployment, &[]);
        assert!(matches!(result, Err(Error::Render(_))));
        assert!(runner.commands.borrow().is_empty());
    }

    #[test]
    fn test_list_propagates_failure() {
        let kubectl = Kubectl::new(&FailingRunner, "kubectl");
        let result = kubectl.list(Resource::Node, &[]);
        assert!(matches!(result, Err(Error::SubProcessExit { .. })));
    }

    #[test]
    fn test_pod_images_template() {
        let runner = RecordingRunner::new("");
        let kubectl = Kubectl::new(&runner, "kubectl");

        let rendered = kubectl
            .render(
                templates::POD_IMAGES,
                &[
                    ("namespace", "prod"),
                    ("jsonpath", templates::POD_IMAGES_JSONPATH),
                ],
            )
            .unwrap();

        assert_eq!(
            rendered,
            r#"kubectl get pods -n prod -o jsonpath='{range .items[*]}{.metadata.name}{"\t"}{range .spec.containers[*]}{.image}{"\n"}{end}{end}'"#
        );
    }

    #[test]
    fn test_resource_nouns() {
        assert_eq!(Resource::Namespace.singular(), "namespace");
        assert_eq!(Resource::Namespace.plural(), "namespaces");
        assert_eq!(Resource::Pod.to_string(), "pod");
    }
}
