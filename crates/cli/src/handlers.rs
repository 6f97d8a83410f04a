//! Action handlers.
//!
//! Each handler narrows down its target with zero to three selection
//! prompts, runs exactly one templated `kubectl` command and prints the
//! result. Empty candidate lists and cancelled prompts end the handler
//! early without running anything further.

use std::fmt::Display;
use std::io::Write;

use crossterm::style::Stylize;
use log::info;

use crate::selection::Prompter;
use kubermon_core::actions::Action;
use kubermon_core::error::{Error, Result};
use kubermon_core::kubectl::{templates, Kubectl, Resource};
use kubermon_core::output::{
    format_image_table, is_empty_result, mark_active_context, IMAGE_NAME_COLUMN_WIDTH,
};

/// How a handler finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The terminal command ran.
    Completed,
    /// Stopped before the terminal command: nothing to choose from, or the
    /// user cancelled a prompt.
    Aborted,
}

/// What a cancelled prompt does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnCancel {
    ReturnToMenu,
    Exit,
}

/// Everything a handler needs: the client, the user and somewhere to print.
pub struct Session<'a> {
    kubectl: Kubectl<'a>,
    prompter: &'a mut dyn Prompter,
    out: &'a mut dyn Write,
}

impl<'a> Session<'a> {
    pub fn new(
        kubectl: Kubectl<'a>,
        prompter: &'a mut dyn Prompter,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            kubectl,
            prompter,
            out,
        }
    }

    pub fn prompter(&mut self) -> &mut dyn Prompter {
        &mut *self.prompter
    }

    /// Prints one line of user-facing text.
    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.out, "{text}").map_err(Error::Stdio)
    }

    /// Runs the handler for `action`.
    ///
    /// # Errors
    ///
    /// Any failing `kubectl` invocation is returned immediately, as is a
    /// cancellation in the handlers that exit instead of returning to the menu.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        info!("Running action `{}`", action.id());

        match action {
            Action::GetNodes => self.get_nodes(),
            Action::GetContexts => self.get_contexts(),
            Action::SelectContext => self.select_context(),
            Action::ListNamespaces => self.list_namespaces(),
            Action::NotRunningPods => self.not_running_pods(),
            Action::DeletePods => self.delete_pods(),
            Action::ListDeployments => self.list_deployments(),
            Action::CheckDeploymentStatus => self.check_deployment_status(),
            Action::CordonNodes => self.cordon_node(),
            Action::ListPods => self.list_pods_on_node(),
            Action::ListPodsOnNodes => self.list_pods_on_all_nodes(),
            Action::ImageVersion => self.list_pod_images(),
            Action::RestartDeployment => self.restart_deployment(),
            Action::CheckCrashLog => self.check_crash_log(),
            Action::Events => self.get_events(),
            Action::AllEvents => self.get_all_events(),
            Action::ListPodWithLabels => self.list_pods_with_labels(),
            Action::ListContainers => self.list_containers(),
            Action::ContainerLogs => self.container_logs(),
            Action::DeployLogs => self.deploy_logs(),
            Action::ServicesLogs => self.services_logs(),
        }
    }

    /// Writes client output as-is, making sure it ends with a newline.
    fn print_raw(&mut self, output: &str) -> Result<()> {
        write!(self.out, "{output}").map_err(Error::Stdio)?;
        if !output.ends_with('\n') {
            writeln!(self.out).map_err(Error::Stdio)?;
        }
        Ok(())
    }

    fn print_or(&mut self, output: &str, none_found: impl Display) -> Result<Outcome> {
        if output.trim().is_empty() {
            self.say(none_found)?;
        } else {
            self.print_raw(output)?;
        }
        Ok(Outcome::Completed)
    }

    /// Lets the user pick one of `candidates`.
    ///
    /// `scope` names what the list was narrowed to (e.g. "namespace prod")
    /// and only shapes the "nothing found" message.
    fn select(
        &mut self,
        resource: Resource,
        scope: Option<&str>,
        message: &str,
        candidates: &[String],
        on_cancel: OnCancel,
    ) -> Result<Option<String>> {
        if candidates.is_empty() {
            match scope {
                Some(scope) => self.say(format!("No {} found in {scope}.", resource.plural()))?,
                None => self.say(format!("No {} found.", resource.plural()))?,
            }
            return Ok(None);
        }

        match self.prompter.select(message, candidates)? {
            Some(chosen) => Ok(Some(chosen)),
            None if on_cancel == OnCancel::Exit => {
                Err(Error::SelectionCancelled(resource.singular().to_string()))
            }
            None => {
                self.say(format!("No {} selected.", resource.singular()))?;
                Ok(None)
            }
        }
    }

    fn select_namespace(&mut self, message: &str, on_cancel: OnCancel) -> Result<Option<String>> {
        let namespaces = self.kubectl.list(Resource::Namespace, &[])?;
        self.select(Resource::Namespace, None, message, &namespaces, on_cancel)
    }

    fn select_in_namespace(
        &mut self,
        resource: Resource,
        namespace: &str,
        message: &str,
        on_cancel: OnCancel,
    ) -> Result<Option<String>> {
        let candidates = self.kubectl.list(resource, &[("namespace", namespace)])?;
        let scope = format!("namespace {namespace}");
        self.select(resource, Some(&scope), message, &candidates, on_cancel)
    }

    fn get_nodes(&mut self) -> Result<Outcome> {
        let output = self.kubectl.run(templates::GET_NODES, &[])?;
        self.print_or(&output, "No nodes found.")
    }

    fn get_contexts(&mut self) -> Result<Outcome> {
        let output = self.kubectl.run(templates::GET_CONTEXTS, &[])?;

        if output.trim().is_empty() {
            self.say("No contexts found.")?;
            return Ok(Outcome::Completed);
        }

        for line in mark_active_context(&output) {
            if line.is_active {
                self.say(line.text.green())?;
            } else {
                self.say(line.text)?;
            }
        }

        Ok(Outcome::Completed)
    }

    fn select_context(&mut self) -> Result<Outcome> {
        let contexts = self.kubectl.list(Resource::Context, &[])?;
        let Some(context) = self.select(
            Resource::Context,
            None,
            "Select a Kubernetes context:",
            &contexts,
            OnCancel::ReturnToMenu,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!("Switching to context: {context}"))?;
        let output = self
            .kubectl
            .run(templates::USE_CONTEXT, &[("context", context.as_str())])?;
        self.say(format!("{} DONE...", output.trim_end()))?;

        Ok(Outcome::Completed)
    }

    fn list_namespaces(&mut self) -> Result<Outcome> {
        let output = self.kubectl.run(templates::GET_NAMESPACES, &[])?;
        self.print_or(&output, "No namespaces found.")
    }

    fn not_running_pods(&mut self) -> Result<Outcome> {
        let Some(namespace) =
            self.select_namespace("Select a Kubernetes namespace:", OnCancel::ReturnToMenu)?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!("Listing pods not in the Running state in namespace: {namespace}"))?;
        let output = self
            .kubectl
            .run(templates::NOT_RUNNING_PODS, &[("namespace", namespace.as_str())])?;
        self.print_or(
            &output,
            format!("No pods outside the Running state in namespace: {namespace}"),
        )
    }

    fn delete_pods(&mut self) -> Result<Outcome> {
        let Some(namespace) = self.select_namespace(
            "Select a Kubernetes namespace to delete pods not in Running state:",
            OnCancel::ReturnToMenu,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!("Deleting pods not in the Running state in namespace: {namespace}"))?;
        let output = self.kubectl.run(
            templates::DELETE_NOT_RUNNING_PODS,
            &[("namespace", namespace.as_str())],
        )?;

        if is_empty_result(&output) {
            self.say(format!("No pods to delete in namespace: {namespace}"))?;
        } else {
            self.say("Deletion complete.")?;
            self.print_raw(&output)?;
        }

        Ok(Outcome::Completed)
    }

    fn list_deployments(&mut self) -> Result<Outcome> {
        let Some(namespace) = self.select_namespace(
            "Select a Kubernetes namespace to list deployments:",
            OnCancel::ReturnToMenu,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!("Listing deployments in namespace: {namespace}"))?;
        let output = self
            .kubectl
            .run(templates::GET_DEPLOYMENTS, &[("namespace", namespace.as_str())])?;
        self.print_or(&output, format!("No deployments found in namespace: {namespace}").red())
    }

    fn check_deployment_status(&mut self) -> Result<Outcome> {
        let Some(namespace) =
            self.select_namespace("Select a Kubernetes namespace:", OnCancel::ReturnToMenu)?
        else {
            return Ok(Outcome::Aborted);
        };

        let Some(deployment) = self.select_in_namespace(
            Resource::Deployment,
            &namespace,
            &format!("Select a deployment in namespace: {namespace}"),
            OnCancel::ReturnToMenu,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!(
            "Checking rollout status of deployment: {deployment} in namespace: {namespace}"
        ))?;
        let output = self.kubectl.run(
            templates::ROLLOUT_STATUS,
            &[("deployment", deployment.as_str()), ("namespace", namespace.as_str())],
        )?;
        self.print_or(&output, "No rollout status reported.")
    }

    fn cordon_node(&mut self) -> Result<Outcome> {
        let nodes = self.kubectl.list(Resource::Node, &[])?;
        let Some(node) = self.select(
            Resource::Node,
            None,
            "Select a node to cordon:",
            &nodes,
            OnCancel::ReturnToMenu,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!("Cordoning node: {node}"))?;
        let output = self.kubectl.run(templates::CORDON_NODE, &[("node", node.as_str())])?;
        self.print_or(&output, format!("Node {node} cordoned."))
    }

    fn list_pods_on_node(&mut self) -> Result<Outcome> {
        let nodes = self.kubectl.list(Resource::Node, &[])?;
        let Some(node) = self.select(
            Resource::Node,
            None,
            "Select a node to list pods:",
            &nodes,
            OnCancel::ReturnToMenu,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        let Some(namespace) = self.select_namespace("Select a namespace:", OnCancel::ReturnToMenu)?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!("Listing pods on node: {node} in namespace: {namespace}"))?;
        let output = self.kubectl.run(
            templates::PODS_ON_NODE,
            &[("node", node.as_str()), ("namespace", namespace.as_str())],
        )?;
        self.print_or(&output, format!("No pods found on node {node} in namespace: {namespace}"))
    }

    fn list_pods_on_all_nodes(&mut self) -> Result<Outcome> {
        let output = self.kubectl.run(templates::PODS_ON_ALL_NODES, &[])?;
        self.say("Listing all pods across all nodes:")?;
        self.print_or(&output, "No pods found.")
    }

    fn list_pod_images(&mut self) -> Result<Outcome> {
        let Some(namespace) = self.select_namespace(
            "Select a namespace to list pod images:",
            OnCancel::ReturnToMenu,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!("Listing all pod images in namespace: {namespace}"))?;
        let output = self.kubectl.run(
            templates::POD_IMAGES,
            &[
                ("namespace", namespace.as_str()),
                ("jsonpath", templates::POD_IMAGES_JSONPATH),
            ],
        )?;

        if output.trim().is_empty() {
            self.say(format!("No pods found in namespace: {namespace}"))?;
            return Ok(Outcome::Completed);
        }

        for row in format_image_table(&output, IMAGE_NAME_COLUMN_WIDTH) {
            self.say(row)?;
        }

        Ok(Outcome::Completed)
    }

    fn restart_deployment(&mut self) -> Result<Outcome> {
        let Some(namespace) = self.select_namespace(
            "Select a namespace to restart a deployment:",
            OnCancel::ReturnToMenu,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        let Some(deployment) = self.select_in_namespace(
            Resource::Deployment,
            &namespace,
            &format!("Select a deployment to restart in namespace: {namespace}"),
            OnCancel::ReturnToMenu,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!("Restarting deployment: {deployment} in namespace: {namespace}"))?;
        self.kubectl.run(
            templates::ROLLOUT_RESTART,
            &[("deployment", deployment.as_str()), ("namespace", namespace.as_str())],
        )?;
        self.say(format!("Deployment {deployment} in namespace {namespace} has been restarted."))?;

        Ok(Outcome::Completed)
    }

    fn check_crash_log(&mut self) -> Result<Outcome> {
        let Some(namespace) = self.select_namespace(
            "Select a namespace to check logs of a crashed pod:",
            OnCancel::Exit,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        let crashed_pods = self.kubectl.list_not_running_pods(&namespace)?;
        let scope = format!("namespace {namespace}");
        let Some(pod) = self.select(
            Resource::Pod,
            Some(&scope),
            &format!("Select a crashed pod in namespace: {namespace}"),
            &crashed_pods,
            OnCancel::Exit,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!("Fetching logs for pod: {pod} in namespace: {namespace}"))?;
        let output = self.kubectl.run(
            templates::PREVIOUS_POD_LOGS,
            &[("pod", pod.as_str()), ("namespace", namespace.as_str())],
        )?;
        self.print_or(&output, format!("No previous logs found for pod {pod}."))
    }

    fn get_events(&mut self) -> Result<Outcome> {
        let Some(namespace) =
            self.select_namespace("Select a namespace to get events:", OnCancel::ReturnToMenu)?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!("Fetching events for namespace: {namespace}"))?;
        let output = self
            .kubectl
            .run(templates::EVENTS, &[("namespace", namespace.as_str())])?;
        self.print_or(&output, format!("No events found in namespace: {namespace}"))
    }

    fn get_all_events(&mut self) -> Result<Outcome> {
        self.say("Fetching all events across all namespaces...")?;
        let output = self.kubectl.run(templates::ALL_EVENTS, &[])?;
        self.print_or(&output, "No events found.")
    }

    fn list_pods_with_labels(&mut self) -> Result<Outcome> {
        let Some(namespace) = self.select_namespace(
            "Select a namespace to list pods with labels:",
            OnCancel::ReturnToMenu,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!("Listing pods with labels in namespace: {namespace}"))?;
        let output = self
            .kubectl
            .run(templates::PODS_WITH_LABELS, &[("namespace", namespace.as_str())])?;
        self.print_or(&output, format!("No pods found in namespace: {namespace}"))
    }

    fn list_containers(&mut self) -> Result<Outcome> {
        let Some(namespace) = self.select_namespace(
            "Select a namespace to list all containers in pods:",
            OnCancel::ReturnToMenu,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!(
            "Listing all containers (init and non-init) in pods within namespace: {namespace}"
        ))?;
        let output = self
            .kubectl
            .run(templates::POD_CONTAINERS, &[("namespace", namespace.as_str())])?;
        self.print_or(&output, format!("No containers found in namespace: {namespace}"))
    }

    fn container_logs(&mut self) -> Result<Outcome> {
        let Some(namespace) = self.select_namespace(
            "Select a namespace to get logs for a specific container in a pod:",
            OnCancel::Exit,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        let Some(pod) = self.select_in_namespace(
            Resource::Pod,
            &namespace,
            &format!("Select a pod in namespace {namespace}:"),
            OnCancel::Exit,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        let containers = self.kubectl.list(
            Resource::Container,
            &[("namespace", namespace.as_str()), ("pod", pod.as_str())],
        )?;
        let scope = format!("pod {pod}");
        let Some(container) = self.select(
            Resource::Container,
            Some(&scope),
            &format!("Select a container in pod {pod}:"),
            &containers,
            OnCancel::Exit,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!(
            "Fetching logs for container {container} in pod {pod} in namespace {namespace}..."
        ))?;
        let output = self.kubectl.run(
            templates::CONTAINER_LOGS,
            &[
                ("pod", pod.as_str()),
                ("namespace", namespace.as_str()),
                ("container", container.as_str()),
            ],
        )?;
        self.print_or(&output, format!("No logs found for container {container} in pod {pod}."))
    }

    fn deploy_logs(&mut self) -> Result<Outcome> {
        let Some(namespace) = self.select_namespace(
            "Select a namespace to get logs for a deployment:",
            OnCancel::ReturnToMenu,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        let Some(deployment) = self.select_in_namespace(
            Resource::Deployment,
            &namespace,
            &format!("Select a deployment in namespace {namespace}:"),
            OnCancel::ReturnToMenu,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!("Fetching logs for deployment {deployment} in namespace {namespace}..."))?;
        let output = self.kubectl.run(
            templates::DEPLOYMENT_LOGS,
            &[("deployment", deployment.as_str()), ("namespace", namespace.as_str())],
        )?;
        self.print_or(
            &output,
            format!("No logs found for deployment {deployment} in namespace {namespace}."),
        )
    }

    fn services_logs(&mut self) -> Result<Outcome> {
        let Some(namespace) = self.select_namespace(
            "Select a namespace to get logs for a service:",
            OnCancel::ReturnToMenu,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        let Some(service) = self.select_in_namespace(
            Resource::Service,
            &namespace,
            &format!("Select a service in namespace {namespace}:"),
            OnCancel::ReturnToMenu,
        )?
        else {
            return Ok(Outcome::Aborted);
        };

        self.say(format!("Fetching logs for service {service} in namespace {namespace}..."))?;
        let output = self.kubectl.run(
            templates::SERVICE_LOGS,
            &[("service", service.as_str()), ("namespace", namespace.as_str())],
        )?;
        self.print_or(
            &output,
            format!("No logs found for service {service} in namespace {namespace}."),
        )
    }
}
