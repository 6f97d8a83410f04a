use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::Error;

/// Every operation offered in the menu, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GetNodes,
    GetContexts,
    SelectContext,
    ListNamespaces,
    NotRunningPods,
    DeletePods,
    ListDeployments,
    CheckDeploymentStatus,
    CordonNodes,
    ListPods,
    ListPodsOnNodes,
    ImageVersion,
    RestartDeployment,
    CheckCrashLog,
    Events,
    AllEvents,
    ListPodWithLabels,
    ListContainers,
    ContainerLogs,
    DeployLogs,
    ServicesLogs,
}

impl Action {
    pub const ALL: [Action; 21] = [
        Action::GetNodes,
        Action::GetContexts,
        Action::SelectContext,
        Action::ListNamespaces,
        Action::NotRunningPods,
        Action::DeletePods,
        Action::ListDeployments,
        Action::CheckDeploymentStatus,
        Action::CordonNodes,
        Action::ListPods,
        Action::ListPodsOnNodes,
        Action::ImageVersion,
        Action::RestartDeployment,
        Action::CheckCrashLog,
        Action::Events,
        Action::AllEvents,
        Action::ListPodWithLabels,
        Action::ListContainers,
        Action::ContainerLogs,
        Action::DeployLogs,
        Action::ServicesLogs,
    ];

    /// Stable identifier, used as the menu label and for direct invocation.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Action::GetNodes => "get-nodes",
            Action::GetContexts => "get-contexts",
            Action::SelectContext => "select-context",
            Action::ListNamespaces => "list-namespaces",
            Action::NotRunningPods => "not-running-pods",
            Action::DeletePods => "delete-pods",
            Action::ListDeployments => "list-deployments",
            Action::CheckDeploymentStatus => "check-deployment-status",
            Action::CordonNodes => "cordon-nodes",
            Action::ListPods => "list-pods",
            Action::ListPodsOnNodes => "list-pods-on-nodes",
            Action::ImageVersion => "image-version",
            Action::RestartDeployment => "restart-deployment",
            Action::CheckCrashLog => "check-crash-log",
            Action::Events => "events",
            Action::AllEvents => "all-events",
            Action::ListPodWithLabels => "list-pod-with-labels",
            Action::ListContainers => "list-containers",
            Action::ContainerLogs => "container-logs",
            Action::DeployLogs => "deploy-logs",
            Action::ServicesLogs => "services-logs",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Action::GetNodes => "List all nodes",
            Action::GetContexts => "Show contexts, active one highlighted",
            Action::SelectContext => "Switch the active context",
            Action::ListNamespaces => "List all namespaces",
            Action::NotRunningPods => "Pods not in the Running phase",
            Action::DeletePods => "Force delete pods not in the Running phase",
            Action::ListDeployments => "List deployments in a namespace",
            Action::CheckDeploymentStatus => "Rollout status of a deployment",
            Action::CordonNodes => "Mark a node unschedulable",
            Action::ListPods => "Pods scheduled on a node",
            Action::ListPodsOnNodes => "All pods with phase and node",
            Action::ImageVersion => "Container images per pod",
            Action::RestartDeployment => "Rollout restart a deployment",
            Action::CheckCrashLog => "Previous logs of a crashed pod",
            Action::Events => "Events in a namespace",
            Action::AllEvents => "Events across all namespaces",
            Action::ListPodWithLabels => "Pods with their labels",
            Action::ListContainers => "Init and regular containers per pod",
            Action::ContainerLogs => "Logs of one container",
            Action::DeployLogs => "Logs of a deployment",
            Action::ServicesLogs => "Logs of a service",
        }
    }
}

impl Display for Action {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} ({})", self.id(), self.description())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.id() == s)
            .ok_or_else(|| Error::UnknownAction(s.to_string()))
    }
}
