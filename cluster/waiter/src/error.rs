//! Terminal verdicts of a wait reported as errors.
use kluster_models::ActionKind;

/// The remote action completed with a failure.
#[derive(Debug, thiserror::Error)]
#[error("cluster action failed with error: {description:?}")]
pub struct ActionFailed {
    /// Failure description reported by the control plane.
    pub description: String,
}

/// The cluster stayed missing past the tolerance budget.
#[derive(Debug, thiserror::Error)]
#[error("cluster '{cluster}' not found while waiting for action '{action}'")]
pub struct ClusterNotFound {
    /// The action the wait expected to complete.
    pub action: ActionKind,

    /// Name of the cluster the wait targeted.
    pub cluster: String,
}

/// The cluster kept reporting an action other than the awaited one.
#[derive(Debug, thiserror::Error)]
#[error("found an unexpected action on the cluster: {action:?}, status: {state:?} ({description:?})")]
pub struct UnexpectedAction {
    /// The action the control plane reported.
    pub action: String,

    /// Progress state of the reported action.
    pub state: String,

    /// Description attached to the reported action.
    pub description: String,
}

/// The control plane reported an action state outside the known contract.
#[derive(Debug, thiserror::Error)]
#[error("unexpected cluster action state: {state:?}")]
pub struct UnexpectedState {
    /// The action state the control plane reported.
    pub state: String,
}

/// The deadline passed before the action reached a terminal state.
#[derive(Debug, thiserror::Error)]
#[error("timed out waiting for action '{action}' to succeed on cluster '{cluster}'")]
pub struct WaitTimedOut {
    /// The action the wait expected to complete.
    pub action: ActionKind,

    /// Name of the cluster the wait targeted.
    pub cluster: String,
}
