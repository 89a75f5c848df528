//! Models for the control plane's asynchronous action bookkeeping.
use serde::Deserialize;
use serde::Serialize;

/// Mutation intent tracked by the control plane as the cluster's last action.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ActionKind {
    /// The cluster is being provisioned.
    #[serde(rename = "CREATE")]
    Create,

    /// The cluster configuration is being changed in place.
    #[serde(rename = "UPDATE")]
    Update,

    /// The cluster is being deprovisioned.
    #[serde(rename = "DELETE")]
    Delete,
}

impl ActionKind {
    /// Check a reported action against this kind, ignoring case.
    ///
    /// The control plane reports actions as free-form strings and is not
    /// consistent about casing across versions.
    pub fn matches(&self, reported: &str) -> bool {
        reported.eq_ignore_ascii_case(self.as_str())
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progress states the control plane reports for the last action.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ActionState {
    /// The action is still being processed.
    InProgress,

    /// The action completed successfully.
    Succeeded,

    /// The action completed with an error.
    Failed,
}

impl ActionState {
    /// Recognise a reported action state, ignoring case.
    ///
    /// Returns `None` for states outside the documented contract so callers
    /// can treat them as a protocol anomaly instead of guessing.
    pub fn parse(reported: &str) -> Option<ActionState> {
        if reported.eq_ignore_ascii_case("in progress") {
            Some(ActionState::InProgress)
        } else if reported.eq_ignore_ascii_case("succeeded") {
            Some(ActionState::Succeeded)
        } else if reported.eq_ignore_ascii_case("failed") {
            Some(ActionState::Failed)
        } else {
            None
        }
    }
}
