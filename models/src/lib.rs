//! Data models for managed Kubernetes cluster lifecycle operations.
mod action;
mod cluster;

pub use self::action::ActionKind;
pub use self::action::ActionState;
pub use self::cluster::ClusterChanges;
pub use self::cluster::ClusterParameters;
pub use self::cluster::ClusterRequest;
pub use self::cluster::ClusterSpec;
pub use self::cluster::ClusterState;
pub use self::cluster::ClusterUpdate;
