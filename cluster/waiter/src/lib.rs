//! Wait for asynchronous cluster actions to reach a terminal verdict.
//!
//! The control plane accepts mutations immediately and performs the real work
//! out of band, reporting progress through the cluster's last action record.
//! The [`ActionWaiter`] polls that record on a fixed interval until the action
//! succeeds, fails, stops matching expectations or a deadline passes.
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use slog::Logger;
use tokio::time::MissedTickBehavior;

use kluster_client::Client;
use kluster_models::ActionKind;
use kluster_models::ActionState;
use kluster_models::ClusterState;

mod error;


pub use self::error::ActionFailed;
pub use self::error::ClusterNotFound;
pub use self::error::UnexpectedAction;
pub use self::error::UnexpectedState;
pub use self::error::WaitTimedOut;

/// Anomalous observations tolerated before a wait gives up.
///
/// The control plane's bookkeeping can lag behind request acceptance: a
/// cluster may briefly be missing, or still report the previous action, right
/// after a mutation is accepted. The window is short relative to the poll
/// interval so the budget is small and fixed.
const MAX_POLL_RETRIES: u32 = 3;

/// Timing for the wait loop.
#[derive(Clone, Debug)]
pub struct WaitConf {
    /// Give up on the action once this much time has passed.
    pub max_wait: Duration,

    /// Fetch the cluster state this often.
    pub poll_interval: Duration,
}

/// Poll a cluster's action record until the expected action completes.
///
/// Waits run to one of their terminal verdicts and hold no state shared with
/// other waits: concurrent waiters only synchronise through the control plane.
pub struct ActionWaiter {
    client: Arc<Client>,
    conf: WaitConf,
    logger: Logger,
}

impl ActionWaiter {
    /// Initialise a waiter polling the control plane through the given client.
    pub fn new(client: Arc<Client>, conf: WaitConf, logger: Logger) -> ActionWaiter {
        ActionWaiter {
            client,
            conf,
            logger,
        }
    }

    /// Wait for `action` to complete on the named cluster.
    ///
    /// Returns `Ok(())` once the control plane reports the action succeeded,
    /// or for a DELETE once the cluster is gone. All other outcomes are
    /// errors: remote failure (with the remote description), an action other
    /// than the expected one sticking around past the tolerance budget, the
    /// cluster staying missing past the budget, an action state outside the
    /// known contract, or the deadline passing.
    pub async fn wait(&self, cluster: &str, action: ActionKind) -> Result<()> {
        let timeout = tokio::time::sleep(self.conf.max_wait);
        tokio::pin!(timeout);
        let mut interval = tokio::time::interval(self.conf.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The two counters are independent and never reset within one wait.
        let mut missing_polls: u32 = 0;
        let mut mismatch_polls: u32 = 0;

        loop {
            tokio::select! {
                _ = &mut timeout => anyhow::bail!(WaitTimedOut {
                    action,
                    cluster: cluster.to_string(),
                }),
                _ = interval.tick() => {
                    let found = self.client.cluster_lookup(cluster).await?;
                    let found = match found {
                        None if matches!(action, ActionKind::Delete) => return Ok(()),
                        None => {
                            missing_polls += 1;
                            if missing_polls > MAX_POLL_RETRIES {
                                anyhow::bail!(ClusterNotFound {
                                    action,
                                    cluster: cluster.to_string(),
                                });
                            }
                            slog::debug!(
                                self.logger, "Cluster not yet visible while awaiting action";
                                "cluster" => cluster,
                                "action" => %action,
                            );
                            continue;
                        }
                        Some(found) => found,
                    };
                    if !action.matches(&found.last_action) {
                        mismatch_polls += 1;
                        if mismatch_polls > MAX_POLL_RETRIES {
                            anyhow::bail!(UnexpectedAction {
                                action: found.last_action,
                                state: found.last_action_state,
                                description: found.last_action_description,
                            });
                        }
                        slog::warn!(
                            self.logger, "Cluster reports an action other than the awaited one";
                            "cluster" => cluster,
                            "expected" => %action,
                            "reported" => &found.last_action,
                        );
                        continue;
                    }
                    if self.check_state(cluster, action, found)? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Check an observed action state, `true` once the action succeeded.
    fn check_state(&self, cluster: &str, action: ActionKind, found: ClusterState) -> Result<bool> {
        match ActionState::parse(&found.last_action_state) {
            Some(ActionState::InProgress) => {
                slog::debug!(
                    self.logger, "Cluster action still in progress";
                    "cluster" => cluster,
                    "action" => %action,
                );
                Ok(false)
            }
            Some(ActionState::Succeeded) => Ok(true),
            Some(ActionState::Failed) => anyhow::bail!(ActionFailed {
                description: found.last_action_description,
            }),
            None => anyhow::bail!(UnexpectedState {
                state: found.last_action_state,
            }),
        }
    }
}
