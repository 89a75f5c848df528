use std::sync::Arc;
use std::time::Duration;

use kluster_client::fixture;
use kluster_client::Client;
use kluster_models::ClusterChanges;
use kluster_models::ClusterSpec;
use kluster_waiter::ActionWaiter;
use kluster_waiter::WaitConf;

use super::ClusterSync;
use super::ClusterVanished;

fn sync(mock: &Arc<fixture::Client>) -> ClusterSync {
    let client = Arc::new(Client::from(Arc::clone(mock)));
    let logger = slog::Logger::root(slog::Discard, slog::o!());
    let conf = WaitConf {
        max_wait: Duration::from_secs(5),
        poll_interval: Duration::from_millis(10),
    };
    let waiter = ActionWaiter::new(Arc::clone(&client), conf, logger.clone());
    ClusterSync::new(client, waiter, logger)
}

fn spec() -> ClusterSpec {
    ClusterSpec {
        name: "c1".to_string(),
        plan: "small".to_string(),
        external_hostname: "c1.example.com".to_string(),
        worker_nodes: None,
        network_profile: None,
    }
}

#[tokio::test(start_paused = true)]
async fn create_populates_computed_state() {
    let mock = Arc::new(fixture::Client::new());
    let mut done = fixture::cluster_state("c1", "CREATE", "succeeded");
    done.uuid = "u-1".to_string();
    done.kubernetes_master_ips = vec!["10.0.0.1".to_string()];
    mock.lookup_response(Some(fixture::cluster_state("c1", "CREATE", "in progress")))
        .steady_state(Some(done));

    let state = sync(&mock).create(&spec()).await.expect("create should succeed");
    assert_eq!(state.uuid, "u-1");
    assert_eq!(state.kubernetes_master_ips, vec!["10.0.0.1".to_string()]);
    assert_eq!(state.name, "c1");
}

#[tokio::test(start_paused = true)]
async fn create_request_maps_only_set_fields() {
    let mock = Arc::new(fixture::Client::new());
    mock.steady_state(Some(fixture::cluster_state("c1", "CREATE", "succeeded")));

    sync(&mock).create(&spec()).await.expect("create should succeed");
    let requests = mock.created();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.name, "c1");
    assert_eq!(request.plan_name, "small");
    assert_eq!(request.parameters.kubernetes_master_host, "c1.example.com");
    assert_eq!(request.parameters.kubernetes_master_port, Some(8443));
    assert_eq!(request.parameters.kubernetes_worker_instances, None);
    assert_eq!(request.network_profile_name, None);
}

#[tokio::test(start_paused = true)]
async fn create_forwards_explicit_worker_count_and_profile() {
    let mock = Arc::new(fixture::Client::new());
    mock.steady_state(Some(fixture::cluster_state("c1", "CREATE", "succeeded")));
    let mut spec = spec();
    spec.worker_nodes = Some(5);
    spec.network_profile = Some("dmz".to_string());

    sync(&mock).create(&spec).await.expect("create should succeed");
    let request = &mock.created()[0];
    assert_eq!(request.parameters.kubernetes_worker_instances, Some(5));
    assert_eq!(request.network_profile_name, Some("dmz".to_string()));
}

#[tokio::test(start_paused = true)]
async fn create_fails_when_cluster_vanishes_after_success() {
    let mock = Arc::new(fixture::Client::new());
    mock.lookup_response(Some(fixture::cluster_state("c1", "CREATE", "succeeded")));

    let error = sync(&mock)
        .create(&spec())
        .await
        .expect_err("a vanished cluster should fail the create");
    assert!(error.is::<ClusterVanished>());
}

#[tokio::test(start_paused = true)]
async fn read_of_absent_cluster_returns_none() {
    let mock = Arc::new(fixture::Client::new());
    let state = sync(&mock).read("c1").await.expect("read should not error");
    assert!(state.is_none());
}

#[tokio::test(start_paused = true)]
async fn update_without_changes_skips_remote_mutation() {
    let mock = Arc::new(fixture::Client::new());
    mock.steady_state(Some(fixture::cluster_state("c1", "UPDATE", "succeeded")));

    let state = sync(&mock)
        .update("c1", ClusterChanges::default())
        .await
        .expect("no-op update should succeed");
    assert!(mock.updated().is_empty());
    assert_eq!(state.name, "c1");
}

#[tokio::test(start_paused = true)]
async fn update_patches_worker_count_and_waits() {
    let mock = Arc::new(fixture::Client::new());
    mock.lookup_response(Some(fixture::cluster_state("c1", "UPDATE", "in progress")))
        .steady_state(Some(fixture::cluster_state("c1", "UPDATE", "succeeded")));
    let changes = ClusterChanges {
        worker_nodes: Some(7),
    };

    sync(&mock).update("c1", changes).await.expect("update should succeed");
    let updates = mock.updated();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, "c1");
    assert_eq!(updates[0].1.kubernetes_worker_instances, Some(7));
}

#[tokio::test(start_paused = true)]
async fn delete_waits_for_cluster_to_vanish() {
    let mock = Arc::new(fixture::Client::new());
    mock.lookup_response(Some(fixture::cluster_state("c1", "DELETE", "in progress")));

    sync(&mock).delete("c1").await.expect("delete should succeed");
    assert_eq!(mock.deleted(), vec!["c1".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn delete_of_absent_cluster_is_idempotent() {
    let mock = Arc::new(fixture::Client::new());
    sync(&mock).delete("c1").await.expect("delete should succeed");
    assert_eq!(mock.deleted(), vec!["c1".to_string()]);
}
