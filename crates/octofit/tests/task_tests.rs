//! Integration tests for view-scoped background fetches

use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use octofit::config::ApiConfig;
use octofit::{ApiClient, Collection, FetchTask, Resource};

fn client_for(server: &MockServer) -> ApiClient {
    let config = ApiConfig {
        base_url: Some(server.uri()),
        ..ApiConfig::default()
    };
    ApiClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_outcome_carries_resource_and_generation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/teams/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "Marvel"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let task = FetchTask::spawn(client_for(&server), Resource::Teams, 7, tx);
    assert_eq!(task.resource(), Resource::Teams);
    assert_eq!(task.generation(), 7);

    let outcome = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("fetch should finish")
        .expect("outcome should be sent");

    assert_eq!(outcome.resource, Resource::Teams);
    assert_eq!(outcome.generation, 7);
    match outcome.result.unwrap() {
        Collection::Teams(teams) => assert_eq!(teams[0].name.as_deref(), Some("Marvel")),
        other => panic!("unexpected collection: {other:?}"),
    }
}

#[tokio::test]
async fn test_failure_is_delivered_as_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let _task = FetchTask::spawn(client_for(&server), Resource::Users, 1, tx);

    let outcome = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        outcome.result.unwrap_err().to_string(),
        "HTTP error! status: 500"
    );
}

#[tokio::test]
async fn test_dropping_task_cancels_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/workouts/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let task = FetchTask::spawn(client_for(&server), Resource::Workouts, 1, tx);
    tokio::time::sleep(Duration::from_millis(50)).await;
    drop(task);

    // The aborted task drops its sender without ever sending
    let received = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("channel should close once the task is aborted");
    assert!(received.is_none());
}
