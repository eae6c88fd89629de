//! Integration tests for index initialization and seeding against a mock
//! search service.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use schools::search::{
    initialize_index, seed_index, Completion, SearchClient, SearchableAttributes,
};
use schools::store::{SchoolRecord, SetLiteral};
use schools::{SchoolStore, SearchError, StoreError};

#[path = "helpers.rs"]
mod helpers;

use helpers::SAMPLE_CSV;

fn client(server: &MockServer) -> SearchClient {
    SearchClient::new(reqwest::Client::new(), &server.uri(), "APP", "KEY")
        .expect("mock server URI should be a valid host")
        .with_poll_interval(Duration::from_millis(10))
}

async fn mount_published_task(server: &MockServer, task_id: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/1/indexes/schools/task/{}", task_id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "published", "pendingTask": false})),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_initialize_sends_settings_and_waits() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/1/indexes/schools/settings"))
        .and(header("X-Algolia-Application-Id", "APP"))
        .and(header("X-Algolia-API-Key", "KEY"))
        .and(body_json(json!({
            "searchableAttributes": ["name", "abbreviations", "alternatives"],
            "indexLanguages": ["en"],
            "queryLanguages": ["en"],
            "hitsPerPage": 5,
            "paginationLimitedTo": 50
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"updatedAt": "2024-01-01T00:00:00Z", "taskID": 42})),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_published_task(&server, 42).await;

    let task_id = initialize_index(
        &client(&server),
        "schools",
        SearchableAttributes::Separate,
        Completion::Wait,
    )
    .await
    .expect("initialize should succeed");

    assert_eq!(task_id, 42);
}

#[tokio::test]
async fn test_initialize_combined_attributes() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/1/indexes/schools/settings"))
        .and(body_json(json!({
            "searchableAttributes": ["name", "abbreviations,alternatives"],
            "indexLanguages": ["en"],
            "queryLanguages": ["en"],
            "hitsPerPage": 5,
            "paginationLimitedTo": 50
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"taskID": 7})))
        .expect(1)
        .mount(&server)
        .await;

    // No task endpoint is mounted: NoWait must not poll
    let task_id = initialize_index(
        &client(&server),
        "schools",
        SearchableAttributes::Combined,
        Completion::NoWait,
    )
    .await
    .unwrap();

    assert_eq!(task_id, 7);
}

#[tokio::test]
async fn test_wait_polls_until_published() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/1/indexes/schools/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"taskID": 9})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1/indexes/schools/task/9"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "notPublished", "pendingTask": true})),
        )
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    mount_published_task(&server, 9).await;

    initialize_index(
        &client(&server),
        "schools",
        SearchableAttributes::Separate,
        Completion::Wait,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_seed_sends_search_documents() {
    let server = MockServer::start().await;
    let store = SchoolStore::from_reader(SAMPLE_CSV.as_bytes()).unwrap();

    Mock::given(method("POST"))
        .and(path("/1/indexes/schools/batch"))
        .and(body_json(json!({
            "requests": [
                {
                    "action": "updateObject",
                    "body": {
                        "objectID": "1",
                        "name": "Acme School",
                        "abbreviations": ["AS"],
                        "alternatives": []
                    }
                },
                {
                    "action": "updateObject",
                    "body": {
                        "objectID": "2",
                        "name": "Beta College",
                        "abbreviations": ["BC", "BCO"],
                        "alternatives": ["Beta"]
                    }
                }
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"taskID": 11, "objectIDs": ["1", "2"]})),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_published_task(&server, 11).await;

    let count = seed_index(&client(&server), "schools", &store, Completion::Wait)
        .await
        .unwrap();

    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_seed_with_malformed_row_sends_nothing() {
    let server = MockServer::start().await;
    let csv = "id,name,abbreviations,alternatives\n1,Good,{},{}\nbad-row,Broken,\"{\"\"A\"\"\",{}\n";
    let store = SchoolStore::from_reader(csv.as_bytes()).unwrap();

    let err = seed_index(&client(&server), "schools", &store, Completion::Wait)
        .await
        .unwrap_err();

    match err {
        SearchError::Store(StoreError::Decode {
            record_id, field, ..
        }) => {
            assert_eq!(record_id, "bad-row");
            assert_eq!(field, "abbreviations");
        }
        other => panic!("expected decode error, got {:?}", other),
    }
    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "no request may be sent: {:?}", requests);
}

#[tokio::test]
async fn test_seed_splits_large_datasets_into_batches() {
    let server = MockServer::start().await;
    let records = (0..1001)
        .map(|i| SchoolRecord {
            id: format!("id-{}", i),
            name: format!("School {}", i),
            abbreviations: SetLiteral::from_raw("{}"),
            alternatives: SetLiteral::from_raw("{}"),
        })
        .collect();
    let store = SchoolStore::new(records).unwrap();

    Mock::given(method("POST"))
        .and(path("/1/indexes/schools/batch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"taskID": 5})))
        .expect(2)
        .mount(&server)
        .await;

    let count = seed_index(&client(&server), "schools", &store, Completion::NoWait)
        .await
        .unwrap();
    assert_eq!(count, 1001);

    let requests = server.received_requests().await.unwrap();
    let sizes: Vec<usize> = requests
        .iter()
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["requests"].as_array().unwrap().len()
        })
        .collect();
    assert_eq!(sizes, vec![1000, 1]);
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/1/indexes/schools/settings"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/1/indexes/schools/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"taskID": 3})))
        .expect(1)
        .mount(&server)
        .await;

    let task_id = initialize_index(
        &client(&server),
        "schools",
        SearchableAttributes::Separate,
        Completion::NoWait,
    )
    .await
    .unwrap();
    assert_eq!(task_id, 3);
}

#[tokio::test]
async fn test_client_error_surfaces_immediately() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/1/indexes/schools/settings"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"message": "Invalid Application-ID or API key", "status": 403})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = initialize_index(
        &client(&server),
        "schools",
        SearchableAttributes::Separate,
        Completion::Wait,
    )
    .await
    .unwrap_err();

    match err {
        SearchError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Invalid Application-ID or API key");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}
