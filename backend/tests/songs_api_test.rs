//! Integration tests for the song HTTP API
//!
//! Each test serves the router on an ephemeral port, backed by the in-memory
//! store seeded from the bundled dataset, and drives it over HTTP.

use reqwest::{redirect::Policy, Client};
use serde_json::{json, Value};
use song_service::api;
use song_service::config::DEFAULT_SEED_PATH;
use song_service::state::{AppState, SeedData};
use song_service::store::MemorySongStore;
use std::sync::Arc;

struct TestServer {
    base_url: String,
    client: Client,
    seed: SeedData,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Helper to start a server seeded with the bundled dataset
async fn spawn_server() -> TestServer {
    let seed = SeedData::load_from_file(DEFAULT_SEED_PATH).unwrap();
    let state = AppState::bootstrap(Arc::new(MemorySongStore::new()), &seed)
        .await
        .unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, api::router(state)).await.unwrap();
    });

    // 302 is a conflict signal here, not a redirect to follow
    let client = Client::builder().redirect(Policy::none()).build().unwrap();

    TestServer {
        base_url: format!("http://{}", addr),
        client,
        seed,
    }
}

#[tokio::test]
async fn test_health() {
    let server = spawn_server().await;
    let response = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), json!({"status": "OK"}));
}

#[tokio::test]
async fn test_count_tracks_seed_not_collection() {
    let server = spawn_server().await;
    let expected = json!({"length": server.seed.len()});

    let response = server.client.get(server.url("/count")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), expected);

    server
        .client
        .post(server.url("/song"))
        .json(&json!({"id": 1000, "title": "Extra"}))
        .send()
        .await
        .unwrap();
    server
        .client
        .delete(server.url("/song/1"))
        .send()
        .await
        .unwrap();
    server
        .client
        .delete(server.url("/song/2"))
        .send()
        .await
        .unwrap();

    let response = server.client.get(server.url("/count")).send().await.unwrap();
    assert_eq!(response.json::<Value>().await.unwrap(), expected);
}

#[tokio::test]
async fn test_list_songs() {
    let server = spawn_server().await;
    let response = server.client.get(server.url("/song")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    let songs = body["songs"].as_array().unwrap();
    assert_eq!(songs.len(), server.seed.len());
    assert!(songs.iter().all(|song| song["_id"]["$oid"].is_string()));
}

#[tokio::test]
async fn test_get_missing_song() {
    let server = spawn_server().await;
    for id in [0, 13, 999, -4] {
        let response = server
            .client
            .get(server.url(&format!("/song/{}", id)))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 404);
        assert_eq!(
            response.json::<Value>().await.unwrap(),
            json!({"message": "song with id not found"})
        );
    }
}

#[tokio::test]
async fn test_non_integer_ids_match_no_song() {
    let server = spawn_server().await;
    for id in ["abc", "1.5", "99999999999999999999"] {
        let url = server.url(&format!("/song/{}", id));

        let response = server.client.get(&url).send().await.unwrap();
        assert_eq!(response.status().as_u16(), 404);
        assert_eq!(
            response.json::<Value>().await.unwrap(),
            json!({"message": "song with id not found"})
        );

        let response = server
            .client
            .put(&url)
            .json(&json!({"title": "X"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 404);
        assert_eq!(
            response.json::<Value>().await.unwrap(),
            json!({"message": "song not found"})
        );

        let response = server.client.delete(&url).send().await.unwrap();
        assert_eq!(response.status().as_u16(), 404);
        assert_eq!(
            response.json::<Value>().await.unwrap(),
            json!({"message": "song not found"})
        );
    }

    let response = server.client.get(server.url("/song")).send().await.unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["songs"].as_array().unwrap().len(), server.seed.len());
}

#[tokio::test]
async fn test_create_then_get_returns_submitted_fields() {
    let server = spawn_server().await;
    let song = json!({"id": 500, "title": "New Song", "artist": "Someone", "tags": ["a", "b"]});

    let response = server
        .client
        .post(server.url("/song"))
        .json(&song)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert!(body["inserted id"]["$oid"].is_string());

    let fetched: Value = server
        .client
        .get(server.url("/song/500"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    for (field, value) in song.as_object().unwrap() {
        assert_eq!(&fetched[field], value);
    }
    assert_eq!(fetched["_id"], body["inserted id"]);
}

#[tokio::test]
async fn test_create_duplicate_returns_302_and_keeps_original() {
    let server = spawn_server().await;
    let original: Value = server
        .client
        .get(server.url("/song/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = server
        .client
        .post(server.url("/song"))
        .json(&json!({"id": 1, "title": "B"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"Message": "song with id 1 already present"})
    );

    let after: Value = server
        .client
        .get(server.url("/song/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after, original);
}

#[tokio::test]
async fn test_create_rejects_bad_bodies() {
    let server = spawn_server().await;

    let response = server
        .client
        .post(server.url("/song"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = server
        .client
        .post(server.url("/song"))
        .body("plain text")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = server
        .client
        .post(server.url("/song"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_update_changes_only_given_field() {
    let server = spawn_server().await;
    let before: Value = server
        .client
        .get(server.url("/song/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = server
        .client
        .put(server.url("/song/1"))
        .json(&json!({"title": "X"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    let updated: Value = response.json().await.unwrap();

    let mut expected = before.clone();
    expected["title"] = json!("X");
    assert_eq!(updated, expected);

    let fetched: Value = server
        .client
        .get(server.url("/song/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, expected);
}

#[tokio::test]
async fn test_update_with_same_values_is_a_no_op() {
    let server = spawn_server().await;
    let response = server
        .client
        .put(server.url("/song/3"))
        .json(&json!({"id": 3}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"message": "song found, but nothing updated"})
    );
}

#[tokio::test]
async fn test_update_errors() {
    let server = spawn_server().await;

    let response = server
        .client
        .put(server.url("/song/404"))
        .json(&json!({"title": "X"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"message": "song not found"})
    );

    // Body validation comes before the lookup
    let response = server
        .client
        .put(server.url("/song/404"))
        .body("nope")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_delete_then_get_returns_404() {
    let server = spawn_server().await;

    let response = server
        .client
        .delete(server.url("/song/4"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);
    assert!(response.bytes().await.unwrap().is_empty());

    let response = server.client.get(server.url("/song/4")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = server
        .client
        .delete(server.url("/song/4"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"message": "song not found"})
    );
}

#[tokio::test]
async fn test_round_trip_on_seed_song() {
    let server = spawn_server().await;
    let client = &server.client;

    let song: Value = client
        .get(server.url("/song/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(song["id"], 1);

    let status = client
        .post(server.url("/song"))
        .json(&json!({"id": 1, "title": "B"}))
        .send()
        .await
        .unwrap()
        .status();
    assert_eq!(status.as_u16(), 302);

    let status = client
        .put(server.url("/song/1"))
        .json(&json!({"title": "B"}))
        .send()
        .await
        .unwrap()
        .status();
    assert_eq!(status.as_u16(), 201);

    let song: Value = client
        .get(server.url("/song/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(song["title"], "B");

    let status = client
        .delete(server.url("/song/1"))
        .send()
        .await
        .unwrap()
        .status();
    assert_eq!(status.as_u16(), 204);

    let status = client
        .get(server.url("/song/1"))
        .send()
        .await
        .unwrap()
        .status();
    assert_eq!(status.as_u16(), 404);
}
