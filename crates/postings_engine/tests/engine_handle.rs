use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use postings_engine::{
    ApiError, ClientSettings, EngineEvent, EngineHandle, SearchApi, UploadAck, UploadBody,
    UploadRequest, WireRankedResult,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn next_event(engine: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = engine.try_recv().expect("engine running") {
            return event;
        }
        assert!(Instant::now() < deadline, "engine produced no event");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn engine_reports_search_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/get-query-result/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ranked_results": [{ "id": 1, "title": "A", "snippet": "a" }]
        })))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
    .expect("engine starts");
    engine.query("a");

    match next_event(&engine).await {
        EngineEvent::SearchCompleted { query, result } => {
            assert_eq!(query, "a");
            let results = result.expect("ok");
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].title.as_deref(), Some("A"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn engine_reports_upload_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/process-csv/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "bad format" })))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
    .unwrap();
    engine.upload(UploadRequest {
        filename: "document.csv".into(),
        media_type: "text/csv".into(),
        body: UploadBody::Bytes(b"a\n\"1\"\n".to_vec()),
    });

    match next_event(&engine).await {
        EngineEvent::UploadCompleted { filename, result } => {
            assert_eq!(filename, "document.csv");
            let err = result.unwrap_err();
            assert!(!err.is_transport());
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[derive(Default)]
struct RecordingApi {
    queries: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl SearchApi for RecordingApi {
    async fn upload(&self, _request: UploadRequest) -> Result<UploadAck, ApiError> {
        Ok(UploadAck::default())
    }

    async fn query(&self, text: &str) -> Result<Vec<WireRankedResult>, ApiError> {
        self.queries.lock().unwrap().push(text.to_string());
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn engine_runs_every_command_through_the_api() {
    let api = Arc::new(RecordingApi::default());
    let engine = EngineHandle::with_api(api.clone()).unwrap();

    engine.query("first");
    engine.query("second");
    let _ = next_event(&engine).await;
    let _ = next_event(&engine).await;

    let mut seen = api.queries.lock().unwrap().clone();
    seen.sort();
    assert_eq!(seen, vec!["first", "second"]);
}
