//! Drives the core state machine against a mock backend, executing the
//! effects it asks for with the real HTTP client.

use std::time::Duration;

use postings_core::{
    update, AppState, DocumentField, Effect, Msg, Notification, NotificationKind, PayloadSource,
    RankedResult, RequestFailure, SelectedFile, SubmissionAck,
};
use postings_engine::{
    ApiError, ClientSettings, FailureKind, ReqwestApi, SearchApi, UploadBody, UploadRequest,
    WireRankedResult,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    api: ReqwestApi,
    notifications: Vec<Notification>,
}

impl Harness {
    fn new(server: &MockServer) -> Self {
        let api = ReqwestApi::new(ClientSettings {
            base_url: server.uri(),
            ..ClientSettings::default()
        })
        .unwrap();
        Self {
            api,
            notifications: Vec::new(),
        }
    }

    /// Applies `msg`, then runs effects until none are left.
    async fn dispatch(&mut self, state: AppState, msg: Msg) -> AppState {
        let (mut state, effects) = update(state, msg);
        let mut queue: Vec<Effect> = effects;
        while !queue.is_empty() {
            let mut next = Vec::new();
            for effect in queue {
                let follow_up = match effect {
                    Effect::Notify(notification) => {
                        self.notifications.push(notification);
                        None
                    }
                    Effect::UploadPayload { payload, .. } => {
                        let (filename, media_type, source) = payload.into_parts();
                        let body = match source {
                            PayloadSource::Bytes(bytes) => UploadBody::Bytes(bytes),
                            PayloadSource::FileHandle(path) => UploadBody::File(path),
                        };
                        let result = self
                            .api
                            .upload(UploadRequest {
                                filename,
                                media_type: media_type.to_string(),
                                body,
                            })
                            .await;
                        Some(Msg::SubmissionFinished(
                            result
                                .map(|ack| SubmissionAck {
                                    server_echo: ack.message,
                                })
                                .map_err(failure),
                        ))
                    }
                    Effect::RunQuery { text } => {
                        let result = self.api.query(&text).await;
                        Some(Msg::SearchFinished(
                            result
                                .map(|rows| rows.into_iter().map(ranked).collect())
                                .map_err(failure),
                        ))
                    }
                };
                if let Some(msg) = follow_up {
                    let (s, effects) = update(state, msg);
                    state = s;
                    next.extend(effects);
                }
            }
            queue = next;
        }
        state
    }
}

fn failure(err: ApiError) -> RequestFailure {
    match err.kind {
        FailureKind::Server { status, reported } => RequestFailure::Server {
            status,
            message: reported,
        },
        _ => RequestFailure::Transport {
            cause: err.to_string(),
        },
    }
}

fn ranked(row: WireRankedResult) -> RankedResult {
    RankedResult {
        id: row.id.map(|id| id.to_string()),
        title: row.title.unwrap_or_default(),
        snippet: row.snippet,
        description: row.description,
        url: row.url,
        display_url: row.display_url,
    }
}

async fn fill_form(harness: &mut Harness, mut state: AppState) -> AppState {
    let values = ["Acme", "Rockets", "Engineer", "Remote", "Rust", "https://acme.example/1"];
    for (field, value) in DocumentField::ALL.into_iter().zip(values) {
        state = harness
            .dispatch(
                state,
                Msg::FieldEdited {
                    field,
                    value: value.to_string(),
                },
            )
            .await;
    }
    state
}

#[tokio::test]
async fn csv_file_upload_sends_its_bytes_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/process-csv/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Successfully processed the document."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("report.csv");
    let content = "company_name,title\n\"Acme\",\"Engineer\"\n";
    std::fs::write(&file, content).unwrap();

    let mut harness = Harness::new(&server);
    let selected = SelectedFile::from_path(&file, Some("text/csv".to_string()));
    let state = harness
        .dispatch(AppState::new(), Msg::FileSelected(selected))
        .await;

    assert!(state.is_idle());
    assert_eq!(
        harness.notifications,
        vec![Notification::success("Successfully processed the document.")]
    );
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains(content));
}

#[tokio::test]
async fn blank_form_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut harness = Harness::new(&server);
    let state = harness
        .dispatch(
            AppState::new(),
            Msg::FieldEdited {
                field: DocumentField::Title,
                value: "Engineer".into(),
            },
        )
        .await;
    let state = harness.dispatch(state, Msg::FormSubmitted).await;

    assert!(state.is_idle());
    assert_eq!(harness.notifications.len(), 1);
    assert_eq!(harness.notifications[0].kind, NotificationKind::Error);
}

#[tokio::test]
async fn server_rejection_surfaces_message_and_clears_busy_flag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/process-csv/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "bad format" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = Harness::new(&server);
    let state = fill_form(&mut harness, AppState::new()).await;
    let state = harness.dispatch(state, Msg::FormSubmitted).await;

    assert!(!state.submission().is_submitting());
    assert_eq!(harness.notifications, vec![Notification::error("bad format")]);
    assert!(state.form().record().is_blank());
}

#[tokio::test]
async fn duplicate_submit_while_pending_makes_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/process-csv/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(100))
                .set_body_json(json!({ "message": "ok" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = Harness::new(&server);
    let state = fill_form(&mut harness, AppState::new()).await;

    // First submit is accepted; its upload is still outstanding when the
    // second one arrives, so only the pure update runs here.
    let (state, first) = update(state, Msg::FormSubmitted);
    let (state, second) = update(state, Msg::FormSubmitted);
    assert!(matches!(first.as_slice(), [Effect::UploadPayload { .. }]));
    assert!(matches!(second.as_slice(), [Effect::Notify(_)]));

    // Now let the first upload run to completion.
    let payload = match first.into_iter().next() {
        Some(Effect::UploadPayload { payload, .. }) => payload,
        other => panic!("expected upload, got {other:?}"),
    };
    let (filename, media_type, source) = payload.into_parts();
    let body = match source {
        PayloadSource::Bytes(bytes) => UploadBody::Bytes(bytes),
        PayloadSource::FileHandle(path) => UploadBody::File(path),
    };
    let ack = harness
        .api
        .upload(UploadRequest {
            filename,
            media_type: media_type.to_string(),
            body,
        })
        .await
        .unwrap();
    let state = harness
        .dispatch(
            state,
            Msg::SubmissionFinished(Ok(SubmissionAck {
                server_echo: ack.message,
            })),
        )
        .await;

    assert!(state.is_idle());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn search_yields_results_in_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/get-query-result/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ranked_results": [
                { "id": 1, "title": "A", "snippet": "a" },
                { "id": 2, "title": "B", "snippet": "b" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = Harness::new(&server);
    let state = harness
        .dispatch(AppState::new(), Msg::QueryEdited("a".into()))
        .await;
    let state = harness.dispatch(state, Msg::SearchSubmitted).await;

    let titles: Vec<String> = state.view().results.into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["A", "B"]);
    assert_eq!(state.query().results()[0].id.as_deref(), Some("1"));
    assert!(!state.query().is_searching());
}

#[tokio::test]
async fn blank_search_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut harness = Harness::new(&server);
    let state = harness
        .dispatch(AppState::new(), Msg::QueryEdited("   ".into()))
        .await;
    let state = harness.dispatch(state, Msg::SearchSubmitted).await;

    assert!(!state.query().is_searching());
    assert!(harness.notifications.is_empty());
}
