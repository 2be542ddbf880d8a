use std::sync::Arc;
use std::time::Duration;

use newshub_core::{Category, Cursor, FetchFailure, FetchTag, TimerKind};
use newshub_engine::{
    EngineEvent, EngineHandle, FailureKind, NewsSource, PageRequest, ReqwestNewsSource,
    SourceSettings,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> SourceSettings {
    SourceSettings {
        base_url: format!("{}/api/1/latest", server.uri()),
        api_key: "test-key".to_string(),
        ..SourceSettings::default()
    }
}

fn source_for(server: &MockServer) -> ReqwestNewsSource {
    ReqwestNewsSource::new(settings_for(server)).expect("client")
}

fn results(ids: &[&str]) -> serde_json::Value {
    ids.iter()
        .map(|id| {
            json!({
                "article_id": id,
                "title": format!("Story {id}"),
                "description": null,
                "image_url": null,
                "link": format!("https://news.example/{id}"),
            })
        })
        .collect()
}

fn technology(search: &str, cursor: Option<&str>) -> PageRequest {
    PageRequest {
        category: Category::Technology,
        search: search.to_string(),
        cursor: cursor.and_then(Cursor::new),
    }
}

#[tokio::test]
async fn first_page_sends_query_parameters_and_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/latest"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("language", "en"))
        .and(query_param("category", "technology"))
        .and(query_param_is_missing("q"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "results": results(&["a1", "a2"]),
            "nextPage": "p2",
        })))
        .mount(&server)
        .await;

    let page = source_for(&server)
        .fetch_page(&technology("   ", None))
        .await
        .expect("fetch ok");

    let ids: Vec<_> = page.articles.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2"]);
    assert_eq!(page.articles[1].link, "https://news.example/a2");
    assert_eq!(page.next_cursor, Cursor::new("p2"));
}

#[tokio::test]
async fn continuation_passes_cursor_and_trimmed_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "apple vision"))
        .and(query_param("page", "opaque==token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "results": results(&["b1"]),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = source_for(&server)
        .fetch_page(&technology(" apple vision ", Some("opaque==token")))
        .await
        .expect("fetch ok");

    assert_eq!(page.articles.len(), 1);
    assert_eq!(page.next_cursor, None);
}

#[tokio::test]
async fn missing_results_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "results": {"message": "quota exceeded"},
        })))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .fetch_page(&PageRequest::headlines())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Malformed);
    assert!(matches!(err.to_failure(), FetchFailure::Malformed(_)));
}

#[tokio::test]
async fn http_status_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .fetch_page(&PageRequest::headlines())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(401));
    assert!(matches!(err.to_failure(), FetchFailure::Transport(_)));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"results": []})),
        )
        .mount(&server)
        .await;

    let settings = SourceSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let err = ReqwestNewsSource::new(settings)
        .expect("client")
        .fetch_page(&PageRequest::headlines())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"results\": [      ]}"))
        .mount(&server)
        .await;

    let settings = SourceSettings {
        max_bytes: 10,
        ..settings_for(&server)
    };
    let err = ReqwestNewsSource::new(settings)
        .expect("client")
        .fetch_page(&PageRequest::headlines())
        .await
        .unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 10, .. }));
}

#[test]
fn invalid_base_url_is_reported() {
    let source = ReqwestNewsSource::new(SourceSettings {
        base_url: "not a url".to_string(),
        ..SourceSettings::default()
    })
    .expect("client");

    let err = source.request_url(&PageRequest::headlines()).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn engine_reports_tagged_pages_headlines_and_timers() {
    newshub_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("category", "top"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": results(&["h1", "h2", "h3"]),
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("category", "science"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": results(&["s1"]),
            "nextPage": "p2",
        })))
        .mount(&server)
        .await;

    let source: Arc<dyn NewsSource> = Arc::new(source_for(&server));
    let (engine, events) = EngineHandle::start(source).expect("engine");
    let tag = FetchTag {
        request_id: 4,
        category: Category::Science,
        search: String::new(),
        cursor: None,
    };

    engine.fetch_page(tag.clone());
    engine.fetch_headlines();
    engine.schedule_once(TimerKind::SearchDebounce, 10);

    let received = tokio::task::spawn_blocking(move || {
        (0..3)
            .filter_map(|_| events.recv_timeout(Duration::from_secs(5)))
            .collect::<Vec<_>>()
    })
    .await
    .expect("join");

    assert_eq!(received.len(), 3);
    assert!(received
        .iter()
        .any(|event| matches!(event, EngineEvent::TimerFired { timer: TimerKind::SearchDebounce })));
    let page = received
        .iter()
        .find_map(|event| match event {
            EngineEvent::PageFetched { tag: got, result } => {
                assert_eq!(got, &tag);
                Some(result.clone().expect("page"))
            }
            _ => None,
        })
        .expect("page event");
    assert_eq!(page.next_cursor, Cursor::new("p2"));
    let headlines = received
        .iter()
        .find_map(|event| match event {
            EngineEvent::HeadlinesFetched { result } => Some(result.clone().expect("headlines")),
            _ => None,
        })
        .expect("headline event");
    assert_eq!(headlines.articles.len(), 3);
}
