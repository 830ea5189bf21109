use std::time::Duration;

use pretty_assertions::assert_eq;
use taskwatch_engine::{ApiError, ApiSettings, ReqwestTaskApi, TaskApi, TaskRecord};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COOKIES: &str = "sessionid=abc123; csrftoken=tok456";

fn api_for(server: &MockServer) -> ReqwestTaskApi {
    ReqwestTaskApi::new(ApiSettings {
        base_url: server.uri(),
        cookie_text: Some(COOKIES.to_string()),
        ..ApiSettings::default()
    })
}

#[tokio::test]
async fn list_tasks_decodes_the_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/backgroundtask/"))
        .and(header("Cookie", COOKIES))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                {"id": 1, "status": "processing", "content": null, "link": null},
                {"id": 2, "status": "success", "content": "Done", "link": "http://x"},
            ]
        })))
        .mount(&server)
        .await;

    let page = api_for(&server).list_tasks().await.expect("list ok");
    assert_eq!(page.count, 2);
    assert_eq!(
        page.results,
        vec![
            TaskRecord {
                id: 1,
                status: "processing".to_string(),
                content: None,
                link: None,
            },
            TaskRecord {
                id: 2,
                status: "success".to_string(),
                content: Some("Done".to_string()),
                link: Some("http://x".to_string()),
            },
        ]
    );
}

#[tokio::test]
async fn list_tasks_sends_no_csrf_header() {
    let server = MockServer::start().await;
    // A GET carrying the token would hit this mock and fail the expect(0).
    Mock::given(method("GET"))
        .and(path("/api/backgroundtask/"))
        .and(header("X-CSRFToken", "tok456"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/backgroundtask/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"count": 0, "results": []})),
        )
        .mount(&server)
        .await;

    let page = api_for(&server).list_tasks().await.expect("list ok");
    assert_eq!(page.count, 0);
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn list_tasks_maps_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/backgroundtask/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = api_for(&server).list_tasks().await.unwrap_err();
    assert_eq!(err, ApiError::HttpStatus(502));
}

#[tokio::test]
async fn list_tasks_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/backgroundtask/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({"count": 0, "results": []})),
        )
        .mount(&server)
        .await;

    let api = ReqwestTaskApi::new(ApiSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    });

    let err = api.list_tasks().await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn list_tasks_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/backgroundtask/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server).list_tasks().await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedBody(_)), "got {err:?}");
}

#[tokio::test]
async fn delete_carries_csrf_token_and_cookies() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/backgroundtask/5/"))
        .and(header("X-CSRFToken", "tok456"))
        .and(header("Cookie", COOKIES))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server).delete_task(5).await.expect("delete ok");
}

#[tokio::test]
async fn delete_omits_csrf_header_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/backgroundtask/5/"))
        .and(header("X-CSRFToken", "tok456"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/backgroundtask/5/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let api = ReqwestTaskApi::new(ApiSettings {
        base_url: server.uri(),
        cookie_text: Some("sessionid=abc123".to_string()),
        ..ApiSettings::default()
    });

    // The server rejects, as expected without a token; the point is the
    // header was never sent.
    let err = api.delete_task(5).await.unwrap_err();
    assert_eq!(err, ApiError::HttpStatus(403));
}

#[tokio::test]
async fn delete_treats_missing_record_as_removed() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/backgroundtask/9/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    api_for(&server).delete_task(9).await.expect("404 is gone");
}
