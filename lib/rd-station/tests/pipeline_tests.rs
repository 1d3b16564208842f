//! Request pipeline tests: URL construction, status classification,
//! decoding, cancellation, and body release.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use assert2::{check, let_assert};
use bytes::Bytes;
use futures_util::stream::{self, Stream};
use rd_station::{
    BoxError, CallContext, Cancellation, ClientConfig, Error, HttpClient, Method, OK,
    OK_OR_CREATED, RdStationClient, Request, Response, ResponseBody, Result,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Item {
    id: String,
    name: String,
}

fn client_for(server: &MockServer) -> RdStationClient {
    let config = ClientConfig::builder()
        .token("secret")
        .base_url(format!("{}/api/v1", server.uri()))
        .build()
        .expect("config");
    RdStationClient::from_config(config)
}

async fn received_query(server: &MockServer) -> Option<String> {
    let requests = server.received_requests().await.unwrap_or_default();
    requests.first().and_then(|r| r.url.query().map(ToString::to_string))
}

// ============================================================================
// URL and payload
// ============================================================================

#[tokio::test]
async fn token_is_appended_with_question_mark() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/deals"))
        .and(query_param("token", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let value: Value = client
        .request::<(), _>(&CallContext::new(), None, Method::Get, "deals", OK)
        .await
        .expect("response");

    check!(value == json!({"ok": true}));
    check!(received_query(&server).await.as_deref() == Some("token=secret"));
}

#[tokio::test]
async fn token_is_appended_with_ampersand_after_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/deals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let _: Value = client
        .request::<(), _>(&CallContext::new(), None, Method::Get, "deals?page=2", OK)
        .await
        .expect("response");

    check!(received_query(&server).await.as_deref() == Some("page=2&token=secret"));
}

#[tokio::test]
async fn json_body_and_headers_are_sent() {
    let server = MockServer::start().await;
    let item = Item {
        id: String::new(),
        name: "Widget".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/api/v1/items"))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .and(body_json(&item))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "i1", "name": "Widget"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created: Item = client
        .post(&CallContext::new(), "items", &item)
        .await
        .expect("created");

    check!(created.id == "i1");
}

#[tokio::test]
async fn get_without_body_sends_no_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let _: Value = client
        .request::<(), _>(&CallContext::new(), None, Method::Get, "deals", OK)
        .await
        .expect("response");

    let requests = server.received_requests().await.unwrap_or_default();
    let_assert!(Some(request) = requests.first());
    check!(request.body.is_empty());
}

// ============================================================================
// Status classification
// ============================================================================

#[tokio::test]
async fn rejected_status_returns_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/deals/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .request::<(), Item>(&CallContext::new(), None, Method::Get, "deals/missing", OK)
        .await
        .expect_err("404");

    let_assert!(Error::Api { status, body } = &err);
    check!(*status == 404);
    check!(body == "not found");
    check!(err.is_not_found());
}

#[tokio::test]
async fn non_json_error_body_is_kept_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(422).set_body_string("<html>Unprocessable</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .put::<_, Item>(&CallContext::new(), "deals/d1", &json!({"deal": {}}))
        .await
        .expect_err("422");

    check!(err.status() == Some(422));
    check!(err.api_body() == Some("<html>Unprocessable</html>"));
}

#[tokio::test]
async fn created_is_rejected_where_only_ok_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "x", "name": "y"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .put::<_, Item>(&CallContext::new(), "deals/d1", &json!({}))
        .await
        .expect_err("201 on update");

    check!(err.is_api());
    check!(err.status() == Some(201));
}

#[tokio::test]
async fn invalid_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .request::<(), Item>(&CallContext::new(), None, Method::Get, "items/1", OK)
        .await
        .expect_err("invalid json");

    check!(err.is_decode());
}

#[tokio::test]
async fn decode_error_reports_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "x"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .request::<(), Item>(&CallContext::new(), None, Method::Get, "items/1", OK)
        .await
        .expect_err("wrong type");

    let_assert!(Error::Decode { path, .. } = err);
    check!(path == "id");
}

#[tokio::test]
async fn connection_failure_is_transport() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let config = ClientConfig::builder()
        .token("secret")
        .base_url(format!("http://127.0.0.1:{port}/api/v1"))
        .build()
        .expect("config");
    let client = RdStationClient::from_config(config);

    let err = client
        .request::<(), Value>(&CallContext::new(), None, Method::Get, "deals", OK)
        .await
        .expect_err("refused");

    check!(err.is_transport());
}

// ============================================================================
// Cancellation and deadline
// ============================================================================

#[tokio::test]
async fn cancellation_interrupts_in_flight_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cancel = Cancellation::new();
    let ctx = CallContext::new().with_cancellation(cancel.clone());

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });

    let start = Instant::now();
    let err = client
        .request::<(), Value>(&ctx, None, Method::Get, "deals", OK)
        .await
        .expect_err("cancelled");

    check!(err.is_transport());
    check!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn deadline_interrupts_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = CallContext::new().with_timeout(Duration::from_millis(100));

    let start = Instant::now();
    let err = client
        .request::<(), Value>(&ctx, None, Method::Get, "deals", OK)
        .await
        .expect_err("deadline");

    check!(err.is_transport());
    check!(err.to_string().contains("deadline exceeded"));
    check!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn cancelled_context_sends_nothing() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let ctx = CallContext::new();
    ctx.cancellation().cancel();

    let err = client
        .request::<(), Value>(&ctx, None, Method::Get, "deals", OK)
        .await
        .expect_err("cancelled");

    check!(err.is_transport());
    check!(server.received_requests().await.unwrap_or_default().is_empty());
}

// ============================================================================
// Body release, with an in-memory transport
// ============================================================================

/// Body stream that records when it is dropped.
struct TrackedBody {
    inner: ResponseBody,
    dropped: Arc<AtomicBool>,
}

impl Stream for TrackedBody {
    type Item = std::result::Result<Bytes, BoxError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl Drop for TrackedBody {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

/// Transport answering every request with a canned status and body.
struct StubClient {
    status: u16,
    body: Box<dyn Fn() -> ResponseBody + Send + Sync>,
    dropped: Arc<AtomicBool>,
}

impl StubClient {
    fn new(status: u16, body: impl Fn() -> ResponseBody + Send + Sync + 'static) -> Self {
        Self {
            status,
            body: Box::new(body),
            dropped: Arc::new(AtomicBool::new(false)),
        }
    }

    fn with_text(status: u16, text: &'static str) -> Self {
        Self::new(status, move || {
            let body: ResponseBody =
                Box::pin(stream::iter([Ok::<_, BoxError>(Bytes::from_static(text.as_bytes()))]));
            body
        })
    }

    fn body_dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

impl HttpClient for StubClient {
    fn execute(&self, _request: Request) -> impl Future<Output = Result<Response>> + Send {
        let body: ResponseBody = Box::pin(TrackedBody {
            inner: (self.body)(),
            dropped: Arc::clone(&self.dropped),
        });
        let response = Response::new(self.status, HashMap::new(), body);
        async move { Ok(response) }
    }
}

fn stub_client(stub: StubClient) -> RdStationClient<Arc<StubClient>> {
    let config = ClientConfig::new("secret").expect("config");
    RdStationClient::with_http_client(config, Arc::new(stub))
}

#[tokio::test]
async fn body_is_released_after_success() {
    let client = stub_client(StubClient::with_text(200, r#"{"id": "1", "name": "a"}"#));

    let item: Item = client
        .request::<(), _>(&CallContext::new(), None, Method::Get, "items/1", OK)
        .await
        .expect("item");

    check!(item.name == "a");
    check!(client.http_client().body_dropped());
}

#[tokio::test]
async fn body_is_released_after_rejection() {
    let client = stub_client(StubClient::with_text(404, "not found"));

    let err = client
        .request::<(), Item>(&CallContext::new(), None, Method::Get, "items/1", OK)
        .await
        .expect_err("404");

    check!(err.api_body() == Some("not found"));
    check!(client.http_client().body_dropped());
}

#[tokio::test]
async fn body_is_released_after_decode_failure() {
    let client = stub_client(StubClient::with_text(201, "nope"));

    let err = client
        .request::<(), Item>(&CallContext::new(), None, Method::Post, "items", OK_OR_CREATED)
        .await
        .expect_err("decode");

    check!(err.is_decode());
    check!(client.http_client().body_dropped());
}

#[tokio::test]
async fn body_is_released_when_deadline_hits_mid_body() {
    let client = stub_client(StubClient::new(200, || {
        Box::pin(stream::pending::<std::result::Result<Bytes, BoxError>>())
    }));
    let ctx = CallContext::new().with_timeout(Duration::from_millis(50));

    let err = client
        .request::<(), Item>(&ctx, None, Method::Get, "items/1", OK)
        .await
        .expect_err("deadline");

    check!(err.is_transport());
    check!(client.http_client().body_dropped());
}

#[tokio::test]
async fn failed_read_of_rejected_body_is_body_read() {
    let client = stub_client(StubClient::new(500, || {
        Box::pin(stream::iter([
            Ok(Bytes::from_static(b"partial")),
            Err(BoxError::from("connection reset")),
        ]))
    }));

    let err = client
        .request::<(), Item>(&CallContext::new(), None, Method::Get, "items/1", OK)
        .await
        .expect_err("body read");

    let_assert!(Error::BodyRead { status, .. } = &err);
    check!(*status == 500);
    check!(err.status() == Some(500));
    check!(client.http_client().body_dropped());
}

#[tokio::test]
async fn failed_read_of_accepted_body_is_decode() {
    let client = stub_client(StubClient::new(200, || {
        Box::pin(stream::iter([Err::<Bytes, _>(BoxError::from("connection reset"))]))
    }));

    let err = client
        .request::<(), Item>(&CallContext::new(), None, Method::Get, "items/1", OK)
        .await
        .expect_err("read failure");

    check!(err.is_decode());
}

#[tokio::test]
async fn serialization_failure_sends_nothing() {
    let stub = StubClient::with_text(200, "{}");
    let client = stub_client(stub);

    // Maps with non-string keys cannot be JSON objects
    let mut body = std::collections::BTreeMap::new();
    body.insert((1, 2), "x");

    let err = client
        .request::<_, Value>(&CallContext::new(), Some(&body), Method::Post, "items", OK)
        .await
        .expect_err("serialization");

    check!(matches!(err, Error::Serialization(_)));
    check!(!client.http_client().body_dropped());
}
