use domain::RegisterQuery;
use mkv_protocol::{HttpTransport, HttpTransportConfig, ProtocolError, Session, Transport};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> HttpTransport {
    let mut config = HttpTransportConfig::new(server.uri());
    config.timeout_ms = 2_000;
    HttpTransport::new(config).expect("transport")
}

#[tokio::test]
async fn posts_question_form_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cgi-bin/mkv.cgi"))
        .and(body_string("QUESTION=300108"))
        .respond_with(ResponseTemplate::new(200).set_body_string("00000069\r\n"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let text = transport.send("300108").await.expect("send");
    assert_eq!(text, "00000069\r\n");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let err = transport.send("300108").await.expect_err("status");
    assert!(matches!(err, ProtocolError::Status(503)));
}

#[tokio::test]
async fn session_strips_line_breaks_and_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("00C8000A\n1F400005\n"))
        .mount(&server)
        .await;

    let transport: Arc<dyn Transport> = Arc::new(transport_for(&server));
    let session = Session::new(transport, 1000);
    let words = session
        .exchange(&[RegisterQuery::new(0x3002, 0x08), RegisterQuery::new(0x3002, 0x09)])
        .await;

    assert_eq!(words[0].word1, 10);
    assert_eq!(words[1].word1, 5);
}

#[tokio::test]
async fn session_returns_empty_on_http_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let transport: Arc<dyn Transport> = Arc::new(transport_for(&server));
    let session = Session::new(transport, 1000);
    let response = session.ask(&[RegisterQuery::new(0x3001, 8)]).await;
    assert!(response.is_empty());
}

#[tokio::test]
async fn slow_controller_times_out_as_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("0000006900000001")
                .set_delay(Duration::from_millis(1_500)),
        )
        .mount(&server)
        .await;

    let mut config = HttpTransportConfig::new(server.uri());
    config.timeout_ms = 200;
    let transport = HttpTransport::new(config).expect("transport");
    let err = transport.send("300108").await.expect_err("timeout");
    assert!(matches!(err, ProtocolError::Timeout(_)));

    let transport: Arc<dyn Transport> = Arc::new(transport);
    let session = Session::new(transport, 1000);
    let words = session
        .exchange(&[RegisterQuery::new(0x3001, 8), RegisterQuery::new(0x3003, 1)])
        .await;
    assert_eq!(words.len(), 2);
    assert!(words.iter().all(|word| !word.decoded));
}
