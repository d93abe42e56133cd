use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lemon_markets_client::{Account, LemonError, RestClient, Space, SpaceType};

fn build_client(server: &MockServer) -> RestClient {
    RestClient::builder()
        .base_url(server.uri())
        .max_retries(0)
        .build()
}

fn build_space(server: &MockServer) -> Space {
    let data = json!({
        "uuid": "sp_1",
        "name": "Long term",
        "type": "strategy",
        "state": {"balance": "1.00", "cash_to_invest": "0.50"}
    });
    Space::from_response(build_client(server), Account::with_token("test_token"), &data).unwrap()
}

#[tokio::test]
async fn test_balance_and_cash_to_invest_refetch_each_read() {
    let server = MockServer::start().await;
    let response = json!({
        "uuid": "sp_1",
        "name": "Long term",
        "type": "strategy",
        "state": {"balance": "10.50", "cash_to_invest": "3.25"}
    });

    Mock::given(method("GET"))
        .and(path("/spaces/sp_1/"))
        .and(header("authorization", "Bearer test_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(2)
        .mount(&server)
        .await;

    let mut space = build_space(&server);
    assert_eq!(space.balance().await.unwrap(), 10.5);
    assert_eq!(space.cash_to_invest().await.unwrap(), 3.25);
}

#[tokio::test]
async fn test_state_read_updates_fields_in_place() {
    let server = MockServer::start().await;
    let response = json!({
        "uuid": "sp_1",
        "name": "Renamed",
        "type": "app",
        "state": {"balance": "2.00", "cash_to_invest": "2.00", "risk_level": "low"}
    });

    Mock::given(method("GET"))
        .and(path("/spaces/sp_1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let mut space = build_space(&server);
    let state = space.state().await.unwrap();
    assert_eq!(state["risk_level"], "low");
    assert_eq!(space.name(), "Renamed");
    assert_eq!(space.space_type(), SpaceType::App);
}

#[tokio::test]
async fn test_invalid_type_on_refresh_keeps_previous_values() {
    let server = MockServer::start().await;
    let response = json!({
        "uuid": "sp_1",
        "name": "Broken",
        "type": "bogus",
        "state": {"balance": "99.00"}
    });

    Mock::given(method("GET"))
        .and(path("/spaces/sp_1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let mut space = build_space(&server);
    let error = space.balance().await.unwrap_err();

    assert!(matches!(error, LemonError::InvalidSpaceType { ref value } if value.contains("bogus")));
    assert_eq!(space.name(), "Long term");
    assert_eq!(space.space_type(), SpaceType::Strategy);
    assert_eq!(space.cached_state()["balance"], "1.00");
}

#[tokio::test]
async fn test_api_error_passes_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/spaces/sp_1/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let mut space = build_space(&server);
    match space.refresh().await {
        Err(LemonError::Api(error)) => {
            assert!(error.is_not_found());
            assert_eq!(error.message, "Not found.");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(space.cached_state()["cash_to_invest"], "0.50");
}

#[tokio::test]
async fn test_non_numeric_balance() {
    let server = MockServer::start().await;
    let response = json!({
        "uuid": "sp_1",
        "name": "Long term",
        "type": "strategy",
        "state": {"balance": "n/a"}
    });

    Mock::given(method("GET"))
        .and(path("/spaces/sp_1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let mut space = build_space(&server);
    assert!(matches!(
        space.balance().await,
        Err(LemonError::InvalidNumber { ref field, .. }) if field == "balance"
    ));
    assert!(matches!(
        space.cash_to_invest().await,
        Err(LemonError::MissingField(ref field)) if field == "cash_to_invest"
    ));
}

#[tokio::test]
async fn test_transport_error_passes_through() {
    let address = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = RestClient::builder()
        .base_url(format!("http://{address}"))
        .max_retries(0)
        .build();
    let data = json!({
        "uuid": "sp_1",
        "name": "Long term",
        "type": "strategy",
        "state": {"balance": "1.00"}
    });
    let mut space = Space::from_response(client, Account::with_token("test_token"), &data).unwrap();

    assert!(matches!(
        space.balance().await,
        Err(LemonError::HttpMiddleware(_))
    ));
    assert_eq!(space.cached_state()["balance"], "1.00");
}
