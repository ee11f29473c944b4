use mcp_appium_session::element::W3C_ELEMENT_KEY;
use mcp_appium_session::mcp::server::{McpAppiumServer, ToolRequest};
use mcp_appium_session::{ActionOutcome, AppiumClient, SessionController, SessionError};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn harness(base_url: &str) -> (Arc<SessionController>, McpAppiumServer) {
    let backend = AppiumClient::new(base_url, None).unwrap();
    let controller = Arc::new(SessionController::new(Arc::new(backend)));
    let server = McpAppiumServer::new(controller.clone()).unwrap();
    (controller, server)
}

fn hub(server: &MockServer) -> String {
    format!("{}/wd/hub", server.uri())
}

async fn call(server: &McpAppiumServer, tool: &str, params: Value) -> ActionOutcome {
    server
        .call_tool(ToolRequest {
            tool_name: tool.to_string(),
            params,
        })
        .await
        .unwrap()
        .outcome
}

async fn start(server: &McpAppiumServer, platform_name: &str, device_name: &str) {
    call(
        server,
        "start_session",
        json!({"capabilities": {"platformName": platform_name, "deviceName": device_name}}),
    )
    .await;
}

async fn mount_session(server: &MockServer, session_id: &str) {
    Mock::given(method("POST"))
        .and(path("/wd/hub/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessionId": session_id,
            "value": {}
        })))
        .mount(server)
        .await;
}

async fn mount_find(server: &MockServer, element: Value) {
    Mock::given(method("POST"))
        .and(path("/wd/hub/session/abc123/element"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": element})))
        .mount(server)
        .await;
}

async fn mount_click(server: &MockServer, element_id: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/wd/hub/session/abc123/element/{}/click", element_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": null})))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let appium = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/wd/hub/session"))
        .and(body_json(json!({
            "capabilities": {
                "firstMatch": [{}],
                "alwaysMatch": {"platformName": "Android", "deviceName": "emulator-5554"}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessionId": "abc123",
            "value": {}
        })))
        .expect(1)
        .mount(&appium)
        .await;

    Mock::given(method("POST"))
        .and(path("/wd/hub/session/abc123/element"))
        .and(body_json(json!({"using": "id", "value": "login_btn"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"value": {"ELEMENT": "el1"}})),
        )
        .expect(1)
        .mount(&appium)
        .await;
    mount_click(&appium, "el1").await;

    Mock::given(method("POST"))
        .and(path("/wd/hub/session/abc123/touch/perform"))
        .and(body_json(json!({
            "actions": [
                {"action": "press", "options": {"x": 100, "y": 800}},
                {"action": "wait", "options": {"ms": 800}},
                {"action": "moveTo", "options": {"x": 100, "y": 200}},
                {"action": "release", "options": {}}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": null})))
        .expect(1)
        .mount(&appium)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/wd/hub/session/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": null})))
        .expect(1)
        .mount(&appium)
        .await;

    let (controller, server) = harness(&hub(&appium));

    let started = call(
        &server,
        "start_session",
        json!({"capabilities": {"platformName": "Android", "deviceName": "emulator-5554"}}),
    )
    .await;
    assert_eq!(started.to_string(), "Session started: abc123");
    assert_eq!(controller.session_id().await.as_deref(), Some("abc123"));

    let tapped = call(&server, "tap", json!({"by": "id", "value": "login_btn"})).await;
    assert_eq!(tapped, ActionOutcome::ElementTapped);
    assert_eq!(tapped.to_string(), "Element tapped");

    let swiped = call(
        &server,
        "swipe",
        json!({"startX": 100, "startY": 800, "endX": 100, "endY": 200}),
    )
    .await;
    assert_eq!(swiped.to_string(), "Swiped from (100,800) to (100,200)");

    let closed = call(&server, "close_session", json!({})).await;
    assert_eq!(closed.to_string(), "Session abc123 closed");

    let closed_again = call(&server, "close_session", json!({})).await;
    assert_eq!(closed_again.to_string(), "No active session");
    assert_eq!(controller.session_id().await, None);

    let paths: Vec<String> = appium
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        paths,
        vec![
            "/wd/hub/session",
            "/wd/hub/session/abc123/element",
            "/wd/hub/session/abc123/element/el1/click",
            "/wd/hub/session/abc123/touch/perform",
            "/wd/hub/session/abc123",
        ]
    );
}

#[tokio::test]
async fn test_click_targets_w3c_identifier() {
    let appium = MockServer::start().await;
    mount_session(&appium, "abc123").await;
    mount_find(&appium, json!({W3C_ELEMENT_KEY: "w3c-el"})).await;
    mount_click(&appium, "w3c-el").await;

    let (_, server) = harness(&hub(&appium));
    start(&server, "iOS", "iPhone 15").await;

    let tapped = call(&server, "tap", json!({"by": "accessibility id", "value": "Login"})).await;
    assert_eq!(tapped, ActionOutcome::ElementTapped);
}

#[tokio::test]
async fn test_legacy_identifier_wins_over_w3c() {
    let appium = MockServer::start().await;
    mount_session(&appium, "abc123").await;
    mount_find(&appium, json!({"ELEMENT": "legacy-el", W3C_ELEMENT_KEY: "w3c-el"})).await;
    mount_click(&appium, "legacy-el").await;

    let (_, server) = harness(&hub(&appium));
    start(&server, "iOS", "iPhone 15").await;

    let tapped = call(
        &server,
        "tap",
        json!({"by": "xpath", "value": "//XCUIElementTypeButton"}),
    )
    .await;
    assert_eq!(tapped, ActionOutcome::ElementTapped);
}

#[tokio::test]
async fn test_missing_identifier_surfaces_as_request_error() {
    let appium = MockServer::start().await;
    mount_session(&appium, "abc123").await;
    mount_find(&appium, json!({})).await;

    Mock::given(method("POST"))
        .and(path("/wd/hub/session/abc123/element/undefined/click"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "value": {
                "error": "no such element",
                "message": "An element could not be located on the page using the given search parameters."
            }
        })))
        .expect(1)
        .mount(&appium)
        .await;

    let (controller, server) = harness(&hub(&appium));
    start(&server, "Android", "emulator-5554").await;

    let tapped = call(&server, "tap", json!({"by": "name", "value": "ghost"})).await;
    assert!(tapped.is_error());
    assert_eq!(
        tapped.to_string(),
        "Error tapping element: Request failed with status code 404: \
         An element could not be located on the page using the given search parameters."
    );
    assert_eq!(controller.session_id().await.as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_server_error_on_swipe_keeps_session() {
    let appium = MockServer::start().await;
    mount_session(&appium, "abc123").await;

    Mock::given(method("POST"))
        .and(path("/wd/hub/session/abc123/touch/perform"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&appium)
        .await;

    let (controller, server) = harness(&hub(&appium));
    start(&server, "Android", "emulator-5554").await;

    let swiped = call(
        &server,
        "swipe",
        json!({"startX": 1, "startY": 2, "endX": 3, "endY": 4, "duration": 100}),
    )
    .await;
    assert_eq!(swiped.to_string(), "Error swiping: Request failed with status code 500");
    assert_eq!(controller.session_id().await.as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_swipe_accepts_integral_float_duration() {
    let appium = MockServer::start().await;
    mount_session(&appium, "abc123").await;

    Mock::given(method("POST"))
        .and(path("/wd/hub/session/abc123/touch/perform"))
        .and(body_json(json!({
            "actions": [
                {"action": "press", "options": {"x": 1, "y": 2}},
                {"action": "wait", "options": {"ms": 800}},
                {"action": "moveTo", "options": {"x": 3, "y": 4}},
                {"action": "release", "options": {}}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": null})))
        .expect(1)
        .mount(&appium)
        .await;

    let (_controller, server) = harness(&hub(&appium));
    start(&server, "Android", "emulator-5554").await;

    let swiped = call(
        &server,
        "swipe",
        json!({"startX": 1, "startY": 2, "endX": 3, "endY": 4, "duration": 800.0}),
    )
    .await;
    assert_eq!(swiped.to_string(), "Swiped from (1,2) to (3,4)");
}

#[tokio::test]
async fn test_unreachable_server_reports_error_text() {
    // Nothing listens on port 1
    let (controller, server) = harness("http://127.0.0.1:1/wd/hub");

    let started = call(
        &server,
        "start_session",
        json!({"capabilities": {"platformName": "Android", "deviceName": "emulator-5554"}}),
    )
    .await;
    assert!(started.is_error());
    assert!(started.to_string().starts_with("Error starting session: "));
    assert_eq!(controller.session_id().await, None);
}

#[tokio::test]
async fn test_tap_without_session_makes_no_request() {
    let appium = MockServer::start().await;
    let (_, server) = harness(&hub(&appium));

    let tapped = call(&server, "tap", json!({"by": "id", "value": "login_btn"})).await;
    assert_eq!(tapped, ActionOutcome::NoActiveSession);
    assert!(!tapped.is_error());
    assert!(appium.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_arguments_are_rejected_before_execution() {
    let appium = MockServer::start().await;
    let (_, server) = harness(&hub(&appium));

    let result = server
        .call_tool(ToolRequest {
            tool_name: "tap".to_string(),
            params: json!({"by": "css selector", "value": "#login"}),
        })
        .await;
    assert!(matches!(result, Err(SessionError::Validation(_))));

    let result = server
        .call_tool(ToolRequest {
            tool_name: "start_session".to_string(),
            params: json!({"capabilities": {"platformName": "Android"}}),
        })
        .await;
    assert!(matches!(result, Err(SessionError::Validation(_))));

    let result = server
        .call_tool(ToolRequest {
            tool_name: "swipe".to_string(),
            params: json!({"startX": 1, "startY": 2, "endX": 3, "endY": 4, "duration": -5}),
        })
        .await;
    assert!(matches!(result, Err(SessionError::Validation(_))));

    assert!(appium.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_tool() {
    let appium = MockServer::start().await;
    let (_, server) = harness(&hub(&appium));

    let result = server
        .call_tool(ToolRequest {
            tool_name: "pinch".to_string(),
            params: json!({}),
        })
        .await;
    assert!(matches!(result, Err(SessionError::UnknownTool(name)) if name == "pinch"));
}

#[tokio::test]
async fn test_tool_schemas_listed() {
    let (_, server) = harness("http://127.0.0.1:4723/wd/hub");
    let names: Vec<String> = server
        .get_tool_schemas()
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["close_session", "start_session", "swipe", "tap"]);
}
