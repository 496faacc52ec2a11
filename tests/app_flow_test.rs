//! End-to-end conversation flow tests against a mock backend.

use campaign_tui::app::{App, AppMessage};
use campaign_tui::config::AppConfig;
use campaign_tui::models::{Channel, DataSource, MessageRole};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(server: &MockServer) -> App {
    let mut app = App::new(AppConfig::default().with_base_url(server.uri()));
    app.data_sources = vec![
        DataSource {
            source_type: "shopify".to_string(),
            name: "Shopify".to_string(),
            connected: true,
        },
        DataSource {
            source_type: "gtm".to_string(),
            name: "Google Tag Manager".to_string(),
            connected: false,
        },
    ];
    app.channels = vec![Channel {
        channel_type: "email".to_string(),
        name: "Email".to_string(),
        enabled: true,
    }];
    app
}

/// Drain messages from the app's receiver into the app until the
/// stream settles (Done event, StreamEnded, or StreamFailed).
async fn drain_until_settled(app: &mut App) {
    let mut rx = app.message_rx.take().expect("receiver already taken");
    while let Some(message) = rx.recv().await {
        let settled = matches!(
            message,
            AppMessage::StreamEvent(campaign_tui::stream::StreamEvent::Done)
                | AppMessage::StreamEnded
                | AppMessage::StreamFailed { .. }
        );
        app.handle_message(message);
        if settled {
            break;
        }
    }
    app.message_rx = Some(rx);
}

#[tokio::test]
async fn submit_with_nothing_connected_never_hits_the_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/stream"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    for source in &mut app.data_sources {
        source.connected = false;
    }
    app.input = "recommend a campaign".to_string();
    app.submit_input();

    assert!(!app.is_streaming);
    let last = app.messages.last().unwrap();
    assert_eq!(last.role, MessageRole::System);
    assert!(last.content.contains("connect at least one data source"));

    mock_server.verify().await;
}

#[tokio::test]
async fn submit_sends_only_connected_sources_and_enabled_channels() {
    let mock_server = MockServer::start().await;

    let body = "data: {\"type\": \"status\", \"message\": \"Analyzing your data sources...\"}\n\
                data: {\"type\": \"recommendation\", \"data\": {\"campaign_id\": \"c-1\", \"channel\": \"email\", \"confidence_score\": 92.5}}\n\
                data: {\"type\": \"summary\", \"message\": \"Generated 1 campaign recommendations.\"}\n\
                data: [DONE]\n";

    // gtm is disconnected above, so only shopify should be sent
    Mock::given(method("POST"))
        .and(path("/chat/stream"))
        .and(body_json(json!({
            "message": "recommend a campaign",
            "data_sources": ["shopify"],
            "channels": ["email"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/plain"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    app.input = "recommend a campaign".to_string();
    app.submit_input();
    assert!(app.is_streaming);

    drain_until_settled(&mut app).await;

    assert!(!app.is_streaming);
    let roles: Vec<MessageRole> = app.messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::Assistant, // welcome
            MessageRole::User,
            MessageRole::Assistant, // status
            MessageRole::Recommendation,
            MessageRole::Assistant, // summary
        ]
    );

    // The raw payload survives untouched on the log entry
    let recommendation = &app.messages[3];
    assert_eq!(
        recommendation.data,
        Some(json!({"campaign_id": "c-1", "channel": "email", "confidence_score": 92.5}))
    );
    assert_eq!(app.current_recommendations.len(), 1);

    mock_server.verify().await;
}

#[tokio::test]
async fn stream_closing_without_sentinel_still_completes() {
    let mock_server = MockServer::start().await;

    let body = "data: {\"type\": \"status\", \"message\": \"working\"}\n";

    Mock::given(method("POST"))
        .and(path("/chat/stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/plain"))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    app.input = "hello".to_string();
    app.submit_input();

    drain_until_settled(&mut app).await;

    assert!(!app.is_streaming);
    let last = app.messages.last().unwrap();
    assert_eq!(last.content, "🔄 working");
}

#[tokio::test]
async fn rejected_stream_request_surfaces_one_error_notice() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/stream"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    app.input = "hello".to_string();
    app.submit_input();

    drain_until_settled(&mut app).await;

    assert!(!app.is_streaming);
    let notices: Vec<&str> = app
        .messages
        .iter()
        .filter(|m| m.role == MessageRole::System)
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(
        notices,
        vec!["❌ Error generating recommendations. Please try again."]
    );
}
