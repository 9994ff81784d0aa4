use serde_json::json;
use slacky::backend::{BackendError, ChatBackend, Conversation, ConversationKind, SlackClient};
use wiremock::{
    matchers::{body_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

// ============================================================================
// Helper Functions
// ============================================================================

const TOKEN: &str = "xoxb-test";

fn client_for(server: &MockServer) -> SlackClient {
    SlackClient::new(TOKEN.to_string(), Some(format!("{}/", server.uri())))
}

fn ok(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

fn slack_error(code: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "ok": false, "error": code }))
}

// ============================================================================
// Directory Listing
// ============================================================================

#[tokio::test]
async fn test_users_list_follows_cursor_and_skips_deleted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users.list"))
        .and(query_param("cursor", "page2"))
        .respond_with(ok(json!({
            "ok": true,
            "members": [{ "id": "U3", "name": "carol" }],
            "response_metadata": { "next_cursor": "" }
        })))
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users.list"))
        .and(header("authorization", "Bearer xoxb-test"))
        .respond_with(ok(json!({
            "ok": true,
            "members": [
                { "id": "U1", "name": "alice", "profile": { "display_name": "Alice A." } },
                { "id": "U2", "name": "bob", "deleted": true }
            ],
            "response_metadata": { "next_cursor": "page2" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let users = client_for(&mock_server).list_direct_users().await.unwrap();

    assert_eq!(
        users,
        vec![
            Conversation::user("U1", "Alice A."),
            Conversation::user("U3", "carol"),
        ]
    );
}

#[tokio::test]
async fn test_endless_cursor_stops_at_page_cap() {
    let mock_server = MockServer::start().await;

    // Every page claims there is another one
    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .respond_with(ok(json!({
            "ok": true,
            "channels": [{ "id": "C1", "name": "general" }],
            "response_metadata": { "next_cursor": "again" }
        })))
        .expect(50)
        .mount(&mock_server)
        .await;

    let channels = client_for(&mock_server).list_channels().await.unwrap();

    assert_eq!(channels.len(), 50);
}

#[tokio::test]
async fn test_list_channels_requests_public_and_private() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .and(query_param("types", "public_channel,private_channel"))
        .and(query_param("exclude_archived", "true"))
        .respond_with(ok(json!({
            "ok": true,
            "channels": [
                { "id": "C1", "name": "general" },
                { "id": "C2", "name": "old", "is_archived": true },
                { "id": "C3", "name": "random" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let channels = client_for(&mock_server).list_channels().await.unwrap();

    let names: Vec<&str> = channels.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["general", "random"]);
    assert!(channels.iter().all(|c| c.kind == ConversationKind::Channel));
}

#[tokio::test]
async fn test_list_direct_messages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .and(query_param("types", "im"))
        .respond_with(ok(json!({
            "ok": true,
            "channels": [
                { "id": "D1", "user": "U2" },
                { "id": "D2" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let ims = client_for(&mock_server).list_direct_messages().await.unwrap();

    assert_eq!(ims.len(), 1);
    assert_eq!(ims[0].id, "D1");
    assert_eq!(ims[0].user_id, "U2");
}

// ============================================================================
// History
// ============================================================================

#[tokio::test]
async fn test_history_is_returned_oldest_first() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/conversations.history"))
        .and(query_param("channel", "C1"))
        .and(query_param("limit", "3"))
        .respond_with(ok(json!({
            "ok": true,
            "messages": [
                { "user": "U2", "text": "third" },
                { "bot_id": "B1", "text": "second" },
                { "user": "U1", "text": "first" }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let history = client_for(&mock_server)
        .fetch_history(&Conversation::channel("C1", "general"), 3)
        .await
        .unwrap();

    let texts: Vec<&str> = history.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
    assert_eq!(history[0].sender, "U1");
    assert_eq!(history[1].sender, "B1");
}

#[tokio::test]
async fn test_history_for_user_opens_dm_first() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/conversations.open"))
        .and(body_json(json!({ "users": "U1" })))
        .respond_with(ok(json!({ "ok": true, "channel": { "id": "D42" } })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/conversations.history"))
        .and(query_param("channel", "D42"))
        .respond_with(ok(json!({
            "ok": true,
            "messages": [{ "user": "U1", "text": "hey" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let history = client_for(&mock_server)
        .fetch_history(&Conversation::user("U1", "alice"), 10)
        .await
        .unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].text, "hey");
}

// ============================================================================
// Posting
// ============================================================================

#[tokio::test]
async fn test_post_message_sends_json_with_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .and(header("authorization", "Bearer xoxb-test"))
        .and(body_json(json!({ "channel": "C1", "text": "hello there" })))
        .respond_with(ok(json!({ "ok": true, "ts": "1700000000.000100" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .post_message(&Conversation::channel("C1", "general"), "hello there")
        .await;

    assert!(result.is_ok());
}

// ============================================================================
// Error Handling
// ============================================================================

#[tokio::test]
async fn test_invalid_auth_is_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users.list"))
        .respond_with(slack_error("invalid_auth"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).list_direct_users().await.unwrap_err();

    assert_eq!(err, BackendError::Auth("invalid_auth".to_string()));
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_unknown_channel_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/conversations.history"))
        .respond_with(slack_error("channel_not_found"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .fetch_history(&Conversation::channel("C404", "gone"), 10)
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::NotFound(_)));
}

#[tokio::test]
async fn test_other_slack_error_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .respond_with(slack_error("msg_too_long"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .post_message(&Conversation::channel("C1", "general"), "x")
        .await
        .unwrap_err();

    assert_eq!(err, BackendError::Api("msg_too_long".to_string()));
}

#[tokio::test]
async fn test_http_500_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).list_channels().await.unwrap_err();

    assert!(matches!(err, BackendError::Transport(_)));
}

#[tokio::test]
async fn test_garbage_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users.list"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).list_direct_users().await.unwrap_err();

    assert!(matches!(err, BackendError::Parse(_)));
}
