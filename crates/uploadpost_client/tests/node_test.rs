//! Tests for record execution against a mock API.

use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;
use uploadpost_builder::InMemoryBinaries;
use uploadpost_client::{InputRecord, PollSettings, UploadPostClient, UploadPostNode};
use uploadpost_core::{Attachment, Credentials, Fields};

fn node(url: String) -> UploadPostNode {
    let client =
        UploadPostClient::new(Credentials::new("test-key"), url, Duration::from_secs(10)).unwrap();
    UploadPostNode::new(client, PollSettings::default())
}

fn text_upload() -> Fields {
    Fields::new()
        .with("operation", "uploadText")
        .with("user", "alice")
        .with("title", "Hello from the test suite")
        .with("platform", json!(["x", "youtube"]))
}

#[tokio::test]
async fn test_text_upload_is_sent_as_multipart() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/upload_text")
        .match_header("authorization", "ApiKey test-key")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="user"\r\n\r\nalice"#.to_string()),
            Matcher::Regex(r#"name="platform\[\]"\r\n\r\nx"#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "results": {"x": {"success": true}}}"#)
        .create_async()
        .await;

    let results = node(server.url())
        .execute(&[InputRecord::new(text_upload())])
        .await;

    assert_eq!(results.len(), 1);
    let output = results[0].as_ref().unwrap();
    assert_eq!(output.json()["success"], true);
    assert_eq!(*output.paired_item().item(), 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_binary_video_is_sent_as_file_part() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .match_body(Matcher::Regex(
            r#"name="video"; filename="clip.mp4""#.to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let fields = Fields::new()
        .with("operation", "uploadVideo")
        .with("user", "alice")
        .with("title", "Clip")
        .with("platform", json!(["tiktok"]))
        .with("video", "data");
    let binaries = InMemoryBinaries::new().with(
        "data",
        Attachment::new(b"not really a video".to_vec(), "clip.mp4", Some("video/mp4".to_string())),
    );

    let results = node(server.url())
        .execute(&[InputRecord::new(fields).with_binaries(binaries)])
        .await;
    assert!(results[0].is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_user_sends_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/uploadposts/users")
        .match_body(Matcher::Json(json!({ "username": "bob" })))
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let fields = Fields::new()
        .with("operation", "deleteUser")
        .with("deleteUserId", "bob");
    let results = node(server.url()).execute(&[InputRecord::new(fields)]).await;
    assert!(results[0].is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_failed_record_does_not_stop_the_batch() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/uploadposts/users")
        .with_status(200)
        .with_body(r#"{"profiles": []}"#)
        .create_async()
        .await;

    let records = [
        InputRecord::new(
            text_upload().with("xPollOptions", json!(["a", "b", "c", "d", "e"])),
        ),
        InputRecord::new(Fields::new().with("operation", "listUsers")),
    ];
    let results = node(server.url()).execute(&records).await;

    let err = results[0].as_ref().unwrap_err();
    assert!(err.is_validation());
    let output = results[1].as_ref().unwrap();
    assert_eq!(output.json(), &json!({ "profiles": [] }));
    assert_eq!(*output.paired_item().item(), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_api_errors_are_transport_errors() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/uploadposts/users")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let results = node(server.url())
        .execute(&[InputRecord::new(Fields::new().with("operation", "listUsers"))])
        .await;
    assert!(results[0].as_ref().unwrap_err().is_transport());
}

#[tokio::test]
async fn test_wait_for_completion_returns_polled_status() {
    let mut server = Server::new_async().await;
    let submit = server
        .mock("POST", "/upload_text")
        .with_status(200)
        .with_body(r#"{"success": true, "request_id": "req-42"}"#)
        .create_async()
        .await;
    let status = server
        .mock("GET", "/uploadposts/status")
        .match_query(Matcher::UrlEncoded("request_id".into(), "req-42".into()))
        .with_status(200)
        .with_body(r#"{"status": "completed", "request_id": "req-42"}"#)
        .expect(1)
        .create_async()
        .await;

    let fields = text_upload()
        .with("waitForCompletion", true)
        .with("pollInterval", 1)
        .with("pollTimeout", 30);
    let results = node(server.url()).execute(&[InputRecord::new(fields)]).await;

    let output = results[0].as_ref().unwrap();
    assert_eq!(output.json()["status"], "completed");
    submit.assert_async().await;
    status.assert_async().await;
}

#[tokio::test]
async fn test_without_request_id_the_submission_is_returned() {
    let mut server = Server::new_async().await;
    let _submit = server
        .mock("POST", "/upload_text")
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;
    let status = server
        .mock("GET", "/uploadposts/status")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let fields = text_upload().with("waitForCompletion", true);
    let results = node(server.url()).execute(&[InputRecord::new(fields)]).await;

    assert_eq!(results[0].as_ref().unwrap().json(), &json!({ "success": true }));
    status.assert_async().await;
}

#[tokio::test]
async fn test_non_upload_operations_never_poll() {
    let mut server = Server::new_async().await;
    let submit = server
        .mock("POST", "/uploadposts/users")
        .match_body(Matcher::Json(json!({ "username": "bob" })))
        .with_status(200)
        .with_body(r#"{"success": true, "request_id": "req-7"}"#)
        .create_async()
        .await;
    let status = server
        .mock("GET", "/uploadposts/status")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let fields = Fields::new()
        .with("operation", "createUser")
        .with("newUser", "bob")
        .with("waitForCompletion", true);
    let results = node(server.url()).execute(&[InputRecord::new(fields)]).await;

    assert_eq!(results[0].as_ref().unwrap().json()["request_id"], "req-7");
    submit.assert_async().await;
    status.assert_async().await;
}

#[tokio::test]
async fn test_unknown_operation_fails_validation() {
    let server = Server::new_async().await;
    let fields = Fields::new().with("operation", "uploadAudio");
    let results = node(server.url()).execute(&[InputRecord::new(fields)]).await;

    let err = results[0].as_ref().unwrap_err();
    assert!(err.is_validation());
}
