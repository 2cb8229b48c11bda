//! Tests for record files and offline request building.

use serde_json::json;
use std::io::Write;
use uploadpost::cli::handle_build_command;
use uploadpost::{
    ConfigErrorKind, Credentials, MediaItem, NoBinaries, PayloadValue, RequestBuilder,
    UploadPostConfig, parse_records,
};

#[test]
fn test_single_record_and_array_are_accepted() {
    let one = parse_records(r#"{"operation": "listUsers"}"#).unwrap();
    assert_eq!(one.len(), 1);

    let many = parse_records(r#"[{"operation": "listUsers"}, {"operation": "getHistory"}]"#)
        .unwrap();
    assert_eq!(many.len(), 2);
    assert_eq!(many[1].fields().text("operation").as_deref(), Some("getHistory"));

    let err = parse_records("42").unwrap_err();
    assert!(matches!(err.kind(), ConfigErrorKind::InvalidRecords(_)));
}

#[test]
fn test_binary_section_resolves_files() {
    let mut photo = tempfile::NamedTempFile::new().unwrap();
    photo.write_all(b"jpeg bytes").unwrap();

    let contents = json!([{
        "operation": "uploadPhotos",
        "user": "alice",
        "title": "Gallery",
        "platform": ["instagram"],
        "photos": "data, https://img.test/2.jpg",
        "binary": {
            "data": { "path": photo.path(), "fileName": "one.jpg", "mimeType": "image/jpeg" }
        }
    }])
    .to_string();
    let records = parse_records(&contents).unwrap();
    assert!(records[0].fields().raw("binary").is_none());

    let request = RequestBuilder::new(Credentials::new("k"))
        .build_record(records[0].fields(), records[0].binaries())
        .unwrap();
    match request.payload().get("photos[]") {
        Some(PayloadValue::Media(items)) => {
            assert_eq!(items.len(), 2);
            assert!(matches!(&items[0], MediaItem::File(file) if file.bytes() == b"jpeg bytes"));
        }
        other => panic!("unexpected photos value: {other:?}"),
    }

    // Without the binary section the reference is dropped, not an error.
    let bare = RequestBuilder::new(Credentials::new("k"))
        .build_record(records[0].fields(), &NoBinaries)
        .unwrap();
    match bare.payload().get("photos[]") {
        Some(PayloadValue::Media(items)) => assert_eq!(items.len(), 1),
        other => panic!("unexpected photos value: {other:?}"),
    }
}

#[test]
fn test_build_command_masks_key_and_reports_errors() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    write!(
        input,
        "{}",
        json!([
            { "operation": "createUser", "newUser": "bob" },
            { "operation": "uploadText", "user": "alice", "title": "Poll",
              "platform": ["x"], "xPollOptions": "a,b,c,d,e" }
        ])
    )
    .unwrap();

    let config = UploadPostConfig::parse(r#"api_key = "secret""#).unwrap();
    let output = handle_build_command(&config, input.path()).unwrap();

    assert_eq!(output[0]["method"], "POST");
    assert_eq!(output[0]["path"], "/uploadposts/users");
    assert_eq!(output[0]["headers"]["Authorization"], "ApiKey ***");
    assert_eq!(output[0]["payload"], json!({ "username": "bob" }));

    assert_eq!(output[1]["pairedItem"]["item"], 1);
    assert!(output[1]["error"].as_str().unwrap().contains("Found: 5"));
}
