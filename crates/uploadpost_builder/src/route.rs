//! Operation routing: method, path, container, and auth scheme.

use derive_getters::Getters;
use uploadpost_core::{AuthScheme, Fields, Method, Operation, PayloadKind, Platform};
use uploadpost_error::ValidationError;

const PHOTO_PLATFORMS: &[Platform] = &[
    Platform::Tiktok,
    Platform::Instagram,
    Platform::Linkedin,
    Platform::Facebook,
    Platform::X,
    Platform::Threads,
    Platform::Pinterest,
];

const VIDEO_PLATFORMS: &[Platform] = &[
    Platform::Tiktok,
    Platform::Instagram,
    Platform::Linkedin,
    Platform::Youtube,
    Platform::Facebook,
    Platform::X,
    Platform::Threads,
    Platform::Pinterest,
];

const TEXT_PLATFORMS: &[Platform] = &[
    Platform::X,
    Platform::Linkedin,
    Platform::Facebook,
    Platform::Threads,
    Platform::Reddit,
];

/// Where and how an operation is sent.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Route {
    /// HTTP method
    method: Method,
    /// Path relative to the API base URL, path parameters already encoded
    path: String,
    /// Payload container
    payload_kind: PayloadKind,
    /// Authorization scheme
    auth: AuthScheme,
}

/// Platforms an operation accepts; empty for non-upload operations.
pub fn allowed_platforms(operation: Operation) -> &'static [Platform] {
    match operation {
        Operation::UploadPhotos => PHOTO_PLATFORMS,
        Operation::UploadVideo => VIDEO_PLATFORMS,
        Operation::UploadText => TEXT_PLATFORMS,
        _ => &[],
    }
}

/// Container for an operation's payload.
///
/// Uploads always use multipart forms. Otherwise POST carries a JSON body
/// and GET/DELETE a query string, except user deletion which sends JSON.
pub fn payload_kind_for(operation: Operation, method: Method) -> PayloadKind {
    if operation.is_upload() {
        return PayloadKind::MultipartForm;
    }
    match (operation, method) {
        (Operation::DeleteUser, _) => PayloadKind::JsonBody,
        (_, Method::Post) => PayloadKind::JsonBody,
        (_, Method::Get | Method::Delete) => PayloadKind::QueryString,
    }
}

/// Resolve the route for an operation.
///
/// # Errors
///
/// Fails with a missing-field error when a path parameter is absent.
pub fn route(operation: Operation, fields: &Fields) -> Result<Route, ValidationError> {
    let (method, path) = match operation {
        Operation::UploadPhotos => (Method::Post, "/upload_photos".to_string()),
        Operation::UploadVideo => (Method::Post, "/upload".to_string()),
        Operation::UploadText => (Method::Post, "/upload_text".to_string()),
        Operation::GetStatus => (Method::Get, "/uploadposts/status".to_string()),
        Operation::GetHistory => (Method::Get, "/uploadposts/history".to_string()),
        Operation::GetAnalytics => {
            let profile = fields.require_text("analyticsProfileUsername")?;
            (Method::Get, format!("/analytics/{}", urlencoding::encode(&profile)))
        }
        Operation::ListScheduled => (Method::Get, "/uploadposts/schedule".to_string()),
        Operation::CancelScheduled => {
            let job = fields.require_text("scheduleJobId")?;
            (Method::Delete, format!("/uploadposts/schedule/{}", urlencoding::encode(&job)))
        }
        Operation::EditScheduled => {
            let job = fields.require_text("scheduleJobId")?;
            (Method::Post, format!("/uploadposts/schedule/{}", urlencoding::encode(&job)))
        }
        Operation::ListUsers => (Method::Get, "/uploadposts/users".to_string()),
        Operation::CreateUser => (Method::Post, "/uploadposts/users".to_string()),
        Operation::DeleteUser => (Method::Delete, "/uploadposts/users".to_string()),
        Operation::GenerateJwt => (Method::Post, "/uploadposts/users/generate-jwt".to_string()),
        Operation::ValidateJwt => (Method::Post, "/uploadposts/users/validate-jwt".to_string()),
    };
    let auth = match operation {
        Operation::ValidateJwt => AuthScheme::Bearer,
        _ => AuthScheme::ApiKey,
    };
    Ok(Route {
        method,
        payload_kind: payload_kind_for(operation, method),
        path,
        auth,
    })
}
