//! The finished outbound request.

use crate::{Method, Operation, Payload, PayloadKind};
use derive_getters::Getters;
use serde_json::{Value as JsonValue, json};
use std::collections::BTreeMap;

/// Name of the single authentication header every request carries.
pub const AUTHORIZATION: &str = "Authorization";

/// Authentication scheme for the Authorization header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum AuthScheme {
    /// `ApiKey <key>` using the stored credential
    #[strum(serialize = "ApiKey")]
    ApiKey,
    /// `Bearer <token>` using a caller-supplied token
    #[strum(serialize = "Bearer")]
    Bearer,
}

impl AuthScheme {
    /// Render the header value for a secret.
    pub fn header_value(self, secret: &str) -> String {
        format!("{} {}", self, secret)
    }
}

/// Output of the request builder.
///
/// The payload lives in exactly one container, named by `payload_kind`;
/// the other two containers are empty by construction.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct UploadRequest {
    /// Operation the request performs
    operation: Operation,
    /// HTTP method
    method: Method,
    /// Path relative to the API base URL
    path: String,
    /// Request headers, always including [`AUTHORIZATION`]
    headers: BTreeMap<String, String>,
    /// Which container carries the payload
    payload_kind: PayloadKind,
    /// Ordered payload entries
    payload: Payload,
}

impl UploadRequest {
    /// Assemble a request with a single Authorization header.
    pub fn new(
        operation: Operation,
        method: Method,
        path: impl Into<String>,
        auth: AuthScheme,
        secret: &str,
        payload_kind: PayloadKind,
        payload: Payload,
    ) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(AUTHORIZATION.to_string(), auth.header_value(secret));
        Self {
            operation,
            method,
            path: path.into(),
            headers,
            payload_kind,
            payload,
        }
    }

    /// The Authorization header value.
    pub fn authorization(&self) -> Option<&str> {
        self.headers.get(AUTHORIZATION).map(String::as_str)
    }

    /// JSON body, when the payload is carried as one.
    pub fn json_body(&self) -> Option<JsonValue> {
        (self.payload_kind == PayloadKind::JsonBody).then(|| self.payload.to_json())
    }

    /// Query-string pairs, when the payload is carried as one.
    pub fn query(&self) -> Option<Vec<(String, String)>> {
        (self.payload_kind == PayloadKind::QueryString).then(|| self.payload.to_query_pairs())
    }

    /// Multipart form entries, when the payload is carried as one.
    pub fn form(&self) -> Option<&Payload> {
        (self.payload_kind == PayloadKind::MultipartForm).then_some(&self.payload)
    }

    /// Render the request for display, with secrets masked and binary
    /// content summarised.
    pub fn describe(&self) -> JsonValue {
        let headers: BTreeMap<&str, String> = self
            .headers
            .iter()
            .map(|(name, value)| {
                let masked = match value.split_once(' ') {
                    Some((scheme, _)) if name == AUTHORIZATION => format!("{} ***", scheme),
                    _ => value.clone(),
                };
                (name.as_str(), masked)
            })
            .collect();
        json!({
            "operation": self.operation.to_string(),
            "method": self.method.to_string(),
            "path": self.path,
            "headers": headers,
            "payloadKind": self.payload_kind.to_string(),
            "payload": self.payload.to_json(),
        })
    }
}
