//! Request construction: route, filter, fold, freeze.

use crate::{BinaryResolver, Step, StepContext, allowed_platforms, operations, route, upload};
use tracing::{debug, instrument};
use uploadpost_core::{
    AuthScheme, Credentials, Fields, Operation, PayloadBuilder, Platform, UploadRequest,
};
use uploadpost_error::ValidationError;

const UPLOAD_STEPS: &[Step] = &[
    upload::common,
    upload::titles,
    upload::descriptions,
    upload::platform_list,
    upload::media,
    upload::platform_options,
];
const STATUS_STEPS: &[Step] = &[operations::status];
const HISTORY_STEPS: &[Step] = &[operations::history];
const ANALYTICS_STEPS: &[Step] = &[operations::analytics];
const EDIT_SCHEDULE_STEPS: &[Step] = &[operations::edit_schedule];
const CREATE_USER_STEPS: &[Step] = &[operations::create_user];
const DELETE_USER_STEPS: &[Step] = &[operations::delete_user];
const GENERATE_JWT_STEPS: &[Step] = &[operations::generate_jwt];
const VALIDATE_JWT_STEPS: &[Step] = &[operations::validate_jwt];

/// Builds [`UploadRequest`]s from operation selections and field values.
///
/// Construction is pure: no network I/O happens here. Binary references the
/// resolver cannot satisfy are logged and left out of the payload.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    credentials: Credentials,
}

impl RequestBuilder {
    /// Create a builder that signs requests with the stored API key.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Resolution steps for an operation, in payload order.
    pub fn steps(operation: Operation) -> &'static [Step] {
        match operation {
            Operation::UploadPhotos | Operation::UploadVideo | Operation::UploadText => UPLOAD_STEPS,
            Operation::GetStatus => STATUS_STEPS,
            Operation::GetHistory => HISTORY_STEPS,
            Operation::GetAnalytics => ANALYTICS_STEPS,
            Operation::EditScheduled => EDIT_SCHEDULE_STEPS,
            Operation::CreateUser => CREATE_USER_STEPS,
            Operation::DeleteUser => DELETE_USER_STEPS,
            Operation::GenerateJwt => GENERATE_JWT_STEPS,
            Operation::ValidateJwt => VALIDATE_JWT_STEPS,
            Operation::ListScheduled | Operation::CancelScheduled | Operation::ListUsers => &[],
        }
    }

    /// Build the request for one operation.
    ///
    /// Platforms outside the operation's allow-list are dropped silently.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a required field is missing or a
    /// cross-field rule is violated.
    #[instrument(skip(self, platforms, fields, binaries), fields(operation = %operation))]
    pub fn build(
        &self,
        operation: Operation,
        platforms: &[Platform],
        fields: &Fields,
        binaries: &dyn BinaryResolver,
    ) -> Result<UploadRequest, ValidationError> {
        let route = route(operation, fields)?;
        let allowed = allowed_platforms(operation);
        let mut selection: Vec<Platform> = Vec::new();
        for platform in platforms {
            if !allowed.contains(platform) {
                debug!(%platform, "Dropping platform not supported by operation");
            } else if !selection.contains(platform) {
                selection.push(*platform);
            }
        }

        let ctx = StepContext::new(operation, selection, fields, binaries);
        let payload = Self::steps(operation)
            .iter()
            .try_fold(PayloadBuilder::new(), |builder, step| {
                Ok::<_, ValidationError>(builder.extend(step(&ctx)?))
            })?
            .freeze(*route.payload_kind());

        let secret = match route.auth() {
            AuthScheme::Bearer => fields.require_text("jwtToken")?,
            AuthScheme::ApiKey => self.credentials.api_key().to_string(),
        };

        debug!(
            method = %route.method(),
            path = %route.path(),
            payload_kind = %route.payload_kind(),
            keys = payload.len(),
            "Built request"
        );

        Ok(UploadRequest::new(
            operation,
            *route.method(),
            route.path().clone(),
            *route.auth(),
            &secret,
            *route.payload_kind(),
            payload,
        ))
    }

    /// Build a request from a record whose fields carry the `operation`
    /// selector and, for uploads, the `platform` selection.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an unknown operation or platform, or
    /// any failure of [`RequestBuilder::build`].
    pub fn build_record(
        &self,
        fields: &Fields,
        binaries: &dyn BinaryResolver,
    ) -> Result<UploadRequest, ValidationError> {
        let operation = Operation::parse(&fields.require_text("operation")?)?;
        let platforms = if operation.is_upload() {
            fields.platforms("platform")?
        } else {
            Vec::new()
        };
        self.build(operation, &platforms, fields, binaries)
    }
}
