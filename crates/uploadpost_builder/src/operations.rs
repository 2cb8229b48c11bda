//! Resolution steps for the account, status, and scheduling operations.

use crate::{Entries, StepContext, normalize_date};
use uploadpost_core::PayloadBuilder;
use uploadpost_error::ValidationError;

const DEFAULT_HISTORY_PAGE: i64 = 1;
const DEFAULT_HISTORY_LIMIT: i64 = 20;

fn platform_names(ctx: &StepContext<'_>, field: &str) -> Result<Vec<String>, ValidationError> {
    Ok(ctx
        .fields()
        .platforms(field)?
        .iter()
        .map(ToString::to_string)
        .collect())
}

/// `request_id` for a status check.
pub fn status(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    Ok(PayloadBuilder::new()
        .with("request_id", ctx.fields().require_text("requestId")?)
        .into_entries())
}

/// `page` and `limit` for upload history.
pub fn history(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    Ok(PayloadBuilder::new()
        .with("page", ctx.try_integer("historyPage")?.unwrap_or(DEFAULT_HISTORY_PAGE))
        .with("limit", ctx.try_integer("historyLimit")?.unwrap_or(DEFAULT_HISTORY_LIMIT))
        .into_entries())
}

/// Optional comma-joined `platforms` filter for analytics.
pub fn analytics(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    let platforms = platform_names(ctx, "analyticsPlatforms")?;
    Ok(PayloadBuilder::new()
        .with_opt(
            "platforms",
            (!platforms.is_empty()).then(|| platforms.join(",")),
        )
        .into_entries())
}

/// New `scheduled_date` for a scheduled post.
pub fn edit_schedule(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    Ok(PayloadBuilder::new()
        .with_opt(
            "scheduled_date",
            ctx.text("newScheduledDate").map(|date| normalize_date(&date)),
        )
        .into_entries())
}

/// `username` of the profile to create.
pub fn create_user(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    Ok(PayloadBuilder::new()
        .with("username", ctx.fields().require_text("newUser")?)
        .into_entries())
}

/// `username` of the profile to delete.
pub fn delete_user(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    Ok(PayloadBuilder::new()
        .with("username", ctx.fields().require_text("deleteUserId")?)
        .into_entries())
}

/// Connection-URL request for a profile.
pub fn generate_jwt(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    let platforms = platform_names(ctx, "jwtPlatforms")?;
    Ok(PayloadBuilder::new()
        .with("username", ctx.fields().require_text("user")?)
        .with_opt("redirect_url", ctx.text("redirectUrl"))
        .with_opt("logo_image", ctx.text("logoImage"))
        .with_opt("redirect_button_text", ctx.text("redirectButtonText"))
        .with_opt("platforms", (!platforms.is_empty()).then_some(platforms))
        .into_entries())
}

/// The token to validate.
pub fn validate_jwt(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    Ok(PayloadBuilder::new()
        .with("jwt", ctx.fields().require_text("jwtToken")?)
        .into_entries())
}
