//! Per-platform payload rules.
//!
//! Each [`Platform`] maps to a [`PlatformRules`] value through an exhaustive
//! match, so adding a platform fails to compile until its rules exist.

use crate::media::{is_url, resolve_binary};
use crate::validation::{
    POLL_DURATION_DEFAULT, check_exclusive, check_non_negative, check_poll_duration,
    parse_poll_options,
};
use crate::{Entries, Step, StepContext};
use derive_getters::Getters;
use uploadpost_core::{Operation, PayloadBuilder, Platform};
use uploadpost_error::ValidationError;

/// A platform-specific override of a generic field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Override {
    /// Host parameter carrying the override
    field: &'static str,
    /// Payload key the override is sent under
    key: &'static str,
}

impl Override {
    const fn new(field: &'static str, key: &'static str) -> Self {
        Self { field, key }
    }

    /// Host parameter carrying the override.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Payload key the override is sent under.
    pub fn key(&self) -> &'static str {
        self.key
    }
}

/// How one platform contributes to an upload payload.
#[derive(Clone, Copy, Getters)]
pub struct PlatformRules {
    /// Platform these rules belong to
    platform: Platform,
    /// Title override, if the platform has one
    title: Option<Override>,
    /// Description override; platforms with one also consume the generic description
    description: Option<Override>,
    /// Platform-specific options step
    #[getter(skip)]
    options: Step,
}

impl PlatformRules {
    /// True when the platform reads the shared `description` key.
    pub fn consumes_description(&self) -> bool {
        self.description.is_some()
    }

    /// Resolve the platform-specific options for the current upload.
    ///
    /// # Errors
    ///
    /// Propagates validation failures of the platform's fields.
    pub fn options(&self, ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
        (self.options)(ctx)
    }
}

impl std::fmt::Debug for PlatformRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformRules")
            .field("platform", &self.platform)
            .field("title", &self.title)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Rules for a platform.
pub fn rules_for(platform: Platform) -> PlatformRules {
    let (title, description, options): (Option<Override>, Option<Override>, Step) = match platform
    {
        Platform::Facebook => (
            Some(Override::new("facebookTitle", "facebook_title")),
            Some(Override::new("facebookDescription", "facebook_description")),
            facebook,
        ),
        Platform::Instagram => (
            Some(Override::new("instagramTitle", "instagram_title")),
            None,
            instagram,
        ),
        Platform::Linkedin => (
            Some(Override::new("linkedinTitle", "linkedin_title")),
            Some(Override::new("linkedinDescription", "linkedin_description")),
            linkedin,
        ),
        Platform::Pinterest => (
            Some(Override::new("pinterestTitle", "pinterest_title")),
            Some(Override::new("pinterestDescription", "pinterest_description")),
            pinterest,
        ),
        Platform::Reddit => (None, None, reddit),
        Platform::Threads => (None, None, threads),
        Platform::Tiktok => (
            Some(Override::new("tiktokTitle", "tiktok_title")),
            Some(Override::new("tiktokDescription", "tiktok_description")),
            tiktok,
        ),
        Platform::X => (Some(Override::new("xTitle", "x_title")), None, x),
        Platform::Youtube => (
            Some(Override::new("youtubeTitle", "youtube_title")),
            Some(Override::new("youtubeDescription", "youtube_description")),
            youtube,
        ),
    };
    PlatformRules {
        platform,
        title,
        description,
        options,
    }
}

/// Optional non-negative integer field.
fn index(ctx: &StepContext<'_>, field: &str) -> Result<Option<i64>, ValidationError> {
    ctx.try_integer(field)?
        .map(|value| check_non_negative(field, value))
        .transpose()
}

/// Boolean sent only when set to true.
fn enabled(ctx: &StepContext<'_>, field: &str) -> Option<bool> {
    ctx.flag(field).filter(|on| *on)
}

/// Extract the numeric page id from a value such as `urn:li:organization:123`.
fn linkedin_page_id(value: &str) -> String {
    let prefix = value.trim_end_matches(|c: char| c.is_ascii_digit());
    if prefix.len() == value.len() {
        value.to_string()
    } else {
        value[prefix.len()..].to_string()
    }
}

fn linkedin(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    let page = ctx
        .text("targetLinkedinPageId")
        .filter(|id| id != "me")
        .map(|id| linkedin_page_id(&id));
    let visibility = match ctx.operation() {
        Operation::UploadPhotos => ctx.text("linkedinVisibility").filter(|v| v == "PUBLIC"),
        Operation::UploadVideo => {
            Some(ctx.text("linkedinVisibility").unwrap_or_else(|| "PUBLIC".to_string()))
        }
        _ => None,
    };
    Ok(PayloadBuilder::new()
        .with_opt("target_linkedin_page_id", page)
        .with_opt("visibility", visibility)
        .into_entries())
}

fn facebook(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    let builder = PayloadBuilder::new()
        .with("facebook_page_id", ctx.fields().require_text("facebookPageId")?);
    let builder = match ctx.operation() {
        Operation::UploadVideo => builder
            .with_opt("video_state", ctx.text("facebookVideoState"))
            .with_opt("facebook_media_type", ctx.text("facebookMediaType")),
        Operation::UploadText => builder.with_opt("facebook_link_url", ctx.text("facebookLink")),
        _ => builder,
    };
    Ok(builder.into_entries())
}

fn tiktok(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    let builder = match ctx.operation() {
        Operation::UploadPhotos => {
            // Only fills in when no shared description is going out.
            let description = ctx
                .text("tiktokPhotoDescription")
                .filter(|_| !ctx.generic_description_sent());
            PayloadBuilder::new()
                .with_opt("auto_add_music", ctx.flag("tiktokAutoAddMusic"))
                .with_opt("disable_comment", ctx.flag("tiktokDisableComment"))
                .with_opt("brand_content_toggle", ctx.flag("brand_content_toggle"))
                .with_opt("brand_organic_toggle", ctx.flag("brand_organic_toggle"))
                .with_opt("photo_cover_index", index(ctx, "tiktokPhotoCoverIndex")?)
                .with_opt("description", description)
        }
        Operation::UploadVideo => PayloadBuilder::new()
            .with_opt("privacy_level", ctx.text("tiktokPrivacyLevel"))
            .with_opt("disable_duet", ctx.flag("tiktokDisableDuet"))
            .with_opt("disable_comment", ctx.flag("tiktokDisableComment"))
            .with_opt("disable_stitch", ctx.flag("tiktokDisableStitch"))
            .with_opt("cover_timestamp", index(ctx, "tiktokCoverTimestamp")?)
            .with_opt("brand_content_toggle", ctx.flag("brand_content_toggle"))
            .with_opt("brand_organic_toggle", ctx.flag("brand_organic_toggle"))
            .with_opt("is_aigc", ctx.flag("tiktokIsAigc"))
            .with_opt("post_mode", ctx.text("tiktokPostMode")),
        _ => PayloadBuilder::new(),
    };
    Ok(builder.into_entries())
}

fn instagram(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    let requested = ctx.text("instagramMediaType");
    let pick = |accepted: &[&str], fallback: &str| match &requested {
        Some(value) if accepted.contains(&value.as_str()) => value.clone(),
        _ => fallback.to_string(),
    };
    let builder = match ctx.operation() {
        Operation::UploadPhotos => {
            PayloadBuilder::new().with("media_type", pick(&["IMAGE", "STORIES"], "IMAGE"))
        }
        Operation::UploadVideo => PayloadBuilder::new()
            .with("media_type", pick(&["REELS", "STORIES"], "REELS"))
            .with_opt("share_to_feed", ctx.flag("instagramShareToFeed"))
            .with_opt("collaborators", ctx.text("instagramCollaborators"))
            .with_opt("cover_url", ctx.text("instagramCoverUrl"))
            .with_opt("audio_name", ctx.text("instagramAudioName"))
            .with_opt("user_tags", ctx.text("instagramUserTags"))
            .with_opt("location_id", ctx.text("instagramLocationId"))
            .with_opt("thumb_offset", ctx.text("instagramThumbOffset")),
        _ => PayloadBuilder::new().with_opt("media_type", requested.clone()),
    };
    Ok(builder.into_entries())
}

fn youtube(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    if *ctx.operation() != Operation::UploadVideo {
        return Ok(Vec::new());
    }
    let tags = ctx.fields().string_list("youtubeTags");
    let mut builder = PayloadBuilder::new()
        .with_opt("tags[]", (!tags.is_empty()).then_some(tags))
        .with_opt("categoryId", ctx.text("youtubeCategoryId"))
        .with_opt("privacyStatus", ctx.text("youtubePrivacyStatus"))
        .with_opt("embeddable", ctx.flag("youtubeEmbeddable"))
        .with_opt("license", ctx.text("youtubeLicense"))
        .with_opt("publicStatsViewable", ctx.flag("youtubePublicStatsViewable"))
        .with_opt("madeForKids", ctx.flag("youtubeMadeForKids"));

    if let Some(thumbnail) = ctx.text("youtubeThumbnail") {
        builder = if is_url(&thumbnail) {
            builder.with("thumbnail_url", thumbnail)
        } else {
            builder.with_opt("thumbnail", resolve_binary(ctx.binaries(), &thumbnail))
        };
    }

    Ok(builder
        .with_opt("selfDeclaredMadeForKids", ctx.flag("youtubeSelfDeclaredMadeForKids"))
        .with_opt("containsSyntheticMedia", ctx.flag("youtubeContainsSyntheticMedia"))
        .with_opt("defaultLanguage", ctx.text("youtubeDefaultLanguage"))
        .with_opt("defaultAudioLanguage", ctx.text("youtubeDefaultAudioLanguage"))
        .with_opt("allowedCountries", ctx.text("youtubeAllowedCountries"))
        .with_opt("blockedCountries", ctx.text("youtubeBlockedCountries"))
        .with_opt("hasPaidProductPlacement", ctx.flag("youtubeHasPaidProductPlacement"))
        .with_opt("recordingDate", ctx.text("youtubeRecordingDate"))
        .into_entries())
}

fn pinterest(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    let builder = PayloadBuilder::new()
        .with_opt("pinterest_board_id", ctx.text("pinterestBoardId"))
        .with_opt("pinterest_link", ctx.text("pinterestLink"));
    if *ctx.operation() != Operation::UploadVideo {
        return Ok(builder.into_entries());
    }

    // Cover precedence: url, then explicit image data, then key frame.
    let cover_type = ctx.text("pinterestCoverImageContentType");
    let cover_data = ctx.text("pinterestCoverImageData");
    let builder = match (ctx.text("pinterestCoverImageUrl"), cover_type, cover_data) {
        (Some(url), _, _) => builder.with("pinterest_cover_image_url", url),
        (None, Some(content_type), Some(data)) => builder
            .with("pinterest_cover_image_content_type", content_type)
            .with("pinterest_cover_image_data", data),
        _ => builder.with_opt(
            "pinterest_cover_image_key_frame_time",
            index(ctx, "pinterestCoverImageKeyFrameTime")?,
        ),
    };
    Ok(builder.into_entries())
}

fn x(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    let quote = ctx.text("xQuoteTweetId");
    let deep_link = ctx.text("xDirectMessageDeepLink");
    let card = ctx.text("xCardUri");

    let builder = PayloadBuilder::new()
        .with_opt("quote_tweet_id", quote.clone())
        .with_opt("geo_place_id", ctx.text("xGeoPlaceId"))
        .with_opt("for_super_followers_only", enabled(ctx, "xForSuperFollowersOnly"))
        .with_opt("community_id", ctx.text("xCommunityId"))
        .with_opt("share_with_followers", enabled(ctx, "xShareWithFollowers"))
        .with_opt("direct_message_deep_link", deep_link.clone())
        .with_opt("card_uri", card.clone())
        .with_opt(
            "reply_settings",
            ctx.text("xReplySettings").filter(|s| s != "everyone"),
        );

    let builder = match ctx.operation() {
        Operation::UploadText => {
            let post_url = ctx.text("xPostUrlText");
            let mut builder = builder.with_opt("post_url", post_url.clone());

            let options = ctx.fields().string_list("xPollOptions");
            if ctx.text("xPollOptions").is_some() || !options.is_empty() {
                check_exclusive(
                    "X Poll Options",
                    &[
                        ("X Card URI", card.is_some()),
                        ("X Quote Tweet ID", quote.is_some()),
                        ("X Direct Message Deep Link", deep_link.is_some()),
                        ("X Post URL", post_url.is_some()),
                    ],
                )?;
                let options = parse_poll_options(options)?;
                let duration = check_poll_duration(
                    ctx.try_integer("xPollDuration")?
                        .unwrap_or(POLL_DURATION_DEFAULT),
                )?;
                let reply = ctx
                    .text("xPollReplySettings")
                    .unwrap_or_else(|| "following".to_string());
                builder = builder
                    .with("poll_options[]", options)
                    .with("poll_duration", duration)
                    .with("poll_reply_settings", reply);
            }
            builder.with_opt("x_long_text_as_post", enabled(ctx, "xLongTextAsPost"))
        }
        Operation::UploadPhotos | Operation::UploadVideo => {
            let tagged = ctx.fields().string_list("xTaggedUserIds");
            let builder = builder
                .with_opt("tagged_user_ids[]", (!tagged.is_empty()).then_some(tagged))
                .with_opt("nullcast", ctx.flag("xNullcastVideo"));
            if *ctx.operation() == Operation::UploadVideo {
                builder.with_opt("x_long_text_as_post", enabled(ctx, "xLongTextAsPost"))
            } else {
                builder
            }
        }
        _ => builder,
    };
    Ok(builder.into_entries())
}

fn threads(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    if *ctx.operation() != Operation::UploadText {
        return Ok(Vec::new());
    }
    Ok(PayloadBuilder::new()
        .with_opt("threads_title", ctx.text("threadsTitle"))
        .with_opt("threads_long_text_as_post", enabled(ctx, "threadsLongTextAsPost"))
        .into_entries())
}

fn reddit(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    if *ctx.operation() != Operation::UploadText {
        return Ok(Vec::new());
    }
    Ok(PayloadBuilder::new()
        .with("subreddit", ctx.fields().require_text("redditSubreddit")?)
        .with_opt("flair_id", ctx.text("redditFlairId"))
        .into_entries())
}
