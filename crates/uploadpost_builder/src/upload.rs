//! Resolution steps shared by the three upload operations.

use crate::{Entries, StepContext, normalize_date, resolve_media, rules_for};
use strum::IntoEnumIterator;
use uploadpost_core::{MediaItem, Operation, PayloadBuilder, PayloadValue, Platform};
use uploadpost_error::{ValidationError, ValidationErrorKind};

/// Selected platforms in enumeration order.
fn selected<'a>(ctx: &'a StepContext<'a>) -> impl Iterator<Item = Platform> + 'a {
    Platform::iter().filter(|platform| ctx.has_platform(*platform))
}

/// `user`, `title`, `scheduled_date`, and `async_upload`.
pub fn common(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    Ok(PayloadBuilder::new()
        .with("user", ctx.fields().require_text("user")?)
        .with("title", ctx.fields().require_text("title")?)
        .with_opt(
            "scheduled_date",
            ctx.text("scheduledDate").map(|date| normalize_date(&date)),
        )
        .with_opt("async_upload", ctx.flag("uploadAsync"))
        .into_entries())
}

/// `<platform>_title` overrides for selected platforms.
pub fn titles(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    Ok(selected(ctx)
        .filter_map(|platform| *rules_for(platform).title())
        .fold(PayloadBuilder::new(), |builder, over| {
            builder.with_opt(over.key(), ctx.text(over.field()))
        })
        .into_entries())
}

/// Generic `description` plus `<platform>_description` overrides.
pub fn descriptions(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    let generic = ctx
        .generic_description_sent()
        .then(|| ctx.text("description"))
        .flatten();
    Ok(selected(ctx)
        .filter_map(|platform| *rules_for(platform).description())
        .fold(
            PayloadBuilder::new().with_opt("description", generic),
            |builder, over| builder.with_opt(over.key(), ctx.text(over.field())),
        )
        .into_entries())
}

/// The filtered platform selection under `platform[]`.
pub fn platform_list(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    let names: Vec<String> = ctx.platforms().iter().map(ToString::to_string).collect();
    Ok(vec![("platform[]".to_string(), PayloadValue::List(names))])
}

/// `photos[]` or `video`, each item a URL or a resolved attachment.
pub fn media(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    let builder = match ctx.operation() {
        Operation::UploadPhotos => {
            let references = ctx.fields().string_list("photos");
            if references.is_empty() {
                return Err(ValidationError::new(ValidationErrorKind::MissingField(
                    "photos".to_string(),
                )));
            }
            let items: Vec<MediaItem> = references
                .iter()
                .filter_map(|reference| resolve_media(ctx.binaries(), reference))
                .collect();
            PayloadBuilder::new().with_opt("photos[]", (!items.is_empty()).then_some(items))
        }
        Operation::UploadVideo => {
            let reference = ctx.fields().require_text("video")?;
            let video = resolve_media(ctx.binaries(), reference.trim()).map(|item| match item {
                MediaItem::Url(url) => PayloadValue::Text(url),
                MediaItem::File(file) => PayloadValue::File(file),
            });
            PayloadBuilder::new().with_opt("video", video)
        }
        _ => PayloadBuilder::new(),
    };
    Ok(builder.into_entries())
}

/// Platform-specific options for each selected platform.
pub fn platform_options(ctx: &StepContext<'_>) -> Result<Entries, ValidationError> {
    selected(ctx).try_fold(Vec::new(), |mut entries, platform| {
        entries.extend(rules_for(platform).options(ctx)?);
        Ok(entries)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryBinaries, NoBinaries};
    use serde_json::json;
    use uploadpost_core::{Attachment, Fields};

    fn keys(entries: &Entries) -> Vec<&str> {
        entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn common_fields_normalize_dates() {
        let fields = Fields::new()
            .with("user", "alice")
            .with("title", "hello")
            .with("scheduledDate", "2024-01-01T10:00:00")
            .with("uploadAsync", true);
        let ctx = StepContext::new(Operation::UploadText, vec![], &fields, &NoBinaries);
        let entries = common(&ctx).unwrap();
        assert_eq!(keys(&entries), vec!["user", "title", "scheduled_date", "async_upload"]);
        assert_eq!(
            entries[2].1,
            PayloadValue::Text("2024-01-01T10:00:00Z".to_string())
        );
    }

    #[test]
    fn missing_user_is_reported() {
        let fields = Fields::new().with("title", "hello");
        let ctx = StepContext::new(Operation::UploadText, vec![], &fields, &NoBinaries);
        let err = common(&ctx).unwrap_err();
        assert!(matches!(err.kind(), ValidationErrorKind::MissingField(f) if f == "user"));
    }

    #[test]
    fn overrides_only_for_selected_platforms() {
        let fields = Fields::new()
            .with("xTitle", "short")
            .with("youtubeTitle", "long")
            .with("linkedinDescription", "pro");
        let ctx = StepContext::new(Operation::UploadText, vec![Platform::X], &fields, &NoBinaries);
        assert_eq!(keys(&titles(&ctx).unwrap()), vec!["x_title"]);
        assert!(descriptions(&ctx).unwrap().is_empty());
    }

    #[test]
    fn generic_description_needs_a_consumer() {
        let fields = Fields::new().with("description", "body");
        let ctx = StepContext::new(Operation::UploadText, vec![Platform::X], &fields, &NoBinaries);
        assert!(descriptions(&ctx).unwrap().is_empty());

        let ctx = StepContext::new(
            Operation::UploadText,
            vec![Platform::X, Platform::Linkedin],
            &fields,
            &NoBinaries,
        );
        assert_eq!(keys(&descriptions(&ctx).unwrap()), vec!["description"]);
    }

    #[test]
    fn photos_mix_urls_and_binaries() {
        let fields = Fields::new().with("photos", json!("https://img.test/a.jpg, data, missing"));
        let binaries =
            InMemoryBinaries::new().with("data", Attachment::new(vec![1], "b.jpg", None));
        let ctx = StepContext::new(Operation::UploadPhotos, vec![], &fields, &binaries);
        let entries = media(&ctx).unwrap();
        match &entries[0].1 {
            PayloadValue::Media(items) => {
                assert_eq!(items.len(), 2);
                assert!(matches!(&items[0], MediaItem::Url(_)));
                assert!(matches!(&items[1], MediaItem::File(_)));
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn unresolved_video_is_omitted() {
        let fields = Fields::new().with("video", "data");
        let ctx = StepContext::new(Operation::UploadVideo, vec![], &fields, &NoBinaries);
        assert!(media(&ctx).unwrap().is_empty());
    }

    #[test]
    fn missing_photos_fail() {
        let fields = Fields::new().with("photos", " , ");
        let ctx = StepContext::new(Operation::UploadPhotos, vec![], &fields, &NoBinaries);
        assert!(media(&ctx).is_err());
    }
}
