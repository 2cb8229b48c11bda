//! "File or URL" media field resolution.

use crate::BinaryResolver;
use tracing::warn;
use uploadpost_core::{Attachment, MediaItem};

/// True when the value is an `http://` or `https://` URL, compared
/// case-insensitively.
pub fn is_url(value: &str) -> bool {
    let lower = value.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Classify a media reference as a URL or a binary property name.
///
/// Binary references the host cannot resolve are logged and yield `None`;
/// the caller omits the field.
pub fn resolve_media(binaries: &dyn BinaryResolver, reference: &str) -> Option<MediaItem> {
    if is_url(reference) {
        return Some(MediaItem::Url(reference.to_string()));
    }
    resolve_binary(binaries, reference).map(MediaItem::File)
}

pub(crate) fn resolve_binary(binaries: &dyn BinaryResolver, name: &str) -> Option<Attachment> {
    match binaries.resolve(name) {
        Ok(attachment) => Some(attachment),
        Err(e) => {
            warn!(property = name, error = %e, "Could not resolve binary data, omitting field");
            None
        }
    }
}
