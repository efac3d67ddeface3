//! Display tiles: one cover, caption and catalog link per record.

use crate::catalog::TitleRecord;
use crate::config::LINK_PLACEHOLDER;
use crate::cover::CoverImage;

/// Longest caption shown before truncation, in characters.
pub const TITLE_MAX_CHARS: usize = 60;

/// Appended to truncated captions.
pub const TITLE_ELLIPSIS: &str = "...";

/// Shortens `title` to [`TITLE_MAX_CHARS`] characters plus [`TITLE_ELLIPSIS`].
///
/// Counts characters, not bytes, so multi-byte titles are never split
/// inside a code point.
#[must_use]
pub fn truncate_title(title: &str) -> String {
    match title.char_indices().nth(TITLE_MAX_CHARS) {
        Some((cut, _)) => format!("{}{TITLE_ELLIPSIS}", &title[..cut]),
        None => title.to_string(),
    }
}

/// Substitutes the OCLC number into a link template.
#[must_use]
pub fn catalog_link(template: &str, oclc_number: &str) -> String {
    template.replace(LINK_PLACEHOLDER, &urlencoding::encode(oclc_number))
}

/// The rendering unit for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTile {
    caption: String,
    link: String,
    cover: CoverImage,
}

impl DisplayTile {
    /// Derives a tile from a record and its resolved cover.
    #[must_use]
    pub fn new(record: &TitleRecord, cover: CoverImage, link_template: &str) -> Self {
        Self {
            caption: truncate_title(record.title()),
            link: catalog_link(link_template, record.oclc_number()),
            cover,
        }
    }

    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    #[must_use]
    pub fn cover(&self) -> &CoverImage {
        &self.cover
    }
}
