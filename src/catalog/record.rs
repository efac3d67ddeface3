//! Brief title records returned by the new-titles endpoint.

use serde::Deserialize;
use serde::de::IgnoredAny;

/// Title shown when a record carries none.
pub const MISSING_TITLE: &str = "N/A";

/// One bibliographic entry from the catalog query.
///
/// All fields are optional in the provider's JSON; missing values
/// deserialize to `None` or an empty ISBN list. Numeric titles, OCLC numbers
/// and ISBNs are accepted as their decimal text, and `null` ISBN entries are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleRecord {
    #[serde(default, deserialize_with = "text_or_number")]
    title: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    oclc_number: Option<String>,
    #[serde(default, deserialize_with = "isbn_list")]
    isbns: Vec<String>,
}

impl TitleRecord {
    /// Builds a record directly (used by tests and fakes).
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        oclc_number: impl Into<String>,
        isbns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            oclc_number: Some(oclc_number.into()),
            isbns: isbns.into_iter().map(Into::into).collect(),
        }
    }

    /// The record title, or [`MISSING_TITLE`] when absent.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(MISSING_TITLE)
    }

    /// The OCLC number, or an empty string when absent.
    #[must_use]
    pub fn oclc_number(&self) -> &str {
        self.oclc_number.as_deref().unwrap_or_default()
    }

    /// The ISBNs exactly as returned, in provider order.
    #[must_use]
    pub fn isbns(&self) -> &[String] {
        &self.isbns
    }

    /// ISBNs worth probing: trimmed, blanks removed, order preserved.
    pub fn candidate_isbns(&self) -> impl Iterator<Item = &str> {
        self.isbns
            .iter()
            .map(|isbn| isbn.trim())
            .filter(|isbn| !isbn.is_empty())
    }
}

/// The JSON envelope of a new-titles response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewTitlesEnvelope {
    #[serde(default)]
    pub number_of_records: Option<u64>,
    #[serde(default)]
    pub brief_records: Option<Vec<BriefEntry>>,
}

/// One element of `briefRecords`; anything that is not a usable record is
/// kept as `Malformed` so the rest of the response still decodes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum BriefEntry {
    Record(TitleRecord),
    Malformed(#[allow(dead_code)] IgnoredAny),
}

impl NewTitlesEnvelope {
    /// Usable records in response order, plus the number of malformed
    /// entries skipped. An absent array is an empty result.
    pub fn into_records(self) -> (Vec<TitleRecord>, usize) {
        let entries = self.brief_records.unwrap_or_default();
        let total = entries.len();
        let records: Vec<TitleRecord> = entries
            .into_iter()
            .filter_map(|entry| match entry {
                BriefEntry::Record(record) => Some(record),
                BriefEntry::Malformed(_) => None,
            })
            .collect();
        let skipped = total - records.len();
        (records, skipped)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Unsigned(n) => n.to_string(),
            TextOrNumber::Signed(n) => n.to_string(),
        }
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(String::from))
}

fn isbn_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entries = Option::<Vec<Option<TextOrNumber>>>::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(String::from)
        .collect())
}
