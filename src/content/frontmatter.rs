//! Front-matter parsing

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};
use std::path::Path;

use crate::error::ContentError;

/// Accepts `tags: rust` as well as `tags: [rust, web]`
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Header of a content file, exactly as written by the author
///
/// Required fields stay optional here so that a missing field can be reported
/// against the file instead of as a generic deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub lastmod: Option<String>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub draft: bool,
}

impl FrontMatter {
    /// Split a content file into its header and body.
    ///
    /// Supports YAML (`---`) and JSON (`;;;`) fences. A file without a header
    /// yields an empty front-matter and the whole file as body.
    pub fn parse<'a>(path: &Path, content: &'a str) -> Result<(Self, &'a str), ContentError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if let Some(rest) = content.strip_prefix("---") {
            let (header, body) = split_fence(rest, "\n---").ok_or_else(|| malformed(path, "unterminated `---` block"))?;
            if header.trim().is_empty() {
                return Ok((FrontMatter::default(), body));
            }
            let fm = serde_yaml::from_str::<FrontMatter>(header)
                .map_err(|e| malformed(path, &e.to_string()))?;
            return Ok((fm, body));
        }

        if let Some(rest) = content.strip_prefix(";;;") {
            let (header, body) =
                split_fence(rest, ";;;").ok_or_else(|| malformed(path, "unterminated `;;;` block"))?;
            let fm = serde_json::from_str::<FrontMatter>(header)
                .map_err(|e| malformed(path, &e.to_string()))?;
            return Ok((fm, body));
        }

        Ok((FrontMatter::default(), content))
    }

    /// Take the title, failing if it is absent or blank
    pub fn require_title(&self, path: &Path) -> Result<String, ContentError> {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => Ok(title.to_string()),
            _ => Err(ContentError::MissingField {
                path: path.to_path_buf(),
                field: "title",
            }),
        }
    }

    /// Parse the publication date, failing if it is absent or unparseable
    pub fn require_date(&self, path: &Path, tz: Tz) -> Result<DateTime<FixedOffset>, ContentError> {
        let raw = self.date.as_deref().ok_or_else(|| ContentError::MissingField {
            path: path.to_path_buf(),
            field: "date",
        })?;
        parse_date(raw, tz).ok_or_else(|| ContentError::InvalidDate {
            path: path.to_path_buf(),
            value: raw.to_string(),
        })
    }

    /// Parse the optional last-modified date
    pub fn lastmod(&self, path: &Path, tz: Tz) -> Result<Option<DateTime<FixedOffset>>, ContentError> {
        match self.lastmod.as_deref() {
            None => Ok(None),
            Some(raw) => parse_date(raw, tz)
                .map(Some)
                .ok_or_else(|| ContentError::InvalidDate {
                    path: path.to_path_buf(),
                    value: raw.to_string(),
                }),
        }
    }
}

fn split_fence<'a>(rest: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    let rest = rest.trim_start_matches(['\n', '\r']);
    // An empty header closes immediately
    let (header, after) = if let Some(after) = rest.strip_prefix(fence.trim_start_matches('\n')) {
        ("", after)
    } else {
        let end = rest.find(fence)?;
        (&rest[..end], &rest[end + fence.len()..])
    };
    Some((header, after.trim_start_matches(['\n', '\r'])))
}

fn malformed(path: &Path, message: &str) -> ContentError {
    ContentError::Malformed {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Parse a front-matter date.
///
/// Values without an explicit offset are read as wall-clock time in `tz`.
pub fn parse_date(s: &str, tz: Tz) -> Option<DateTime<FixedOffset>> {
    let s = s.trim().trim_matches(|c| c == '\'' || c == '"');

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let naive = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    .or_else(|| {
        ["%Y-%m-%d", "%Y/%m/%d"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}
