use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Publication date of a post.
///
/// Dates that cannot be parsed are kept verbatim and order before every valid
/// date, so a descending sort places them last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostDate {
    Valid(NaiveDate),
    Invalid(String),
}

impl PostDate {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return PostDate::Valid(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return PostDate::Valid(dt.date_naive());
        }
        for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return PostDate::Valid(dt.date());
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y/%m/%d") {
            return PostDate::Valid(date);
        }

        PostDate::Invalid(raw.to_string())
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            PostDate::Valid(date) => Some(*date),
            PostDate::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, PostDate::Valid(_))
    }
}

impl Ord for PostDate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Option orders None first, which is exactly "invalid is the minimum".
        self.as_date().cmp(&other.as_date())
    }
}

impl PartialOrd for PostDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostDate::Valid(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PostDate::Invalid(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for PostDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Catalog metadata for one blog post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub cover_image: String,
    pub date: PostDate,
    pub author: String,
    /// Distinct tags, first occurrence order.
    pub tags: Vec<String>,
    pub featured: bool,
    pub preview: bool,
    pub is_hero: bool,
}

impl PostSummary {
    /// Minimal summary with every optional field at its default.
    pub fn new(slug: impl Into<String>, title: impl Into<String>, date: &str) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            excerpt: String::new(),
            cover_image: String::new(),
            date: PostDate::parse(date),
            author: String::new(),
            tags: Vec::new(),
            featured: false,
            preview: false,
            is_hero: false,
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.clear();
        for tag in tags {
            let tag = tag.into();
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn shares_tag_with(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }
}

/// A post's summary together with its Markdown body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    #[serde(flatten)]
    pub summary: PostSummary,
    pub body: String,
}
