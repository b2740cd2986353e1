//! Validation of the metadata document and lenient repair of optional fields.

use crate::domain::model::{PostDate, PostSummary};
use crate::utils::error::{CatalogError, Result};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Parse the metadata document into summaries, in source order.
///
/// A body that is not a JSON array is a fetch failure. A missing required
/// field, a non-object entry or a duplicate slug rejects the whole document.
pub fn parse_metadata(bytes: &[u8], resource: &str) -> Result<Vec<PostSummary>> {
    let document: Value = serde_json::from_slice(bytes)
        .map_err(|e| CatalogError::fetch(resource, format!("response is not valid JSON: {}", e)))?;

    let Value::Array(items) = document else {
        return Err(CatalogError::fetch(
            resource,
            "expected a JSON array of post summaries",
        ));
    };

    let mut seen_slugs = HashSet::with_capacity(items.len());
    let mut posts = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let Value::Object(obj) = item else {
            return Err(CatalogError::schema(index, "*", "entry is not a JSON object"));
        };

        let post = parse_summary(index, obj)?;
        if !seen_slugs.insert(post.slug.clone()) {
            return Err(CatalogError::schema(
                index,
                "slug",
                format!("duplicate slug '{}'", post.slug),
            ));
        }
        posts.push(post);
    }

    Ok(posts)
}

fn parse_summary(index: usize, obj: &Map<String, Value>) -> Result<PostSummary> {
    let slug = required_string(index, obj, "slug")?;
    let title = required_string(index, obj, "title")?;
    let date = match obj.get("date") {
        None | Some(Value::Null) => {
            return Err(CatalogError::schema(index, "date", "field is missing"));
        }
        Some(Value::String(raw)) => PostDate::parse(raw),
        Some(other) => PostDate::Invalid(other.to_string()),
    };
    if !date.is_valid() {
        tracing::warn!("Post '{}' has an unparseable date '{}'; it will sort last", slug, date);
    }

    Ok(PostSummary {
        excerpt: optional_string(&slug, obj, "excerpt"),
        cover_image: optional_string(&slug, obj, "coverImage"),
        author: optional_string(&slug, obj, "author"),
        tags: tags(&slug, obj),
        featured: optional_bool(&slug, obj, "featured"),
        preview: optional_bool(&slug, obj, "preview"),
        is_hero: optional_bool(&slug, obj, "isHero"),
        slug,
        title,
        date,
    })
}

fn required_string(index: usize, obj: &Map<String, Value>, field: &str) -> Result<String> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(CatalogError::schema(index, field, "field is missing")),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(CatalogError::schema(index, field, "field is empty"))
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(CatalogError::schema(
            index,
            field,
            format!("expected a string, found {}", json_type(other)),
        )),
    }
}

fn optional_string(slug: &str, obj: &Map<String, Value>, field: &str) -> String {
    match obj.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            tracing::warn!(
                "Post '{}': field '{}' should be a string, found {}; using empty string",
                slug,
                field,
                json_type(other)
            );
            String::new()
        }
    }
}

fn optional_bool(slug: &str, obj: &Map<String, Value>, field: &str) -> bool {
    match obj.get(field) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            tracing::warn!(
                "Post '{}': field '{}' should be a boolean, found {}; using false",
                slug,
                field,
                json_type(other)
            );
            false
        }
    }
}

fn tags(slug: &str, obj: &Map<String, Value>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut push = |tag: &str| {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    };

    match obj.get("tags") {
        None | Some(Value::Null) => {}
        Some(Value::String(tag)) => push(tag),
        Some(Value::Array(values)) => {
            for value in values {
                match value.as_str() {
                    Some(tag) => push(tag),
                    None => tracing::warn!(
                        "Post '{}': dropping non-string tag {}",
                        slug,
                        value
                    ),
                }
            }
        }
        Some(other) => tracing::warn!(
            "Post '{}': field 'tags' should be a list, found {}; using no tags",
            slug,
            json_type(other)
        ),
    }

    tags
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use serde_json::json;

    fn parse(value: Value) -> Result<Vec<PostSummary>> {
        parse_metadata(value.to_string().as_bytes(), "posts.json")
    }

    #[test]
    fn test_parses_full_entry() {
        let posts = parse(json!([{
            "slug": "kaggle-journey",
            "title": "My Kaggle Journey",
            "excerpt": "From novice to expert",
            "coverImage": "/images/kaggle.png",
            "date": "2024-05-02",
            "author": "Jordan",
            "tags": ["ml", "kaggle"],
            "featured": true,
            "preview": false,
            "isHero": true
        }]))
        .unwrap();

        assert_eq!(posts.len(), 1);
        let post = &posts[0];
        assert_eq!(post.slug, "kaggle-journey");
        assert_eq!(post.cover_image, "/images/kaggle.png");
        assert_eq!(post.date.to_string(), "2024-05-02");
        assert_eq!(post.tags, vec!["ml", "kaggle"]);
        assert!(post.featured && post.is_hero && !post.preview);
    }

    #[test]
    fn test_optional_fields_default_and_unknown_fields_ignored() {
        let posts = parse(json!([{
            "slug": "a", "title": "A", "date": "2024-01-01",
            "readingTime": 7, "series": {"name": "x"}
        }]))
        .unwrap();

        let post = &posts[0];
        assert!(post.tags.is_empty());
        assert_eq!(post.excerpt, "");
        assert!(!post.featured && !post.preview && !post.is_hero);
    }

    #[test]
    fn test_malformed_optional_fields_are_repaired() {
        let posts = parse(json!([{
            "slug": "a", "title": "A", "date": "yesterday-ish",
            "featured": "yes", "excerpt": 42,
            "tags": ["ml", 3, "ml", "cv"]
        }, {
            "slug": "b", "title": "B", "date": 20240101, "tags": "solo"
        }]))
        .unwrap();

        assert!(!posts[0].date.is_valid());
        assert!(!posts[0].featured);
        assert_eq!(posts[0].excerpt, "");
        assert_eq!(posts[0].tags, vec!["ml", "cv"]);
        assert!(!posts[1].date.is_valid());
        assert_eq!(posts[1].tags, vec!["solo"]);
    }

    #[test]
    fn test_missing_required_field_rejects_document() {
        let err = parse(json!([
            {"slug": "a", "title": "A", "date": "2024-01-01"},
            {"title": "B", "date": "2024-01-02"}
        ]))
        .unwrap_err();

        match err {
            CatalogError::SchemaError { index, field, .. } => {
                assert_eq!(index, 1);
                assert_eq!(field, "slug");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        for missing in ["title", "date"] {
            let mut entry = json!({"slug": "a", "title": "A", "date": "2024-01-01"});
            entry.as_object_mut().unwrap().remove(missing);
            let err = parse(json!([entry])).unwrap_err();
            assert_eq!(err.category(), ErrorCategory::Schema, "missing {missing}");
        }
    }

    #[test]
    fn test_blank_slug_and_duplicates_are_schema_errors() {
        let blank = parse(json!([{"slug": "  ", "title": "A", "date": "2024-01-01"}]));
        assert_eq!(blank.unwrap_err().category(), ErrorCategory::Schema);

        let dup = parse(json!([
            {"slug": "a", "title": "A", "date": "2024-01-01"},
            {"slug": "a", "title": "A again", "date": "2024-01-02"}
        ]));
        assert!(matches!(
            dup.unwrap_err(),
            CatalogError::SchemaError { index: 1, .. }
        ));

        let not_object = parse(json!(["a"]));
        assert_eq!(not_object.unwrap_err().category(), ErrorCategory::Schema);
    }

    #[test]
    fn test_wrong_shape_is_fetch_error() {
        let not_array = parse(json!({"posts": []}));
        assert_eq!(not_array.unwrap_err().category(), ErrorCategory::Fetch);

        let not_json = parse_metadata(b"<html>404</html>", "posts.json");
        assert_eq!(not_json.unwrap_err().category(), ErrorCategory::Fetch);
    }

    #[test]
    fn test_preserves_source_order() {
        let posts = parse(json!([
            {"slug": "c", "title": "C", "date": "2024-02-01"},
            {"slug": "a", "title": "A", "date": "2024-01-01"},
            {"slug": "b", "title": "B", "date": "2024-03-01"}
        ]))
        .unwrap();
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["c", "a", "b"]);
    }
}
