use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - the only record that is persisted.
///
/// Serialized with camelCase keys, so a stored snapshot is a JSON array of
/// `{id, title, description, image, date, createdAt}` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Empty, or a `data:` URL holding the image bytes.
    #[serde(default)]
    pub image: String,
    /// `YYYY-MM-DD` as entered by the user. Not checked for plausibility.
    pub date: String,
    /// Creation instant. Written as RFC 3339 but kept verbatim when loaded,
    /// since snapshots from other writers may use any timestamp format.
    #[serde(default)]
    pub created_at: String,
}

/// The user-editable part of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub date: String,
}

impl Post {
    /// Create a new post with a fresh id and creation timestamp.
    pub fn new(fields: PostFields) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(now),
            title: fields.title,
            description: fields.description,
            image: fields.image,
            date: fields.date,
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Replace every editable field, keeping `id` and `created_at`.
    pub fn apply(&mut self, fields: PostFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.image = fields.image;
        self.date = fields.date;
    }

    pub fn fields(&self) -> PostFields {
        PostFields {
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            date: self.date.clone(),
        }
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

/// Milliseconds since the epoch followed by nine random lowercase
/// alphanumeric characters (drawn from a v4 uuid, so always hex).
pub fn generate_id(now: DateTime<Utc>) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}{}", now.timestamp_millis(), &random[..9])
}

/// Parse a post date. Full RFC 3339 timestamps are accepted as well.
pub fn parse_post_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(date)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Today's date in the form-field format.
pub fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

fn seed_timestamp(date: &str, hour: u32, minute: u32) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The built-in posts written to an empty store on first start.
pub fn sample_posts() -> Vec<Post> {
    vec![
        Post {
            id: "1".to_string(),
            title: "Getting Started with Nuxt.js".to_string(),
            description: "Learn how to build modern web applications with Nuxt.js, the intuitive Vue.js framework. This comprehensive guide covers everything from setup to deployment.".to_string(),
            image: String::new(),
            date: "2025-09-10".to_string(),
            created_at: seed_timestamp("2025-09-10", 8, 0),
        },
        Post {
            id: "2".to_string(),
            title: "Vue.js Best Practices".to_string(),
            description: "Discover the most effective patterns and practices for building scalable Vue.js applications. From component architecture to state management.".to_string(),
            image: String::new(),
            date: "2025-09-08".to_string(),
            created_at: seed_timestamp("2025-09-08", 14, 30),
        },
        Post {
            id: "3".to_string(),
            title: "Modern Web Development".to_string(),
            description: "Explore the latest trends and technologies in web development. Learn about JAMstack, serverless architecture, and modern deployment strategies.".to_string(),
            image: String::new(),
            date: "2025-09-05".to_string(),
            created_at: seed_timestamp("2025-09-05", 11, 15),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_carry_timestamp_and_suffix() {
        let now = Utc::now();
        let id = generate_id(now);
        let millis = now.timestamp_millis().to_string();

        assert!(id.starts_with(&millis));
        assert_eq!(id.len(), millis.len() + 9);
        assert!(id[millis.len()..]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_ne!(generate_id(now), generate_id(now));
    }

    #[test]
    fn test_snapshot_uses_camel_case_keys() {
        let post = sample_posts().remove(0);
        let value = serde_json::to_value(&post).unwrap();

        assert_eq!(value["createdAt"], "2025-09-10T08:00:00Z");
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_missing_image_defaults_to_empty() {
        let raw = r#"{"id":"7","title":"t","description":"d","date":"2025-01-01","createdAt":"2025-01-01T00:00:00.000Z"}"#;
        let post: Post = serde_json::from_str(raw).unwrap();

        assert_eq!(post.image, "");
        assert!(!post.has_image());
    }

    #[test]
    fn test_created_at_is_kept_verbatim() {
        let raw = r#"{"id":"7","title":"t","description":"d","date":"2025-01-01","createdAt":"2025-01-01T08:00:00"}"#;
        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.created_at, "2025-01-01T08:00:00");

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["createdAt"], "2025-01-01T08:00:00");
    }

    #[test]
    fn test_new_post_stamps_rfc3339_creation_time() {
        let post = Post::new(PostFields::default());
        assert!(DateTime::parse_from_rfc3339(&post.created_at).is_ok());
    }

    #[test]
    fn test_parse_post_date() {
        assert_eq!(
            parse_post_date("2025-09-10"),
            NaiveDate::from_ymd_opt(2025, 9, 10)
        );
        assert_eq!(
            parse_post_date("2025-09-10T23:00:00Z"),
            NaiveDate::from_ymd_opt(2025, 9, 10)
        );
        assert_eq!(parse_post_date("next tuesday"), None);
    }
}
