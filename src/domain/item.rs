use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a story, comment, job or poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(pub u64);

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StoryId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Story,
    Comment,
    Job,
    Poll,
    Pollopt,
}

/// A snapshot of one item as returned by `item/{id}.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: StoryId,
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub descendants: Option<u64>,
    #[serde(default)]
    pub parent: Option<StoryId>,
    #[serde(default)]
    pub kids: Option<Vec<StoryId>>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dead: bool,
}

impl Item {
    pub fn new(id: StoryId, kind: ItemKind) -> Self {
        Self {
            id,
            kind,
            by: None,
            title: None,
            url: None,
            text: None,
            score: None,
            time: None,
            descendants: None,
            parent: None,
            kids: None,
            deleted: false,
            dead: false,
        }
    }

    /// Deleted and dead items are fetched but never rendered.
    pub fn is_visible(&self) -> bool {
        !(self.deleted || self.dead)
    }

    pub fn kids(&self) -> &[StoryId] {
        self.kids.as_deref().unwrap_or(&[])
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(Untitled)")
    }

    pub fn display_author(&self) -> &str {
        self.by.as_deref().unwrap_or("[unknown]")
    }

    /// Comment or Ask HN body with tags stripped and entities decoded.
    pub fn display_text(&self) -> String {
        self.text
            .as_deref()
            .map(|t| html_escape::decode_html_entities(&strip_html(t)).into_owned())
            .unwrap_or_default()
    }

    /// Host part of the story URL, without a leading `www.`.
    pub fn domain(&self) -> Option<String> {
        let parsed = url::Url::parse(self.url.as_deref()?).ok()?;
        let host = parsed.host_str()?;
        Some(host.trim_start_matches("www.").to_string())
    }

    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        self.time.and_then(|t| DateTime::from_timestamp(t, 0))
    }

    /// Coarse relative age such as "5m ago" or "3d ago".
    pub fn age(&self, now: DateTime<Utc>) -> Option<String> {
        let elapsed = now.signed_duration_since(self.posted_at()?);
        let secs = elapsed.num_seconds().max(0);
        let label = if secs < 60 {
            format!("{}s ago", secs)
        } else if secs < 3600 {
            format!("{}m ago", secs / 60)
        } else if secs < 86400 {
            format!("{}h ago", secs / 3600)
        } else {
            format!("{}d ago", secs / 86400)
        };
        Some(label)
    }
}

/// Comment bodies use `<p>` as paragraph breaks; turn those into newlines
/// and drop every other tag.
fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut tag = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                let name = tag.trim_start_matches('/').to_ascii_lowercase();
                if name == "p" || name.starts_with("p ") || name == "br" {
                    result.push('\n');
                }
            }
            _ if in_tag => tag.push(c),
            _ => result.push(c),
        }
    }

    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_story() {
        let json = r#"{"by":"dhouston","descendants":71,"id":8863,"kids":[8952,9224],
            "score":111,"time":1175714200,"title":"My YC app: Dropbox","type":"story",
            "url":"http://www.getdropbox.com/u/2/screencast.html"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, StoryId(8863));
        assert_eq!(item.kind, ItemKind::Story);
        assert_eq!(item.kids(), &[StoryId(8952), StoryId(9224)]);
        assert_eq!(item.score, Some(111));
        assert!(item.is_visible());
    }

    #[test]
    fn test_deserialize_deleted_comment_without_author() {
        let json = r#"{"id":2,"deleted":true,"type":"comment","parent":1,"time":1}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert!(item.deleted);
        assert!(!item.is_visible());
        assert_eq!(item.display_author(), "[unknown]");
        assert!(item.kids().is_empty());
    }

    #[test]
    fn test_dead_item_is_hidden() {
        let mut item = Item::new(StoryId(3), ItemKind::Comment);
        item.dead = true;
        assert!(!item.is_visible());
    }

    #[test]
    fn test_display_text_strips_markup() {
        let mut item = Item::new(StoryId(4), ItemKind::Comment);
        item.text = Some("First &amp; foremost<p>Second <i>para</i>".into());
        assert_eq!(item.display_text(), "First & foremost\nSecond para");
    }

    #[test]
    fn test_domain_strips_www() {
        let mut item = Item::new(StoryId(5), ItemKind::Story);
        item.url = Some("https://www.example.com/a/b".into());
        assert_eq!(item.domain().as_deref(), Some("example.com"));
    }

    #[test]
    fn test_age_buckets() {
        let mut item = Item::new(StoryId(6), ItemKind::Story);
        item.time = Some(1_000_000);
        let now = DateTime::from_timestamp(1_000_000 + 7200, 0).unwrap();
        assert_eq!(item.age(now).as_deref(), Some("2h ago"));
    }
}
