use serde::{Deserialize, Serialize};

use crate::domain::StoryId;

/// Body of `updates.json`. Profiles are user handles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Updates {
    #[serde(default)]
    pub items: Vec<StoryId>,
    #[serde(default)]
    pub profiles: Vec<String>,
}

/// What the live-update region shows: only the sizes of each list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveCounts {
    pub items: usize,
    pub profiles: usize,
}

impl From<&Updates> for LiveCounts {
    fn from(updates: &Updates) -> Self {
        Self {
            items: updates.items.len(),
            profiles: updates.profiles.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_are_lengths() {
        let json = r#"{"items":[8423305,8420805,8423379],"profiles":["thefox","mdda"]}"#;
        let updates: Updates = serde_json::from_str(json).unwrap();
        assert_eq!(
            LiveCounts::from(&updates),
            LiveCounts {
                items: 3,
                profiles: 2
            }
        );
    }
}
