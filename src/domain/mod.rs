pub mod item;
pub mod updates;

pub use item::{Item, ItemKind, StoryId};
pub use updates::{LiveCounts, Updates};
