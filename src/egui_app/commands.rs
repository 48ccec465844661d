/**
 * User Commands
 *
 * Typed gestures produced by the views and consumed by
 * `ClientState::apply`. Rendering never mutates the cache directly.
 */

/// A mutating user action on the vote data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upvote { item_text: String },
    Downvote { item_text: String },
    /// Re-categorize an item into another topic
    MoveItem { item_text: String, new_topic: String },
    DeleteItem { item_text: String },
    /// Create an item with zero votes; text and topic are normalized on apply
    AddItem { item_text: String, topic: String },
}

impl Command {
    pub fn upvote(item_text: impl Into<String>) -> Self {
        Self::Upvote {
            item_text: item_text.into(),
        }
    }

    pub fn downvote(item_text: impl Into<String>) -> Self {
        Self::Downvote {
            item_text: item_text.into(),
        }
    }

    pub fn move_item(item_text: impl Into<String>, new_topic: impl Into<String>) -> Self {
        Self::MoveItem {
            item_text: item_text.into(),
            new_topic: new_topic.into(),
        }
    }

    pub fn delete(item_text: impl Into<String>) -> Self {
        Self::DeleteItem {
            item_text: item_text.into(),
        }
    }

    pub fn add(item_text: impl Into<String>, topic: impl Into<String>) -> Self {
        Self::AddItem {
            item_text: item_text.into(),
            topic: topic.into(),
        }
    }

    /// Short label for logs and the status line
    pub fn describe(&self) -> String {
        match self {
            Self::Upvote { item_text } => format!("Upvoted {}", item_text),
            Self::Downvote { item_text } => format!("Downvoted {}", item_text),
            Self::MoveItem {
                item_text,
                new_topic,
            } => format!("Moved {} to {}", item_text, new_topic),
            Self::DeleteItem { item_text } => format!("Deleted {}", item_text),
            Self::AddItem { item_text, topic } => {
                format!("Added {} to {}", item_text.trim().to_uppercase(), topic.trim())
            }
        }
    }
}
