//! # Change Set
//!
//! The client's buffer of not-yet-published edits. A change set is four
//! ordered lists (votes, topic moves, deletions and new items), serialized
//! with the camelCase field names the `/publish` endpoint expects:
//!
//! ```json
//! {
//!   "votes":        [{ "id": "...", "itemText": "APPLE", "topic": "T1", "voteType": "upvote" }],
//!   "topicChanges": [{ "id": "...", "itemText": "APPLE", "oldTopic": "T1", "newTopic": "T2" }],
//!   "deletions":    [{ "id": "...", "itemText": "PEAR", "topic": "T1" }],
//!   "newItems":     [{ "id": "...", "itemText": "PLUM", "topic": "T2", "upvotes": 0, "downvotes": 0 }]
//! }
//! ```
//!
//! Every entry carries a random event id so the server can skip events it
//! already applied when the same change set is submitted twice.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a vote
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

/// A single recorded vote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VoteChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub item_text: String,
    /// Topic the item was in when the vote was cast
    pub topic: String,
    pub vote_type: VoteType,
}

/// An item moved from one topic to another
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TopicChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub item_text: String,
    pub old_topic: String,
    pub new_topic: String,
}

/// An item removed from its topic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Deletion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub item_text: String,
    pub topic: String,
}

/// A newly created item with its initial counters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub item_text: String,
    pub topic: String,
    #[serde(default)]
    pub upvotes: u64,
    #[serde(default)]
    pub downvotes: u64,
}

/// Ordered buffer of local edits awaiting publish
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    #[serde(default)]
    pub votes: Vec<VoteChange>,
    #[serde(default)]
    pub topic_changes: Vec<TopicChange>,
    #[serde(default)]
    pub deletions: Vec<Deletion>,
    #[serde(default)]
    pub new_items: Vec<NewItem>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vote. Repeated votes on one item are kept as separate entries.
    pub fn record_vote(&mut self, item_text: &str, topic: &str, vote_type: VoteType) {
        self.votes.push(VoteChange {
            id: Some(Uuid::new_v4()),
            item_text: item_text.to_string(),
            topic: topic.to_string(),
            vote_type,
        });
    }

    pub fn record_topic_change(&mut self, item_text: &str, old_topic: &str, new_topic: &str) {
        self.topic_changes.push(TopicChange {
            id: Some(Uuid::new_v4()),
            item_text: item_text.to_string(),
            old_topic: old_topic.to_string(),
            new_topic: new_topic.to_string(),
        });
    }

    /// Append a deletion unless this item is already marked deleted.
    ///
    /// Returns whether an entry was appended.
    pub fn record_deletion(&mut self, item_text: &str, topic: &str) -> bool {
        if self.deletions.iter().any(|d| d.item_text == item_text) {
            return false;
        }
        self.deletions.push(Deletion {
            id: Some(Uuid::new_v4()),
            item_text: item_text.to_string(),
            topic: topic.to_string(),
        });
        true
    }

    pub fn record_new_item(&mut self, item_text: &str, topic: &str) {
        self.new_items.push(NewItem {
            id: Some(Uuid::new_v4()),
            item_text: item_text.to_string(),
            topic: topic.to_string(),
            upvotes: 0,
            downvotes: 0,
        });
    }

    /// The not-yet-published creation of `item_text`, if this set holds one.
    ///
    /// Votes and moves are replayed before new items, so edits to an item
    /// created in the same set must be folded into its creation entry.
    pub fn new_item_mut(&mut self, item_text: &str) -> Option<&mut NewItem> {
        self.new_items.iter_mut().rev().find(|n| n.item_text == item_text)
    }

    /// Drop the creation of `item_text` from this set. Returns whether one was dropped.
    pub fn discard_new_item(&mut self, item_text: &str) -> bool {
        let before = self.new_items.len();
        self.new_items.retain(|n| n.item_text != item_text);
        self.new_items.len() != before
    }

    /// Clear all four lists together
    pub fn reset(&mut self) {
        self.votes.clear();
        self.topic_changes.clear();
        self.deletions.clear();
        self.new_items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of recorded events
    pub fn len(&self) -> usize {
        self.votes.len() + self.topic_changes.len() + self.deletions.len() + self.new_items.len()
    }
}
