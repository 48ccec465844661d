/**
 * Store Document Types
 *
 * This module defines the shape of the persisted voting document that is
 * shared between the server (which owns it) and the client (which mirrors it
 * in its Local Cache).
 *
 * # Layout
 *
 * ```json
 * {
 *   "T1": { "APPLE": { "upvotes": 2, "downvotes": 0 } },
 *   "T2": {}
 * }
 * ```
 *
 * Topic names map to buckets, buckets map item text to vote counts. Item text
 * is unique across the whole document, not just within one bucket.
 */
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response header carrying the server's store version
pub const STORE_VERSION_HEADER: &str = "x-store-version";

/// Vote counters for a single item
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Number of upvotes received
    pub upvotes: u64,
    /// Number of downvotes received
    pub downvotes: u64,
}

impl Item {
    /// A freshly created item with zero votes
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counts(upvotes: u64, downvotes: u64) -> Self {
        Self { upvotes, downvotes }
    }
}

/// Items of a single topic, keyed by normalized item text
pub type TopicItems = BTreeMap<String, Item>;

/// Full voting document: topic name -> item text -> counters
///
/// Serialized transparently as the plain JSON object shown in the module
/// docs, so the on-disk file stays readable by hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct StoreData {
    topics: BTreeMap<String, TopicItems>,
}

impl StoreData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find which topic currently holds `item_text`
    pub fn topic_of(&self, item_text: &str) -> Option<&str> {
        self.topics
            .iter()
            .find(|(_, items)| items.contains_key(item_text))
            .map(|(topic, _)| topic.as_str())
    }

    /// Whether `item_text` exists in any topic
    pub fn contains_item(&self, item_text: &str) -> bool {
        self.topic_of(item_text).is_some()
    }

    /// Look up an item in a specific topic
    pub fn get(&self, topic: &str, item_text: &str) -> Option<&Item> {
        self.topics.get(topic).and_then(|items| items.get(item_text))
    }

    pub fn get_mut(&mut self, topic: &str, item_text: &str) -> Option<&mut Item> {
        self.topics
            .get_mut(topic)
            .and_then(|items| items.get_mut(item_text))
    }

    /// Look up an item wherever it lives, preferring `hint` when it holds it
    pub fn locate_mut(&mut self, hint: &str, item_text: &str) -> Option<&mut Item> {
        let topic = if self.get(hint, item_text).is_some() {
            hint.to_string()
        } else {
            self.topic_of(item_text)?.to_string()
        };
        self.get_mut(&topic, item_text)
    }

    /// Items of one topic, if the topic has a bucket
    pub fn items(&self, topic: &str) -> Option<&TopicItems> {
        self.topics.get(topic)
    }

    /// Get the bucket for `topic`, creating it when absent
    pub fn bucket_mut(&mut self, topic: &str) -> &mut TopicItems {
        self.topics.entry(topic.to_string()).or_default()
    }

    /// Set (not merge) an item, overwriting whatever was at that key
    pub fn insert(&mut self, topic: &str, item_text: &str, item: Item) -> Option<Item> {
        self.bucket_mut(topic).insert(item_text.to_string(), item)
    }

    /// Remove an item from one topic; the bucket itself is kept
    pub fn remove(&mut self, topic: &str, item_text: &str) -> Option<Item> {
        self.topics
            .get_mut(topic)
            .and_then(|items| items.remove(item_text))
    }

    /// Move an item between topics, creating the destination bucket if needed
    ///
    /// Returns `false` and changes nothing when `from` does not hold the item.
    pub fn move_item(&mut self, item_text: &str, from: &str, to: &str) -> bool {
        match self.remove(from, item_text) {
            Some(item) => {
                self.insert(to, item_text, item);
                true
            }
            None => false,
        }
    }

    /// Overwrite a whole topic bucket
    pub fn set_topic(&mut self, topic: &str, items: TopicItems) {
        self.topics.insert(topic.to_string(), items);
    }

    /// Drop a whole topic bucket
    pub fn remove_topic(&mut self, topic: &str) -> Option<TopicItems> {
        self.topics.remove(topic)
    }

    /// A topic is empty when it has no bucket or an empty one
    pub fn is_topic_empty(&self, topic: &str) -> bool {
        self.topics.get(topic).map_or(true, |items| items.is_empty())
    }

    pub fn topic_names(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TopicItems)> {
        self.topics.iter()
    }

    pub fn item_count(&self) -> usize {
        self.topics.values().map(BTreeMap::len).sum()
    }
}

impl FromIterator<(String, TopicItems)> for StoreData {
    fn from_iter<I: IntoIterator<Item = (String, TopicItems)>>(iter: I) -> Self {
        Self {
            topics: iter.into_iter().collect(),
        }
    }
}

/// The ordered topics list, stored and served as `{"topics": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicsList {
    pub topics: Vec<String>,
}

impl TopicsList {
    pub fn new(topics: Vec<String>) -> Self {
        Self { topics }
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }

    /// Append `topic` unless present; returns whether it was added
    pub fn add(&mut self, topic: &str) -> bool {
        if self.contains(topic) {
            return false;
        }
        self.topics.push(topic.to_string());
        true
    }

    /// Remove `topic`; returns whether it was present
    pub fn remove(&mut self, topic: &str) -> bool {
        match self.topics.iter().position(|t| t == topic) {
            Some(index) => {
                self.topics.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Request body for `POST /topics/add` and `DELETE /topics/delete`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicRequest {
    pub topic: String,
}

/// Normalize user-entered item text into its store key
///
/// Surrounding whitespace is trimmed and the text is upper-cased, so
/// " apple " and "APPLE" name the same item.
pub fn normalize_item_text(text: &str) -> String {
    text.trim().to_uppercase()
}

/// Normalize a topic name (trimmed, case preserved)
pub fn normalize_topic(topic: &str) -> String {
    topic.trim().to_string()
}
