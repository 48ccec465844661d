//! # Client Vote State
//!
//! The local cache of server data plus the change set of edits not yet
//! published. Every command updates both together or neither.
//!
//! ## Publish lifecycle
//!
//! ```text
//!   pending ──begin_publish──▶ in_flight ──finish_publish(Ok)──▶ dropped
//!                               ▲     │
//!                 begin_publish │     │ finish_publish(Err)
//!                               │     ▼
//!                               retry
//! ```
//!
//! Edits made while a publish is in flight go to a fresh `pending` set, so a
//! publish completing late never clears them. A failed set is kept whole in
//! `retry` and is sent on its own before anything newer: the server replays
//! new items last, so edits to an item created in the failed set only apply
//! once that creation has landed.

use chrono::{DateTime, Utc};

use crate::egui_app::commands::Command;
use crate::egui_app::error::ClientError;
use crate::egui_app::local_store::SessionSnapshot;
use crate::shared::{
    normalize_item_text, normalize_topic, replay, ChangeSet, Item, StoreData, TopicsList,
    VoteType,
};

/// Cache, topics and change tracking for one client session
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    cache: StoreData,
    topics: TopicsList,
    pending: ChangeSet,
    retry: Option<ChangeSet>,
    in_flight: Option<ChangeSet>,
    last_published: Option<DateTime<Utc>>,
}

impl ClientState {
    /// Start from freshly fetched server data with nothing pending
    pub fn new(cache: StoreData, topics: TopicsList) -> Self {
        Self {
            cache,
            topics,
            ..Self::default()
        }
    }

    /// Resume a persisted session
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            cache: snapshot.cache,
            topics: snapshot.topics,
            pending: snapshot.pending,
            retry: snapshot.retry.filter(|changes| !changes.is_empty()),
            in_flight: None,
            last_published: snapshot.last_published,
        }
    }

    /// Capture the session for persistence
    ///
    /// An in-flight change set is saved as the retry set, so quitting
    /// mid-publish loses nothing. The server skips events it already applied
    /// if the set is sent again.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cache: self.cache.clone(),
            topics: self.topics.clone(),
            pending: self.pending.clone(),
            retry: self.in_flight.clone().or_else(|| self.retry.clone()),
            last_published: self.last_published,
        }
    }

    pub fn cache(&self) -> &StoreData {
        &self.cache
    }

    pub fn topics(&self) -> &TopicsList {
        &self.topics
    }

    pub fn pending(&self) -> &ChangeSet {
        &self.pending
    }

    pub fn is_publishing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_published(&self) -> Option<DateTime<Utc>> {
        self.last_published
    }

    /// A change set whose publish failed, waiting to be sent again
    pub fn retry(&self) -> Option<&ChangeSet> {
        self.retry.as_ref()
    }

    /// Number of edits the server has not confirmed
    pub fn unpublished_len(&self) -> usize {
        let unconfirmed = self.in_flight.as_ref().or(self.retry.as_ref());
        self.pending.len() + unconfirmed.map_or(0, ChangeSet::len)
    }

    /// Topics to display: the topics list in order, then any cached bucket
    /// that is missing from the list
    pub fn display_topics(&self) -> Vec<String> {
        let mut names = self.topics.topics.clone();
        for name in self.cache.topic_names() {
            if !self.topics.contains(name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// Apply a user command to the cache and record it for publishing
    pub fn apply(&mut self, command: Command) -> Result<(), ClientError> {
        match command {
            Command::Upvote { item_text } => self.vote(&item_text, VoteType::Upvote),
            Command::Downvote { item_text } => self.vote(&item_text, VoteType::Downvote),
            Command::MoveItem {
                item_text,
                new_topic,
            } => self.move_item(&item_text, &normalize_topic(&new_topic)),
            Command::DeleteItem { item_text } => self.delete_item(&item_text),
            Command::AddItem { item_text, topic } => {
                self.add_item(&normalize_item_text(&item_text), &normalize_topic(&topic))
            }
        }
    }

    fn current_topic(&self, item_text: &str) -> Result<String, ClientError> {
        self.cache
            .topic_of(item_text)
            .map(str::to_string)
            .ok_or_else(|| ClientError::validation(format!("Unknown item: {}", item_text)))
    }

    fn vote(&mut self, item_text: &str, vote_type: VoteType) -> Result<(), ClientError> {
        let topic = self.current_topic(item_text)?;
        if let Some(item) = self.cache.get_mut(&topic, item_text) {
            bump(item, vote_type);
        }

        match self.pending.new_item_mut(item_text) {
            Some(created) => match vote_type {
                VoteType::Upvote => created.upvotes += 1,
                VoteType::Downvote => created.downvotes += 1,
            },
            None => self.pending.record_vote(item_text, &topic, vote_type),
        }
        Ok(())
    }

    fn move_item(&mut self, item_text: &str, new_topic: &str) -> Result<(), ClientError> {
        let old_topic = self.current_topic(item_text)?;
        if old_topic == new_topic {
            return Err(ClientError::validation(format!(
                "{} is already in {}",
                item_text, new_topic
            )));
        }
        if !self.topics.contains(new_topic) {
            return Err(ClientError::validation(format!("Unknown topic: {}", new_topic)));
        }

        self.cache.move_item(item_text, &old_topic, new_topic);
        match self.pending.new_item_mut(item_text) {
            Some(created) => created.topic = new_topic.to_string(),
            None => self.pending.record_topic_change(item_text, &old_topic, new_topic),
        }
        Ok(())
    }

    fn delete_item(&mut self, item_text: &str) -> Result<(), ClientError> {
        let topic = self.current_topic(item_text)?;
        self.cache.remove(&topic, item_text);

        // An item created in this change set was never on the server
        if !self.pending.discard_new_item(item_text) {
            self.pending.record_deletion(item_text, &topic);
        }
        Ok(())
    }

    fn add_item(&mut self, item_text: &str, topic: &str) -> Result<(), ClientError> {
        if item_text.is_empty() {
            return Err(ClientError::validation("Item text cannot be empty"));
        }
        if let Some(existing) = self.cache.topic_of(item_text) {
            return Err(ClientError::validation(format!(
                "{} already exists in {}",
                item_text, existing
            )));
        }
        if !self.topics.contains(topic) {
            return Err(ClientError::validation(format!("Unknown topic: {}", topic)));
        }

        self.cache.insert(topic, item_text, Item::new());
        self.pending.record_new_item(item_text, topic);
        Ok(())
    }

    /// Take the next change set to publish
    ///
    /// A failed set goes out again before the pending edits. Returns `None`
    /// when there is nothing to publish or a publish is already running.
    pub fn begin_publish(&mut self) -> Option<ChangeSet> {
        if self.in_flight.is_some() {
            return None;
        }
        let changes = match self.retry.take() {
            Some(changes) => changes,
            None if self.pending.is_empty() => return None,
            None => std::mem::take(&mut self.pending),
        };
        self.in_flight = Some(changes.clone());
        Some(changes)
    }

    /// Settle the running publish
    ///
    /// On success the in-flight set is dropped and the cache is replaced by
    /// the fresh server data, with edits recorded meanwhile replayed on top.
    /// On failure the in-flight set becomes the retry set, still separate
    /// from those edits, and the error is returned.
    pub fn finish_publish(
        &mut self,
        result: Result<StoreData, ClientError>,
    ) -> Result<(), ClientError> {
        let Some(in_flight) = self.in_flight.take() else {
            return Ok(());
        };

        match result {
            Ok(data) => {
                tracing::info!(events = in_flight.len(), "Change set published");
                self.last_published = Some(Utc::now());
                self.refresh(data);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(events = in_flight.len(), "Publish failed: {}", err);
                self.retry = Some(in_flight);
                Err(err)
            }
        }
    }

    /// Replace the cache with server data and replay unconfirmed edits onto it
    pub fn refresh(&mut self, data: StoreData) {
        let mut cache = data;
        if let Some(unconfirmed) = self.in_flight.as_ref().or(self.retry.as_ref()) {
            replay(&mut cache, unconfirmed);
        }
        let report = replay(&mut cache, &self.pending);
        if report.stale_skipped > 0 {
            tracing::debug!(stale = report.stale_skipped, "Pending edits no longer apply");
        }
        self.cache = cache;
    }

    pub fn set_topics(&mut self, topics: TopicsList) {
        self.topics = topics;
    }

    /// Check a new topic name before sending it to the server
    pub fn validate_new_topic(&self, name: &str) -> Result<String, ClientError> {
        let topic = normalize_topic(name);
        if topic.is_empty() {
            return Err(ClientError::validation("Topic name cannot be empty"));
        }
        if self.topics.contains(&topic) {
            return Err(ClientError::validation(format!("Topic {} already exists", topic)));
        }
        Ok(topic)
    }

    /// A topic may be deleted only when no cached item belongs to it
    pub fn can_delete_topic(&self, topic: &str) -> Result<(), ClientError> {
        if !self.topics.contains(topic) {
            return Err(ClientError::validation(format!("Unknown topic: {}", topic)));
        }
        if !self.cache.is_topic_empty(topic) {
            return Err(ClientError::validation(format!(
                "Topic {} still has items",
                topic
            )));
        }
        Ok(())
    }

    /// Record a server-confirmed topic deletion
    pub fn topic_deleted(&mut self, topic: &str, topics: TopicsList) {
        if self.cache.is_topic_empty(topic) {
            self.cache.remove_topic(topic);
        }
        self.topics = topics;
    }
}

fn bump(item: &mut Item, vote_type: VoteType) {
    match vote_type {
        VoteType::Upvote => item.upvotes += 1,
        VoteType::Downvote => item.downvotes += 1,
    }
}
