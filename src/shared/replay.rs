//! # Change Set Replay
//!
//! Applies a [`ChangeSet`] to a [`StoreData`] document. The server uses this
//! to merge a published change set into the persisted store, and the client
//! uses it to lay still-pending edits over freshly fetched server data.
//!
//! ## Processing Order
//!
//! The four lists are applied strictly in this order, each in recorded order:
//!
//! 1. **votes**: the item is looked up by identity. The topic recorded at vote
//!    time is checked first, then every other topic, so a vote still counts
//!    after the item was moved. Votes for items that no longer exist are
//!    skipped.
//! 2. **topic changes**: applied only if the old topic still holds the item;
//!    the destination bucket is created when missing.
//! 3. **deletions**: remove the item from its recorded topic if present.
//! 4. **new items**: create the topic bucket when missing and set the item,
//!    overwriting any existing entry at that key.
//!
//! Stale references are never errors; they are only counted in the
//! [`ReplayReport`].

use crate::shared::change_set::{ChangeSet, VoteType};
use crate::shared::store::{Item, StoreData};
use std::collections::{HashSet, VecDeque};
use uuid::Uuid;

/// How many applied event ids the server remembers
pub const DEFAULT_APPLIED_CAPACITY: usize = 10_000;

/// Outcome counters for one replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub votes_applied: usize,
    pub moves_applied: usize,
    pub deletions_applied: usize,
    pub items_created: usize,
    /// Events that referenced an item or topic that no longer exists
    pub stale_skipped: usize,
    /// Events whose id had already been applied
    pub duplicates_skipped: usize,
}

impl ReplayReport {
    /// Whether the replay changed the document at all
    pub fn changed(&self) -> bool {
        self.votes_applied + self.moves_applied + self.deletions_applied + self.items_created > 0
    }
}

/// Bounded memory of event ids that were already applied
///
/// Oldest ids are forgotten first once `capacity` is reached.
#[derive(Debug, Clone)]
pub struct AppliedEvents {
    seen: HashSet<Uuid>,
    order: VecDeque<Uuid>,
    capacity: usize,
}

impl AppliedEvents {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.seen.contains(id)
    }

    /// Remember `id`; returns `false` if it was already known
    pub fn insert(&mut self, id: Uuid) -> bool {
        if !self.seen.insert(id) {
            return false;
        }
        self.order.push_back(id);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for AppliedEvents {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_APPLIED_CAPACITY)
    }
}

/// Replay every event of `changes` onto `data`
pub fn replay(data: &mut StoreData, changes: &ChangeSet) -> ReplayReport {
    replay_filtered(data, changes, |_| true)
}

/// Replay `changes`, skipping events whose id is already in `applied`
///
/// Every processed id is remembered, including stale ones, so submitting the
/// same change set again is a no-op.
pub fn replay_once(
    data: &mut StoreData,
    changes: &ChangeSet,
    applied: &mut AppliedEvents,
) -> ReplayReport {
    replay_filtered(data, changes, |id| match id {
        Some(id) => applied.insert(id),
        None => true,
    })
}

fn replay_filtered<F>(data: &mut StoreData, changes: &ChangeSet, mut is_new: F) -> ReplayReport
where
    F: FnMut(Option<Uuid>) -> bool,
{
    let mut report = ReplayReport::default();

    for vote in &changes.votes {
        if !is_new(vote.id) {
            report.duplicates_skipped += 1;
            continue;
        }
        match data.locate_mut(&vote.topic, &vote.item_text) {
            Some(item) => {
                match vote.vote_type {
                    VoteType::Upvote => item.upvotes += 1,
                    VoteType::Downvote => item.downvotes += 1,
                }
                report.votes_applied += 1;
            }
            None => {
                tracing::debug!(item = %vote.item_text, "Skipping vote for missing item");
                report.stale_skipped += 1;
            }
        }
    }

    for change in &changes.topic_changes {
        if !is_new(change.id) {
            report.duplicates_skipped += 1;
            continue;
        }
        if data.move_item(&change.item_text, &change.old_topic, &change.new_topic) {
            report.moves_applied += 1;
        } else {
            tracing::debug!(
                item = %change.item_text,
                from = %change.old_topic,
                "Skipping move, source no longer holds item"
            );
            report.stale_skipped += 1;
        }
    }

    for deletion in &changes.deletions {
        if !is_new(deletion.id) {
            report.duplicates_skipped += 1;
            continue;
        }
        if data.remove(&deletion.topic, &deletion.item_text).is_some() {
            report.deletions_applied += 1;
        } else {
            report.stale_skipped += 1;
        }
    }

    for new_item in &changes.new_items {
        if !is_new(new_item.id) {
            report.duplicates_skipped += 1;
            continue;
        }
        // Another client may have created the same text in a different topic
        if let Some(elsewhere) = data.topic_of(&new_item.item_text).map(str::to_string) {
            if elsewhere != new_item.topic {
                data.remove(&elsewhere, &new_item.item_text);
            }
        }
        data.insert(
            &new_item.topic,
            &new_item.item_text,
            Item::with_counts(new_item.upvotes, new_item.downvotes),
        );
        report.items_created += 1;
    }

    report
}
