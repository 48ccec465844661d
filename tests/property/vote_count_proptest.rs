//! Property-based tests for vote counting and change tracking

use proptest::prelude::*;
use topicvote::egui_app::{ClientError, ClientState, Command};
use topicvote::shared::{replay, replay_once, AppliedEvents, ChangeSet, Item, StoreData, VoteType};

use crate::common::{apple_in_t1, topics};

/// One step of a client session against a modelled server
///
/// Item edits pick their target by index into the cached items.
#[derive(Debug, Clone, Copy)]
enum Op {
    Upvote(usize),
    Downvote(usize),
    Move(usize),
    Delete(usize),
    Add,
    ReAddApple,
    BeginPublish,
    SucceedPublish,
    FailPublish,
    /// The server applies the in-flight set but the client sees an error
    LoseResponse,
    SnapshotRestore,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<usize>().prop_map(Op::Upvote),
        1 => any::<usize>().prop_map(Op::Downvote),
        2 => any::<usize>().prop_map(Op::Move),
        1 => any::<usize>().prop_map(Op::Delete),
        2 => Just(Op::Add),
        1 => Just(Op::ReAddApple),
        2 => Just(Op::BeginPublish),
        1 => Just(Op::SucceedPublish),
        1 => Just(Op::FailPublish),
        1 => Just(Op::LoseResponse),
        1 => Just(Op::SnapshotRestore),
    ]
}

struct Session {
    state: ClientState,
    server: StoreData,
    applied: AppliedEvents,
    /// The set handed out by `begin_publish` and not yet settled
    outstanding: Option<ChangeSet>,
    next_item: usize,
}

impl Session {
    fn new() -> Self {
        // Both buckets exist up front; the cache and the server may differ in
        // which empty buckets they hold, never in items
        let mut data = apple_in_t1();
        data.bucket_mut("T2");
        Self {
            state: ClientState::new(data.clone(), topics(&["T1", "T2"])),
            server: data,
            applied: AppliedEvents::default(),
            outstanding: None,
            next_item: 0,
        }
    }

    fn pick(&self, index: usize) -> Option<String> {
        let items: Vec<String> = self
            .state
            .cache()
            .iter()
            .flat_map(|(_, items)| items.keys().cloned())
            .collect();
        if items.is_empty() {
            None
        } else {
            Some(items[index % items.len()].clone())
        }
    }

    fn command(&mut self, op: Op) -> Option<Command> {
        match op {
            Op::Upvote(i) => self.pick(i).map(Command::upvote),
            Op::Downvote(i) => self.pick(i).map(Command::downvote),
            Op::Move(i) => self.pick(i).map(|text| {
                let target = if self.state.cache().topic_of(&text) == Some("T1") { "T2" } else { "T1" };
                Command::move_item(text, target)
            }),
            Op::Delete(i) => self.pick(i).map(Command::delete),
            Op::Add => {
                self.next_item += 1;
                Some(Command::add(format!("item{}", self.next_item), "T2"))
            }
            Op::ReAddApple => Some(Command::add("apple", "T1")),
            _ => None,
        }
    }

    fn server_applies(&mut self, changes: &ChangeSet) {
        replay_once(&mut self.server, changes, &mut self.applied);
    }

    fn step(&mut self, op: Op) {
        if let Some(command) = self.command(op) {
            // Rejected commands change nothing; they are simply skipped here
            let _ = self.state.apply(command);
            return;
        }
        match op {
            Op::BeginPublish => {
                if self.outstanding.is_none() {
                    self.outstanding = self.state.begin_publish();
                }
            }
            Op::SucceedPublish => {
                if let Some(changes) = self.outstanding.take() {
                    self.server_applies(&changes);
                    self.state.finish_publish(Ok(self.server.clone())).unwrap();
                }
            }
            Op::FailPublish => {
                if self.outstanding.take().is_some() {
                    let _ = self.state.finish_publish(Err(ClientError::Network("refused".into())));
                }
            }
            Op::LoseResponse => {
                if let Some(changes) = self.outstanding.take() {
                    self.server_applies(&changes);
                    let _ = self.state.finish_publish(Err(ClientError::Network("reset".into())));
                }
            }
            Op::SnapshotRestore => {
                // Quitting abandons the outstanding request before it arrives
                self.outstanding = None;
                self.state = ClientState::from_snapshot(self.state.snapshot());
            }
            _ => {}
        }
    }

    /// The server document once every unconfirmed set has landed, in order
    fn expected_cache(&self) -> StoreData {
        let mut server = self.server.clone();
        let mut applied = self.applied.clone();
        if let Some(unconfirmed) = self.outstanding.as_ref().or(self.state.retry()) {
            replay_once(&mut server, unconfirmed, &mut applied);
        }
        replay(&mut server, self.state.pending());
        server
    }

    fn settle(&mut self) {
        if self.outstanding.is_some() {
            self.step(Op::SucceedPublish);
        }
        while let Some(changes) = self.state.begin_publish() {
            self.server_applies(&changes);
            self.state.finish_publish(Ok(self.server.clone())).unwrap();
        }
    }
}

fn vote_types() -> impl Strategy<Value = Vec<VoteType>> {
    prop::collection::vec(prop_oneof![Just(VoteType::Upvote), Just(VoteType::Downvote)], 0..64)
}

proptest! {
    #[test]
    fn test_n_votes_add_exactly_n(votes in vote_types()) {
        let mut changes = ChangeSet::new();
        for vote_type in &votes {
            changes.record_vote("APPLE", "T1", *vote_type);
        }

        let mut data = apple_in_t1();
        replay(&mut data, &changes);

        let ups = votes.iter().filter(|v| **v == VoteType::Upvote).count() as u64;
        let downs = votes.len() as u64 - ups;
        prop_assert_eq!(data.get("T1", "APPLE"), Some(&Item::with_counts(ups, downs)));
    }

    #[test]
    fn test_resubmission_is_idempotent(votes in vote_types(), resubmits in 1..4usize) {
        let mut changes = ChangeSet::new();
        for vote_type in &votes {
            changes.record_vote("APPLE", "T1", *vote_type);
        }

        let mut once = apple_in_t1();
        replay(&mut once, &changes);

        let mut repeated = apple_in_t1();
        let mut applied = AppliedEvents::default();
        for _ in 0..=resubmits {
            replay_once(&mut repeated, &changes, &mut applied);
        }
        prop_assert_eq!(repeated, once);
    }

    #[test]
    fn test_server_replay_matches_optimistic_cache(
        ops in prop::collection::vec(op(), 0..48)
    ) {
        let mut session = Session::new();
        for op in ops {
            session.step(op);
            prop_assert_eq!(&session.expected_cache(), session.state.cache());
        }

        // Everything unconfirmed eventually lands and matches the cache
        session.settle();
        prop_assert_eq!(&session.server, session.state.cache());
    }
}
