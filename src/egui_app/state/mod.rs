pub mod client;

use std::collections::HashMap;

use chrono::{DateTime, Local};

use crate::egui_app::commands::Command;
use crate::egui_app::error::ClientError;
use crate::egui_app::sync::{SyncOutcome, SyncWorker};
pub use client::ClientState;

/// Message shown in the status line
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
    pub at: DateTime<Local>,
}

/// Central application state shared across egui views.
pub struct AppState {
    pub client: ClientState,
    worker: SyncWorker,
    pub new_item_text: String,
    pub new_item_topic: String,
    pub new_topic_name: String,
    /// Destination picked in each item's move selector, keyed by item text
    pub move_targets: HashMap<String, String>,
    pub status: Option<StatusLine>,
    /// Topic and reload requests still waiting for the server
    pub requests_in_flight: usize,
}

impl AppState {
    /// Load the session (saved first, server otherwise) and build the state
    pub fn new(worker: SyncWorker) -> Self {
        let (client, status) = match worker.load_blocking() {
            Ok(client) => (client, None),
            Err(err) => {
                tracing::error!("Initial load failed: {}", err);
                (ClientState::default(), Some(status_error(format!("Could not load data: {}", err))))
            }
        };
        let new_item_topic = client.topics().topics.first().cloned().unwrap_or_default();

        Self {
            client,
            worker,
            new_item_text: String::new(),
            new_item_topic,
            new_topic_name: String::new(),
            move_targets: HashMap::new(),
            status,
            requests_in_flight: 0,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.client.is_publishing() || self.requests_in_flight > 0
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error: false,
            at: Local::now(),
        });
    }

    fn error(&mut self, err: &ClientError) {
        self.status = Some(status_error(err.to_string()));
    }

    /// Apply a command from the views and save the session
    pub fn run_command(&mut self, command: Command) {
        let label = command.describe();
        match self.client.apply(command) {
            Ok(()) => {
                tracing::debug!("{}", label);
                self.info(label);
                self.persist();
            }
            Err(err) => {
                tracing::debug!("Command rejected: {}", err);
                self.error(&err);
            }
        }
    }

    pub fn add_item(&mut self) {
        let command = Command::add(self.new_item_text.clone(), self.new_item_topic.clone());
        let before = self.client.pending().len();
        self.run_command(command);
        if self.client.pending().len() > before {
            self.new_item_text.clear();
        }
    }

    pub fn request_publish(&mut self) {
        if self.client.is_publishing() {
            self.info("A publish is already running");
            return;
        }
        match self.client.begin_publish() {
            Some(changes) => {
                self.info(format!("Publishing {} change(s)...", changes.len()));
                self.worker.spawn_publish(changes);
            }
            None => self.info("Nothing to publish"),
        }
    }

    pub fn request_reload(&mut self) {
        if self.client.is_publishing() {
            self.info("Wait for the publish to finish before reloading");
            return;
        }
        self.requests_in_flight += 1;
        self.worker.spawn_reload();
    }

    pub fn request_add_topic(&mut self) {
        match self.client.validate_new_topic(&self.new_topic_name) {
            Ok(topic) => {
                self.requests_in_flight += 1;
                self.worker.spawn_add_topic(topic);
            }
            Err(err) => self.error(&err),
        }
    }

    pub fn request_delete_topic(&mut self, topic: &str) {
        match self.client.can_delete_topic(topic) {
            Ok(()) => {
                self.requests_in_flight += 1;
                self.worker.spawn_delete_topic(topic.to_string());
            }
            Err(err) => self.error(&err),
        }
    }

    /// Drain finished background operations; call once per frame
    pub fn check_sync_results(&mut self) {
        while let Some(outcome) = self.worker.poll() {
            self.handle_outcome(outcome);
        }
    }

    fn handle_outcome(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Published(result) => match self.client.finish_publish(result) {
                Ok(()) => match self.client.unpublished_len() {
                    0 => self.info("Data successfully published"),
                    left => self.info(format!("Published; {} newer change(s) still pending", left)),
                },
                Err(err) => self.error(&err),
            },
            SyncOutcome::Reloaded(result) => {
                self.requests_in_flight = self.requests_in_flight.saturating_sub(1);
                match result {
                    Ok((data, topics)) => {
                        self.client.refresh(data);
                        self.client.set_topics(topics);
                        self.info("Reloaded from server");
                    }
                    Err(err) => self.error(&err),
                }
            }
            SyncOutcome::TopicAdded(result) => {
                self.requests_in_flight = self.requests_in_flight.saturating_sub(1);
                match result {
                    Ok(topics) => {
                        self.client.set_topics(topics);
                        self.info(format!("Added topic {}", self.new_topic_name.trim()));
                        self.new_topic_name.clear();
                    }
                    Err(err) => self.error(&err),
                }
            }
            SyncOutcome::TopicDeleted { topic, result } => {
                self.requests_in_flight = self.requests_in_flight.saturating_sub(1);
                match result {
                    Ok(topics) => {
                        self.client.topic_deleted(&topic, topics);
                        if self.new_item_topic == topic {
                            self.new_item_topic.clear();
                        }
                        self.info(format!("Deleted topic {}", topic));
                    }
                    Err(err) => self.error(&err),
                }
            }
        }
        self.persist();
    }

    /// Save the session to the local database
    pub fn persist(&mut self) {
        if let Err(err) = self.worker.persist(&self.client.snapshot()) {
            tracing::warn!("Could not save session: {}", err);
            self.error(&err);
        }
    }

    /// Publish whatever is unconfirmed and save the session before the window closes
    ///
    /// A retry set and the pending edits go out as two publishes, in order.
    /// The first failure stops the loop.
    pub fn on_exit(&mut self) {
        while let Some(changes) = self.client.begin_publish() {
            let result = self.worker.publish_blocking(&changes);
            if let Err(err) = self.client.finish_publish(result) {
                tracing::warn!("Publish on exit failed, changes kept for next run: {}", err);
                break;
            }
        }
        self.persist();
    }
}

fn status_error(text: String) -> StatusLine {
    StatusLine {
        text,
        is_error: true,
        at: Local::now(),
    }
}
