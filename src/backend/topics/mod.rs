//! Topic list endpoints.

pub mod handlers;

pub use handlers::{add_topic, delete_topic, get_topics};
