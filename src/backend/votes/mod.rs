//! Vote data endpoints: loading the store, publishing change sets and the
//! legacy bulk save.

pub mod handlers;

pub use handlers::{get_data, publish, save_data, SaveDataRequest, SaveDataResponse};
