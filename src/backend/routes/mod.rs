//! Route Configuration Module
//!
//! - **`router`** - Main router creation and route assembly
//! - **`api_routes`** - Vote data and topic endpoints
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - Endpoint groups
//! ```

/// Main router creation
pub mod router;

/// API endpoint groups
pub mod api_routes;

pub use router::create_router;
