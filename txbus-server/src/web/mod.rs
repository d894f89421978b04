//! Web layer for the bus search.
//!
//! Serves the search page and executes what the view state decides:
//! searches, sort changes and booking redirects.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
