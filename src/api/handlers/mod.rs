//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one endpoint.

pub mod check_code;
pub mod health;
pub mod links;
pub mod redirect;
pub mod shorten;
pub mod stats;
pub mod variants;
pub mod verify_password;

pub use check_code::check_code_handler;
pub use health::health_handler;
pub use links::delete_link_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use stats::stats_handler;
pub use variants::variants_handler;
pub use verify_password::verify_password_handler;
