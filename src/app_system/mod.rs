//! Application shell: routing, the UI event actor, startup and shutdown.

pub mod app_service;
pub mod delivery_system;
pub mod logging;
pub mod routing;

pub use app_service::*;
pub use delivery_system::*;
pub use logging::*;
pub use routing::*;
