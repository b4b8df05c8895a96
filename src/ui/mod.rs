pub mod app;
pub mod components;
pub mod events;
pub mod layout;
pub mod state;

pub use app::{run_app, DashboardApp, InputMode};
pub use state::{DashboardState, FetchDisposition, FetchTicket, RequestToken, ViewPhase};
