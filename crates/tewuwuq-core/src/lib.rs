pub mod ports;
pub mod event_bus;
pub mod store;
pub mod title;
pub mod failure;
pub mod manager;
pub mod exchange;
pub mod analysis;


pub use exchange::SendOutcome;
pub use failure::FailureKind;
pub use manager::SessionManager;
