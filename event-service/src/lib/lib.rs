pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

// Re-export commonly used types
pub use domain::category::models::CategoryId;
pub use domain::event::models::EventId;
pub use domain::user::models::UserId;
