pub mod errors;
pub mod game;
pub mod messages;
pub mod report;
pub mod user;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use messages::*;
pub use report::*;
pub use user::*;

pub type SessionId = uuid::Uuid;
pub type UserId = uuid::Uuid;
