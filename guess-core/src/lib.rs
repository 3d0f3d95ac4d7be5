pub mod config;
pub mod daily_limit;
pub mod errors;
pub mod feedback;
pub mod lifecycle;
pub mod session;
pub mod store;
pub mod validation;
pub mod words;

// Re-export main components
pub use config::*;
pub use daily_limit::*;
pub use errors::*;
pub use feedback::*;
pub use lifecycle::*;
pub use session::*;
pub use store::*;
pub use validation::*;
pub use words::*;
