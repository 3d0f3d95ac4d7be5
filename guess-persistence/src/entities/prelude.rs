pub use super::game_history::Entity as GameHistory;
pub use super::guess_details::Entity as GuessDetails;
pub use super::secret_words::Entity as SecretWords;
pub use super::users::Entity as Users;
