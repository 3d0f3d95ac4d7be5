pub mod prelude;

pub mod game_history;
pub mod guess_details;
pub mod secret_words;
pub mod users;
