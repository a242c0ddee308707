pub mod settings;

pub use settings::{AppConfig, BuddyConfig, DisplayConfig, QuizConfig, Season, SeasonConfig};
