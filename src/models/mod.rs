pub mod buddy;
pub mod community;
pub mod date;
pub mod player;
pub mod quiz;

pub use buddy::FootballBuddy;
pub use community::{CommunityGameRecord, CommunityStats, Schedule, SeasonSummary, YearOverYear};
pub use date::{GameDate, Month};
pub use player::{
    Attendance, MonthlyBreakdown, PlayerRecord, PlayerSeasonSummary, ProcessedPlayer, Streak,
};
pub use quiz::{AnswerRecord, AnswerValue, QuizQuestion, QuizResult, QuizSlide, RangeAnchor};
