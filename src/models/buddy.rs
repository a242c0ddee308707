use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootballBuddy {
    pub subject: String,
    pub name: String,
    pub games_with_you: u32,
    pub their_total_games: u32,
    pub percentage_of_your_games: u32,
    pub influence_on_them: u32,
    pub affinity: f64,
}
