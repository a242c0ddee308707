//! Input snapshots. A roster states explicitly whether it is raw attendance
//! or an already processed export; that tag is the one place the pipeline
//! decides whether to run.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Season;
use crate::engine::ranking::process_roster;
use crate::error::{StatsError, StatsResult};
use crate::models::{PlayerRecord, ProcessedPlayer, Schedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotKind {
    Raw,
    Processed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RosterSnapshot {
    Raw(Vec<PlayerRecord>),
    Processed(Vec<ProcessedPlayer>),
}

#[derive(Deserialize)]
struct Envelope {
    kind: SnapshotKind,
    players: Value,
}

#[derive(Serialize)]
struct EnvelopeOut<'a, T: Serialize> {
    kind: SnapshotKind,
    players: &'a [T],
}

fn invalid(what: &'static str, err: serde_json::Error) -> StatsError {
    StatsError::InvalidInput {
        what,
        reason: err.to_string(),
    }
}

impl RosterSnapshot {
    pub fn kind(&self) -> SnapshotKind {
        match self {
            RosterSnapshot::Raw(_) => SnapshotKind::Raw,
            RosterSnapshot::Processed(_) => SnapshotKind::Processed,
        }
    }

    pub fn into_processed(self, season: &Season) -> Vec<ProcessedPlayer> {
        match self {
            RosterSnapshot::Raw(records) => process_roster(&records, season),
            RosterSnapshot::Processed(players) => {
                log::debug!("Using {} pre-processed players as is", players.len());
                players
            }
        }
    }

    pub fn to_json(&self) -> StatsResult<String> {
        let out = match self {
            RosterSnapshot::Raw(players) => serde_json::to_string_pretty(&EnvelopeOut {
                kind: SnapshotKind::Raw,
                players,
            }),
            RosterSnapshot::Processed(players) => serde_json::to_string_pretty(&EnvelopeOut {
                kind: SnapshotKind::Processed,
                players,
            }),
        };
        out.map_err(|e| invalid("roster", e))
    }
}

/// `{"kind": "raw" | "processed", "players": [...]}`
pub fn parse_roster(json: &str) -> StatsResult<RosterSnapshot> {
    let envelope: Envelope = serde_json::from_str(json).map_err(|e| invalid("roster", e))?;
    if !envelope.players.is_array() {
        return Err(StatsError::InvalidInput {
            what: "roster",
            reason: "\"players\" must be a list".to_string(),
        });
    }
    match envelope.kind {
        SnapshotKind::Raw => serde_json::from_value(envelope.players)
            .map(RosterSnapshot::Raw)
            .map_err(|e| invalid("roster", e)),
        SnapshotKind::Processed => serde_json::from_value(envelope.players)
            .map(RosterSnapshot::Processed)
            .map_err(|e| invalid("roster", e)),
    }
}

/// `{"<year>": [{date, month, played, players?, field?}, ...]}`
pub fn parse_schedule(json: &str) -> StatsResult<Schedule> {
    serde_json::from_str(json).map_err(|e| invalid("schedule", e))
}
