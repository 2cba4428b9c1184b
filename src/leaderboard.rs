//! On-chain leaderboard view model
//!
//! Built from read-only contract queries (`getAllPlayers`, `highScores`,
//! `getGlobalStats`, `getPlayerStats`) performed by the chain collaborator.
//! Nothing here talks to the network: the collaborator pushes its results in
//! as one JSON document (`ChainData`) and the shell renders `ChainView`.

use serde::{Deserialize, Serialize};

/// Rows shown on the leaderboard panel
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player address (hex)
    pub player: String,
    pub score: u64,
}

/// Players sorted by best score, descending
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

/// Totals across all players
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_games: u64,
    pub total_jumps: u64,
    pub total_players: u64,
}

/// Totals for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub total_games: u64,
    pub total_jumps: u64,
    pub high_score: u64,
}

impl Leaderboard {
    /// Pair up players with their scores. Unpaired trailing items are ignored;
    /// equal scores keep chain order.
    pub fn from_chain(players: Vec<String>, scores: Vec<u64>) -> Self {
        if players.len() != scores.len() {
            log::warn!(
                "Leaderboard length mismatch: {} players, {} scores",
                players.len(),
                scores.len()
            );
        }
        let mut entries: Vec<LeaderboardEntry> = players
            .into_iter()
            .zip(scores)
            .map(|(player, score)| LeaderboardEntry { player, score })
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// 1-based rank of an address (hex case ignored)
    pub fn rank_of(&self, address: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.player.eq_ignore_ascii_case(address))
            .map(|i| i + 1)
    }
}

/// Query results as delivered by the chain collaborator.
///
/// `players` and `scores` are the parallel arrays returned by
/// `getAllPlayers` and `highScores`; the stats are absent until the
/// corresponding queries have resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChainData {
    pub players: Vec<String>,
    pub scores: Vec<u64>,
    pub global_stats: Option<GlobalStats>,
    pub player_stats: Option<PlayerStats>,
    /// Connected wallet address, if any
    pub address: Option<String>,
}

/// One rendered leaderboard line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub label: String,
    pub score: u64,
    pub is_you: bool,
}

/// Everything the leaderboard panel shows
#[derive(Debug, Clone, Default)]
pub struct ChainView {
    pub board: Leaderboard,
    pub global: Option<GlobalStats>,
    pub player: Option<PlayerStats>,
    pub address: Option<String>,
}

impl From<ChainData> for ChainView {
    fn from(data: ChainData) -> Self {
        Self {
            board: Leaderboard::from_chain(data.players, data.scores),
            global: data.global_stats,
            player: data.player_stats,
            address: data.address,
        }
    }
}

impl ChainView {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let data: ChainData = serde_json::from_str(json)?;
        Ok(data.into())
    }

    /// The best `n` players in display form
    pub fn rows(&self, n: usize) -> Vec<LeaderboardRow> {
        self.board
            .top(n)
            .iter()
            .enumerate()
            .map(|(i, entry)| LeaderboardRow {
                rank: i + 1,
                label: short_address(&entry.player),
                score: entry.score,
                is_you: self
                    .address
                    .as_deref()
                    .is_some_and(|me| entry.player.eq_ignore_ascii_case(me)),
            })
            .collect()
    }

    /// Rank of the connected wallet, if it has a score
    pub fn own_rank(&self) -> Option<usize> {
        self.address.as_deref().and_then(|me| self.board.rank_of(me))
    }
}

/// `0x1234...abcd` style display form; short strings pass through
pub fn short_address(address: &str) -> String {
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}
