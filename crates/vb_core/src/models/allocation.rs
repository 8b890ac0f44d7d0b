use super::team::round_hundredths;
use super::{Player, PositionCounts, Team};
use serde::{Deserialize, Serialize};

/// Finalized team as reported to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamReport {
    /// 1-based team number
    pub team_number: usize,
    pub players: Vec<Player>,
    pub total_players: usize,
    pub average_level: f64,
    pub men_count: usize,
    pub women_count: usize,
    pub has_setter: bool,
    pub has_libero: bool,
    pub positions: PositionCounts,
}

impl TeamReport {
    pub fn from_team(team_number: usize, team: &Team) -> Self {
        Self {
            team_number,
            players: team.players().to_vec(),
            total_players: team.len(),
            average_level: team.average_level(),
            men_count: team.men_count(),
            women_count: team.women_count(),
            has_setter: team.has_setter(),
            has_libero: team.has_libero(),
            positions: team.position_counts(),
        }
    }

    pub fn total_level(&self) -> u32 {
        self.players.iter().map(|p| u32::from(p.level)).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSummary {
    pub total_confirmed_players: usize,
    pub players_in_teams: usize,
    pub players_on_bench: usize,
    /// |avg(team 1) - avg(team 2)|, two decimals
    pub average_level_difference: f64,
}

/// Output of a successful allocation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    pub teams: Vec<TeamReport>,
    pub bench_players: Vec<Player>,
    pub summary: AllocationSummary,
}

impl AllocationResult {
    /// Assemble the report from finished teams and the bench.
    pub fn finalize(teams: &[Team], bench_players: Vec<Player>) -> Self {
        let reports: Vec<TeamReport> = teams
            .iter()
            .enumerate()
            .map(|(idx, team)| TeamReport::from_team(idx + 1, team))
            .collect();

        let players_in_teams: usize = reports.iter().map(|t| t.total_players).sum();
        let average_level_difference = match reports.as_slice() {
            [first, second, ..] => {
                round_hundredths((first.average_level - second.average_level).abs())
            }
            _ => 0.0,
        };

        let summary = AllocationSummary {
            total_confirmed_players: players_in_teams + bench_players.len(),
            players_in_teams,
            players_on_bench: bench_players.len(),
            average_level_difference,
        };

        Self { teams: reports, bench_players, summary }
    }

    /// Team number holding `player_id`, or `None` if benched or unknown.
    pub fn team_of(&self, player_id: &str) -> Option<usize> {
        self.teams
            .iter()
            .find(|t| t.players.iter().any(|p| p.id == player_id))
            .map(|t| t.team_number)
    }

    pub fn is_benched(&self, player_id: &str) -> bool {
        self.bench_players.iter().any(|p| p.id == player_id)
    }
}
