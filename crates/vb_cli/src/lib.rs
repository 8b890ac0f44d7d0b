//! Roster loading for the vb_cli tool
//!
//! CSV (`id,name,gender,position,level[,status]`) → `EventRoster`
//! JSON (`{ "players": [...] }` or an event roster document) → confirmed players
//! `EventRoster` → CSV in the import format

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use vb_core::api::TeamsRequest;
use vb_core::{
    AttendanceStatus, EventRoster, InMemoryRoster, Player, PlayerValidator, RosterEntry,
    RosterSource,
};

/// Row counters for a CSV import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub total_rows: u32,
    pub imported: u32,
    pub failed: u32,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    name: String,
    gender: String,
    position: String,
    level: String,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    id: &'a str,
    name: &'a str,
    gender: &'static str,
    position: &'static str,
    level: u8,
    status: &'static str,
}

fn status_code(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Confirmed => "confirmed",
        AttendanceStatus::Waiting => "waiting",
        AttendanceStatus::Cancelled => "cancelled",
    }
}

fn parse_status(raw: Option<&str>) -> std::result::Result<AttendanceStatus, String> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("confirmed") => Ok(AttendanceStatus::Confirmed),
        Some("waiting") => Ok(AttendanceStatus::Waiting),
        Some("cancelled") | Some("canceled") => Ok(AttendanceStatus::Cancelled),
        Some(other) => Err(format!("Unknown status: {}", other)),
    }
}

fn parse_row(row: &CsvRow) -> std::result::Result<(Player, AttendanceStatus), String> {
    let level = row
        .level
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("Invalid level value: '{}'", row.level.trim()))?;
    let player = Player::new(
        row.id.trim(),
        row.name.trim().trim_start_matches('\u{feff}'),
        row.gender.parse()?,
        row.position.parse()?,
        level,
    );
    PlayerValidator::validate_player(&player).map_err(|e| e.to_string())?;
    Ok((player, parse_status(row.status.as_deref())?))
}

/// Parse a CSV roster into an event roster. Bad rows are skipped and counted;
/// duplicate ids abort the import.
pub fn import_roster_csv(csv_path: &Path, event_id: &str) -> Result<(EventRoster, ImportStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let mut event = EventRoster::new(event_id, None);
    let mut stats = ImportStats::default();

    for result in reader.deserialize::<CsvRow>() {
        stats.total_rows += 1;
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                stats.failed += 1;
                warn!("Line {}: unreadable row: {}", stats.total_rows, e);
                continue;
            }
        };

        match parse_row(&row) {
            Ok((player, status)) => {
                if event.entries.iter().any(|e| e.player.id == player.id) {
                    bail!("Duplicate player id '{}' at line {}", player.id, stats.total_rows);
                }
                event.entries.push(RosterEntry { player, status });
                stats.imported += 1;
            }
            Err(e) => {
                stats.failed += 1;
                warn!("Line {}: {}", stats.total_rows, e);
            }
        }
    }

    info!(
        rows = stats.total_rows,
        imported = stats.imported,
        failed = stats.failed,
        "CSV roster parsed"
    );
    Ok((event, stats))
}

fn is_csv(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

fn select_event(roster: &InMemoryRoster, event_id: Option<&str>) -> Result<String> {
    match event_id {
        Some(id) => Ok(id.to_string()),
        None => {
            let ids: Vec<&str> = roster.event_ids().collect();
            match ids.as_slice() {
                [only] => Ok(only.to_string()),
                _ => bail!("Roster holds {} events; pick one with --event", ids.len()),
            }
        }
    }
}

/// One event roster from a `.csv` file or a JSON roster document.
pub fn load_event_roster(path: &Path, event_id: Option<&str>) -> Result<EventRoster> {
    if is_csv(path) {
        let (event, _) = import_roster_csv(path, event_id.unwrap_or("default"))?;
        return Ok(event);
    }

    let roster = InMemoryRoster::load(path)
        .with_context(|| format!("Failed to load roster document: {}", path.display()))?;
    let event_id = select_event(&roster, event_id)?;
    roster
        .event(&event_id)
        .cloned()
        .with_context(|| format!("Event '{}' not found in {}", event_id, path.display()))
}

/// Confirmed players from a roster file.
///
/// `.csv` files are imported directly. JSON files are either a
/// `{ "players": [...] }` request (all treated as confirmed) or an event
/// roster document, in which case `event_id` selects the event (optional when
/// the document holds a single event).
pub fn load_confirmed_players(path: &Path, event_id: Option<&str>) -> Result<Vec<Player>> {
    if is_csv(path) {
        let (event, _) = import_roster_csv(path, event_id.unwrap_or("default"))?;
        return Ok(event.confirmed_players());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file: {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).context("Failed to parse roster JSON")?;

    if value.get("players").is_some() {
        let request: TeamsRequest =
            serde_json::from_value(value).context("Invalid players list")?;
        PlayerValidator::validate_roster(&request.players)?;
        return Ok(request.players);
    }

    let roster = InMemoryRoster::from_json(&content)?;
    let event_id = select_event(&roster, event_id)?;
    Ok(roster.confirmed_players(&event_id)?)
}

fn ensure_parent_dir(out: &Path) -> Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    Ok(())
}

/// Import a CSV roster and write it as a JSON roster document.
pub fn export_roster_json(csv_path: &Path, event_id: &str, out: &Path) -> Result<ImportStats> {
    let (event, stats) = import_roster_csv(csv_path, event_id)?;
    let mut roster = InMemoryRoster::new();
    roster.insert(event);

    ensure_parent_dir(out)?;
    fs::write(out, roster.to_json()?)
        .with_context(|| format!("Failed to write output file: {}", out.display()))?;
    Ok(stats)
}

/// Write an event roster as CSV (`id,name,gender,position,level,status`),
/// every entry in registration order. Returns the number of rows written.
pub fn export_roster_csv(event: &EventRoster, out: &Path) -> Result<usize> {
    ensure_parent_dir(out)?;
    let mut writer = csv::Writer::from_path(out)
        .with_context(|| format!("Failed to create CSV file: {}", out.display()))?;

    for entry in &event.entries {
        let player = &entry.player;
        writer.serialize(CsvRecord {
            id: &player.id,
            name: &player.name,
            gender: player.gender.code(),
            position: player.position.code(),
            level: player.level,
            status: status_code(entry.status),
        })?;
    }
    writer.flush()?;

    info!(event = %event.event_id, rows = event.entries.len(), "CSV roster written");
    Ok(event.entries.len())
}
