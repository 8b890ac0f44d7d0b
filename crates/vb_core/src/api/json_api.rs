//! JSON API for team generation and roster statistics
//!
//! Entry points take a JSON request string and always return a JSON
//! [`ApiResponse`] envelope. Precondition failures of the allocator come back
//! as structured errors with counts in `details`.

use crate::engine::{roster_statistics, RosterStatistics, TeamAllocator};
use crate::error::{AllocationError, CoreError};
use crate::models::{AllocationResult, Player};
use crate::player::PlayerValidator;
use crate::roster::RosterSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

pub mod error_codes {
    pub const INSUFFICIENT_SETTERS: &str = "INSUFFICIENT_SETTERS";
    pub const INSUFFICIENT_PLAYERS: &str = "INSUFFICIENT_PLAYERS";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const INVALID_PLAYER: &str = "INVALID_PLAYER";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Structured API error with codes and details
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: None }
    }

    pub fn with_details(
        code: &str,
        message: &str,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: Some(details) }
    }
}

impl From<&AllocationError> for ApiError {
    fn from(err: &AllocationError) -> Self {
        let details = match err {
            AllocationError::InsufficientSetters { found, required } => HashMap::from([
                ("currentSetters".to_string(), json!(found)),
                ("requiredSetters".to_string(), json!(required)),
            ]),
            AllocationError::InsufficientPlayers { found, required } => HashMap::from([
                ("currentPlayers".to_string(), json!(found)),
                ("requiredPlayers".to_string(), json!(required)),
                ("missingPlayers".to_string(), json!(err.missing())),
            ]),
        };
        ApiError::with_details(err.code(), &err.to_string(), details)
    }
}

impl From<&CoreError> for ApiError {
    fn from(err: &CoreError) -> Self {
        let code = match err {
            CoreError::NotFound(_) => error_codes::NOT_FOUND,
            CoreError::Validation(_) => error_codes::INVALID_PLAYER,
            CoreError::InvalidParameter(_) => error_codes::INVALID_REQUEST,
            CoreError::Config(_) | CoreError::Io(_) | CoreError::Serialization(_) => {
                error_codes::INTERNAL_ERROR
            }
        };
        ApiError::new(code, &err.to_string())
    }
}

/// Team generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamsRequest {
    pub players: Vec<Player>,
}

/// Roster statistics request (same input shape as [`TeamsRequest`])
pub type StatisticsRequest = TeamsRequest;

fn to_json<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        error!("Failed to serialize response: {}", e);
        json!({
            "success": false,
            "data": null,
            "error": {"code": error_codes::INTERNAL_ERROR, "message": e.to_string(), "details": null},
            "schema_version": API_VERSION,
        })
        .to_string()
    })
}

fn parse_request(request_json: &str) -> Result<TeamsRequest, ApiError> {
    let request: TeamsRequest = serde_json::from_str(request_json).map_err(|e| {
        warn!("Failed to parse request: {}", e);
        ApiError::new(error_codes::INVALID_REQUEST, &format!("Invalid JSON format: {}", e))
    })?;

    PlayerValidator::validate_roster(&request.players).map_err(|e| {
        warn!("Roster validation failed: {}", e);
        ApiError::new(error_codes::INVALID_PLAYER, &e.to_string())
    })?;

    Ok(request)
}

/// Run the allocator and wrap the outcome.
pub fn generate_teams(
    allocator: &TeamAllocator,
    players: &[Player],
) -> ApiResponse<AllocationResult> {
    match allocator.allocate(players) {
        Ok(result) => ApiResponse::success(result),
        Err(err) => {
            debug!(code = err.code(), found = err.found(), "allocation refused");
            ApiResponse::error(ApiError::from(&err))
        }
    }
}

/// Resolve the confirmed players of `event_id`, validate them and allocate.
pub fn generate_teams_for_event(
    source: &dyn RosterSource,
    event_id: &str,
    allocator: &TeamAllocator,
) -> ApiResponse<AllocationResult> {
    let players = match source.confirmed_players(event_id) {
        Ok(players) => players,
        Err(err) => {
            warn!(event = event_id, "roster lookup failed: {}", err);
            return ApiResponse::error(ApiError::from(&err));
        }
    };

    if let Err(e) = PlayerValidator::validate_roster(&players) {
        warn!(event = event_id, "roster validation failed: {}", e);
        return ApiResponse::error(ApiError::new(error_codes::INVALID_PLAYER, &e.to_string()));
    }

    info!(event = event_id, players = players.len(), "generating teams");
    generate_teams(allocator, &players)
}

/// Generate teams from a JSON request string
///
/// # Arguments
/// * `request_json` - `{ "players": [ {id, name, gender, position, level}, ... ] }`
///
/// # Returns
/// JSON `ApiResponse<AllocationResult>`
pub fn generate_teams_json(request_json: &str) -> String {
    generate_teams_json_with(&TeamAllocator::default(), request_json)
}

pub fn generate_teams_json_with(allocator: &TeamAllocator, request_json: &str) -> String {
    match parse_request(request_json) {
        Ok(request) => to_json(&generate_teams(allocator, &request.players)),
        Err(error) => to_json(&ApiResponse::<AllocationResult>::error(error)),
    }
}

/// Aggregate statistics for a JSON roster request.
pub fn roster_statistics_json(request_json: &str) -> String {
    match parse_request(request_json) {
        Ok(request) => to_json(&ApiResponse::success(roster_statistics(&request.players))),
        Err(error) => to_json(&ApiResponse::<RosterStatistics>::error(error)),
    }
}
