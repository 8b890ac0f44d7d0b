pub mod json_api;

pub use json_api::{
    error_codes, generate_teams, generate_teams_for_event, generate_teams_json,
    generate_teams_json_with, roster_statistics_json, ApiError, ApiResponse, StatisticsRequest,
    TeamsRequest, API_VERSION,
};
