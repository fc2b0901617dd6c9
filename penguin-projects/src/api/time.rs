//! Timestamp parsing endpoints

use axum::Json;
use penguin_common::timeparse::{parse_timestamp_with_rest, supported_formats};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;

/// Request body for POST /api/time/parse
#[derive(Debug, Deserialize)]
pub struct ParseTimeRequest {
    pub time_string: String,
}

/// Parsed timestamp in several renderings
#[derive(Debug, Serialize)]
pub struct ParseTimeResponse {
    pub original: String,
    /// Canonical nanosecond RFC 3339 form
    pub rfc3339: String,
    pub unix: i64,
    pub readable: String,
    /// UTC offset as `±HH:MM`
    pub timezone: String,
    /// Input with the matched timestamp removed
    pub rest: String,
    /// Name of the format that matched
    pub format: String,
}

#[derive(Debug, Serialize)]
pub struct TimeFormat {
    pub name: String,
    pub pattern: String,
    pub example: String,
}

#[derive(Debug, Serialize)]
pub struct TimeFormatsResponse {
    pub formats: Vec<TimeFormat>,
}

/// POST /api/time/parse
pub async fn parse_time(Json(request): Json<ParseTimeRequest>) -> ApiResult<Json<ParseTimeResponse>> {
    let parsed = parse_timestamp_with_rest(&request.time_string)?;
    let datetime = parsed.instant.as_datetime();

    Ok(Json(ParseTimeResponse {
        rfc3339: parsed.instant.to_rfc3339_nano(),
        unix: parsed.instant.unix_seconds(),
        readable: datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        timezone: datetime.format("%:z").to_string(),
        rest: parsed.rest,
        format: parsed.format.to_string(),
        original: request.time_string,
    }))
}

/// GET /api/time/formats
pub async fn list_time_formats() -> Json<TimeFormatsResponse> {
    let formats = supported_formats()
        .iter()
        .map(|format| TimeFormat {
            name: format.name.to_string(),
            pattern: format.layout.to_string(),
            example: format.example.to_string(),
        })
        .collect();

    Json(TimeFormatsResponse { formats })
}
