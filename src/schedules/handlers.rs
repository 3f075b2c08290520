/**
 * Schedule Handlers
 *
 * - `GET    /api/schedules`           public; `?sport=&league=&status=&date=&page=&limit=`
 * - `GET    /api/schedules/upcoming`  public; next ten scheduled games
 * - `GET    /api/schedules/live`      public; everything in progress
 * - `GET    /api/schedules/{id}`      public
 * - `POST   /api/schedules`           admin only
 * - `PUT    /api/schedules/{id}`      admin only
 * - `DELETE /api/schedules/{id}`      admin only
 */

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{GameStatus, Sport};
use crate::error::{ApiError, FieldError};
use crate::middleware::auth::AdminUser;
use crate::middleware::json::AppJson;
use crate::response::{
    created, ok, ok_empty, page_offset, parse_limit, parse_page, ApiResponse, Pagination,
};
use crate::schedules::db;
use crate::schedules::db::{Schedule, ScheduleFilter, Score, Team, DEFAULT_TEAM_LOGO};
use crate::server::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 10;

fn parse_schedule_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Schedule"))
}

fn parse_sport(raw: &str) -> Result<Sport, ApiError> {
    raw.parse::<Sport>().map_err(|_| {
        ApiError::invalid_field(
            "sport",
            "Sport must be one of: Football, Basketball, Baseball, Hockey, Soccer, Tennis, Golf, Other",
        )
    })
}

fn parse_status(raw: &str) -> Result<GameStatus, ApiError> {
    raw.parse::<GameStatus>().map_err(|_| {
        ApiError::invalid_field(
            "status",
            "Status must be one of: Scheduled, Live, Completed, Postponed, Canceled",
        )
    })
}

/// One calendar day of start times, as a half-open UTC range.
fn parse_day(raw: &str) -> Result<(DateTime<Utc>, DateTime<Utc>), ApiError> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::invalid_field("date", "Date must be formatted YYYY-MM-DD"))?;
    let start = Utc.from_utc_datetime(
        &date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| ApiError::invalid_field("date", "Date must be formatted YYYY-MM-DD"))?,
    );
    let end = start + chrono::Duration::days(1);
    Ok((start, end))
}

fn parse_start_time(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|_| {
            ApiError::invalid_field(
                "startTime",
                "Start time must be an RFC 3339 timestamp, e.g. 2026-09-01T19:00:00Z",
            )
        })
}

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleListQuery {
    pub sport: Option<String>,
    pub league: Option<String>,
    pub status: Option<String>,
    pub date: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleListData {
    pub schedules: Vec<Schedule>,
    pub pagination: Pagination,
}

pub async fn list_schedules(
    State(state): State<AppState>,
    Query(query): Query<ScheduleListQuery>,
) -> Result<(StatusCode, Json<ApiResponse<ScheduleListData>>), ApiError> {
    let filter = ScheduleFilter {
        sport: match query.sport.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Some(parse_sport(raw)?),
            None => None,
        },
        league: query.league.filter(|league| !league.trim().is_empty()),
        status: match query.status.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Some(parse_status(raw)?),
            None => None,
        },
        day: match query.date.as_deref().filter(|d| !d.is_empty()) {
            Some(raw) => Some(parse_day(raw)?),
            None => None,
        },
    };
    let page = parse_page(&query.page);
    let limit = parse_limit(&query.limit, DEFAULT_PAGE_SIZE);

    let (schedules, total) =
        db::list_schedules(&state.pool, &filter, limit, page_offset(page, limit)).await?;

    Ok(ok(
        "Schedules retrieved successfully",
        ScheduleListData {
            schedules,
            pagination: Pagination::new(total, page, limit),
        },
    ))
}

pub async fn upcoming_schedules(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<Schedule>>>), ApiError> {
    let schedules = db::upcoming_schedules(&state.pool, Utc::now()).await?;
    Ok(ok("Upcoming schedules retrieved successfully", schedules))
}

pub async fn live_schedules(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<Schedule>>>), ApiError> {
    let schedules = db::live_schedules(&state.pool).await?;
    Ok(ok("Live schedules retrieved successfully", schedules))
}

pub async fn get_schedule(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<Schedule>>), ApiError> {
    let id = parse_schedule_id(&raw_id)?;
    let schedule = db::get_schedule(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound("Schedule"))?;
    Ok(ok("Schedule retrieved successfully", schedule))
}

#[derive(Debug, Deserialize)]
pub struct TeamRequest {
    #[serde(default)]
    pub name: String,
    pub logo: Option<String>,
}

impl TeamRequest {
    fn into_team(self) -> Team {
        Team {
            name: self.name.trim().to_string(),
            logo: self
                .logo
                .filter(|logo| !logo.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TEAM_LOGO.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub home: i64,
    #[serde(default)]
    pub away: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    #[serde(default)]
    pub sport: String,
    #[serde(default)]
    pub league: String,
    pub home_team: Option<TeamRequest>,
    pub away_team: Option<TeamRequest>,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub start_time: String,
    pub end_time: Option<String>,
    pub status: Option<String>,
    pub score: Option<ScoreRequest>,
}

impl CreateScheduleRequest {
    /// Collects every field failure before giving up, same shape as the
    /// post and comment validators.
    fn validate(&self) -> Result<ValidatedSchedule, ApiError> {
        let mut errors = Vec::new();

        let sport = match parse_sport(&self.sport) {
            Ok(sport) => Some(sport),
            Err(ApiError::Validation(mut sport_errors)) => {
                errors.append(&mut sport_errors);
                None
            }
            Err(other) => return Err(other),
        };
        if self.league.trim().is_empty() {
            errors.push(FieldError::new("league", "League is required"));
        }
        if !matches!(&self.home_team, Some(team) if !team.name.trim().is_empty()) {
            errors.push(FieldError::new("homeTeam", "Home team name is required"));
        }
        if !matches!(&self.away_team, Some(team) if !team.name.trim().is_empty()) {
            errors.push(FieldError::new("awayTeam", "Away team name is required"));
        }
        if self.venue.trim().is_empty() {
            errors.push(FieldError::new("venue", "Venue is required"));
        }
        let start_time = match parse_start_time(&self.start_time) {
            Ok(time) => Some(time),
            Err(ApiError::Validation(mut time_errors)) => {
                errors.append(&mut time_errors);
                None
            }
            Err(other) => return Err(other),
        };
        let end_time = match self.end_time.as_deref().filter(|t| !t.is_empty()) {
            Some(raw) => match parse_start_time(raw) {
                Ok(time) => Some(time),
                Err(ApiError::Validation(_)) => {
                    errors.push(FieldError::new(
                        "endTime",
                        "End time must be an RFC 3339 timestamp, e.g. 2026-09-01T22:00:00Z",
                    ));
                    None
                }
                Err(other) => return Err(other),
            },
            None => None,
        };
        let status = match self.status.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => match parse_status(raw) {
                Ok(status) => status,
                Err(ApiError::Validation(mut status_errors)) => {
                    errors.append(&mut status_errors);
                    GameStatus::Scheduled
                }
                Err(other) => return Err(other),
            },
            None => GameStatus::Scheduled,
        };

        match (sport, start_time, errors.is_empty()) {
            (Some(sport), Some(start_time), true) => Ok(ValidatedSchedule {
                sport,
                start_time,
                end_time,
                status,
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

#[derive(Debug)]
struct ValidatedSchedule {
    sport: Sport,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    status: GameStatus,
}

pub async fn create_schedule(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppJson(request): AppJson<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Schedule>>), ApiError> {
    let validated = request.validate()?;

    let home_team = request
        .home_team
        .map(TeamRequest::into_team)
        .ok_or_else(|| ApiError::invalid_field("homeTeam", "Home team name is required"))?;
    let away_team = request
        .away_team
        .map(TeamRequest::into_team)
        .ok_or_else(|| ApiError::invalid_field("awayTeam", "Away team name is required"))?;

    let schedule = db::create_schedule(
        &state.pool,
        db::NewSchedule {
            sport: validated.sport,
            league: request.league.trim().to_string(),
            home_team,
            away_team,
            venue: request.venue.trim().to_string(),
            start_time: validated.start_time,
            end_time: validated.end_time,
            status: validated.status,
            score: request
                .score
                .map(|score| Score {
                    home: score.home,
                    away: score.away,
                })
                .unwrap_or(Score { home: 0, away: 0 }),
        },
    )
    .await?;

    tracing::info!(schedule_id = %schedule.id, admin_id = %admin.user_id, "schedule created");

    Ok(created("Schedule created successfully", schedule))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    pub sport: Option<String>,
    pub league: Option<String>,
    pub home_team: Option<TeamRequest>,
    pub away_team: Option<TeamRequest>,
    pub venue: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
    pub score: Option<ScoreRequest>,
}

impl UpdateScheduleRequest {
    fn validate(&self) -> Result<ValidatedChanges, ApiError> {
        let mut errors = Vec::new();

        let sport = match self.sport.as_deref() {
            Some(raw) => match parse_sport(raw) {
                Ok(sport) => Some(sport),
                Err(ApiError::Validation(mut sport_errors)) => {
                    errors.append(&mut sport_errors);
                    None
                }
                Err(other) => return Err(other),
            },
            None => None,
        };
        if matches!(&self.league, Some(league) if league.trim().is_empty()) {
            errors.push(FieldError::new("league", "League is required"));
        }
        if matches!(&self.home_team, Some(team) if team.name.trim().is_empty()) {
            errors.push(FieldError::new("homeTeam", "Home team name is required"));
        }
        if matches!(&self.away_team, Some(team) if team.name.trim().is_empty()) {
            errors.push(FieldError::new("awayTeam", "Away team name is required"));
        }
        if matches!(&self.venue, Some(venue) if venue.trim().is_empty()) {
            errors.push(FieldError::new("venue", "Venue is required"));
        }
        let start_time = match self.start_time.as_deref() {
            Some(raw) => match parse_start_time(raw) {
                Ok(time) => Some(time),
                Err(ApiError::Validation(mut time_errors)) => {
                    errors.append(&mut time_errors);
                    None
                }
                Err(other) => return Err(other),
            },
            None => None,
        };
        let end_time = match self.end_time.as_deref().filter(|t| !t.is_empty()) {
            Some(raw) => match parse_start_time(raw) {
                Ok(time) => Some(time),
                Err(ApiError::Validation(_)) => {
                    errors.push(FieldError::new(
                        "endTime",
                        "End time must be an RFC 3339 timestamp, e.g. 2026-09-01T22:00:00Z",
                    ));
                    None
                }
                Err(other) => return Err(other),
            },
            None => None,
        };
        let status = match self.status.as_deref() {
            Some(raw) => match parse_status(raw) {
                Ok(status) => Some(status),
                Err(ApiError::Validation(mut status_errors)) => {
                    errors.append(&mut status_errors);
                    None
                }
                Err(other) => return Err(other),
            },
            None => None,
        };

        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        Ok(ValidatedChanges {
            sport,
            start_time,
            end_time,
            status,
        })
    }
}

struct ValidatedChanges {
    sport: Option<Sport>,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    status: Option<GameStatus>,
}

pub async fn update_schedule(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(raw_id): Path<String>,
    AppJson(request): AppJson<UpdateScheduleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Schedule>>), ApiError> {
    let id = parse_schedule_id(&raw_id)?;
    let validated = request.validate()?;

    // Touch the row first so a miss reads as 404 rather than a no-op update.
    if db::get_schedule(&state.pool, id).await?.is_none() {
        return Err(ApiError::NotFound("Schedule"));
    }

    let schedule = db::update_schedule(
        &state.pool,
        id,
        db::ScheduleChanges {
            sport: validated.sport,
            league: request.league.map(|league| league.trim().to_string()),
            home_team: request.home_team.map(TeamRequest::into_team),
            away_team: request.away_team.map(TeamRequest::into_team),
            venue: request.venue.map(|venue| venue.trim().to_string()),
            start_time: validated.start_time,
            end_time: validated.end_time,
            status: validated.status,
            score: request.score.map(|score| Score {
                home: score.home,
                away: score.away,
            }),
        },
    )
    .await?
    .ok_or(ApiError::NotFound("Schedule"))?;

    tracing::info!(schedule_id = %id, admin_id = %admin.user_id, "schedule updated");

    Ok(ok("Schedule updated successfully", schedule))
}

pub async fn delete_schedule(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(raw_id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ApiError> {
    let id = parse_schedule_id(&raw_id)?;

    if !db::delete_schedule(&state.pool, id).await? {
        return Err(ApiError::NotFound("Schedule"));
    }

    tracing::info!(schedule_id = %id, admin_id = %admin.user_id, "schedule deleted");

    Ok(ok_empty("Schedule deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateScheduleRequest {
        CreateScheduleRequest {
            sport: "Hockey".into(),
            league: "NHL".into(),
            home_team: Some(TeamRequest {
                name: "Rangers".into(),
                logo: None,
            }),
            away_team: Some(TeamRequest {
                name: "Bruins".into(),
                logo: None,
            }),
            venue: "Madison Square Garden".into(),
            start_time: "2026-09-01T19:00:00Z".into(),
            end_time: None,
            status: None,
            score: None,
        }
    }

    #[test]
    fn create_request_accepts_valid_input() {
        let validated = base_request().validate().unwrap();
        assert_eq!(validated.sport, Sport::Hockey);
        assert_eq!(validated.status, GameStatus::Scheduled);
    }

    #[test]
    fn create_request_collects_every_field_error() {
        let request = CreateScheduleRequest {
            sport: "Curling".into(),
            league: " ".into(),
            home_team: None,
            away_team: None,
            venue: "".into(),
            start_time: "tomorrow".into(),
            end_time: None,
            status: None,
            score: None,
        };
        match request.validate() {
            Err(ApiError::Validation(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(
                    fields,
                    vec!["sport", "league", "homeTeam", "awayTeam", "venue", "startTime"]
                );
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn create_request_rejects_unknown_status() {
        let mut request = base_request();
        request.status = Some("Paused".into());
        assert!(matches!(request.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn update_request_allows_partial_bodies() {
        let request = UpdateScheduleRequest {
            sport: None,
            league: None,
            home_team: None,
            away_team: None,
            venue: None,
            start_time: None,
            end_time: None,
            status: Some("Live".into()),
            score: Some(ScoreRequest { home: 2, away: 1 }),
        };
        let validated = request.validate().unwrap();
        assert_eq!(validated.status, Some(GameStatus::Live));
    }

    #[test]
    fn date_filter_requires_iso_shape() {
        assert!(parse_day("2026-09-01").is_ok());
        assert!(matches!(
            parse_day("09/01/2026"),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn day_range_covers_one_calendar_day() {
        let (start, end) = parse_day("2026-09-01").unwrap();
        assert_eq!(end - start, chrono::Duration::days(1));
        assert_eq!(start.to_rfc3339(), "2026-09-01T00:00:00+00:00");
    }

    #[test]
    fn malformed_ids_read_as_missing() {
        assert!(matches!(
            parse_schedule_id("game-42"),
            Err(ApiError::NotFound("Schedule"))
        ));
    }
}
