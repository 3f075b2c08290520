/**
 * Schedule Model and Database Operations
 *
 * Rows are stored flat (team name/logo and score as separate columns); the
 * wire shape nests `homeTeam`, `awayTeam`, and `score`. Listings sort by
 * start time ascending — calendar order, unlike the newest-first feeds.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::domain::{GameStatus, Sport};

pub const DEFAULT_TEAM_LOGO: &str = "https://via.placeholder.com/100";

/// How many games the `upcoming` view returns.
pub const UPCOMING_LIMIT: i64 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct Team {
    pub name: String,
    pub logo: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Score {
    pub home: i64,
    pub away: i64,
}

/// A schedule entry as it appears on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: Uuid,
    pub sport: Sport,
    pub league: String,
    pub home_team: Team,
    pub away_team: Team,
    pub venue: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: GameStatus,
    pub score: Score,
}

#[derive(sqlx::FromRow)]
struct ScheduleRow {
    id: Uuid,
    sport: Sport,
    league: String,
    home_team_name: String,
    home_team_logo: String,
    away_team_name: String,
    away_team_logo: String,
    venue: String,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    status: GameStatus,
    score_home: i64,
    score_away: i64,
}

impl From<ScheduleRow> for Schedule {
    fn from(row: ScheduleRow) -> Self {
        Schedule {
            id: row.id,
            sport: row.sport,
            league: row.league,
            home_team: Team {
                name: row.home_team_name,
                logo: row.home_team_logo,
            },
            away_team: Team {
                name: row.away_team_name,
                logo: row.away_team_logo,
            },
            venue: row.venue,
            start_time: row.start_time,
            end_time: row.end_time,
            status: row.status,
            score: Score {
                home: row.score_home,
                away: row.score_away,
            },
        }
    }
}

/// Allow-listed equality filters for the main listing. `day` is a half-open
/// UTC range covering one calendar day of start times.
#[derive(Debug, Default)]
pub struct ScheduleFilter {
    pub sport: Option<Sport>,
    pub league: Option<String>,
    pub status: Option<GameStatus>,
    pub day: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

/// A fully validated new entry.
pub struct NewSchedule {
    pub sport: Sport,
    pub league: String,
    pub home_team: Team,
    pub away_team: Team,
    pub venue: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: GameStatus,
    pub score: Score,
}

/// Partial update: `None` leaves the column unchanged.
#[derive(Default)]
pub struct ScheduleChanges {
    pub sport: Option<Sport>,
    pub league: Option<String>,
    pub home_team: Option<Team>,
    pub away_team: Option<Team>,
    pub venue: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: Option<GameStatus>,
    pub score: Option<Score>,
}

const SELECT_SCHEDULE: &str = "SELECT id, sport, league, home_team_name, home_team_logo, \
     away_team_name, away_team_logo, venue, start_time, end_time, status, \
     score_home, score_away FROM schedules";

fn push_filter(query: &mut QueryBuilder<'_, Sqlite>, filter: &ScheduleFilter) {
    query.push(" WHERE 1 = 1");
    if let Some(sport) = filter.sport {
        query.push(" AND sport = ").push_bind(sport);
    }
    if let Some(league) = &filter.league {
        query.push(" AND league = ").push_bind(league.clone());
    }
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status);
    }
    if let Some((from, to)) = filter.day {
        query.push(" AND start_time >= ").push_bind(from);
        query.push(" AND start_time < ").push_bind(to);
    }
}

pub async fn list_schedules(
    pool: &SqlitePool,
    filter: &ScheduleFilter,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Schedule>, i64), sqlx::Error> {
    let mut query = QueryBuilder::<Sqlite>::new(SELECT_SCHEDULE);
    push_filter(&mut query, filter);
    query
        .push(" ORDER BY start_time ASC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let rows: Vec<ScheduleRow> = query.build_query_as().fetch_all(pool).await?;

    let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM schedules");
    push_filter(&mut count, filter);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    Ok((rows.into_iter().map(Schedule::from).collect(), total))
}

/// The next few games that are still `Scheduled` and start after `now`.
pub async fn upcoming_schedules(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Vec<Schedule>, sqlx::Error> {
    let rows: Vec<ScheduleRow> = sqlx::query_as(&format!(
        "{SELECT_SCHEDULE} WHERE status = ? AND start_time > ? ORDER BY start_time ASC LIMIT ?"
    ))
    .bind(GameStatus::Scheduled)
    .bind(now)
    .bind(UPCOMING_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Schedule::from).collect())
}

/// Everything currently in progress.
pub async fn live_schedules(pool: &SqlitePool) -> Result<Vec<Schedule>, sqlx::Error> {
    let rows: Vec<ScheduleRow> = sqlx::query_as(&format!(
        "{SELECT_SCHEDULE} WHERE status = ? ORDER BY start_time ASC"
    ))
    .bind(GameStatus::Live)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Schedule::from).collect())
}

pub async fn get_schedule(pool: &SqlitePool, id: Uuid) -> Result<Option<Schedule>, sqlx::Error> {
    let row: Option<ScheduleRow> = sqlx::query_as(&format!("{SELECT_SCHEDULE} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Schedule::from))
}

pub async fn create_schedule(
    pool: &SqlitePool,
    new: NewSchedule,
) -> Result<Schedule, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO schedules (id, sport, league, home_team_name, home_team_logo, \
           away_team_name, away_team_logo, venue, start_time, end_time, status, \
           score_home, score_away, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(new.sport)
    .bind(&new.league)
    .bind(&new.home_team.name)
    .bind(&new.home_team.logo)
    .bind(&new.away_team.name)
    .bind(&new.away_team.logo)
    .bind(&new.venue)
    .bind(new.start_time)
    .bind(new.end_time)
    .bind(new.status)
    .bind(new.score.home)
    .bind(new.score.away)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let schedule = get_schedule(pool, id).await?;
    schedule.ok_or(sqlx::Error::RowNotFound)
}

pub async fn update_schedule(
    pool: &SqlitePool,
    id: Uuid,
    changes: ScheduleChanges,
) -> Result<Option<Schedule>, sqlx::Error> {
    let (home_name, home_logo) = match &changes.home_team {
        Some(team) => (Some(team.name.clone()), Some(team.logo.clone())),
        None => (None, None),
    };
    let (away_name, away_logo) = match &changes.away_team {
        Some(team) => (Some(team.name.clone()), Some(team.logo.clone())),
        None => (None, None),
    };
    let (score_home, score_away) = match changes.score {
        Some(score) => (Some(score.home), Some(score.away)),
        None => (None, None),
    };

    sqlx::query(
        "UPDATE schedules SET \
           sport = COALESCE(?, sport), \
           league = COALESCE(?, league), \
           home_team_name = COALESCE(?, home_team_name), \
           home_team_logo = COALESCE(?, home_team_logo), \
           away_team_name = COALESCE(?, away_team_name), \
           away_team_logo = COALESCE(?, away_team_logo), \
           venue = COALESCE(?, venue), \
           start_time = COALESCE(?, start_time), \
           end_time = COALESCE(?, end_time), \
           status = COALESCE(?, status), \
           score_home = COALESCE(?, score_home), \
           score_away = COALESCE(?, score_away), \
           updated_at = ? \
         WHERE id = ?",
    )
    .bind(changes.sport)
    .bind(changes.league)
    .bind(home_name)
    .bind(home_logo)
    .bind(away_name)
    .bind(away_logo)
    .bind(changes.venue)
    .bind(changes.start_time)
    .bind(changes.end_time)
    .bind(changes.status)
    .bind(score_home)
    .bind(score_away)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    get_schedule(pool, id).await
}

/// Returns false when there was nothing to delete.
pub async fn delete_schedule(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM schedules WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
