//! Shared domain enums: sports categories, game status, user roles.
//!
//! All three are persisted as TEXT and travel on the wire as plain strings,
//! so each derives `sqlx::Type` alongside serde. Request validation goes
//! through `FromStr` so an unknown value becomes a field-level error rather
//! than a deserialization failure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sport category, used both for post categories and schedule sports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "PascalCase")]
pub enum Sport {
    Football,
    Basketball,
    Baseball,
    Hockey,
    Soccer,
    Tennis,
    Golf,
    Other,
}

impl Sport {
    pub const ALL: [Sport; 8] = [
        Sport::Football,
        Sport::Basketball,
        Sport::Baseball,
        Sport::Hockey,
        Sport::Soccer,
        Sport::Tennis,
        Sport::Golf,
        Sport::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Football => "Football",
            Sport::Basketball => "Basketball",
            Sport::Baseball => "Baseball",
            Sport::Hockey => "Hockey",
            Sport::Soccer => "Soccer",
            Sport::Tennis => "Tennis",
            Sport::Golf => "Golf",
            Sport::Other => "Other",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sport::ALL
            .into_iter()
            .find(|sport| sport.as_str() == s)
            .ok_or(())
    }
}

/// Lifecycle status of a scheduled game. Drives the `upcoming` and `live`
/// listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "PascalCase")]
pub enum GameStatus {
    Scheduled,
    Live,
    Completed,
    Postponed,
    Canceled,
}

impl GameStatus {
    pub const ALL: [GameStatus; 5] = [
        GameStatus::Scheduled,
        GameStatus::Live,
        GameStatus::Completed,
        GameStatus::Postponed,
        GameStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Scheduled => "Scheduled",
            GameStatus::Live => "Live",
            GameStatus::Completed => "Completed",
            GameStatus::Postponed => "Postponed",
            GameStatus::Canceled => "Canceled",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(())
    }
}

/// User role. `Admin` bypasses ownership checks and may mutate schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sport_round_trips_through_str() {
        for sport in Sport::ALL {
            assert_eq!(sport.as_str().parse::<Sport>(), Ok(sport));
        }
    }

    #[test]
    fn unknown_sport_is_rejected() {
        assert!("Curling".parse::<Sport>().is_err());
        // Enum membership is case-sensitive, matching the stored values.
        assert!("football".parse::<Sport>().is_err());
    }

    #[test]
    fn game_status_round_trips_through_str() {
        for status in GameStatus::ALL {
            assert_eq!(status.as_str().parse::<GameStatus>(), Ok(status));
        }
        assert!("Cancelled".parse::<GameStatus>().is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }
}
