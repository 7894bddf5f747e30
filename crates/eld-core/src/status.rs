//! Duty-status enum shared by the engine, recaps, and output writers.

use std::str::FromStr;

use crate::CoreError;

/// The four duty-status categories recorded on an ELD grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum DutyStatus {
    OffDuty,
    SleeperBerth,
    Driving,
    OnDutyNotDriving,
}

impl DutyStatus {
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::OffDuty,
        DutyStatus::SleeperBerth,
        DutyStatus::Driving,
        DutyStatus::OnDutyNotDriving,
    ];

    /// `true` for statuses that consume duty-window and cycle time.
    #[inline]
    pub fn is_on_duty(self) -> bool {
        matches!(self, DutyStatus::Driving | DutyStatus::OnDutyNotDriving)
    }

    /// Column value used by CSV/SQLite writers.
    pub fn as_str(self) -> &'static str {
        match self {
            DutyStatus::OffDuty          => "OFF_DUTY",
            DutyStatus::SleeperBerth     => "SLEEPER_BERTH",
            DutyStatus::Driving          => "DRIVING",
            DutyStatus::OnDutyNotDriving => "ON_DUTY_NOT_DRIVING",
        }
    }
}

impl std::fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DutyStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DutyStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Parse(format!("unknown duty status {s:?}")))
    }
}
