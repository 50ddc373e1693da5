//! Salary and work-calendar configuration with derived cost rates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CurrencyCode, Money};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Cost model errors.
#[derive(Debug, Error)]
pub enum CostModelError {
    #[error("Invalid cost configuration: {0}")]
    InvalidConfig(String),
}

/// Raw cost configuration, as loaded from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostParams {
    #[serde(default = "default_annual_salary")]
    pub annual_salary: f64,

    #[serde(default = "default_work_hours_per_year")]
    pub work_hours_per_year: f64,

    #[serde(default = "default_work_hours_per_day")]
    pub work_hours_per_day: f64,

    #[serde(default = "default_work_days_per_week")]
    pub work_days_per_week: f64,

    #[serde(default = "default_team_size")]
    pub team_size: u32,

    /// Target percentage of person-time spent in meetings.
    #[serde(default = "default_ideal_meeting_percent")]
    pub ideal_meeting_percent: f64,

    #[serde(default)]
    pub currency: CurrencyCode,
}

fn default_annual_salary() -> f64 {
    75_000.0
}

fn default_work_hours_per_year() -> f64 {
    2_000.0
}

fn default_work_hours_per_day() -> f64 {
    8.0
}

fn default_work_days_per_week() -> f64 {
    5.0
}

fn default_team_size() -> u32 {
    6
}

fn default_ideal_meeting_percent() -> f64 {
    7.5
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            annual_salary: default_annual_salary(),
            work_hours_per_year: default_work_hours_per_year(),
            work_hours_per_day: default_work_hours_per_day(),
            work_days_per_week: default_work_days_per_week(),
            team_size: default_team_size(),
            ideal_meeting_percent: default_ideal_meeting_percent(),
            currency: CurrencyCode::default(),
        }
    }
}

/// Immutable cost model. All derived rates are computed once at
/// construction and are pure functions of the inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostModel {
    // Inputs
    pub annual_salary: f64,
    pub work_hours_per_year: f64,
    pub work_hours_per_day: f64,
    pub work_days_per_week: f64,
    pub team_size: u32,
    pub ideal_meeting_percent: f64,
    pub currency: CurrencyCode,

    // Derived
    pub cost_per_second: f64,
    pub work_seconds_per_week: f64,
    pub work_weeks_per_year: f64,
    pub person_seconds_per_week: f64,
    pub person_seconds_per_year: f64,
    pub ideal_seconds_per_week: f64,
    pub ideal_cost_per_week: Money,
    pub ideal_seconds_per_year: f64,
    pub ideal_cost_per_year: Money,
}

impl CostModel {
    pub fn from_params(params: &CostParams) -> Result<Self, CostModelError> {
        let work_hours_per_week = params.work_hours_per_day * params.work_days_per_week;
        if work_hours_per_week == 0.0 {
            return Err(CostModelError::InvalidConfig(
                "work week has zero hours".to_string(),
            ));
        }
        if params.work_hours_per_year == 0.0 {
            return Err(CostModelError::InvalidConfig(
                "work year has zero hours".to_string(),
            ));
        }
        if params.team_size == 0 {
            return Err(CostModelError::InvalidConfig(
                "team size must be at least 1".to_string(),
            ));
        }
        if params.ideal_meeting_percent < 0.0 {
            return Err(CostModelError::InvalidConfig(format!(
                "ideal meeting percent must not be negative (got {})",
                params.ideal_meeting_percent
            )));
        }

        let cost_per_second = params.annual_salary / (params.work_hours_per_year * SECONDS_PER_HOUR);
        let work_seconds_per_week = work_hours_per_week * SECONDS_PER_HOUR;
        let work_weeks_per_year = params.work_hours_per_year / work_hours_per_week;
        let person_seconds_per_week = params.team_size as f64 * work_seconds_per_week;
        let person_seconds_per_year =
            params.team_size as f64 * params.work_hours_per_year * SECONDS_PER_HOUR;

        let ideal_fraction = params.ideal_meeting_percent / 100.0;
        let ideal_seconds_per_week = ideal_fraction * person_seconds_per_week;
        let ideal_cost_per_week = Money::from_major(
            ideal_fraction * cost_per_second * person_seconds_per_week,
            params.currency,
        );
        let ideal_seconds_per_year = ideal_fraction * person_seconds_per_year;
        let ideal_cost_per_year = Money::from_major(
            ideal_fraction * cost_per_second * person_seconds_per_year,
            params.currency,
        );

        Ok(Self {
            annual_salary: params.annual_salary,
            work_hours_per_year: params.work_hours_per_year,
            work_hours_per_day: params.work_hours_per_day,
            work_days_per_week: params.work_days_per_week,
            team_size: params.team_size,
            ideal_meeting_percent: params.ideal_meeting_percent,
            currency: params.currency,
            cost_per_second,
            work_seconds_per_week,
            work_weeks_per_year,
            person_seconds_per_week,
            person_seconds_per_year,
            ideal_seconds_per_week,
            ideal_cost_per_week,
            ideal_seconds_per_year,
            ideal_cost_per_year,
        })
    }
}
