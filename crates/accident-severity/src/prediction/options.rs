use serde::{Deserialize, Serialize};

use super::domain::{AreaType, DayOfWeek, DrivingConditions, Hour, SpeedLimit, WeatherCondition};

/// Inclusive range offered by the hour slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

/// Choices presented by the driving conditions form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormOptions {
    pub days_of_week: Vec<&'static str>,
    pub hour: HourRange,
    pub weather_conditions: Vec<&'static str>,
    pub speed_limits: Vec<u16>,
    pub urban_or_rural_area: Vec<&'static str>,
}

impl FormOptions {
    pub fn standard() -> Self {
        Self {
            days_of_week: DayOfWeek::ALL.iter().map(DayOfWeek::label).collect(),
            hour: HourRange {
                min: 0,
                max: Hour::MAX,
                default: 12,
            },
            weather_conditions: WeatherCondition::ALL
                .iter()
                .map(WeatherCondition::label)
                .collect(),
            speed_limits: SpeedLimit::ALLOWED.to_vec(),
            urban_or_rural_area: AreaType::ALL.iter().map(AreaType::label).collect(),
        }
    }

    /// Initial selection of every widget before the driver changes anything.
    pub fn default_conditions(&self) -> DrivingConditions {
        DrivingConditions {
            day_of_week: self
                .days_of_week
                .first()
                .copied()
                .unwrap_or("Monday")
                .to_string(),
            hour: i64::from(self.hour.default),
            weather_conditions: self
                .weather_conditions
                .first()
                .copied()
                .unwrap_or("Fine")
                .to_string(),
            speed_limit: self
                .speed_limits
                .first()
                .copied()
                .map(i64::from)
                .unwrap_or(30),
            urban_or_rural_area: self
                .urban_or_rural_area
                .first()
                .copied()
                .unwrap_or("Urban")
                .to_string(),
        }
    }
}
