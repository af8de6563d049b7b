use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::assembler::InputError;

/// Placeholder year fed to the model for every request.
pub const DEFAULT_SCENARIO_YEAR: i32 = 2024;
/// Placeholder month fed to the model for every request.
pub const DEFAULT_SCENARIO_MONTH: u8 = 6;
pub const DEFAULT_ROAD_TYPE: &str = "Single carriageway";
pub const DEFAULT_ROAD_SURFACE: &str = "Dry";

/// Label to probability mapping returned by a model oracle.
pub type ClassProbabilities = BTreeMap<String, f64>;

/// Feature values that are not collected from the driver.
///
/// The model was trained on these columns, so a fixed scenario is supplied in their place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDefaults {
    pub year: i32,
    pub month: u8,
    pub road_type: String,
    pub road_surface_conditions: String,
}

impl Default for ScenarioDefaults {
    fn default() -> Self {
        Self {
            year: DEFAULT_SCENARIO_YEAR,
            month: DEFAULT_SCENARIO_MONTH,
            road_type: DEFAULT_ROAD_TYPE.to_string(),
            road_surface_conditions: DEFAULT_ROAD_SURFACE.to_string(),
        }
    }
}

/// Raw driving conditions as submitted by the form or CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrivingConditions {
    pub day_of_week: String,
    pub hour: i64,
    pub weather_conditions: String,
    pub speed_limit: i64,
    pub urban_or_rural_area: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, InputError> {
        lookup(&Self::ALL, raw, Self::label)
            .ok_or_else(|| InputError::UnknownDayOfWeek(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Fine,
    Rain,
    Fog,
    Snow,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 4] = [
        WeatherCondition::Fine,
        WeatherCondition::Rain,
        WeatherCondition::Fog,
        WeatherCondition::Snow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Fine => "Fine",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Snow => "Snow",
        }
    }

    pub fn is_adverse(&self) -> bool {
        matches!(
            self,
            WeatherCondition::Rain | WeatherCondition::Fog | WeatherCondition::Snow
        )
    }

    pub fn parse(raw: &str) -> Result<Self, InputError> {
        lookup(&Self::ALL, raw, Self::label)
            .ok_or_else(|| InputError::UnknownWeatherCondition(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightCondition {
    Daylight,
    Darkness,
}

impl LightCondition {
    /// Darkness from 18:00 through 05:59, daylight otherwise.
    pub fn from_hour(hour: Hour) -> Self {
        if hour.is_night() {
            LightCondition::Darkness
        } else {
            LightCondition::Daylight
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LightCondition::Daylight => "Daylight",
            LightCondition::Darkness => "Darkness",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaType {
    Urban,
    Rural,
}

impl AreaType {
    pub const ALL: [AreaType; 2] = [AreaType::Urban, AreaType::Rural];

    pub fn label(&self) -> &'static str {
        match self {
            AreaType::Urban => "Urban",
            AreaType::Rural => "Rural",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, InputError> {
        lookup(&Self::ALL, raw, Self::label)
            .ok_or_else(|| InputError::UnknownArea(raw.to_string()))
    }
}

fn lookup<T: Copy>(choices: &[T], raw: &str, label: fn(&T) -> &'static str) -> Option<T> {
    let wanted = raw.trim();
    choices
        .iter()
        .copied()
        .find(|choice| label(choice).eq_ignore_ascii_case(wanted))
}

/// Hour of day, 0 through 23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Hour(u8);

impl Hour {
    pub const MAX: u8 = 23;

    pub fn new(raw: i64) -> Result<Self, InputError> {
        u8::try_from(raw)
            .ok()
            .filter(|hour| *hour <= Self::MAX)
            .map(Hour)
            .ok_or(InputError::HourOutOfRange(raw))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_night(&self) -> bool {
        self.0 >= 18 || self.0 <= 5
    }
}

impl TryFrom<i64> for Hour {
    type Error = InputError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Hour::new(value)
    }
}

impl From<Hour> for u8 {
    fn from(value: Hour) -> Self {
        value.0
    }
}

/// Posted speed limit in km/h, restricted to the values the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u16")]
pub struct SpeedLimit(u16);

impl SpeedLimit {
    pub const ALLOWED: [u16; 9] = [30, 40, 50, 60, 70, 80, 90, 100, 110];

    pub fn new(raw: i64) -> Result<Self, InputError> {
        u16::try_from(raw)
            .ok()
            .filter(|limit| Self::ALLOWED.contains(limit))
            .map(SpeedLimit)
            .ok_or(InputError::UnsupportedSpeedLimit(raw))
    }

    pub fn kmh(&self) -> u16 {
        self.0
    }
}

impl TryFrom<i64> for SpeedLimit {
    type Error = InputError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        SpeedLimit::new(value)
    }
}

impl From<SpeedLimit> for u16 {
    fn from(value: SpeedLimit) -> Self {
        value.0
    }
}

/// Canonical model input, one per prediction request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub year: i32,
    pub month: u8,
    pub day_of_week: DayOfWeek,
    pub hour: Hour,
    pub weather_conditions: WeatherCondition,
    pub light_conditions: LightCondition,
    pub road_type: String,
    pub speed_limit: SpeedLimit,
    pub urban_or_rural_area: AreaType,
    pub road_surface_conditions: String,
}

/// Value of a single model column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    Numeric(f64),
    Categorical(&'a str),
}

impl FeatureRecord {
    pub const NUMERIC_FEATURES: [&'static str; 4] = ["year", "month", "hour", "speed_limit"];
    pub const CATEGORICAL_FEATURES: [&'static str; 6] = [
        "day_of_week",
        "weather_conditions",
        "light_conditions",
        "road_type",
        "urban_or_rural_area",
        "road_surface_conditions",
    ];

    /// Columns in the order the model was trained on.
    pub fn features(&self) -> [(&'static str, FeatureValue<'_>); 10] {
        [
            ("year", FeatureValue::Numeric(f64::from(self.year))),
            ("month", FeatureValue::Numeric(f64::from(self.month))),
            (
                "day_of_week",
                FeatureValue::Categorical(self.day_of_week.label()),
            ),
            ("hour", FeatureValue::Numeric(f64::from(self.hour.value()))),
            (
                "weather_conditions",
                FeatureValue::Categorical(self.weather_conditions.label()),
            ),
            (
                "light_conditions",
                FeatureValue::Categorical(self.light_conditions.label()),
            ),
            ("road_type", FeatureValue::Categorical(&self.road_type)),
            (
                "speed_limit",
                FeatureValue::Numeric(f64::from(self.speed_limit.kmh())),
            ),
            (
                "urban_or_rural_area",
                FeatureValue::Categorical(self.urban_or_rural_area.label()),
            ),
            (
                "road_surface_conditions",
                FeatureValue::Categorical(&self.road_surface_conditions),
            ),
        ]
    }
}

impl fmt::Display for FeatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:00, {}, {}, {} km/h, {}",
            self.day_of_week.label(),
            self.hour.value(),
            self.weather_conditions.label(),
            self.light_conditions.label(),
            self.speed_limit.kmh(),
            self.urban_or_rural_area.label()
        )
    }
}

/// Result of advising on a single prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub label: String,
    pub class_probabilities: ClassProbabilities,
    pub confidence: f64,
    pub explanations: Vec<String>,
    pub advice: Vec<String>,
}
