use super::domain::{
    AreaType, DayOfWeek, DrivingConditions, FeatureRecord, Hour, LightCondition,
    ScenarioDefaults, SpeedLimit, WeatherCondition,
};

/// Builds the model input from the five driver-supplied fields.
#[derive(Debug, Clone, Default)]
pub struct InputAssembler {
    scenario: ScenarioDefaults,
}

impl InputAssembler {
    pub fn new(scenario: ScenarioDefaults) -> Self {
        Self { scenario }
    }

    pub fn scenario(&self) -> &ScenarioDefaults {
        &self.scenario
    }

    /// Validate the raw fields and fill the remaining columns from the scenario.
    pub fn assemble(
        &self,
        day_of_week: &str,
        hour: i64,
        weather_conditions: &str,
        speed_limit: i64,
        urban_or_rural_area: &str,
    ) -> Result<FeatureRecord, InputError> {
        let day_of_week = DayOfWeek::parse(day_of_week)?;
        let hour = Hour::new(hour)?;
        let weather_conditions = WeatherCondition::parse(weather_conditions)?;
        let speed_limit = SpeedLimit::new(speed_limit)?;
        let urban_or_rural_area = AreaType::parse(urban_or_rural_area)?;

        Ok(FeatureRecord {
            year: self.scenario.year,
            month: self.scenario.month,
            day_of_week,
            hour,
            weather_conditions,
            light_conditions: LightCondition::from_hour(hour),
            road_type: self.scenario.road_type.clone(),
            speed_limit,
            urban_or_rural_area,
            road_surface_conditions: self.scenario.road_surface_conditions.clone(),
        })
    }

    pub fn assemble_conditions(
        &self,
        conditions: &DrivingConditions,
    ) -> Result<FeatureRecord, InputError> {
        self.assemble(
            &conditions.day_of_week,
            conditions.hour,
            &conditions.weather_conditions,
            conditions.speed_limit,
            &conditions.urban_or_rural_area,
        )
    }
}

/// Driver input outside the values the model accepts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown day of week '{0}'")]
    UnknownDayOfWeek(String),
    #[error("hour {0} is outside 0-23")]
    HourOutOfRange(i64),
    #[error("unknown weather condition '{0}', expected Fine, Rain, Fog or Snow")]
    UnknownWeatherCondition(String),
    #[error("speed limit {0} km/h is not one of 30, 40, 50, 60, 70, 80, 90, 100, 110")]
    UnsupportedSpeedLimit(i64),
    #[error("unknown road environment '{0}', expected Urban or Rural")]
    UnknownArea(String),
}

impl InputError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            InputError::UnknownDayOfWeek(_) => "day_of_week",
            InputError::HourOutOfRange(_) => "hour",
            InputError::UnknownWeatherCondition(_) => "weather_conditions",
            InputError::UnsupportedSpeedLimit(_) => "speed_limit",
            InputError::UnknownArea(_) => "urban_or_rural_area",
        }
    }
}
