use super::common::*;
use crate::prediction::{
    AreaType, DayOfWeek, InputAssembler, InputError, LightCondition, ScenarioDefaults,
    WeatherCondition, DEFAULT_ROAD_SURFACE, DEFAULT_ROAD_TYPE,
};

fn assembler() -> InputAssembler {
    InputAssembler::new(ScenarioDefaults::default())
}

#[test]
fn light_condition_is_darkness_only_at_night_for_every_hour() {
    let assembler = assembler();

    for hour in 0..=23 {
        let record = assembler
            .assemble("Monday", hour, "Fine", 30, "Urban")
            .expect("hour within range");
        let expected = if hour >= 18 || hour <= 5 {
            LightCondition::Darkness
        } else {
            LightCondition::Daylight
        };
        assert_eq!(record.light_conditions, expected, "hour {hour}");
    }
}

#[test]
fn light_condition_boundaries() {
    let assembler = assembler();
    let light = |hour| {
        assembler
            .assemble("Monday", hour, "Fine", 30, "Urban")
            .expect("valid")
            .light_conditions
    };

    assert_eq!(light(18), LightCondition::Darkness);
    assert_eq!(light(17), LightCondition::Daylight);
    assert_eq!(light(5), LightCondition::Darkness);
    assert_eq!(light(6), LightCondition::Daylight);
}

#[test]
fn fills_scenario_placeholders() {
    let record = record_for(&risky_conditions());

    assert_eq!(record.year, 2024);
    assert_eq!(record.month, 6);
    assert_eq!(record.road_type, DEFAULT_ROAD_TYPE);
    assert_eq!(record.road_surface_conditions, DEFAULT_ROAD_SURFACE);
    assert_eq!(record.day_of_week, DayOfWeek::Saturday);
    assert_eq!(record.hour.value(), 22);
    assert_eq!(record.weather_conditions, WeatherCondition::Rain);
    assert_eq!(record.speed_limit.kmh(), 100);
    assert_eq!(record.urban_or_rural_area, AreaType::Rural);
}

#[test]
fn overridden_scenario_flows_into_record() {
    let assembler = InputAssembler::new(ScenarioDefaults {
        year: 2019,
        month: 1,
        road_type: "Dual carriageway".to_string(),
        road_surface_conditions: "Frost or ice".to_string(),
    });

    let record = assembler
        .assemble_conditions(&calm_conditions())
        .expect("valid");

    assert_eq!(record.year, 2019);
    assert_eq!(record.month, 1);
    assert_eq!(record.road_type, "Dual carriageway");
    assert_eq!(record.road_surface_conditions, "Frost or ice");
}

#[test]
fn normalizes_case_and_whitespace() {
    let record = assembler()
        .assemble(" sunday ", 3, "FOG", 70, "rural")
        .expect("case-insensitive match");

    assert_eq!(record.day_of_week, DayOfWeek::Sunday);
    assert_eq!(record.weather_conditions, WeatherCondition::Fog);
    assert_eq!(record.urban_or_rural_area, AreaType::Rural);
}

#[test]
fn rejects_out_of_domain_values() {
    let assembler = assembler();

    assert_eq!(
        assembler.assemble("Funday", 12, "Fine", 30, "Urban"),
        Err(InputError::UnknownDayOfWeek("Funday".to_string()))
    );
    assert_eq!(
        assembler.assemble("Monday", 24, "Fine", 30, "Urban"),
        Err(InputError::HourOutOfRange(24))
    );
    assert_eq!(
        assembler.assemble("Monday", -1, "Fine", 30, "Urban"),
        Err(InputError::HourOutOfRange(-1))
    );
    assert_eq!(
        assembler.assemble("Monday", 12, "Hail", 30, "Urban"),
        Err(InputError::UnknownWeatherCondition("Hail".to_string()))
    );
    assert_eq!(
        assembler.assemble("Monday", 12, "Fine", 45, "Urban"),
        Err(InputError::UnsupportedSpeedLimit(45))
    );
    assert_eq!(
        assembler.assemble("Monday", 12, "Fine", 30, "Suburban"),
        Err(InputError::UnknownArea("Suburban".to_string()))
    );
}

#[test]
fn record_serializes_with_model_column_names() {
    let record = record_for(&risky_conditions());

    let value = serde_json::to_value(&record).expect("serializes");

    assert_eq!(value["day_of_week"], "Saturday");
    assert_eq!(value["hour"], 22);
    assert_eq!(value["weather_conditions"], "Rain");
    assert_eq!(value["light_conditions"], "Darkness");
    assert_eq!(value["road_type"], "Single carriageway");
    assert_eq!(value["speed_limit"], 100);
    assert_eq!(value["urban_or_rural_area"], "Rural");
    assert_eq!(value["road_surface_conditions"], "Dry");

    let round_trip: crate::prediction::FeatureRecord =
        serde_json::from_value(value).expect("deserializes");
    assert_eq!(round_trip, record);
}
