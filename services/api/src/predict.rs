use crate::infra::prediction_service;
use accident_severity::config::AppConfig;
use accident_severity::error::AppError;
use accident_severity::prediction::{DrivingConditions, FormOptions, SeverityAssessment};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct PredictArgs {
    /// Day of week (Monday..Sunday). Defaults to Monday.
    #[arg(long)]
    pub(crate) day: Option<String>,
    /// Hour of day, 0-23. Defaults to 12.
    #[arg(long)]
    pub(crate) hour: Option<i64>,
    /// Weather condition (Fine, Rain, Fog, Snow). Defaults to Fine.
    #[arg(long)]
    pub(crate) weather: Option<String>,
    /// Speed limit in km/h (30-110 in steps of 10). Defaults to 30.
    #[arg(long)]
    pub(crate) speed_limit: Option<i64>,
    /// Road environment (Urban, Rural). Defaults to Urban.
    #[arg(long)]
    pub(crate) area: Option<String>,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
    /// Print the assessment as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl PredictArgs {
    fn conditions(&self, options: &FormOptions) -> DrivingConditions {
        let defaults = options.default_conditions();
        DrivingConditions {
            day_of_week: self.day.clone().unwrap_or(defaults.day_of_week),
            hour: self.hour.unwrap_or(defaults.hour),
            weather_conditions: self.weather.clone().unwrap_or(defaults.weather_conditions),
            speed_limit: self.speed_limit.unwrap_or(defaults.speed_limit),
            urban_or_rural_area: self.area.clone().unwrap_or(defaults.urban_or_rural_area),
        }
    }
}

pub(crate) fn run_prediction(mut args: PredictArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = prediction_service(&config, args.model.take())?;

    let conditions = args.conditions(&FormOptions::standard());
    let assessment = service.assess(conditions)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        print!("{}", render_assessment(&assessment));
    }

    Ok(())
}

fn render_assessment(assessment: &SeverityAssessment) -> String {
    let outcome = &assessment.outcome;
    let mut out = String::new();

    out.push_str("Road accident severity prediction\n");
    out.push_str(&format!("Conditions: {}\n", assessment.record));
    out.push_str(&format!(
        "\n{}\nPrediction confidence: {}\n",
        assessment.banner.headline, assessment.confidence_display
    ));

    out.push_str("\nProbability by severity level\n");
    for bar in &assessment.chart {
        out.push_str(&format!("- {}: {:.1}%\n", bar.label, bar.percent));
    }

    out.push_str("\nWhy this result?\n");
    for reason in &outcome.explanations {
        out.push_str(&format!("• {reason}\n"));
    }

    out.push_str("\nSafety recommendations\n");
    for line in &outcome.advice {
        out.push_str(&format!("• {line}\n"));
    }

    out.push_str(&format!("\n{}\n", assessment.disclaimer));
    out
}
