//! # Beach Forecast Application Entry Point
//!
//! Generates one session's synthetic forecast and prints it, either as a terminal report or
//! as JSON. Optionally asks the tip service for a fishing tip for today.
//!
//! With `--json`, stdout is a single JSON document: the forecast plus, when requested, the
//! selected day and the tip. Logs always go to stderr.
//!
//! ```text
//! beach-forecast [--json] [--seed N] [--days N] [--day N] [--tip] [--config PATH]
//! ```


use anyhow::{bail, Context};
use beach_forecast_lib::config::Config;
use beach_forecast_lib::forecast::ForecastGenerator;
use beach_forecast_lib::random::SeededRandom;
use beach_forecast_lib::renderer::{draw_ascii, render_day_detail};
use beach_forecast_lib::tip::TipClient;
use beach_forecast_lib::{DailyForecast, Forecast};
use chrono::Local;
use serde::Serialize;
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line options; anything not given falls back to the config file.
#[derive(Debug, Default, PartialEq)]
struct Args {
    json: bool,
    tip: bool,
    seed: Option<u64>,
    days: Option<u32>,
    detail_day: Option<usize>,
    config_path: Option<String>,
}

/// Everything `--json` prints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    location: &'a str,
    forecast: &'a Forecast,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a DailyForecast>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tip: Option<String>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--tip" => parsed.tip = true,
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                parsed.seed = Some(value.parse().context("--seed must be an integer")?);
            }
            "--days" => {
                let value = args.next().context("--days needs a value")?;
                parsed.days = Some(value.parse().context("--days must be an integer")?);
            }
            "--day" => {
                let value = args.next().context("--day needs a value")?;
                parsed.detail_day = Some(value.parse().context("--day must be an integer")?);
            }
            "--config" => {
                parsed.config_path = Some(args.next().context("--config needs a path")?);
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(parsed)
}

fn init_logging() {
    // stdout carries the report, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    init_logging();

    let args = parse_args(env::args().skip(1))?;
    let config = match &args.config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    let seed = args.seed.or(config.forecast.seed);
    let horizon_days = args.days.unwrap_or(config.forecast.horizon_days);
    let today = Local::now().date_naive();

    info!(horizon_days, ?seed, %today, "generating forecast");
    let mut generator = ForecastGenerator::new(SeededRandom::new(seed));
    let forecast = generator.generate(horizon_days, today);

    let detail = args.detail_day.and_then(|index| {
        let day = forecast.get(index);
        if day.is_none() {
            warn!(index, days = forecast.len(), "no such forecast day");
        }
        day
    });
    let tip = if args.tip { request_tip(&config, &forecast)? } else { None };

    if args.json {
        let report = JsonReport {
            location: &config.location.name,
            forecast: &forecast,
            detail,
            tip,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    draw_ascii(&forecast, &config.location.name);
    if let Some(day) = detail {
        println!("\n{}", render_day_detail(day));
    }
    if let Some(message) = tip {
        println!("\nFishing tip: {message}");
    }

    Ok(())
}

/// Ask the tip service about today, blocking on a one-off runtime.
fn request_tip(config: &Config, forecast: &Forecast) -> anyhow::Result<Option<String>> {
    let Some(today) = forecast.today() else {
        warn!("empty forecast, skipping tip");
        return Ok(None);
    };
    let client = TipClient::new(&config.tip, &config.location.name);
    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(client.request_tip(today));
    Ok(outcome.message().map(str::to_string))
}
