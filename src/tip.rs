//! # Fishing Tip Service
//!
//! Asks a text-generation service (Gemini `generateContent`) for a short fishing tip for one
//! forecast day. This is the only network call in the application and it never fails from
//! the caller's point of view: every error turns into a fixed fallback message.
//!
//! ## Request Flow
//! 1. **Guard**: a single in-flight flag rejects overlapping requests
//! 2. **Prompt**: built from the day's date, description, wind and temperature
//! 3. **POST**: `{endpoint}/{model}:generateContent?key={api_key}`
//! 4. **Extract**: `candidates[0].content.parts[0].text`
//!
//! ## Error Handling
//! - **Network failures** → "Failed to generate tip due to an error."
//! - **HTTP error status, non-JSON body, missing candidate text** →
//!   "Could not generate a tip. Please try again."
//!
//! There is no timeout, retry or cancellation. Errors are logged and swallowed here.

use crate::conditions::{self, FishingCondition};
use crate::config::TipConfig;
use crate::DailyForecast;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{info, warn};

pub const TIP_UNAVAILABLE: &str = "Could not generate a tip. Please try again.";
pub const TIP_FAILED: &str = "Failed to generate tip due to an error.";

/// Errors that can occur while requesting a tip.
#[derive(Error, Debug)]
pub enum TipError {
    /// Request could not be sent or the body could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("service returned status {0}")]
    Status(u16),

    /// Body was not the expected JSON
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// JSON was valid but held no candidate text
    #[error("response contained no candidates")]
    NoCandidates,
}

impl TipError {
    /// The message shown in place of a tip.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            TipError::Http(_) => TIP_FAILED,
            TipError::Status(_) | TipError::Malformed(_) | TipError::NoCandidates => {
                TIP_UNAVAILABLE
            }
        }
    }
}

/// Outcome of [`TipClient::request_tip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipOutcome {
    /// Generated text
    Tip(String),
    /// The request failed; holds the user-facing fallback message
    Fallback(String),
    /// Another request is still running; nothing was sent
    AlreadyInFlight,
}

impl TipOutcome {
    /// Text to show the user, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            TipOutcome::Tip(text) | TipOutcome::Fallback(text) => Some(text),
            TipOutcome::AlreadyInFlight => None,
        }
    }
}

#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    role: &'a str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize, Debug)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize, Debug, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: Option<String>,
}

/// Build the prompt sent to the service for `day`.
pub fn build_prompt(day: &DailyForecast, location: &str) -> String {
    let verdict = conditions::evaluate(day.wind_speed, day.wind_direction, day.wind_gust);
    let mut prompt = format!(
        "Given the weather conditions for {date}: {description}, wind {direction} at {speed} km/h \
         (gusts up to {gust} km/h), and temperature {temp}°C, provide a concise fishing tip \
         (2-3 sentences) for beach fishing at {location} using a drone or long line. Focus on \
         strategies, gear, or general advice suitable for these conditions.",
        date = day.date,
        description = day.description,
        direction = day.wind_direction,
        speed = day.wind_speed,
        gust = day.wind_gust,
        temp = day.temp,
    );
    if verdict.condition == FishingCondition::Poor {
        prompt.push_str(
            " Conditions are poor for fishing, so suggest an alternative activity or how to \
             prepare for better conditions.",
        );
    }
    prompt
}

/// Pull the first candidate's text out of a response body.
pub fn extract_tip(body: &[u8]) -> Result<String, TipError> {
    let response: GenerateResponse = serde_json::from_slice(body)?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(TipError::NoCandidates)
}

/// Clears the in-flight flag when dropped.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Single-flight client for the tip service.
#[derive(Debug)]
pub struct TipClient {
    http: reqwest::Client,
    url: String,
    location: String,
    in_flight: AtomicBool,
}

impl TipClient {
    /// Build a client from config; the API key is read from the configured environment
    /// variable and sent empty when unset.
    pub fn new(config: &TipConfig, location: &str) -> Self {
        let api_key = std::env::var(&config.api_key_env).unwrap_or_default();
        let url = format!(
            "{}/{}:generateContent?key={}",
            config.endpoint.trim_end_matches('/'),
            config.model,
            api_key
        );
        Self {
            http: reqwest::Client::new(),
            url,
            location: location.to_string(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Claim the in-flight slot, or `None` when a request is already running.
    pub fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                flag: &self.in_flight,
            })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Request a tip for `day`. Never returns an error.
    pub async fn request_tip(&self, day: &DailyForecast) -> TipOutcome {
        let Some(_guard) = self.try_begin() else {
            info!("tip request already in flight, ignoring");
            return TipOutcome::AlreadyInFlight;
        };

        let prompt = build_prompt(day, &self.location);
        match self.fetch(&prompt).await {
            Ok(text) => TipOutcome::Tip(text),
            Err(error) => {
                warn!(%error, date = %day.date, "tip generation failed");
                TipOutcome::Fallback(error.fallback_message().to_string())
            }
        }
    }

    async fn fetch(&self, prompt: &str) -> Result<String, TipError> {
        let payload = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
        };

        let response = self.http.post(&self.url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TipError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        extract_tip(&body)
    }
}
