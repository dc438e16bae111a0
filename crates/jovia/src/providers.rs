//! Async collaborators around the engine: place lookup and narrative text generation.
//!
//! The engine never calls these itself. Callers resolve a place before computing a chart,
//! and hand the composed narrative payload to a generator afterwards.

use crate::narrative::NarrativePayload;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocodeError {
    #[error("Location not found: {place}")]
    LocationNotFound { place: String },
    #[error("Geocoder unavailable: {message}")]
    Unavailable { message: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Text generation unavailable: {message}")]
    Unavailable { message: String },
}

impl GenerationError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// A resolved place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA zone name, e.g. "Europe/Istanbul"
    pub timezone: String,
}

#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    async fn resolve(&self, place: &str) -> Result<Location, GeocodeError>;
}

/// Themed prompt passed alongside the payload; generators decide how to use it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub name: String,
    pub system: String,
    pub instructions: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            name: "inner-story".to_string(),
            system: "You are an AI astrologer providing deep and empathetic insights.".to_string(),
            instructions: "Focus on the inner story of transformation: emotional patterns, \
                           spiritual lessons and healing arcs."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub headline: String,
    pub summary: String,
    pub advice: String,
}

#[async_trait]
pub trait TextGenerationProvider: Send + Sync {
    async fn generate(
        &self,
        payload: &NarrativePayload,
        template: &PromptTemplate,
    ) -> Result<Interpretation, GenerationError>;
}
