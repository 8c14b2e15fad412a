// Parsing of the free-form coordinates input
use crate::model::GeoPoint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a coordinates entry was not applied to the map.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CoordinatesError {
    #[error("enter coordinates as \"lat, lon\"")]
    Blank,
    #[error("expected two values separated by a comma, found {0}")]
    TokenCount(usize),
    #[error("the {} value is missing", ordinal(.0))]
    EmptyValue(usize),
    #[error("\"{0}\" is not a number")]
    NotANumber(String),
}

fn ordinal(index: &usize) -> &'static str {
    if *index == 0 { "first" } else { "second" }
}

/// Parses `"lat, lon"`: exactly two comma-separated finite numbers, each
/// optionally surrounded by whitespace. No range check is applied.
pub fn parse_point(text: &str) -> Result<GeoPoint, CoordinatesError> {
    if text.trim().is_empty() {
        return Err(CoordinatesError::Blank);
    }
    let tokens: Vec<&str> = text.split(',').map(str::trim).collect();
    if tokens.len() != 2 {
        return Err(CoordinatesError::TokenCount(tokens.len()));
    }
    let lat = parse_value(tokens[0], 0)?;
    let lon = parse_value(tokens[1], 1)?;
    Ok(GeoPoint::new(lat, lon))
}

fn parse_value(token: &str, index: usize) -> Result<f64, CoordinatesError> {
    if token.is_empty() {
        return Err(CoordinatesError::EmptyValue(index));
    }
    match token.parse::<f64>() {
        // `f64::from_str` accepts "inf" and "NaN", which are no coordinates
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CoordinatesError::NotANumber(token.to_string())),
    }
}
