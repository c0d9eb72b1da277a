//! Blankspot (coverage-gap) area validation.
//!
//! A blankspot polygon is an ordered list of `[lat, lon]` pairs. Clients send
//! it either as a JSON array or as a JSON-encoded string holding that array.

use serde_json::Value;

use crate::error::CoreError;
use crate::tower::Coordinates;

/// Minimum number of vertices for a closed area.
pub const MIN_POLYGON_POINTS: usize = 3;

pub type Polygon = Vec<[f64; 2]>;

/// Check vertex count and that every vertex is a valid position.
pub fn validate_polygon(points: &[[f64; 2]]) -> Result<(), CoreError> {
    if points.len() < MIN_POLYGON_POINTS {
        return Err(CoreError::Validation(format!(
            "Polygon needs at least {MIN_POLYGON_POINTS} points, got {}",
            points.len()
        )));
    }
    for (i, [lat, lon]) in points.iter().enumerate() {
        Coordinates::new(*lat, *lon).map_err(|e| match e {
            CoreError::Validation(msg) => CoreError::Validation(format!("Point {i}: {msg}")),
            other => other,
        })?;
    }
    Ok(())
}

/// Accept a polygon given as a JSON array or a JSON-encoded string and validate it.
pub fn parse_polygon(value: &Value) -> Result<Polygon, CoreError> {
    let polygon: Polygon = match value {
        Value::String(raw) => serde_json::from_str(raw),
        other => serde_json::from_value(other.clone()),
    }
    .map_err(|_| {
        CoreError::Validation("Coordinates must be a list of [latitude, longitude] pairs".into())
    })?;

    validate_polygon(&polygon)?;
    Ok(polygon)
}

/// Accept `#RGB` or `#RRGGBB` hex colors.
pub fn validate_color(color: &str) -> Result<(), CoreError> {
    let hex = color.strip_prefix('#').unwrap_or("");
    let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Color '{color}' is not a hex color like #FF0000"
        )))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_array_and_encoded_string() {
        let array = json!([[-6.9, 107.6], [-6.91, 107.61], [-6.92, 107.6]]);
        let from_array = parse_polygon(&array).unwrap();
        assert_eq!(from_array.len(), 3);

        let encoded = Value::String(array.to_string());
        assert_eq!(parse_polygon(&encoded).unwrap(), from_array);
    }

    #[test]
    fn rejects_too_few_points() {
        let err = parse_polygon(&json!([[0.0, 0.0], [1.0, 1.0]])).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("at least 3"));
    }

    #[test]
    fn rejects_out_of_range_vertex() {
        let err = parse_polygon(&json!([[0.0, 0.0], [1.0, 1.0], [91.0, 0.0]])).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.starts_with("Point 2"));
    }

    #[test]
    fn rejects_malformed_shapes() {
        assert!(parse_polygon(&json!("not json")).is_err());
        assert!(parse_polygon(&json!([[1.0], [2.0], [3.0]])).is_err());
        assert!(parse_polygon(&json!({"lat": 1})).is_err());
    }

    #[test]
    fn color_formats() {
        assert!(validate_color("#FF0000").is_ok());
        assert!(validate_color("#abc").is_ok());
        assert!(validate_color("FF0000").is_err());
        assert!(validate_color("#GG0000").is_err());
        assert!(validate_color("#FF00").is_err());
    }
}
