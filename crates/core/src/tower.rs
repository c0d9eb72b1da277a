//! Tower lifecycle, coordinate parsing, and update change detection.
//!
//! A tower's status only moves forward (`active` -> `dismantled`). When one
//! update request touches several aspects of a tower, [`update_event`] picks
//! the single event to record using a fixed precedence:
//! coordinates > photo > provider set > other descriptive fields.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::tower_event::EventDraft;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerStatus {
    Active,
    Dismantled,
}

impl TowerStatus {
    /// String representation used in the `towers.status` column and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Dismantled => "dismantled",
        }
    }
}

impl fmt::Display for TowerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TowerStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "dismantled" => Ok(Self::Dismantled),
            other => Err(CoreError::Validation(format!(
                "Unknown tower status '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for TowerStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// A WGS84 position in floating point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Build a position, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoreError::Validation(format!(
                "Latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::Validation(format!(
                "Longitude {longitude} is outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a position from raw form values.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, CoreError> {
        let lat = parse_number("latitude", latitude)?;
        let lon = parse_number("longitude", longitude)?;
        Self::new(lat, lon)
    }
}

/// Parse a decimal form value, naming the field in the error.
pub fn parse_number(field: &str, raw: &str) -> Result<f64, CoreError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoreError::Validation(format!("Invalid {field} format")))
}

/// Parse the tower height in metres. Must be a non-negative number.
pub fn parse_height(raw: &str) -> Result<f64, CoreError> {
    let height = parse_number("height", raw)?;
    if height < 0.0 {
        return Err(CoreError::Validation("Height must not be negative".into()));
    }
    Ok(height)
}

// ---------------------------------------------------------------------------
// Descriptive fields and providers
// ---------------------------------------------------------------------------

/// Free-form descriptive attributes of a tower.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TowerDetails {
    pub village: String,
    pub district: String,
    pub address: String,
    pub height: f64,
    pub tower_type: String,
}

/// A provider as seen from a tower: identity plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRef {
    pub id: DbId,
    pub name: String,
}

/// Order-insensitive provider-set equality on ids.
pub fn same_provider_set(a: &[DbId], b: &[DbId]) -> bool {
    let a: BTreeSet<DbId> = a.iter().copied().collect();
    let b: BTreeSet<DbId> = b.iter().copied().collect();
    a == b
}

/// Names of the given providers, in their current order.
pub fn provider_names(providers: &[ProviderRef]) -> Vec<String> {
    providers.iter().map(|p| p.name.clone()).collect()
}

// ---------------------------------------------------------------------------
// Update classification
// ---------------------------------------------------------------------------

/// The aspects of a tower an update request can touch.
#[derive(Debug, Clone, PartialEq)]
pub struct TowerAspects {
    pub coordinates: Coordinates,
    pub photo_url: Option<String>,
    pub providers: Vec<ProviderRef>,
    pub details: TowerDetails,
}

impl TowerAspects {
    fn provider_ids(&self) -> Vec<DbId> {
        self.providers.iter().map(|p| p.id).collect()
    }
}

/// Which aspects differ between two states of the same tower.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TowerChanges {
    pub location: bool,
    pub photo: bool,
    pub providers: bool,
    pub details: bool,
}

impl TowerChanges {
    pub fn between(before: &TowerAspects, after: &TowerAspects) -> Self {
        Self {
            location: before.coordinates != after.coordinates,
            photo: before.photo_url != after.photo_url,
            providers: !same_provider_set(&before.provider_ids(), &after.provider_ids()),
            details: before.details != after.details,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.location || self.photo || self.providers || self.details)
    }
}

/// Build the single event describing an update, or `None` if nothing changed.
///
/// Only the highest-precedence changed aspect is recorded.
pub fn update_event(before: &TowerAspects, after: &TowerAspects) -> Option<EventDraft> {
    let changes = TowerChanges::between(before, after);
    if changes.location {
        Some(EventDraft::relocation(before.coordinates, after.coordinates))
    } else if changes.photo {
        Some(EventDraft::photo_update(
            before.photo_url.clone(),
            after.photo_url.clone(),
        ))
    } else if changes.providers {
        Some(EventDraft::ownership_change(
            provider_names(&before.providers),
            provider_names(&after.providers),
        ))
    } else if changes.details {
        Some(EventDraft::details_update(
            before.details.clone(),
            after.details.clone(),
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::tower_event::{Snapshot, TowerEventKind};

    fn provider(id: DbId, name: &str) -> ProviderRef {
        ProviderRef {
            id,
            name: name.to_string(),
        }
    }

    fn aspects() -> TowerAspects {
        TowerAspects {
            coordinates: Coordinates::new(1.0, 2.0).unwrap(),
            photo_url: None,
            providers: vec![provider(1, "Telkomsel"), provider(2, "Indosat")],
            details: TowerDetails {
                village: "Sukamaju".into(),
                district: "Cibeunying".into(),
                address: "Jl. Merdeka 1".into(),
                height: 42.0,
                tower_type: "Monopole".into(),
            },
        }
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [TowerStatus::Active, TowerStatus::Dismantled] {
            assert_eq!(status.as_str().parse::<TowerStatus>().unwrap(), status);
        }
        assert!("retired".parse::<TowerStatus>().is_err());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&TowerStatus::Dismantled).unwrap();
        assert_eq!(json, "\"dismantled\"");
    }

    #[test]
    fn coordinates_parse_valid_values() {
        let c = Coordinates::parse(" -6.9147 ", "107.6098").unwrap();
        assert_eq!(c.latitude, -6.9147);
        assert_eq!(c.longitude, 107.6098);
    }

    #[test]
    fn coordinates_reject_malformed_numbers() {
        let err = Coordinates::parse("abc", "1.0").unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Invalid latitude format");

        let err = Coordinates::parse("1.0", "").unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Invalid longitude format");

        assert!(Coordinates::parse("NaN", "1.0").is_err());
    }

    #[test]
    fn coordinates_reject_out_of_range() {
        assert!(Coordinates::new(90.5, 0.0).is_err());
        assert!(Coordinates::new(0.0, -180.1).is_err());
        assert!(Coordinates::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn height_must_be_non_negative() {
        assert_eq!(parse_height("30.5").unwrap(), 30.5);
        assert!(parse_height("-1").is_err());
        assert_matches!(parse_height("tall"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn provider_sets_compare_ignoring_order() {
        assert!(same_provider_set(&[1, 2], &[2, 1]));
        assert!(!same_provider_set(&[1, 2], &[1]));
        assert!(same_provider_set(&[], &[]));
        assert!(same_provider_set(&[3, 3, 4], &[4, 3]));
    }

    #[test]
    fn unchanged_update_records_nothing() {
        let before = aspects();
        assert!(TowerChanges::between(&before, &before).is_empty());
        assert!(update_event(&before, &before).is_none());
    }

    #[test]
    fn reordered_providers_are_not_a_change() {
        let before = aspects();
        let mut after = before.clone();
        after.providers.reverse();
        assert!(update_event(&before, &after).is_none());
    }

    #[test]
    fn location_wins_over_every_other_aspect() {
        let before = aspects();
        let mut after = before.clone();
        after.coordinates = Coordinates::new(3.0, 4.0).unwrap();
        after.photo_url = Some("/uploads/new.webp".into());
        after.providers = vec![provider(3, "XL")];
        after.details.height = 50.0;

        let draft = update_event(&before, &after).unwrap();
        assert_eq!(draft.kind, TowerEventKind::Relocation);
        assert_eq!(
            draft.new_data,
            Some(Snapshot::Location(Coordinates::new(3.0, 4.0).unwrap()))
        );
    }

    #[test]
    fn photo_wins_over_providers_and_details() {
        let before = aspects();
        let mut after = before.clone();
        after.photo_url = Some("/uploads/new.webp".into());
        after.providers = vec![provider(3, "XL")];

        let draft = update_event(&before, &after).unwrap();
        assert_eq!(draft.kind, TowerEventKind::PhotoUpdate);
        assert_eq!(draft.old_data, Some(Snapshot::Photo { photo_url: None }));
    }

    #[test]
    fn providers_win_over_details() {
        let before = aspects();
        let mut after = before.clone();
        after.providers = vec![provider(3, "XL")];
        after.details.address = "Jl. Asia Afrika 8".into();

        let draft = update_event(&before, &after).unwrap();
        assert_eq!(draft.kind, TowerEventKind::OwnershipChange);
        assert_eq!(
            draft.old_data,
            Some(Snapshot::Ownership {
                providers: vec!["Telkomsel".into(), "Indosat".into()]
            })
        );
    }

    #[test]
    fn details_only_change_records_details_update() {
        let before = aspects();
        let mut after = before.clone();
        after.details.tower_type = "Lattice".into();

        let draft = update_event(&before, &after).unwrap();
        assert_eq!(draft.kind, TowerEventKind::DetailsUpdate);
        assert_matches!(draft.new_data, Some(Snapshot::Details(d)) if d.tower_type == "Lattice");
    }
}
