//! Tower event vocabulary, state snapshots, and event drafts.
//!
//! A [`EventDraft`] is everything the event recorder needs apart from the
//! tower id and the acting user: the kind, a human-readable description, and
//! the before/after [`Snapshot`]s. Snapshots are a closed set of shapes so
//! that stored history stays machine-queryable and round-trips through JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::tower::{Coordinates, TowerDetails, TowerStatus};

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

/// The closed vocabulary of tower events.
///
/// Persisted as the variant name (e.g. `"OwnershipChange"`); the
/// `tower_events.event_type` CHECK constraint mirrors [`TowerEventKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerEventKind {
    Created,
    DetailsUpdate,
    OwnershipChange,
    Relocation,
    PhotoUpdate,
    Dismantled,
}

impl TowerEventKind {
    pub const ALL: [TowerEventKind; 6] = [
        Self::Created,
        Self::DetailsUpdate,
        Self::OwnershipChange,
        Self::Relocation,
        Self::PhotoUpdate,
        Self::Dismantled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::DetailsUpdate => "DetailsUpdate",
            Self::OwnershipChange => "OwnershipChange",
            Self::Relocation => "Relocation",
            Self::PhotoUpdate => "PhotoUpdate",
            Self::Dismantled => "Dismantled",
        }
    }
}

impl fmt::Display for TowerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TowerEventKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown tower event type '{s}'")))
    }
}

impl TryFrom<String> for TowerEventKind {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Full state of a tower at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerSnapshot {
    pub latitude: f64,
    pub longitude: f64,
    pub village: String,
    pub district: String,
    pub address: String,
    pub height: f64,
    pub tower_type: String,
    pub photo_url: Option<String>,
    pub providers: Vec<String>,
    pub status: TowerStatus,
}

/// The before or after side of one event, tagged by `shape` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Snapshot {
    Tower(TowerSnapshot),
    Details(TowerDetails),
    Location(Coordinates),
    Ownership { providers: Vec<String> },
    Photo { photo_url: Option<String> },
    Status { status: TowerStatus },
}

impl Snapshot {
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

/// An event ready to be recorded against a tower.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub kind: TowerEventKind,
    pub description: String,
    pub old_data: Option<Snapshot>,
    pub new_data: Option<Snapshot>,
}

impl EventDraft {
    pub fn created(tower: TowerSnapshot) -> Self {
        Self {
            kind: TowerEventKind::Created,
            description: "Tower initially created.".into(),
            old_data: None,
            new_data: Some(Snapshot::Tower(tower)),
        }
    }

    pub fn details_update(old: TowerDetails, new: TowerDetails) -> Self {
        Self {
            kind: TowerEventKind::DetailsUpdate,
            description: "Tower details were updated.".into(),
            old_data: Some(Snapshot::Details(old)),
            new_data: Some(Snapshot::Details(new)),
        }
    }

    pub fn photo_update(old: Option<String>, new: Option<String>) -> Self {
        Self {
            kind: TowerEventKind::PhotoUpdate,
            description: "Tower photo was replaced.".into(),
            old_data: Some(Snapshot::Photo { photo_url: old }),
            new_data: Some(Snapshot::Photo { photo_url: new }),
        }
    }

    pub fn ownership_change(old: Vec<String>, new: Vec<String>) -> Self {
        Self {
            kind: TowerEventKind::OwnershipChange,
            description: format!(
                "Ownership changed from [{}] to [{}]",
                old.join(", "),
                new.join(", ")
            ),
            old_data: Some(Snapshot::Ownership { providers: old }),
            new_data: Some(Snapshot::Ownership { providers: new }),
        }
    }

    pub fn relocation(from: Coordinates, to: Coordinates) -> Self {
        Self {
            kind: TowerEventKind::Relocation,
            description: format!(
                "Tower relocated from ({:.6}, {:.6}) to ({:.6}, {:.6})",
                from.latitude, from.longitude, to.latitude, to.longitude
            ),
            old_data: Some(Snapshot::Location(from)),
            new_data: Some(Snapshot::Location(to)),
        }
    }

    pub fn dismantled(old: TowerStatus) -> Self {
        let new = TowerStatus::Dismantled;
        Self {
            kind: TowerEventKind::Dismantled,
            description: format!("Tower status changed from {old} to {new}"),
            old_data: Some(Snapshot::Status { status: old }),
            new_data: Some(Snapshot::Status { status: new }),
        }
    }

    /// Hard deletion is recorded as a dismantle, not a distinct kind.
    pub fn deleted(old: TowerStatus) -> Self {
        let new = TowerStatus::Dismantled;
        Self {
            kind: TowerEventKind::Dismantled,
            description: format!("Tower deleted (status changed from {old} to {new})"),
            old_data: Some(Snapshot::Status { status: old }),
            new_data: Some(Snapshot::Status { status: new }),
        }
    }
}
