use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the form API. Screendoor sends integers, but string ids are
/// tolerated so a schema change does not drop whole responses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(value) => write!(f, "{value}"),
            RecordId::Text(value) => f.write_str(value),
        }
    }
}

/// Canonical permit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PermitStatus {
    #[serde(rename = "submitted")]
    Submitted,
    #[serde(rename = "on hold")]
    OnHold,
    #[serde(rename = "approved")]
    Approved,
}

impl PermitStatus {
    const CANONICAL: &'static [(&'static str, PermitStatus)] = &[
        ("submitted", PermitStatus::Submitted),
        ("processing", PermitStatus::Submitted),
        ("on hold", PermitStatus::OnHold),
        ("approved", PermitStatus::Approved),
        ("build-out", PermitStatus::Approved),
    ];

    /// Map a Screendoor status to its canonical form. Unknown statuses yield `None`.
    pub fn from_source(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        Self::CANONICAL
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, status)| *status)
    }

    pub fn label(self) -> &'static str {
        match self {
            PermitStatus::Submitted => "submitted",
            PermitStatus::OnHold => "on hold",
            PermitStatus::Approved => "approved",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PermitStatus::Submitted => "Submitted",
            PermitStatus::OnHold => "On Hold",
            PermitStatus::Approved => "Approved",
        }
    }
}

impl fmt::Display for PermitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized permit application.
///
/// `activities` holds one entry per checked activity, keyed by the lowercased activity
/// name and flattened into the serialized record next to the fixed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Permit {
    pub application_id: String,
    pub business_name: String,
    pub dba_name: String,
    pub address: String,
    pub parcel: String,
    pub status: PermitStatus,
    pub referred: String,
    #[serde(flatten)]
    pub activities: BTreeMap<String, PermitStatus>,
}

impl Permit {
    /// Serialized names of the fixed fields; activity flags may not reuse them.
    pub const FIELD_NAMES: &'static [&'static str] = &[
        "application_id",
        "business_name",
        "dba_name",
        "address",
        "parcel",
        "status",
        "referred",
    ];

    /// Ordering key for listings: display name then application id, case-insensitive.
    pub fn sort_key(&self) -> String {
        let name = if self.dba_name.is_empty() {
            &self.business_name
        } else {
            &self.dba_name
        };
        format!("{} {}", name, self.application_id).to_uppercase()
    }

    pub fn has_activity(&self, activity: &str) -> bool {
        self.activities.contains_key(activity)
    }
}

/// Response excluded from the listing, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingResponse {
    pub id: RecordId,
    pub sequential_id: Option<RecordId>,
}

/// Permit in the older keyed-listing shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyPermit {
    pub application_id: String,
    pub dba_name: String,
    pub address: String,
    pub parcel: String,
    pub activities: String,
    pub referring_dept: String,
    pub status: &'static str,
}

/// Listing variants served by `/list/{permit_type}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermitType {
    Retail,
    RetailLegacy,
}

impl PermitType {
    pub fn as_str(self) -> &'static str {
        match self {
            PermitType::Retail => "retail",
            PermitType::RetailLegacy => "retail_legacy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported permit type '{0}'")]
pub struct UnsupportedPermitType(pub String);

impl FromStr for PermitType {
    type Err = UnsupportedPermitType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "retail" => Ok(PermitType::Retail),
            "retail_legacy" => Ok(PermitType::RetailLegacy),
            other => Err(UnsupportedPermitType(other.to_string())),
        }
    }
}
