use std::collections::BTreeMap;

use tracing::warn;

use super::domain::{LegacyPermit, Permit};
use super::fields::LEGACY_ACTIVITIES;

/// Re-key permits into the older `"{DBA NAME} {APPLICATION ID}"` mapping.
///
/// Permits sharing a key collapse into one entry: the later permit wins and the
/// collision is logged.
pub fn to_legacy(permits: &[Permit]) -> BTreeMap<String, LegacyPermit> {
    let mut listing = BTreeMap::new();

    for permit in permits {
        let key = legacy_key(permit);
        let entry = LegacyPermit {
            application_id: permit.application_id.clone(),
            dba_name: permit.dba_name.clone(),
            address: permit.address.clone(),
            parcel: permit.parcel.clone(),
            activities: legacy_activities(permit),
            referring_dept: permit.referred.clone(),
            status: permit.status.title(),
        };

        if listing.insert(key.clone(), entry).is_some() {
            warn!(%key, "duplicate legacy permit key, keeping the later permit");
        }
    }

    listing
}

fn legacy_key(permit: &Permit) -> String {
    format!("{} {}", permit.dba_name, permit.application_id)
        .trim()
        .to_uppercase()
}

fn legacy_activities(permit: &Permit) -> String {
    LEGACY_ACTIVITIES
        .iter()
        .filter(|(flag, _)| permit.has_activity(flag))
        .map(|(_, label)| *label)
        .collect::<Vec<_>>()
        .join(", ")
}
