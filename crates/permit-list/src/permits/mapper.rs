use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::domain::{MissingResponse, Permit, PermitStatus};
use super::fields::codes;
use super::raw::RawResponse;
use super::referral::resolve_referrals;
use crate::source::SourceError;

/// Outcome of mapping a page of responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedResponses {
    pub permits: Vec<Permit>,
    pub missing: Vec<MissingResponse>,
}

/// Turn a form API payload into permits, setting aside responses that do not qualify.
///
/// The payload must be a JSON array; anything else is the API's error payload and fails
/// the whole batch. Elements that cannot be read are set aside as missing, unless even
/// their `id` is unreadable, which fails the batch.
pub fn map_responses(payload: Value) -> Result<MappedResponses, SourceError> {
    let Value::Array(items) = payload else {
        return Err(SourceError::Payload { payload });
    };

    let mut mapped = MappedResponses::default();
    for item in items {
        let raw = match RawResponse::deserialize(&item) {
            Ok(raw) => raw,
            Err(_) => match RawResponse::identify(&item) {
                Some((id, sequential_id)) => {
                    mapped.missing.push(MissingResponse { id, sequential_id });
                    continue;
                }
                None => return Err(SourceError::Payload { payload: item }),
            },
        };

        match to_permit(&raw) {
            Some(permit) => mapped.permits.push(permit),
            None => mapped.missing.push(MissingResponse {
                id: raw.id,
                sequential_id: raw.sequential_id,
            }),
        }
    }

    Ok(mapped)
}

fn to_permit(raw: &RawResponse) -> Option<Permit> {
    let activities = raw.checked(codes::ACTIVITIES);
    if activities.is_empty() {
        return None;
    }

    let business_name = raw.text(codes::BUSINESS_NAME);
    let mut dba_name = raw.text(codes::DBA_NAME);
    if business_name.is_empty() && dba_name.is_empty() {
        return None;
    }
    if dba_name.is_empty() {
        dba_name = business_name.clone();
    }

    let status = PermitStatus::from_source(raw.status.as_deref()?)?;

    let mut application_id = raw.text(codes::APPLICATION_ID);
    if application_id.is_empty() {
        application_id = format!("P-{}", raw.id);
    }

    let address = raw
        .address(codes::ADDRESS)
        .map(|answer| answer.format())
        .unwrap_or_default();

    // Activity names matching a fixed field are dropped so the record keeps one value per key.
    let activities: BTreeMap<String, PermitStatus> = activities
        .iter()
        .map(|activity| activity.to_lowercase())
        .filter(|key| !Permit::FIELD_NAMES.contains(&key.as_str()))
        .map(|key| (key, status))
        .collect();

    Some(Permit {
        application_id,
        business_name,
        dba_name,
        address,
        parcel: raw.text(codes::PARCEL),
        status,
        referred: resolve_referrals(raw.labels()).join(", "),
        activities,
    })
}
