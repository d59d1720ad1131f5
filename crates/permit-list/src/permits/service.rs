use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::{error, info, warn};

use super::domain::{LegacyPermit, Permit, PermitType, UnsupportedPermitType};
use super::fields::{
    codes, DELIVERY_ONLY_RETAILER, MAX_RESPONSES, MEDICAL_RETAILER, PUBLISH_LABEL, RETAILER,
    RETAIL_FORM_ID,
};
use super::legacy::to_legacy;
use super::mapper::map_responses;
use crate::source::{QueryParams, ResponseSource, SourceError};
use crate::telemetry::RequestContext;

/// Payload placed under `data` in a successful listing response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PermitListing {
    Current { list: Vec<Permit> },
    Legacy(BTreeMap<String, LegacyPermit>),
}

impl PermitListing {
    pub fn len(&self) -> usize {
        match self {
            PermitListing::Current { list } => list.len(),
            PermitListing::Legacy(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PermitListError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Unsupported(#[from] UnsupportedPermitType),
}

/// Builds permit listings from the form responses of one Screendoor project.
pub struct PermitListService<S> {
    source: Arc<S>,
    project_id: String,
}

impl<S> PermitListService<S>
where
    S: ResponseSource + 'static,
{
    pub fn new(source: Arc<S>, project_id: impl Into<String>) -> Self {
        Self {
            source,
            project_id: project_id.into(),
        }
    }

    /// Query selecting published retail applications.
    ///
    /// The activity predicate applies to every listing variant, legacy included.
    pub fn retail_query() -> QueryParams {
        let advanced_search = json!([
            {
                "name": "form",
                "placeholder": null,
                "method": "is",
                "value": RETAIL_FORM_ID
            },
            {
                "name": format!("rf{}", codes::ACTIVITIES),
                "placeholder": "answer_to",
                "method": "is_any",
                "value": [RETAILER, MEDICAL_RETAILER, DELIVERY_ONLY_RETAILER]
            }
        ]);

        QueryParams {
            per_page: 100,
            page: 1,
            label: Some(PUBLISH_LABEL.to_string()),
            advanced_search: Some(advanced_search.to_string()),
        }
    }

    pub async fn list(
        &self,
        permit_type: &str,
        ctx: &RequestContext,
    ) -> Result<PermitListing, PermitListError> {
        match self.build_listing(permit_type, ctx).await {
            Ok(built) => {
                info!(
                    logger = %ctx,
                    count = built.permit_count,
                    entries = built.listing.len(),
                    "success ({})",
                    built.permit_count
                );
                Ok(built.listing)
            }
            Err(err) => {
                error!(logger = %ctx, error = %err, payload = ?source_payload(&err), "ERROR");
                Err(err)
            }
        }
    }

    async fn build_listing(
        &self,
        permit_type: &str,
        ctx: &RequestContext,
    ) -> Result<BuiltListing, PermitListError> {
        let permit_type: PermitType = permit_type.parse()?;

        let payload = self
            .source
            .get_project_responses(&self.project_id, &Self::retail_query(), MAX_RESPONSES)
            .await?;

        match payload.as_array() {
            Some(items) => {
                let sequential_ids: Vec<String> = items
                    .iter()
                    .map(|item| {
                        item.get("sequential_id")
                            .map(|value| value.to_string())
                            .unwrap_or_default()
                    })
                    .collect();
                info!(logger = %ctx, length = items.len(), ?sequential_ids, "form responses fetched");
            }
            None => warn!(logger = %ctx, ?payload, "form responses request returned a non-list payload"),
        }

        let mapped = map_responses(payload)?;
        info!(logger = %ctx, permit_list_len = mapped.permits.len(), "responses mapped");
        if !mapped.missing.is_empty() {
            warn!(logger = %ctx, responses_missing = ?mapped.missing, "responses excluded from listing");
        }

        let mut permits = mapped.permits;
        permits.sort_by(|left, right| left.sort_key().cmp(&right.sort_key()));

        let permit_count = permits.len();
        let listing = match permit_type {
            PermitType::Retail => PermitListing::Current { list: permits },
            PermitType::RetailLegacy => PermitListing::Legacy(to_legacy(&permits)),
        };
        Ok(BuiltListing {
            listing,
            permit_count,
        })
    }
}

/// Listing plus the number of permits it was built from, before legacy keys collapse.
struct BuiltListing {
    listing: PermitListing,
    permit_count: usize,
}

fn source_payload(err: &PermitListError) -> Option<&serde_json::Value> {
    match err {
        PermitListError::Source(source) => source.payload(),
        PermitListError::Unsupported(_) => None,
    }
}
