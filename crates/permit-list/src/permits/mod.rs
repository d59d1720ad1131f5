//! Permit application listing: mapping Screendoor responses into permits, the legacy
//! keyed shape, and the HTTP endpoints serving both.

pub mod domain;
pub mod envelope;
pub(crate) mod fields;
pub mod legacy;
pub mod mapper;
mod raw;
pub mod referral;
pub mod router;
pub mod service;

pub use domain::{
    LegacyPermit, MissingResponse, Permit, PermitStatus, PermitType, RecordId,
    UnsupportedPermitType,
};
pub use envelope::Envelope;
pub use legacy::to_legacy;
pub use mapper::{map_responses, MappedResponses};
pub use referral::resolve_referrals;
pub use router::permit_router;
pub use service::{PermitListError, PermitListService, PermitListing};
