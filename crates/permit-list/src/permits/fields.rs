//! Fixed lookup tables for the permit application form.

/// Screendoor field codes for the answers the permit record is built from.
pub(crate) mod codes {
    pub(crate) const APPLICATION_ID: &str = "uqqrsogr";
    pub(crate) const BUSINESS_NAME: &str = "t00kheyd";
    pub(crate) const DBA_NAME: &str = "60w4ep9y";
    pub(crate) const ADDRESS: &str = "kbqz4189";
    pub(crate) const PARCEL: &str = "kvrgbqrl";
    pub(crate) const ACTIVITIES: &str = "dd8a5g7g";
}

/// Screendoor form the retail permit applications are submitted through.
pub(crate) const RETAIL_FORM_ID: u64 = 5804;

/// Label marking responses cleared for publication.
pub(crate) const PUBLISH_LABEL: &str = "Post on Website";

/// Upper bound on responses pulled for one listing.
pub(crate) const MAX_RESPONSES: usize = 500;

pub(crate) const RETAILER: &str = "retailer (medical and adult use)";
pub(crate) const DELIVERY_ONLY_RETAILER: &str = "delivery only retail (medical and adult use)";
pub(crate) const MEDICAL_RETAILER: &str = "medical retailer (medical only)";

/// Retail activities in the order the legacy `activities` column lists them, paired with
/// the label that column uses.
pub(crate) const LEGACY_ACTIVITIES: &[(&str, &str)] = &[
    (RETAILER, "retailer (medical and adult use)"),
    (
        DELIVERY_ONLY_RETAILER,
        "delivery only retailer (medical and adult use)",
    ),
    (MEDICAL_RETAILER, "medicinal cannabis retailer (medical only)"),
];

/// Screendoor label to referring department.
pub(crate) const REFERRAL_DEPARTMENTS: &[(&str, &str)] = &[
    ("MOD - Referred", "Mayor's Office of Disability"),
    ("Planning - Referred", "Planning Department"),
    ("Fire - Referred", "Fire Department"),
    ("DPH - Referred", "Department of Public Health"),
    ("Police - Referred", "Police Department"),
    ("Environment - Referred", "Department of the Environment"),
];
