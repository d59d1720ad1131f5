use super::fields::REFERRAL_DEPARTMENTS;

/// Departments an application was referred to, in label order.
///
/// Labels without a department mapping are skipped; repeated labels repeat the department.
pub fn resolve_referrals<S: AsRef<str>>(labels: &[S]) -> Vec<&'static str> {
    labels
        .iter()
        .filter_map(|label| {
            REFERRAL_DEPARTMENTS
                .iter()
                .find(|(known, _)| *known == label.as_ref())
                .map(|(_, department)| *department)
        })
        .collect()
}
