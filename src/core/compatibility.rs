/// Donor-side rule that made a pairing compatible
///
/// Rules are evaluated in declaration order and the first one that applies
/// wins. The feature the scoring model was fit on depends on this exact
/// table, including the cases it does not cover (AB+ is only reachable
/// through `SameType`, O+ never gives to a Rh- recipient).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompatibilityRule {
    /// Donor is O-
    UniversalDonor,
    /// Donor and recipient types are identical
    SameType,
    /// O+ donor, Rh positive recipient
    OPositiveToRhPositive,
}

impl CompatibilityRule {
    const ORDER: [CompatibilityRule; 3] = [
        CompatibilityRule::UniversalDonor,
        CompatibilityRule::SameType,
        CompatibilityRule::OPositiveToRhPositive,
    ];

    #[inline]
    fn applies(self, donor: &str, recipient: &str) -> bool {
        match self {
            CompatibilityRule::UniversalDonor => donor == "O-",
            CompatibilityRule::SameType => donor == recipient,
            CompatibilityRule::OPositiveToRhPositive => donor == "O+" && recipient.contains('+'),
        }
    }
}

/// Upper-case and drop the literal "VE" so "O+ve" reads as "O+"
#[inline]
pub fn normalize_blood_group(raw: &str) -> String {
    raw.to_uppercase().replace("VE", "")
}

/// First rule that makes `donor` compatible with `recipient`, if any
pub fn matching_rule(donor: &str, recipient: &str) -> Option<CompatibilityRule> {
    let donor = normalize_blood_group(donor);
    let recipient = normalize_blood_group(recipient);

    CompatibilityRule::ORDER
        .into_iter()
        .find(|rule| rule.applies(&donor, &recipient))
}

/// Simplified ABO/Rh compatibility verdict
#[inline]
pub fn is_compatible(donor: &str, recipient: &str) -> bool {
    matching_rule(donor, recipient).is_some()
}
