// Unit tests for Donor Match

use donor_match::core::{
    compatibility::{is_compatible, matching_rule, CompatibilityRule},
    features::extract_features,
    ranker::rank_donors,
    FeatureError,
};
use donor_match::models::{DonorRecord, FeatureVector, RankedMatch, RecipientQuery, BLOOD_GROUPS};
use std::collections::HashMap;

fn donor(row: usize, pairs: &[(&str, &str)]) -> DonorRecord {
    let fields: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    DonorRecord::new(row, fields)
}

fn recipient(blood_group: &str) -> RecipientQuery {
    RecipientQuery {
        name: "Meera".to_string(),
        blood_group_needed: blood_group.to_string(),
        age: Some(45),
        location: "Chennai".to_string(),
        urgency: Some(9),
    }
}

#[test]
fn test_universal_donor_gives_to_everyone() {
    for r in BLOOD_GROUPS {
        assert!(is_compatible("O-", r));
    }
}

#[test]
fn test_reflexive() {
    for d in BLOOD_GROUPS {
        assert!(is_compatible(d, d));
    }
}

#[test]
fn test_compatible_counts_per_donor() {
    // O- reaches all 8, O+ reaches the 4 Rh+ types, every other type only itself
    let expected = [("A+", 1), ("A-", 1), ("B+", 1), ("B-", 1), ("AB+", 1), ("AB-", 1), ("O+", 4), ("O-", 8)];

    for (d, count) in expected {
        let reached = BLOOD_GROUPS.iter().filter(|r| is_compatible(d, r)).count();
        assert_eq!(reached, count, "donor {}", d);
    }
}

#[test]
fn test_rule_order_first_match_wins() {
    // O- to O- satisfies both the universal and same-type rules
    assert_eq!(matching_rule("O-", "O-"), Some(CompatibilityRule::UniversalDonor));
    assert_eq!(matching_rule("AB-", "AB+"), None);
}

#[test]
fn test_feature_positions() {
    let d = donor(0, &[
        ("name", "Arun"),
        ("blood group", "O+ve"),
        ("age", "50"),
        ("location", "CHENNAI"),
        ("number of times donated", "6"),
    ]);

    let features = extract_features(&d, &recipient("B+")).unwrap();

    assert_eq!(features.compatibility(), 1.0);
    assert_eq!(features.age_gap(), 5.0);
    assert_eq!(features.location_match(), 1.0);
    assert_eq!(features.times_donated(), 6.0);
    assert_eq!(features.urgency(), 9.0);
}

#[test]
fn test_incompatible_donor_features() {
    let d = donor(2, &[("blood group", "A+"), ("location", "Madurai")]);

    let features = extract_features(&d, &recipient("B-")).unwrap();

    assert_eq!(features, FeatureVector([0.0, 0.0, 0.0, 0.0, 9.0]));
}

#[test]
fn test_missing_blood_group_names_field() {
    let d = donor(7, &[("name", "Lata"), ("location", "Chennai")]);

    let err = extract_features(&d, &recipient("A+")).unwrap_err();

    assert_eq!(err.field(), "blood group");
    assert_eq!(err.line(), 9);
    assert!(matches!(err, FeatureError::MissingField { .. }));
}

#[test]
fn test_ranker_example() {
    let ranked = rank_donors(&["Alice", "Bob", "Cara"], &[0.9, 0.95, 0.2], 2);

    assert_eq!(
        ranked,
        vec![RankedMatch::new("Bob", 0.95), RankedMatch::new("Alice", 0.9)]
    );
}

#[test]
fn test_ranker_length_is_min_of_n_and_donors() {
    let names = ["a", "b", "c", "d", "e"];
    let scores = [0.3, 0.1, 0.5, 0.5, 0.2];

    assert_eq!(rank_donors(&names, &scores, 3).len(), 3);
    assert_eq!(rank_donors(&names, &scores, 9).len(), 5);

    let ranked = rank_donors(&names, &scores, 5);
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    // equal scores keep table order
    assert_eq!(ranked[0].donor_name, "c");
    assert_eq!(ranked[1].donor_name, "d");
}
