//! Vote tally and outcome rules.

use vetting_core::Organization::{self, *};
use vetting_core::TrustLevel::*;
use vetting_core::{ConfidenceTier, FieldPath, LocaleId, OrganizationTier, Value};
use vetting_vote::{decide, tally, Ballot, BallotBuilder, Decision, VoteThreshold};

fn builder(locale: &str) -> BallotBuilder {
    Ballot::builder()
        .locale(LocaleId::parse(locale).unwrap())
        .path(FieldPath::parse(r#"//ldml/localeDisplayNames/territories/territory[@type="GB"]"#).unwrap())
}

fn policy(bar: u32, established: bool) -> impl Fn(&LocaleId, &FieldPath) -> VoteThreshold {
    move |_: &LocaleId, _: &FieldPath| VoteThreshold {
        approved_bar: bar,
        established_locale: established,
    }
}

fn winner(decision: &Decision) -> &str {
    decision.winning_value.as_ref().map(Value::as_str).unwrap_or("")
}

/// Members at 4 and 1 for V count as 4, not 5.
#[test]
fn test_org_max_not_sum() {
    let ballot = builder("fr")
        .vote(1, Vetter, Google, "V")
        .vote(2, Street, Google, "V")
        .vote(3, Vetter, Apple, "W")
        .build()
        .unwrap();
    let decision = decide(&ballot, &policy(8, false));
    assert_eq!(decision.totals_by_value[&Value::new("V")], 4);
    assert_eq!(decision.totals_by_value[&Value::new("W")], 4);
    assert_eq!(tally(&ballot).total(&Value::new("V")), 4);
}

/// bailey 4+4, marker 8, other 4+4: the pool wins as the marker.
#[test]
fn test_fallback_pooling() {
    let ballot = builder("fr")
        .fallback("bailey")
        .vote(1, Vetter, Google, "bailey")
        .vote(2, Vetter, Apple, "bailey")
        .vote(3, Expert, Microsoft, "↑↑↑")
        .vote(4, Vetter, Ibm, "other")
        .vote(5, Vetter, Meta, "other")
        .build()
        .unwrap();
    let decision = decide(&ballot, &policy(20, false));
    assert_eq!(decision.winning_value, Some(Value::InheritanceMarker));
    assert_eq!(decision.pooled_total, 16);
    assert_eq!(decision.totals_by_value[&Value::new("bailey")], 8);
    assert_eq!(decision.totals_by_value[&Value::InheritanceMarker], 8);
    let runner_up = decision.next_best.unwrap();
    assert_eq!((runner_up.value, runner_up.total), (Value::new("other"), 8));

    // Voters for either spelling agree with the pooled winner.
    assert_eq!(decision.organization_tiers[&Google], OrganizationTier::Ok);
    assert_eq!(decision.organization_tiers[&Microsoft], OrganizationTier::Ok);
    assert_eq!(decision.organization_tiers[&Ibm], OrganizationTier::ProvisionalOrWorse);
}

#[test]
fn test_pool_reports_literal_when_ahead() {
    let ballot = builder("fr")
        .fallback("bailey")
        .vote(1, Expert, Google, "bailey")
        .vote(2, Vetter, Apple, "↑↑↑")
        .build()
        .unwrap();
    let decision = decide(&ballot, &policy(8, false));
    assert_eq!(winner(&decision), "bailey");
    assert_eq!(decision.pooled_total, 12);
    assert_eq!(decision.winning_tier, ConfidenceTier::Approved);
}

#[test]
fn test_lexicographic_tie_break() {
    let ballot = builder("fr")
        .vote(1, Vetter, Google, "zebra")
        .vote(2, Vetter, Apple, "apple")
        .vote(3, Vetter, Ibm, "mango")
        .build()
        .unwrap();
    let decision = decide(&ballot, &policy(8, false));
    assert_eq!(winner(&decision), "apple");
    assert_eq!(
        decision.tied_values,
        vec![Value::new("apple"), Value::new("mango"), Value::new("zebra")]
    );
}

#[test]
fn test_baseline_breaks_tie_through_pool() {
    // Baseline is the literal fallback; the pool is reported as the marker.
    let ballot = builder("fr")
        .fallback("bailey")
        .baseline("bailey", ConfidenceTier::Provisional)
        .vote(1, Vetter, Google, "↑↑↑")
        .vote(2, Vetter, Apple, "aardvark")
        .build()
        .unwrap();
    let decision = decide(&ballot, &policy(8, false));
    assert_eq!(decision.winning_value, Some(Value::InheritanceMarker));
    assert_eq!(decision.tied_values.len(), 2);
}

#[test]
fn test_empty_ballot_is_idempotent() {
    let ballot = builder("de")
        .baseline("foo", ConfidenceTier::Contributed)
        .fallback("bar")
        .build()
        .unwrap();
    let first = decide(&ballot, &policy(8, true));
    let second = decide(&ballot, &policy(8, true));
    assert_eq!(first, second);
    assert_eq!(winner(&first), "foo");
    assert_eq!(first.winning_tier, ConfidenceTier::Contributed);
    assert!(first.totals_by_value.is_empty());
    assert!(first.next_best.is_none());
}

#[test]
fn test_empty_ballot_without_anything() {
    let ballot = builder("de").build().unwrap();
    let decision = decide(&ballot, &policy(8, true));
    assert_eq!(decision.winning_value, None);
    assert_eq!(decision.winning_tier, ConfidenceTier::Unconfirmed);
}

#[test]
fn test_no_vote_orgs_follow_approval() {
    let approved = builder("de")
        .baseline("foo", ConfidenceTier::Approved)
        .build()
        .unwrap();
    let decision = decide(&approved, &policy(8, false));
    for org in Organization::ALL {
        assert_eq!(decision.tier_for_organization(org), OrganizationTier::OkNovotes);
    }

    let ballot = builder("mt")
        .vote(1, Tc, Apple, "zebra")
        .build()
        .unwrap();
    let decision = decide(&ballot, &policy(20, false));
    assert_eq!(decision.tier_for_organization(Apple), OrganizationTier::Ok);
    assert_eq!(decision.tier_for_organization(Google), OrganizationTier::OkNovotes);

    let ballot = builder("mt")
        .vote(1, Vetter, Apple, "zebra")
        .build()
        .unwrap();
    let decision = decide(&ballot, &policy(20, false));
    assert_eq!(decision.tier_for_organization(Google), OrganizationTier::ProvisionalOrWorse);
}

#[test]
fn test_conflicted_org_agrees_through_strongest_vote() {
    let ballot = builder("fr")
        .vote(1, Expert, Google, "a")
        .vote(2, Vetter, Google, "b")
        .vote(3, Vetter, Apple, "b")
        .build()
        .unwrap();
    let decision = decide(&ballot, &policy(20, false));
    // a: 8, b: 4 + 4.
    assert_eq!(winner(&decision), "a");
    assert_eq!(decision.tied_values.len(), 2);
    assert!(decision.conflicted_organizations.contains(&Google));
    assert!(!decision.conflicted_organizations.contains(&Apple));
    assert_eq!(decision.tier_for_organization(Google), OrganizationTier::Ok);
    assert_eq!(decision.tier_for_organization(Apple), OrganizationTier::ProvisionalOrWorse);
}

#[test]
fn test_disputed_when_agreement_would_contribute() {
    let ballot = builder("fr")
        .vote(1, Street, Google, "a")
        .vote(2, Street, Apple, "b")
        .vote(3, Street, Ibm, "c")
        .build()
        .unwrap();
    let decision = decide(&ballot, &policy(8, true));
    assert_eq!(decision.winning_tier, ConfidenceTier::Provisional);
    assert!(!decision.disputed, "best possible 3 is below the contribution bar");

    let ballot = builder("fr")
        .vote(1, Vetter, Google, "a")
        .vote(2, Vetter, Apple, "b")
        .build()
        .unwrap();
    let decision = decide(&ballot, &policy(8, false));
    assert_eq!(decision.winning_tier, ConfidenceTier::Provisional);
    assert!(decision.disputed, "agreement would reach the approved bar");
}

#[test]
fn test_decision_is_deterministic_and_serializable() {
    let ballot = builder("fr")
        .fallback("bailey")
        .vote(1, Vetter, Google, "zebra")
        .vote(2, Vetter, Apple, "↑↑↑")
        .vote(3, Street, Ibm, "bailey")
        .build()
        .unwrap();
    let a = decide(&ballot, &policy(8, false));
    let b = decide(&ballot, &policy(8, false));
    assert_eq!(a, b);

    let json = serde_json::to_string(&a).unwrap();
    assert_eq!(json, serde_json::to_string(&b).unwrap());
    for field in [
        "winning_value",
        "winning_tier",
        "pooled_total",
        "totals_by_value",
        "conflicted_organizations",
        "organization_tiers",
        "next_best",
        "tied_values",
        "approved_bar",
        "disputed",
    ] {
        assert!(json.contains(&format!("\"{field}\"")), "missing {field}");
    }
    assert!(!json.contains("transcript"));
    let back: Decision = serde_json::from_str(&json).unwrap();
    assert_eq!(back, a);
}
