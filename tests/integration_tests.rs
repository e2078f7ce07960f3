//! Integration tests for the proof kernel and its provenance registry.

use bhk::{
    admit, conjunction_elimination_1, conjunction_elimination_2, conjunction_introduction,
    constructive_dilemma, contrapositive, disjunction_elimination,
    disjunction_introduction_left, disjunction_introduction_right, disjunctive_syllogism_1,
    disjunctive_syllogism_2, double_negation_introduction, ex_falso, identity, modus_ponens,
    modus_tollens, non_contradiction, top_introduction, transitive_implication, BhkError,
    Bottom, Harness, Implies, Not, Or, Registry, RuleEntry, RuleStatus, Top, CORE_RULES,
};
use std::panic::{self, AssertUnwindSafe};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Run a closure whose refutation is expected to fire; return the panic
/// payload if it did.
fn refutation_payload(f: impl FnOnce()) -> Option<String> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .err()
        .and_then(|payload| payload.downcast_ref::<String>().cloned())
}

// A rule table captured mid-development: the syllogism and the dilemma
// still awaiting their derivations, with one conclusion already claiming
// both. A stub has no body yet, so its declared call graph is empty.
const DRAFT_RULES: &[RuleEntry] = &[
    RuleEntry { name: "modus_ponens", status: RuleStatus::Proven, depends_on: &[] },
    RuleEntry { name: "disjunction_elimination", status: RuleStatus::Proven, depends_on: &[] },
    RuleEntry { name: "ex_falso", status: RuleStatus::Proven, depends_on: &[] },
    RuleEntry { name: "identity", status: RuleStatus::Proven, depends_on: &[] },
    RuleEntry { name: "disjunctive_syllogism_1", status: RuleStatus::Stubbed, depends_on: &[] },
    RuleEntry { name: "constructive_dilemma", status: RuleStatus::Stubbed, depends_on: &[] },
    RuleEntry {
        name: "derived_exclusion",
        status: RuleStatus::Proven,
        depends_on: &["disjunctive_syllogism_1", "constructive_dilemma"],
    },
];

// A table where a claimed lemma leans on the admission point.
const ADMITTED_RULES: &[RuleEntry] = &[
    RuleEntry { name: "admit", status: RuleStatus::Stubbed, depends_on: &[] },
    RuleEntry {
        name: "interpolation_lemma",
        status: RuleStatus::Proven,
        depends_on: &["admit"],
    },
];

const DUPLICATE_RULES: &[RuleEntry] = &[
    RuleEntry { name: "modus_ponens", status: RuleStatus::Proven, depends_on: &[] },
    RuleEntry { name: "modus_ponens", status: RuleStatus::Proven, depends_on: &[] },
];

const DANGLING_RULES: &[RuleEntry] = &[
    RuleEntry { name: "weakening", status: RuleStatus::Proven, depends_on: &["exchange"] },
];

const CYCLIC_RULES: &[RuleEntry] = &[
    RuleEntry { name: "alpha", status: RuleStatus::Proven, depends_on: &["beta"] },
    RuleEntry { name: "beta", status: RuleStatus::Proven, depends_on: &["alpha"] },
];

const EMPTY_RULES: &[RuleEntry] = &[];

// ============================================================================
// Implication Rule Tests
// ============================================================================

#[test]
fn test_modus_ponens_applies_the_implication() {
    let conclusion = modus_ponens(2, Implies::new(|n: i32| n + 40));
    assert_eq!(conclusion, 42);
}

#[test]
fn test_transitive_implication_composes() {
    let f = Implies::new(|n: i32| n + 1);
    let g = Implies::new(|n: i32| n * 3);
    assert_eq!(transitive_implication(f, g).apply(5), 18);
}

#[test]
fn test_identity_preserves_the_proof() {
    assert_eq!(identity::<&str>().apply("evidence"), "evidence");
}

#[test]
fn test_contrapositive_routes_through_the_original() {
    let flipped = contrapositive(Implies::new(|n: u8| i32::from(n) + 1));
    let not_p = flipped.apply(Implies::new(|q: i32| panic!("refuted:{}", q)));
    let payload = refutation_payload(move || {
        let _ = not_p.apply(7);
    });
    assert_eq!(payload.as_deref(), Some("refuted:8"));
}

#[test]
fn test_modus_tollens_refutes_the_antecedent() {
    let not_p = modus_tollens(
        Implies::new(|n: i32| n % 2 == 0),
        Implies::new(|b: bool| panic!("refuted:{}", b)),
    );
    let payload = refutation_payload(move || {
        let _ = not_p.apply(4);
    });
    assert_eq!(payload.as_deref(), Some("refuted:true"));
}

#[test]
fn test_modus_tollens_over_identity_behaves_as_the_refutation() {
    let not_p = modus_tollens(identity::<i32>(), Implies::new(|q: i32| panic!("refuted:{}", q)));
    let payload = refutation_payload(move || {
        let _ = not_p.apply(9);
    });
    assert_eq!(payload.as_deref(), Some("refuted:9"));
}

// ============================================================================
// Conjunction & Disjunction Tests
// ============================================================================

#[test]
fn test_conjunction_round_trip() {
    let p = conjunction_elimination_1(conjunction_introduction("p", 1));
    assert_eq!(p, "p");
    let q = conjunction_elimination_2(conjunction_introduction("p", 1));
    assert_eq!(q, 1);
}

#[test]
fn test_disjunction_injections_land_on_their_side() {
    assert!(matches!(disjunction_introduction_left::<i32, bool>(9), Or::Left(9)));
    assert!(matches!(disjunction_introduction_right::<bool, i32>(9), Or::Right(9)));
}

#[test]
fn test_disjunction_elimination_takes_the_live_branch() {
    let left = disjunction_elimination(
        Or::<i32, bool>::Left(4),
        Implies::new(|n: i32| n * 10),
        Implies::new(|b: bool| i32::from(b)),
    );
    assert_eq!(left, 40);

    let right = disjunction_elimination(
        Or::<i32, bool>::Right(true),
        Implies::new(|n: i32| n * 10),
        Implies::new(|b: bool| i32::from(b)),
    );
    assert_eq!(right, 1);
}

#[test]
fn test_disjunction_elimination_with_an_uninhabited_side() {
    // The left case handler exists even though no value can select it.
    let or: Or<Bottom, i32> = Or::Right(7);
    let out = disjunction_elimination(or, Implies::new(|b: Bottom| ex_falso(b)), identity());
    assert_eq!(out, 7);

    // Same shape through the syllogism: refuting Bottom needs no panic,
    // the identity refutation already has the right type.
    let or: Or<Bottom, i32> = Or::Right(7);
    assert_eq!(disjunctive_syllogism_1(or, identity::<Bottom>()), 7);
}

#[test]
fn test_disjunctive_syllogism_returns_the_survivor() {
    let not_p: Not<i32> = Implies::new(|p: i32| panic!("refutation invoked on {}", p));
    assert_eq!(disjunctive_syllogism_1(Or::<i32, &str>::Right("q"), not_p), "q");

    let not_q: Not<i32> = Implies::new(|q: i32| panic!("refutation invoked on {}", q));
    assert_eq!(disjunctive_syllogism_2(Or::<&str, i32>::Left("p"), not_q), "p");
}

#[test]
#[should_panic(expected = "refuted:3")]
fn test_disjunctive_syllogism_consults_the_refutation() {
    let not_p: Not<i32> = Implies::new(|p: i32| panic!("refuted:{}", p));
    let _ = disjunctive_syllogism_1(Or::<i32, &str>::Left(3), not_p);
}

#[test]
fn test_constructive_dilemma_maps_both_cases() {
    let left_side = conjunction_introduction(
        Implies::new(|a: u8| u32::from(a) + 1),
        Implies::new(|c: bool| if c { "yes" } else { "no" }),
    );
    assert!(matches!(
        constructive_dilemma(left_side, Or::<u8, bool>::Left(9)),
        Or::Left(10)
    ));

    let right_side = conjunction_introduction(
        Implies::new(|a: u8| u32::from(a) + 1),
        Implies::new(|c: bool| if c { "yes" } else { "no" }),
    );
    assert!(matches!(
        constructive_dilemma(right_side, Or::<u8, bool>::Right(true)),
        Or::Right("yes")
    ));
}

// ============================================================================
// Negation Tests
// ============================================================================

#[test]
fn test_ex_falso_instantiates_at_any_type() {
    // No Bottom value exists, so instantiation is the runnable claim.
    let _at_i32: fn(Bottom) -> i32 = ex_falso::<i32>;
    let _at_string: fn(Bottom) -> String = ex_falso::<String>;
}

#[test]
fn test_double_negation_introduction_feeds_the_refutation() {
    let not_not = double_negation_introduction("evidence");
    let payload = refutation_payload(move || {
        let _ = not_not.apply(Implies::new(|p: &str| panic!("refuted:{}", p)));
    });
    assert_eq!(payload.as_deref(), Some("refuted:evidence"));
}

#[test]
fn test_non_contradiction_refutes_the_pair() {
    let nc = non_contradiction::<i32>();
    let pair = conjunction_introduction(3, Implies::new(|p: i32| panic!("refuted:{}", p)));
    let payload = refutation_payload(move || {
        let _ = nc.apply(pair);
    });
    assert_eq!(payload.as_deref(), Some("refuted:3"));
}

#[test]
fn test_top_introduction() {
    assert_eq!(top_introduction(), Top);
    assert_eq!(Top::default(), Top);
}

// ============================================================================
// Admission Tests
// ============================================================================

#[test]
#[should_panic(expected = "admitted without derivation")]
fn test_admit_aborts_instead_of_proving() {
    let _: Top = admit();
}

#[test]
fn test_admit_is_registered_as_stubbed() {
    let registry = Registry::core();
    assert_eq!(registry.status_of("admit").expect("admit is registered"), RuleStatus::Stubbed);
}

// ============================================================================
// Registry Tests
// ============================================================================

#[test]
fn test_core_registry_is_valid() {
    assert!(Registry::core().validate().is_ok());
}

#[test]
fn test_status_lookup() {
    let registry = Registry::core();
    assert_eq!(registry.status_of("modus_ponens").expect("lookup"), RuleStatus::Proven);
    assert_eq!(
        registry.status_of("implication_distribution").expect("lookup"),
        RuleStatus::Stubbed
    );
    assert_eq!(
        registry.status_of("excluded_middle").expect("lookup"),
        RuleStatus::Unsound
    );

    let missing = registry.status_of("affine_weakening");
    assert!(matches!(
        missing,
        Err(BhkError::UnknownRule { rule }) if rule == "affine_weakening"
    ));
}

#[test]
fn test_duplicate_rule_rejected() {
    let result = Registry::from_entries(DUPLICATE_RULES).validate();
    assert!(matches!(
        result,
        Err(BhkError::DuplicateRule { rule }) if rule == "modus_ponens"
    ));
}

#[test]
fn test_unresolved_dependency_rejected() {
    let result = Registry::from_entries(DANGLING_RULES).validate();
    assert!(matches!(
        result,
        Err(BhkError::UnresolvedDependency { rule, dependency })
            if rule == "weakening" && dependency == "exchange"
    ));
}

#[test]
fn test_dependency_cycle_rejected() {
    let result = Registry::from_entries(CYCLIC_RULES).validate();
    assert!(matches!(result, Err(BhkError::DependencyCycle { .. })));
}

#[test]
fn test_empty_registry_rejected() {
    let result = Registry::from_entries(EMPTY_RULES).validate();
    assert!(matches!(result, Err(BhkError::EmptyRegistry)));
}

#[test]
fn test_fingerprint_is_deterministic() {
    let core = Registry::core();
    let first = core.fingerprint();
    let second = core.fingerprint();
    assert_eq!(first, second);
    assert_eq!(first.len(), 64);

    let draft = Registry::from_entries(DRAFT_RULES);
    assert_ne!(first, draft.fingerprint(), "different tables must fingerprint differently");
}

// ============================================================================
// Provenance Audit Tests
// ============================================================================

#[test]
fn test_core_audit_is_clean() {
    let findings = Registry::core().audit().expect("core table is valid");
    assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
}

#[test]
fn test_taint_is_reflexive_for_stubs() {
    let registry = Registry::core();
    let findings = registry.taint_of("admit").expect("admit is registered");
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].offending_rule, "admit");
    assert_eq!(findings[0].offending_status, RuleStatus::Stubbed);
    assert_eq!(findings[0].reached_via, vec!["admit"]);
}

#[test]
fn test_derived_rules_are_untainted() {
    // The same rules the draft table stubs carry full derivations in the
    // core table, so the taint is gone.
    let registry = Registry::core();
    for rule in ["disjunctive_syllogism_1", "constructive_dilemma"] {
        assert_eq!(registry.status_of(rule).expect("lookup"), RuleStatus::Proven);
        let findings = registry.taint_of(rule).expect("rule is registered");
        assert!(findings.is_empty(), "derivation reaches only proven rules");
    }
}

#[test]
fn test_stubbed_dependencies_taint_the_conclusion() {
    let registry = Registry::from_entries(DRAFT_RULES);
    assert_eq!(
        registry.status_of("disjunctive_syllogism_1").expect("lookup"),
        RuleStatus::Stubbed
    );
    assert_eq!(
        registry.status_of("constructive_dilemma").expect("lookup"),
        RuleStatus::Stubbed
    );

    let findings = registry.taint_of("derived_exclusion").expect("rule is registered");
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].claimed_rule, "derived_exclusion");
    assert_eq!(findings[0].offending_rule, "disjunctive_syllogism_1");
    assert_eq!(findings[0].offending_status, RuleStatus::Stubbed);
    assert_eq!(
        findings[0].reached_via,
        vec!["derived_exclusion", "disjunctive_syllogism_1"]
    );
    assert_eq!(findings[1].offending_rule, "constructive_dilemma");
    assert_eq!(
        findings[1].reached_via,
        vec!["derived_exclusion", "constructive_dilemma"]
    );
}

#[test]
fn test_audit_flags_proven_roots_only() {
    let findings = Registry::from_entries(DRAFT_RULES).audit().expect("table is valid");
    assert_eq!(findings.len(), 2);
    assert!(findings.iter().all(|f| f.claimed_rule == "derived_exclusion"));
}

#[test]
fn test_admitted_lemma_is_tainted() {
    let findings = Registry::from_entries(ADMITTED_RULES).audit().expect("table is valid");
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].claimed_rule, "interpolation_lemma");
    assert_eq!(findings[0].offending_rule, "admit");
    assert_eq!(findings[0].reached_via, vec!["interpolation_lemma", "admit"]);
}

// ============================================================================
// Harness Tests
// ============================================================================

#[test]
fn test_harness_verifies_the_core_table() {
    let report = Harness::new().run();
    assert!(report.success, "harness failed: {:?}", report);
    assert!(report.error.is_none());
    assert!(report.provenance_findings.is_empty());
    assert_eq!(report.rule_results.len(), CORE_RULES.len());
    assert!(report.rule_results.iter().all(|r| r.passed));
    assert_eq!(report.registry_fingerprint, Registry::core().fingerprint());
}

#[test]
fn test_harness_names_the_offending_rule() {
    let report = Harness::with_registry(Registry::from_entries(DRAFT_RULES)).run();
    assert!(!report.success);

    // The claimed conclusion has no combinator behind it.
    let claimed = report
        .rule_results
        .iter()
        .find(|r| r.rule == "derived_exclusion")
        .expect("result for the claimed rule");
    assert!(!claimed.passed);
    assert!(claimed.error.is_some());

    assert_eq!(report.provenance_findings.len(), 2);
    assert_eq!(report.provenance_findings[0].offending_rule, "disjunctive_syllogism_1");
    assert_eq!(report.provenance_findings[1].offending_rule, "constructive_dilemma");
}

#[test]
fn test_harness_short_circuits_on_invalid_table() {
    let report = Harness::with_registry(Registry::from_entries(DUPLICATE_RULES)).run();
    assert!(!report.success);
    assert!(report.error.is_some());
    assert!(report.rule_results.is_empty());
}

#[test]
fn test_harness_json_report_shape() {
    let json = Harness::new().report_json();
    assert!(json.get("success").and_then(|v| v.as_bool()).unwrap_or(false));
    assert!(json.get("registry_fingerprint").and_then(|v| v.as_str()).is_some());
    let results = json
        .get("rule_results")
        .and_then(|v| v.as_array())
        .expect("rule_results array");
    assert_eq!(results.len(), CORE_RULES.len());
}

// ============================================================================
// RuleStatus Tests
// ============================================================================

#[test]
fn test_rule_status_from_str() {
    assert!(matches!(RuleStatus::from_str("proven"), Ok(RuleStatus::Proven)));
    assert!(matches!(RuleStatus::from_str("stubbed"), Ok(RuleStatus::Stubbed)));
    assert!(matches!(RuleStatus::from_str("unsound"), Ok(RuleStatus::Unsound)));

    // Case insensitive
    assert!(matches!(RuleStatus::from_str("PROVEN"), Ok(RuleStatus::Proven)));

    // Unknown
    assert!(matches!(
        RuleStatus::from_str("conjectured"),
        Err(BhkError::UnknownStatus { .. })
    ));
}

#[test]
fn test_rule_status_as_str() {
    assert_eq!(RuleStatus::Proven.as_str(), "proven");
    assert_eq!(RuleStatus::Stubbed.as_str(), "stubbed");
    assert_eq!(RuleStatus::Unsound.as_str(), "unsound");
}

#[test]
fn test_rule_status_display() {
    assert_eq!(format!("{}", RuleStatus::Unsound), "unsound");
}

// ============================================================================
// Default Trait Tests
// ============================================================================

#[test]
fn test_defaults() {
    assert_eq!(RuleStatus::default(), RuleStatus::Stubbed);
    assert_eq!(Registry::default().len(), CORE_RULES.len());
    let _harness = Harness::default();
    let _top = Top::default();
}

// ============================================================================
// End-to-End Test
// ============================================================================

#[test]
fn test_full_workflow() {
    // 1. Derive: from A -> B, B -> C, and a proof of A, conclude C.
    let ab = Implies::new(|n: i32| n + 1);
    let bc = Implies::new(|n: i32| n * 2);
    let ac = transitive_implication(ab, bc);
    let c = modus_ponens(4, ac);
    assert_eq!(c, 10);

    // 2. Every rule used is registered and fully constructive.
    let registry = Registry::core();
    for rule in ["transitive_implication", "modus_ponens"] {
        assert_eq!(registry.status_of(rule).expect("registered"), RuleStatus::Proven);
        assert!(registry.taint_of(rule).expect("valid table").is_empty());
    }

    // 3. The harness agrees with the type checker.
    let report = Harness::new().run();
    assert!(report.success, "harness failed: {:?}", report.error);
}
