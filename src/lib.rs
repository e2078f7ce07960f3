//! BHK - constructive propositional proof kernel.
//!
//! Propositions are types, proofs are values, and `rustc` is the proof
//! checker: a proof that type-checks is accepted, a proof that does not
//! never compiles. The runtime half (the harness and the rule registry's
//! provenance audit) catches what the type checker cannot see, namely
//! admitted and unsound rules hiding in a derivation's dependency chain.

pub mod axiom;
pub mod cli;
pub mod error;
pub mod harness;
pub mod prop;
pub mod registry;
pub mod rules;

pub use axiom::admit;
pub use error::{BhkError, BhkResult};
pub use harness::{Harness, HarnessReport, RuleResult};
pub use prop::{And, Bottom, Implies, Not, Or, Top};
pub use registry::{ProvenanceFinding, Registry, RuleEntry, RuleStatus, CORE_RULES};
pub use rules::{
    conjunction_elimination_1, conjunction_elimination_2, conjunction_introduction,
    constructive_dilemma, contrapositive, disjunction_elimination,
    disjunction_introduction_left, disjunction_introduction_right, disjunctive_syllogism_1,
    disjunctive_syllogism_2, double_negation_introduction, ex_falso, identity, modus_ponens,
    modus_tollens, non_contradiction, top_introduction, transitive_implication,
};
