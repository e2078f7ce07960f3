//! Proposition encodings for the proof kernel.
//!
//! Propositions are Rust types and proofs are values: holding a value of a
//! proposition's type is, by construction, evidence that the proposition
//! holds. The mapping follows the BHK reading of the connectives:
//! implication is a function, conjunction a pair, disjunction a tagged
//! union, negation a function into [`Bottom`].

use std::any::type_name;
use std::fmt;

/// The false proposition. Uninhabited: no value of this type can ever be
/// produced without already holding a contradiction.
///
/// The only sanctioned elimination is [`crate::rules::ex_falso`]; nothing
/// in the kernel pattern-matches `Bottom` as if it were inhabited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bottom {}

/// The trivially true proposition, inhabited by the unit value `Top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Top;

/// The implication `P -> Q`: a procedure transforming any proof of `P`
/// into a proof of `Q`.
///
/// The wrapped derivation is single-use ([`apply`](Implies::apply)
/// consumes the proof), matching the lifecycle of proof values: built and
/// spent within one derivation expression, never stored.
pub struct Implies<P, Q> {
    derivation: Box<dyn FnOnce(P) -> Q>,
}

impl<P, Q> Implies<P, Q> {
    /// Package a derivation as a proof of `P -> Q`.
    pub fn new(derivation: impl FnOnce(P) -> Q + 'static) -> Self {
        Self { derivation: Box::new(derivation) }
    }

    /// Implication elimination: given a proof of `P`, yield the proof
    /// of `Q`.
    pub fn apply(self, premise: P) -> Q {
        (self.derivation)(premise)
    }
}

impl<P, Q> fmt::Debug for Implies<P, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Implies({} -> {})", type_name::<P>(), type_name::<Q>())
    }
}

/// The negation `not P`, encoded as a refutation: any proof of `P` would
/// yield a contradiction.
pub type Not<P> = Implies<P, Bottom>;

/// The conjunction `P and Q`: simultaneous proof of both components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct And<P, Q> {
    pub left: P,
    pub right: Q,
}

/// The disjunction `P or Q`: proof of at least one component, with the
/// variant tag recording which.
///
/// A real tagged union rather than an untagged one, so every case-split
/// over it is exhaustiveness-checked by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Or<P, Q> {
    Left(P),
    Right(Q),
}
