//! The inference combinators: natural-deduction rules as generic functions.
//!
//! Each signature encodes an inference rule and each body is its
//! derivation, built purely by composing the parameters: application,
//! pairing, projection, case-split, injection. Nothing here casts,
//! panics, or otherwise conjures evidence; the one escape hatch lives in
//! [`crate::axiom`] and is registered as such. An ill-typed composition
//! fails to compile, which is the kernel's entire rejection mechanism.

use crate::prop::{And, Bottom, Implies, Not, Or, Top};

/// From `P` and `P -> Q`, concludes `Q`.
///
/// Rejection happens at the type level; a proof of the wrong proposition
/// never reaches the implication:
///
/// ```compile_fail
/// use bhk::prop::Implies;
/// use bhk::rules::modus_ponens;
///
/// // A proof of `bool` cannot feed an `i32 -> i32` implication.
/// let _ = modus_ponens(true, Implies::new(|n: i32| n + 1));
/// ```
pub fn modus_ponens<P, Q>(p: P, f: Implies<P, Q>) -> Q {
    f.apply(p)
}

/// From `P -> Q`, concludes `(Q -> Bottom) -> (P -> Bottom)`.
///
/// Once a refutation of `Q` arrives, it is composed after `f`: the
/// returned refutation of `P` is `p ↦ not_q(f(p))`.
pub fn contrapositive<P: 'static, Q: 'static>(f: Implies<P, Q>) -> Implies<Not<Q>, Not<P>> {
    Implies::new(move |not_q: Not<Q>| Implies::new(move |p: P| not_q.apply(f.apply(p))))
}

/// From `P -> Q` and a refutation of `Q`, concludes a refutation of `P`.
pub fn modus_tollens<P: 'static, Q: 'static>(f: Implies<P, Q>, not_q: Not<Q>) -> Not<P> {
    contrapositive(f).apply(not_q)
}

/// From `A -> B` and `B -> C`, concludes `A -> C`.
///
/// The middle proposition must agree on both sides; a mismatched
/// composition is rejected before anything runs:
///
/// ```compile_fail
/// use bhk::prop::Implies;
/// use bhk::rules::transitive_implication;
///
/// let f = Implies::new(|n: i32| n.to_string()); // i32 -> String
/// let g = Implies::new(|b: bool| !b);           // bool -> bool
/// let _ = transitive_implication(f, g);
/// ```
pub fn transitive_implication<A: 'static, B: 'static, C: 'static>(
    f: Implies<A, B>,
    g: Implies<B, C>,
) -> Implies<A, C> {
    Implies::new(move |a: A| g.apply(f.apply(a)))
}

/// The identity implication `P -> P`.
pub fn identity<P: 'static>() -> Implies<P, P> {
    Implies::new(|p: P| p)
}

/// From `P` and `Q`, concludes `P and Q`.
pub fn conjunction_introduction<P, Q>(p: P, q: Q) -> And<P, Q> {
    And { left: p, right: q }
}

/// From `P and Q`, concludes `P`.
pub fn conjunction_elimination_1<P, Q>(pq: And<P, Q>) -> P {
    pq.left
}

/// From `P and Q`, concludes `Q`.
pub fn conjunction_elimination_2<P, Q>(pq: And<P, Q>) -> Q {
    pq.right
}

/// From `P`, concludes `P or Q`.
pub fn disjunction_introduction_left<P, Q>(p: P) -> Or<P, Q> {
    Or::Left(p)
}

/// From `Q`, concludes `P or Q`.
pub fn disjunction_introduction_right<P, Q>(q: Q) -> Or<P, Q> {
    Or::Right(q)
}

/// Case analysis on `P or Q`: with `P -> R` and `Q -> R` in hand, either
/// variant yields `R`.
///
/// This match is the kernel's one genuine case-split over disjunction;
/// the syllogisms and the dilemma below derive through it.
pub fn disjunction_elimination<P, Q, R>(
    pq: Or<P, Q>,
    if_left: Implies<P, R>,
    if_right: Implies<Q, R>,
) -> R {
    match pq {
        Or::Left(p) => if_left.apply(p),
        Or::Right(q) => if_right.apply(q),
    }
}

/// From `P or Q` and a refutation of `P`, concludes `Q`.
///
/// On the refuted branch, applying the refutation to the payload would
/// yield `Bottom`, and `ex_falso` turns that contradiction into the
/// conclusion. On the surviving branch the payload passes through the
/// identity and the refutation is dropped unapplied.
pub fn disjunctive_syllogism_1<P: 'static, Q: 'static>(pq: Or<P, Q>, not_p: Not<P>) -> Q {
    disjunction_elimination(
        pq,
        Implies::new(move |p: P| ex_falso(not_p.apply(p))),
        identity(),
    )
}

/// From `P or Q` and a refutation of `Q`, concludes `P`.
pub fn disjunctive_syllogism_2<P: 'static, Q: 'static>(pq: Or<P, Q>, not_q: Not<Q>) -> P {
    disjunction_elimination(
        pq,
        identity(),
        Implies::new(move |q: Q| ex_falso(not_q.apply(q))),
    )
}

/// From `(A -> B) and (C -> D)` plus `A or C`, concludes `B or D`.
///
/// Projects the two implications out of the pair, case-splits the
/// disjunction, maps the live payload through the matching implication,
/// and re-injects on the same side.
pub fn constructive_dilemma<A: 'static, B: 'static, C: 'static, D: 'static>(
    p: And<Implies<A, B>, Implies<C, D>>,
    ac: Or<A, C>,
) -> Or<B, D> {
    let And { left: ab, right: cd } = p;
    disjunction_elimination(
        ac,
        Implies::new(move |a: A| disjunction_introduction_left(ab.apply(a))),
        Implies::new(move |c: C| disjunction_introduction_right(cd.apply(c))),
    )
}

/// Ex falso quodlibet: from a contradiction, any conclusion whatsoever.
///
/// The empty match is sound because `Bottom` has no values: the body is
/// unreachable, and this is the single point in the kernel where `Bottom`
/// converts into an arbitrary proposition.
pub fn ex_falso<T>(b: Bottom) -> T {
    match b {}
}

/// From `P`, concludes `(P -> Bottom) -> Bottom`: a proof rules out every
/// refutation.
///
/// The constructive half of double negation. The converse direction
/// requires classical reasoning and is registered as UNSOUND rather than
/// implemented.
pub fn double_negation_introduction<P: 'static>(p: P) -> Not<Not<P>> {
    Implies::new(move |not_p: Not<P>| not_p.apply(p))
}

/// Concludes `(P and (P -> Bottom)) -> Bottom`: no proposition holds
/// together with its own refutation.
pub fn non_contradiction<P: 'static>() -> Not<And<P, Not<P>>> {
    Implies::new(|both: And<P, Not<P>>| both.right.apply(both.left))
}

/// Concludes `Top` from nothing.
pub fn top_introduction() -> Top {
    Top
}
