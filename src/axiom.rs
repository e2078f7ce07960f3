//! The admission mechanism: asserting a proposition without proving it.
//!
//! `admit` is the kernel's only sanctioned escape hatch. Keeping it in its
//! own module makes every use read `axiom::admit`, so a search over a
//! derivation's source finds each admission.

use std::any::type_name;

/// Admit `P` as an axiom, producing a "proof" with no derivation.
///
/// The call type-checks at any proposition whatsoever, which is exactly
/// why it must never appear in a derivation claimed as constructive:
/// an admission conjures evidence out of thin air. Evaluating one aborts,
/// because no value of `P` actually exists here to return.
///
/// The rule table registers `admit` as STUBBED, so any rule whose
/// dependency chain reaches it is reported as tainted by
/// [`crate::registry::Registry::taint_of`] rather than passing silently.
pub fn admit<P>() -> P {
    panic!("admitted without derivation: {}", type_name::<P>())
}
