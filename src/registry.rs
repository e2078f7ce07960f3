//! The rule registry: provenance tags for every inference rule.
//!
//! The registry is an immutable, compile-time table. Each entry records a
//! rule's name, its provenance status, and the other rules its derivation
//! invokes (the static call graph). A rule that transitively reaches a
//! non-proven entry is itself not fully constructive; finding such rules
//! is a walk over the declared graph, never a runtime check on proof
//! values.

use crate::error::{BhkError, BhkResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};

/// Provenance status of a registered rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RuleStatus {
    /// Full derivation present, composed only from parameters and other
    /// registered rules.
    Proven,
    /// Signature declared, no derivation; intentionally a placeholder.
    /// Admissions carry this status too: an axiom has no derivation by
    /// definition.
    Stubbed,
    /// Demonstrated not constructively derivable in this calculus; kept
    /// only as a documented negative example, never callable.
    Unsound,
}

impl RuleStatus {
    /// Parse a status from string, returning an error for unknown values.
    pub fn from_str(s: &str) -> BhkResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "proven" => Ok(Self::Proven),
            "stubbed" => Ok(Self::Stubbed),
            "unsound" => Ok(Self::Unsound),
            _ => Err(BhkError::UnknownStatus { value: s.to_string() }),
        }
    }

    /// Convert the status to its canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proven => "proven",
            Self::Stubbed => "stubbed",
            Self::Unsound => "unsound",
        }
    }
}

impl Default for RuleStatus {
    /// A rule is unproven until a derivation lands.
    fn default() -> Self {
        Self::Stubbed
    }
}

impl From<RuleStatus> for String {
    fn from(status: RuleStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RuleStatus {
    type Err = BhkError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s)
    }
}

/// One registered rule: name, provenance status, and the rules its
/// derivation invokes.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RuleEntry {
    pub name: &'static str,
    pub status: RuleStatus,
    pub depends_on: &'static [&'static str],
}

const fn rule(
    name: &'static str,
    status: RuleStatus,
    depends_on: &'static [&'static str],
) -> RuleEntry {
    RuleEntry { name, status, depends_on }
}

/// The kernel's rule table. Dependency lists mirror the combinator bodies
/// in [`crate::rules`]; the entries without a combinator are the
/// admission point and the documented gaps.
pub const CORE_RULES: &[RuleEntry] = &[
    // implication
    rule("modus_ponens", RuleStatus::Proven, &[]),
    rule("contrapositive", RuleStatus::Proven, &[]),
    rule("modus_tollens", RuleStatus::Proven, &["contrapositive"]),
    rule("transitive_implication", RuleStatus::Proven, &[]),
    rule("identity", RuleStatus::Proven, &[]),
    // conjunction
    rule("conjunction_introduction", RuleStatus::Proven, &[]),
    rule("conjunction_elimination_1", RuleStatus::Proven, &[]),
    rule("conjunction_elimination_2", RuleStatus::Proven, &[]),
    // disjunction
    rule("disjunction_introduction_left", RuleStatus::Proven, &[]),
    rule("disjunction_introduction_right", RuleStatus::Proven, &[]),
    rule("disjunction_elimination", RuleStatus::Proven, &[]),
    rule(
        "disjunctive_syllogism_1",
        RuleStatus::Proven,
        &["disjunction_elimination", "ex_falso", "identity"],
    ),
    rule(
        "disjunctive_syllogism_2",
        RuleStatus::Proven,
        &["disjunction_elimination", "ex_falso", "identity"],
    ),
    rule(
        "constructive_dilemma",
        RuleStatus::Proven,
        &[
            "disjunction_elimination",
            "disjunction_introduction_left",
            "disjunction_introduction_right",
        ],
    ),
    // negation
    rule("ex_falso", RuleStatus::Proven, &[]),
    rule("double_negation_introduction", RuleStatus::Proven, &[]),
    rule("non_contradiction", RuleStatus::Proven, &[]),
    rule("top_introduction", RuleStatus::Proven, &[]),
    // admissions and gaps
    rule("admit", RuleStatus::Stubbed, &[]),
    // The S-combinator derivation needs the antecedent proof twice,
    // which the single-use `Implies` cannot supply without a `Clone`
    // bound.
    rule("implication_distribution", RuleStatus::Stubbed, &[]),
    // classical rules, not derivable here; see the crate non-goals
    rule("double_negation_elimination", RuleStatus::Unsound, &[]),
    rule("excluded_middle", RuleStatus::Unsound, &[]),
];

/// One provenance violation: a rule whose dependency closure reaches a
/// non-proven entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProvenanceFinding {
    /// The rule whose provenance was queried.
    pub claimed_rule: String,
    /// The non-proven entry reached from it.
    pub offending_rule: String,
    pub offending_status: RuleStatus,
    /// Dependency chain from the claimed rule to the offender, inclusive.
    pub reached_via: Vec<String>,
}

#[derive(Clone, Copy, PartialEq)]
enum VisitState {
    InProgress,
    Done,
}

/// Immutable view over a rule table.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: &'static [RuleEntry],
}

impl Registry {
    /// The registry over the kernel's own rule table.
    pub const fn core() -> Self {
        Self { entries: CORE_RULES }
    }

    /// A registry over a caller-supplied compile-time table.
    pub const fn from_entries(entries: &'static [RuleEntry]) -> Self {
        Self { entries }
    }

    /// All entries, in declaration order.
    pub fn entries(&self) -> &[RuleEntry] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a single entry by rule name.
    pub fn entry(&self, rule: &str) -> Option<&RuleEntry> {
        self.entries.iter().find(|e| e.name == rule)
    }

    /// Provenance status of a rule.
    pub fn status_of(&self, rule: &str) -> BhkResult<RuleStatus> {
        self.entry(rule)
            .map(|e| e.status)
            .ok_or_else(|| BhkError::UnknownRule { rule: rule.to_string() })
    }

    /// Check the table's referential integrity: no duplicates, every
    /// dependency resolves, no cycles. The derivation graph is acyclic by
    /// construction for real rules; this guards hand-built tables.
    pub fn validate(&self) -> BhkResult<()> {
        if self.entries.is_empty() {
            return Err(BhkError::EmptyRegistry);
        }

        let mut seen = HashSet::new();
        for entry in self.entries {
            if !seen.insert(entry.name) {
                return Err(BhkError::DuplicateRule { rule: entry.name.to_string() });
            }
        }

        for entry in self.entries {
            for dep in entry.depends_on {
                if self.entry(dep).is_none() {
                    return Err(BhkError::UnresolvedDependency {
                        rule: entry.name.to_string(),
                        dependency: dep.to_string(),
                    });
                }
            }
        }

        let mut state = HashMap::new();
        for entry in self.entries {
            if let Some(rule) = self.cycle_from(entry.name, &mut state) {
                return Err(BhkError::DependencyCycle { rule });
            }
        }

        Ok(())
    }

    fn cycle_from(
        &self,
        name: &'static str,
        state: &mut HashMap<&'static str, VisitState>,
    ) -> Option<String> {
        match state.get(name) {
            Some(VisitState::Done) => return None,
            Some(VisitState::InProgress) => return Some(name.to_string()),
            None => {}
        }
        state.insert(name, VisitState::InProgress);
        if let Some(entry) = self.entry(name) {
            for &dep in entry.depends_on {
                if let Some(rule) = self.cycle_from(dep, state) {
                    return Some(rule);
                }
            }
        }
        state.insert(name, VisitState::Done);
        None
    }

    /// Every non-proven entry in the rule's dependency closure, the rule
    /// itself included. An empty result means the rule is fully
    /// constructive: traceable to proven rules only.
    pub fn taint_of(&self, rule: &str) -> BhkResult<Vec<ProvenanceFinding>> {
        let root = self
            .entry(rule)
            .ok_or_else(|| BhkError::UnknownRule { rule: rule.to_string() })?;

        let mut findings = Vec::new();
        let mut path = Vec::new();
        let mut visited = HashSet::new();
        self.collect_taint(root, root.name, &mut path, &mut visited, &mut findings)?;
        Ok(findings)
    }

    fn collect_taint(
        &self,
        entry: &RuleEntry,
        claimed: &str,
        path: &mut Vec<String>,
        visited: &mut HashSet<&'static str>,
        findings: &mut Vec<ProvenanceFinding>,
    ) -> BhkResult<()> {
        if !visited.insert(entry.name) {
            return Ok(());
        }
        path.push(entry.name.to_string());

        if entry.status != RuleStatus::Proven {
            findings.push(ProvenanceFinding {
                claimed_rule: claimed.to_string(),
                offending_rule: entry.name.to_string(),
                offending_status: entry.status,
                reached_via: path.clone(),
            });
        }

        for dep in entry.depends_on {
            let dep_entry =
                self.entry(dep).ok_or_else(|| BhkError::UnresolvedDependency {
                    rule: entry.name.to_string(),
                    dependency: dep.to_string(),
                })?;
            self.collect_taint(dep_entry, claimed, path, visited, findings)?;
        }

        path.pop();
        Ok(())
    }

    /// The lint pass: findings for every PROVEN entry whose dependency
    /// closure reaches a non-proven entry. STUBBED and UNSOUND entries
    /// claim nothing and are not audited as roots.
    pub fn audit(&self) -> BhkResult<Vec<ProvenanceFinding>> {
        self.validate()?;

        let mut findings = Vec::new();
        for entry in self.entries {
            if entry.status == RuleStatus::Proven {
                findings.extend(self.taint_of(entry.name)?);
            }
        }
        Ok(findings)
    }

    /// Deterministic fingerprint of the table, so a report names the
    /// exact rule set it audited.
    pub fn fingerprint(&self) -> String {
        let rules: Vec<serde_json::Value> = self
            .entries
            .iter()
            .map(|e| {
                serde_json::json!({
                    "name": e.name,
                    "status": e.status.as_str(),
                    "depends_on": e.depends_on,
                })
            })
            .collect();
        content_hash(&serde_json::json!({ "rules": rules }))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::core()
    }
}

/// Compute a deterministic content hash for a JSON document.
fn content_hash(obj: &serde_json::Value) -> String {
    let serialized = canonical_json(obj);
    let mut hasher = Sha256::new();
    hasher.update(serialized.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Produce canonical JSON with deterministic key ordering.
fn canonical_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().collect();
            keys.sort();
            let pairs: Vec<String> = keys
                .into_iter()
                .map(|k| {
                    format!(
                        "{}:{}",
                        serde_json::to_string(k).unwrap_or_default(),
                        canonical_json(&map[k])
                    )
                })
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        _ => serde_json::to_string(value).unwrap_or_else(|_| "null".to_string()),
    }
}
