//! Requirement model.
//!
//! A requirement is a named obligation met by placing a course of the
//! same name, or one of its declared substitutes. Substitution is
//! bidirectional: base and substitutes form one equivalence group, and
//! at most one member of a group is placed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ScienceTrack;

/// Requirement classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementCategory {
    /// Core major requirement (table category `1`).
    Core,
    /// Basic-science track requirement (table category `X`/`Y`/`Z`).
    Track(ScienceTrack),
    /// Pre-selected breadth (ABCD) elective.
    Breadth,
    /// Any other table category; not scheduled.
    Other(String),
}

impl RequirementCategory {
    /// Parses a requirement-table category cell.
    pub fn from_table(value: &str) -> Self {
        match value.trim() {
            "1" => Self::Core,
            other => match ScienceTrack::from_code(other) {
                Some(track) => Self::Track(track),
                None => Self::Other(other.to_string()),
            },
        }
    }
}

/// A named obligation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Course name that satisfies this requirement.
    pub name: String,
    /// Requirement classification.
    pub category: RequirementCategory,
    /// Alternative course names that also satisfy it.
    pub substitutes: Vec<String>,
}

impl Requirement {
    /// Creates a requirement with no substitutes.
    pub fn new(name: impl Into<String>, category: RequirementCategory) -> Self {
        Self {
            name: name.into(),
            category,
            substitutes: Vec::new(),
        }
    }

    /// Creates a core requirement.
    pub fn core(name: impl Into<String>) -> Self {
        Self::new(name, RequirementCategory::Core)
    }

    /// Adds a substitute name.
    pub fn with_substitute(mut self, name: impl Into<String>) -> Self {
        self.substitutes.push(name.into());
        self
    }

    /// The requirement name followed by its substitutes.
    pub fn candidate_names(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(self.substitutes.iter().map(String::as_str))
            .collect()
    }
}

/// Base → substitutes table with reverse lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubstituteMap {
    bases: BTreeMap<String, Vec<String>>,
}

impl SubstituteMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The calculus and physics equivalences used by the degree tables.
    pub fn standard() -> Self {
        Self::new()
            .with_group("微積分Ｂ一", ["微積分一(數學系)", "微積分Ａ一"])
            .with_group("微積分Ｂ二", ["微積分二(數學系)", "微積分Ａ二"])
            .with_group("普通物理Ｂ一", ["普通物理一(物理系)", "普通物理Ａ一"])
            .with_group("普通物理Ｂ二", ["普通物理二(物理系)", "普通物理Ａ二"])
    }

    /// Declares `subs` as substitutes of `base`.
    pub fn with_group<I, S>(mut self, base: impl Into<String>, subs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bases
            .entry(base.into())
            .or_default()
            .extend(subs.into_iter().map(Into::into));
        self
    }

    /// Substitutes declared for `base` (empty if none).
    pub fn substitutes_of(&self, base: &str) -> &[String] {
        self.bases.get(base).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The base requirement that `name` substitutes for, if any.
    pub fn base_of(&self, name: &str) -> Option<&str> {
        self.bases
            .iter()
            .find(|(_, subs)| subs.iter().any(|s| s == name))
            .map(|(base, _)| base.as_str())
    }

    /// Every name in `name`'s equivalence group, base first.
    ///
    /// A name outside every group forms a group of its own.
    pub fn group_of(&self, name: &str) -> Vec<String> {
        let base = self.base_of(name).unwrap_or(name);
        std::iter::once(base.to_string())
            .chain(self.substitutes_of(base).iter().cloned())
            .collect()
    }
}

/// Ordered requirement table plus the substitute map applied to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementCatalog {
    pub requirements: Vec<Requirement>,
    pub substitutes: SubstituteMap,
}

impl RequirementCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a requirement.
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Sets the substitute map and attaches it to every requirement.
    pub fn with_substitutes(mut self, map: SubstituteMap) -> Self {
        for req in &mut self.requirements {
            for sub in map.substitutes_of(&req.name) {
                if !req.substitutes.contains(sub) {
                    req.substitutes.push(sub.clone());
                }
            }
        }
        self.substitutes = map;
        self
    }

    /// Core requirements in table order.
    pub fn core(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements
            .iter()
            .filter(|r| r.category == RequirementCategory::Core)
    }

    /// Requirements of the given basic-science track in table order.
    pub fn track(&self, track: ScienceTrack) -> impl Iterator<Item = &Requirement> + '_ {
        self.requirements
            .iter()
            .filter(move |r| r.category == RequirementCategory::Track(track))
    }

    /// Whether any requirement (or substitute) is named `name`.
    pub fn names(&self, name: &str) -> bool {
        self.requirements
            .iter()
            .any(|r| r.name == name || r.substitutes.iter().any(|s| s == name))
    }

    /// Whether `name` is a core requirement or one of its substitutes.
    pub fn is_core(&self, name: &str) -> bool {
        self.core()
            .any(|r| r.name == name || r.substitutes.iter().any(|s| s == name))
    }

    /// Builds a requirement for `name`, using declared substitutes.
    pub fn requirement_for(&self, name: &str, category: RequirementCategory) -> Requirement {
        let mut req = Requirement::new(name, category);
        req.substitutes = self.substitutes.substitutes_of(name).to_vec();
        req
    }

    /// Number of requirements.
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}
