use std::collections::BTreeSet;

use crate::model::ids::SectionId;

/// The set of section ids a learner has completed.
///
/// Completions only ever accumulate; there is deliberately no removal API.
/// Re-marking a completed section is a no-op, which is what lets the quiz
/// loop re-signal completion for an already-passed section without harm.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet(BTreeSet<SectionId>);

impl CompletionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from persisted section ids.
    #[must_use]
    pub fn from_sections(sections: impl IntoIterator<Item = SectionId>) -> Self {
        Self(sections.into_iter().collect())
    }

    /// Record a completion. Returns `true` if the section was newly added.
    pub fn mark_complete(&mut self, section: SectionId) -> bool {
        self.0.insert(section)
    }

    #[must_use]
    pub fn contains(&self, section: &SectionId) -> bool {
        self.0.contains(section)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionId> {
        self.0.iter()
    }
}

impl FromIterator<SectionId> for CompletionSet {
    fn from_iter<T: IntoIterator<Item = SectionId>>(iter: T) -> Self {
        Self::from_sections(iter)
    }
}

// ─── TESTS ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(raw: &str) -> SectionId {
        SectionId::new(raw).unwrap()
    }

    #[test]
    fn mark_complete_is_idempotent() {
        let mut set = CompletionSet::new();
        assert!(set.mark_complete(sid("intro")));
        assert!(!set.mark_complete(sid("intro")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn contains_reflects_membership() {
        let set = CompletionSet::from_sections([sid("a"), sid("b")]);
        assert!(set.contains(&sid("a")));
        assert!(!set.contains(&sid("c")));
    }

    #[test]
    fn empty_set_contains_nothing() {
        let set = CompletionSet::new();
        assert!(set.is_empty());
        assert!(!set.contains(&sid("intro")));
    }
}
