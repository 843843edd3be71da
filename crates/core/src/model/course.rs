use thiserror::Error;

use crate::model::ids::{CourseId, SectionId};
use crate::model::progress::CompletionSet;
use crate::model::section::Section;

/// An ordered run of sections making up one workshop day.
///
/// Section order is the unlock order: a section is reachable only once the
/// quiz of the section before it has been passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    title: String,
    summary: String,
    sections: Vec<Section>,
}

impl Course {
    /// Create a validated course.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyTitle` if the title is empty after trimming.
    /// Returns `CourseError::NoSections` if the section list is empty.
    /// Returns `CourseError::DuplicateSection` if two sections share an id.
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        summary: impl Into<String>,
        sections: Vec<Section>,
    ) -> Result<Self, CourseError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CourseError::EmptyTitle);
        }
        if sections.is_empty() {
            return Err(CourseError::NoSections);
        }
        for (i, section) in sections.iter().enumerate() {
            if sections[..i].iter().any(|s| s.id() == section.id()) {
                return Err(CourseError::DuplicateSection(section.id().clone()));
            }
        }
        Ok(Self {
            id,
            title,
            summary: summary.into(),
            sections,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Position of a section within this course, if it belongs to it.
    #[must_use]
    pub fn position_of(&self, section: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id() == section)
    }

    /// The section gate.
    ///
    /// The first section is always open. Every later section is locked
    /// exactly while the id of the section directly before it is absent
    /// from `completed`; completions further ahead or behind do not
    /// matter, so sections can only ever unlock in order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range; callers index sections they
    /// obtained from this course.
    #[must_use]
    pub fn is_section_locked(&self, completed: &CompletionSet, index: usize) -> bool {
        assert!(index < self.sections.len(), "section index out of range");
        if index == 0 {
            return false;
        }
        !completed.contains(self.sections[index - 1].id())
    }

    /// Number of this course's sections present in `completed`.
    #[must_use]
    pub fn completed_count(&self, completed: &CompletionSet) -> usize {
        self.sections
            .iter()
            .filter(|s| completed.contains(s.id()))
            .count()
    }

    #[must_use]
    pub fn is_finished(&self, completed: &CompletionSet) -> bool {
        self.sections.iter().all(|s| completed.contains(s.id()))
    }

    /// First section that is open but not yet completed, if any.
    ///
    /// `None` when the course is finished.
    #[must_use]
    pub fn resume_index(&self, completed: &CompletionSet) -> Option<usize> {
        self.sections
            .iter()
            .position(|s| !completed.contains(s.id()))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("a course needs at least one section")]
    NoSections,

    #[error("duplicate section id: {0}")]
    DuplicateSection(SectionId),
}

// ─── TESTS ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(raw: &str) -> SectionId {
        SectionId::new(raw).unwrap()
    }

    fn section(id: &str) -> Section {
        Section::new(sid(id), format!("Section {id}"), "body", Vec::new()).unwrap()
    }

    fn three_section_course() -> Course {
        Course::new(
            CourseId::new("day1").unwrap(),
            "Day 1",
            "Fundamentals",
            vec![section("s0"), section("s1"), section("s2")],
        )
        .unwrap()
    }

    #[test]
    fn first_section_is_never_locked() {
        let course = three_section_course();
        assert!(!course.is_section_locked(&CompletionSet::new(), 0));

        let all = CompletionSet::from_sections([sid("s0"), sid("s1"), sid("s2")]);
        assert!(!course.is_section_locked(&all, 0));
    }

    #[test]
    fn section_unlocks_when_predecessor_completes() {
        let course = three_section_course();
        let mut completed = CompletionSet::new();

        assert!(course.is_section_locked(&completed, 1));
        completed.mark_complete(sid("s0"));
        assert!(!course.is_section_locked(&completed, 1));
    }

    #[test]
    fn gate_depends_only_on_direct_predecessor() {
        let course = three_section_course();

        // s0 done but s1 not: index 2 stays locked.
        let partial = CompletionSet::from_sections([sid("s0")]);
        assert!(course.is_section_locked(&partial, 2));

        // s1 present unlocks index 2 even with s0 missing (can only happen
        // through out-of-band data, but the gate is local by contract).
        let skipped = CompletionSet::from_sections([sid("s1")]);
        assert!(!course.is_section_locked(&skipped, 2));
        assert!(course.is_section_locked(&skipped, 1));
    }

    #[test]
    #[should_panic(expected = "section index out of range")]
    fn out_of_range_index_panics() {
        let course = three_section_course();
        let _ = course.is_section_locked(&CompletionSet::new(), 3);
    }

    #[test]
    fn duplicate_section_ids_rejected() {
        let err = Course::new(
            CourseId::new("day1").unwrap(),
            "Day 1",
            "",
            vec![section("s0"), section("s0")],
        )
        .unwrap_err();
        assert_eq!(err, CourseError::DuplicateSection(sid("s0")));
    }

    #[test]
    fn empty_course_rejected() {
        let err =
            Course::new(CourseId::new("day1").unwrap(), "Day 1", "", Vec::new()).unwrap_err();
        assert_eq!(err, CourseError::NoSections);
    }

    #[test]
    fn resume_index_walks_forward() {
        let course = three_section_course();
        let mut completed = CompletionSet::new();

        assert_eq!(course.resume_index(&completed), Some(0));
        completed.mark_complete(sid("s0"));
        assert_eq!(course.resume_index(&completed), Some(1));
        completed.mark_complete(sid("s1"));
        completed.mark_complete(sid("s2"));
        assert_eq!(course.resume_index(&completed), None);
        assert!(course.is_finished(&completed));
    }

    #[test]
    fn completed_count_ignores_foreign_sections() {
        let course = three_section_course();
        let completed = CompletionSet::from_sections([sid("s0"), sid("other-course-section")]);
        assert_eq!(course.completed_count(&completed), 1);
    }
}
