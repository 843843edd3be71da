use course_core::model::{CompletionSet, Course};

/// One dashboard course card.
#[derive(Clone, Debug, PartialEq)]
pub struct CourseCardVm {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
    pub action_label: &'static str,
}

#[must_use]
pub fn map_course_card(course: &Course, completed: &CompletionSet) -> CourseCardVm {
    let done = course.completed_count(completed);
    let total = course.section_count();
    let action_label = if course.is_finished(completed) {
        "Review course"
    } else if done == 0 {
        "Start course"
    } else {
        "Continue"
    };

    CourseCardVm {
        id: course.id().to_string(),
        title: course.title().to_string(),
        summary: course.summary().to_string(),
        completed: done,
        total,
        percent: percent_complete(done, total),
        action_label,
    }
}

/// How one section renders on the course page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionDisplay {
    /// Body hidden behind the unlock overlay.
    Locked,
    /// Body plus the quiz panel.
    Active,
    /// Body plus the completed card.
    Completed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionItemVm {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub display: SectionDisplay,
}

#[must_use]
pub fn map_section_items(course: &Course, completed: &CompletionSet) -> Vec<SectionItemVm> {
    course
        .sections()
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let display = if completed.contains(section.id()) {
                SectionDisplay::Completed
            } else if course.is_section_locked(completed, index) {
                SectionDisplay::Locked
            } else {
                SectionDisplay::Active
            };
            SectionItemVm {
                index,
                id: section.id().to_string(),
                title: section.title().to_string(),
                display,
            }
        })
        .collect()
}

#[must_use]
pub(crate) fn percent_complete(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        ((done as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Sidebar resource list shown under the topics on every course page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolboxLink {
    pub label: &'static str,
    pub url: &'static str,
}

#[must_use]
pub fn toolbox_links() -> &'static [ToolboxLink] {
    &[
        ToolboxLink {
            label: "ChatGPT",
            url: "https://chat.openai.com",
        },
        ToolboxLink {
            label: "Claude",
            url: "https://claude.ai",
        },
        ToolboxLink {
            label: "Gemini",
            url: "https://gemini.google.com",
        },
        ToolboxLink {
            label: "NotebookLM",
            url: "https://notebooklm.google.com",
        },
        ToolboxLink {
            label: "Perplexity",
            url: "https://www.perplexity.ai",
        },
    ]
}
