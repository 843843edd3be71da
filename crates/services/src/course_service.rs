use std::sync::Arc;

use course_core::model::{Course, CourseId};
use course_core::{CatalogError, workshop_courses};

/// Owns the validated workshop catalog.
///
/// Content ships with the binary, so this service is infallible after
/// construction and cheap to clone into views.
#[derive(Clone)]
pub struct CourseService {
    courses: Arc<[Course]>,
}

impl CourseService {
    /// Build the service over the built-in workshop catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the built-in content fails validation.
    pub fn workshop() -> Result<Self, CatalogError> {
        Ok(Self {
            courses: workshop_courses()?.into(),
        })
    }

    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[must_use]
    pub fn course(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| course.id() == id)
    }

    /// Section count across every course, for overall progress.
    #[must_use]
    pub fn total_sections(&self) -> usize {
        self.courses
            .iter()
            .map(|course| course.section_count())
            .sum()
    }
}
