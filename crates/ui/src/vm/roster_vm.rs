use course_core::model::LearnerProfile;

use crate::vm::course_vm::percent_complete;
use crate::vm::time_fmt::format_date;

/// One row of the admin roster table.
#[derive(Clone, Debug, PartialEq)]
pub struct RosterRowVm {
    pub email: String,
    pub role_label: &'static str,
    pub joined: String,
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

#[must_use]
pub fn map_roster_rows(profiles: &[LearnerProfile], total_sections: usize) -> Vec<RosterRowVm> {
    profiles
        .iter()
        .map(|profile| {
            let completed = profile.completed().len();
            RosterRowVm {
                email: profile.email().to_string(),
                role_label: if profile.role().is_admin() {
                    "Admin"
                } else {
                    "Learner"
                },
                joined: format_date(profile.created_at()),
                completed,
                total: total_sections,
                percent: percent_complete(completed, total_sections),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::{LearnerId, LearnerRole, SectionId};
    use course_core::time::fixed_now;

    #[test]
    fn rows_carry_progress_and_role() {
        let mut learner = LearnerProfile::new(
            LearnerId::new("uid-1").unwrap(),
            "ada@example.com",
            LearnerRole::Learner,
            fixed_now(),
        )
        .unwrap();
        learner.mark_complete(SectionId::new("intro").unwrap());
        let admin = LearnerProfile::new(
            LearnerId::new("uid-2").unwrap(),
            "mia@example.com",
            LearnerRole::Admin,
            fixed_now(),
        )
        .unwrap();

        let rows = map_roster_rows(&[learner, admin], 6);
        assert_eq!(rows[0].role_label, "Learner");
        assert_eq!(rows[0].completed, 1);
        assert_eq!(rows[0].percent, 17);
        assert_eq!(rows[1].role_label, "Admin");
        assert_eq!(rows[1].percent, 0);
    }
}
