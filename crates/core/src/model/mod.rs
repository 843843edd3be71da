mod course;
mod ids;
mod learner;
mod progress;
mod question;
mod section;

pub use course::{Course, CourseError};
pub use ids::{CourseId, LearnerId, ParseIdError, SectionId};
pub use learner::{LearnerError, LearnerProfile, LearnerRole};
pub use progress::CompletionSet;
pub use question::{Question, QuestionError};
pub use section::{Section, SectionError};
