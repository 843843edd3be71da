mod quiz_panel;
mod sidebar;
mod view;

pub use view::CourseView;

#[cfg(test)]
pub(crate) use quiz_panel::QuizTestHandles;
