mod admin;
mod course;
mod dashboard;
mod login;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin::AdminView;
pub use course::CourseView;
pub use dashboard::DashboardView;
pub use login::LoginView;
