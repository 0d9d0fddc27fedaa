mod add_task;
mod dashboard;
mod edit_task;
mod sign_in;
mod sign_up;

pub use add_task::AddTaskPage;
pub use dashboard::DashboardPage;
pub use edit_task::EditTaskPage;
pub use sign_in::SignInPage;
pub use sign_up::SignUpPage;
