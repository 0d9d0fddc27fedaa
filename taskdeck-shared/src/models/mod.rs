pub mod auth;
pub mod errors;
pub mod task;
pub mod user;

pub use auth::{AuthResponse, SignInRequest, SignUpRequest};
pub use errors::ErrorBody;
pub use task::{BoardStats, DEFAULT_PAGE_SIZE, PageQuery, Task, TaskDraft, TaskPage, TaskStatus};
pub use user::{User, UserRole};
