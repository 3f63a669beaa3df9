pub mod task;
pub mod user;

pub use task::{Task, TaskDetailsUpdate, TaskInput, TaskStatusUpdate};
pub use user::User;
