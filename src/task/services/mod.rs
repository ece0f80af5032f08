//! Application services for task management.

mod board;
mod feed;

pub use board::{
    CreateTaskRequest, EditTaskRequest, TaskBoardService, TaskServiceError, TaskServiceResult,
};
pub use feed::{TaskSnapshot, TaskSubscription};
