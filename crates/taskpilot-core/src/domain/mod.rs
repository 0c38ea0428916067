//! Domain model (task records, ids, status, errors, due-date parsing).

pub mod due;
pub mod errors;
pub mod state;
pub mod task;

pub use self::due::parse_due_at;
pub use self::errors::TaskError;
pub use self::state::TaskStatus;
pub use self::task::{NewTask, Priority, Task, TaskFilter, TaskId, TaskPatch};
