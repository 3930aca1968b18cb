pub mod category;
pub mod state;
pub mod task;

pub use category::{CategoryKey, CategoryState};
pub use state::AppState;
pub use task::{sort_by_start, NewTask, Task, TaskPatch};
