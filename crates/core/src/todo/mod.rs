mod requests;
mod service;
mod types;

pub use requests::{CreateTodoRequest, UpdateTodoRequest};
pub use service::TodoService;
pub use types::TodoItem;
