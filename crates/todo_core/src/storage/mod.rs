mod mapper;
mod sqlite_store;

pub use mapper::TodoRow;
pub use sqlite_store::{SqliteTodoRepository, connect, connect_in_memory};
