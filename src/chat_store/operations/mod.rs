pub mod query;
pub mod read;
pub mod write;

pub use query::{create_table, list_threads};
pub use read::get_messages;
pub use write::{append_messages, delete_messages};
