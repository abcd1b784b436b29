mod chat;
mod meta;
mod query;
mod upload;

pub use chat::chat_endpoint;
pub use meta::{health, root};
pub use query::query_data;
pub use upload::upload_data;
