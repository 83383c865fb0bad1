mod message;
mod request;

pub use message::{Message, Speaker};
pub use request::{QueryOptions, QueryRequest};
