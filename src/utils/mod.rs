pub mod jwt;
pub mod slug;
pub mod tracing;
