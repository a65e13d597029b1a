pub mod redis_service;

pub use redis_service::{JwtBlacklist, get_redis, init_redis_connection};
