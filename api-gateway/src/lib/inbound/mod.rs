pub mod http;
pub mod middleware;
