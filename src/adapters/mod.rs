pub mod console;
pub mod http;
pub mod mock;
