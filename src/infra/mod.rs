pub mod export;
pub mod http;
pub mod images;
pub mod sqlite;
