pub mod console;
pub mod paths;
