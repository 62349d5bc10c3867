pub mod entities;
pub mod projection;
