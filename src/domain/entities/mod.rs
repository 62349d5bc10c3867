pub mod chart;
pub mod column;
pub mod dataset;
pub mod row;
pub mod summary;
