pub mod chart_fetcher;
pub mod column_stats;
pub mod dispatch;
pub mod export_service;
pub mod prognosis;
pub mod stats_diff;
pub mod table_view;
