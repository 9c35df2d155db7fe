// Application layer - Dashboard engine and use cases
pub mod chart;
pub mod compose;
pub mod dashboard_service;
pub mod dashboard_view;
pub mod metrics_source;
pub mod stat_card;
pub mod transform;
