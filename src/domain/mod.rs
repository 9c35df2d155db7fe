// Domain layer - Pure data model, no I/O
pub mod dashboard;
pub mod filter;
pub mod lenient;
pub mod payload;
pub mod role;
pub mod series;
