pub mod events;
pub mod observability;
pub mod persistence;
