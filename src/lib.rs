pub mod api;
pub mod checkins;
pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod itinerary;
pub mod models;
pub mod observability;
pub mod state;
