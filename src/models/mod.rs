pub mod itinerary;
pub mod progress;
