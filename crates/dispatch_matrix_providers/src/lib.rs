pub mod google_routes_api;
pub mod travel_time_client;
pub mod travel_time_provider;
