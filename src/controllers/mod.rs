pub mod auth_controller;
pub mod cargo_controller;
pub mod dashboard_controller;
pub mod route_controller;
pub mod training_controller;
pub mod vehicle_controller;
