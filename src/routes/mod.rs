pub mod attempt_routes;
pub mod health;
pub mod quiz_routes;
pub mod result_routes;
