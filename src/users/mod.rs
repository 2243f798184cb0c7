pub mod forms;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod schema;
pub mod store;
