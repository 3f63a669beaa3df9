#![doc = "The `taskward` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic, domain models, authentication"]
#![doc = "mechanisms, routing configuration, and error handling for the Taskward API."]
#![doc = "It is used by the main binary (`main.rs`) to construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;

// lib.rs primarily declares modules for the library crate.
// The application factory lives in main.rs; integration tests assemble the
// same service tree through routes::api().
