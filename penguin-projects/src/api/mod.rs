//! HTTP API handlers for penguin-projects

pub mod folders;
pub mod health;
pub mod projects;
pub mod time;

pub use folders::list_folders;
pub use health::health_routes;
pub use projects::{cleanup_projects, list_projects, save_projects, update_project_dates};
pub use time::{list_time_formats, parse_time};
