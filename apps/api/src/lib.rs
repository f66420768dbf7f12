pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod plans;
pub mod profile;
pub mod recommend;
pub mod resources;
pub mod routes;
pub mod seed;
pub mod state;
