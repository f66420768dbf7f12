pub mod handlers;
pub mod roadmap;
pub mod scorer;
