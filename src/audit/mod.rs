pub mod handlers;
pub mod models;
pub mod recorder;

#[cfg(test)]
mod mod_tests;
