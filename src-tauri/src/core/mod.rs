pub mod config;
pub mod dotenv;
pub mod filter;
pub mod github_api;
pub mod languages;
pub mod models;
pub mod pagination;
pub mod render;
pub mod session;

#[cfg(test)]
pub mod test_support;
