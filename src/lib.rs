pub mod classifier;
pub mod dedupe;
pub mod engine;
pub mod fallback;
pub mod models;
pub mod out_models;
pub mod parse;
pub mod prompts;
pub mod rank;
pub mod score;
pub mod server;
pub mod store;
