pub mod classify;
pub mod config;
pub mod engine;

pub use classify::classify_demand;
pub use config::PricingConfig;
pub use engine::{compute_price, PricingEngine};
