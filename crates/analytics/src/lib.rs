//! # Matrix Prophet Analytics Engine
//!
//! This crate turns a sample of historical periodic returns into a projection of
//! where a capital amount will be after a given number of months.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of HTTP,
//!   configuration files or any other external system. It depends only on
//!   `core-types` (Layer 0).
//! - **Stateless Calculation:** A `ForecastEngine` is built once from a return
//!   sample and never mutated afterwards. Every prediction is a pure function of
//!   the sample, the model parameters and the call arguments, so an engine can be
//!   shared freely between threads.
//!
//! ## Public API
//!
//! - `ForecastEngine`: computes the predicted value, annualized yield and
//!   confidence interval.
//! - `ForecastModel`: the compounding convention and interval width parameters.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod model;

// Re-export the key components to create a clean, public-facing API.
pub use engine::ForecastEngine;
pub use error::AnalyticsError;
pub use model::ForecastModel;
