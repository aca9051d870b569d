//! Anomaly detection and Rule-of-Three correlation for Venue Sentinel.
//!
//! The engine is invoked once per simulation tick with the venue's entity
//! snapshot and zone list, and returns the anomalies that tick produced.
//! It performs no I/O and no internal parallelism.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `sentinel-config.yaml` into
//!   strongly-typed structs.
//! - [`id_source`] -- [`AnomalyIdSource`] trait with UUID and sequential
//!   implementations.
//! - [`snapshot`] -- Per-tick entity validation.
//! - [`baseline`] -- Per-zone density baselines.
//! - [`history`] -- Sliding 60-second position history per entity.
//! - [`detectors`] -- The four rule evaluators.
//! - [`correlation`] -- Greedy spatiotemporal clustering and escalation.
//! - [`engine`] -- [`AnomalyEngine`], the per-tick entry point.
//!
//! [`AnomalyIdSource`]: id_source::AnomalyIdSource
//! [`AnomalyEngine`]: engine::AnomalyEngine

pub mod baseline;
pub mod config;
pub mod correlation;
pub mod detectors;
pub mod engine;
pub mod history;
pub mod id_source;
pub mod snapshot;

pub use config::SentinelConfig;
pub use engine::AnomalyEngine;
