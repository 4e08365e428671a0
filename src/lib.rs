//! Circularity Trade-offs - MRIO analysis of circular economy interventions
//!
//! This crate solves a multi-regional input-output model, perturbs it with
//! circular economy scenarios, and classifies how each region and sector
//! fares across several environmental and socio-economic indicators
//! (win-win, win-lose, tie-lose and so on).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
