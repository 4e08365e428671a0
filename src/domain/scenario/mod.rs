//! Scenario Module - Interventions and the perturbation engine.
//!
//! A `Scenario` is static configuration: an ordered list of `ScenarioDelta`s.
//! `PerturbationEngine::apply_scenario` turns it into a `Counterfactual`
//! without touching the baseline model.

mod engine;
mod intervention;
mod selector;

pub use engine::{Counterfactual, PerturbationEngine};
pub use intervention::{MatrixSlice, MatrixTarget, Rate, Scenario, ScenarioDelta};
pub use selector::Selector;
