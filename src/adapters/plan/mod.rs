//! Analysis plan adapters.

mod yaml_plan_loader;

pub use yaml_plan_loader::YamlPlanLoader;
