//! Runs the demo model and plan through the file adapters.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use circularity_tradeoffs::adapters::{JsonModelSource, JsonReportWriter, YamlPlanLoader};
use circularity_tradeoffs::application::{RunAnalysisCommand, RunAnalysisHandler};
use circularity_tradeoffs::ports::{ModelSource, StorageError};
use tempfile::TempDir;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn demo_inputs_load() {
    let model = JsonModelSource::new(demo("model.json")).load().unwrap();
    assert_eq!(model.entities().len(), 9);
    assert_eq!(model.entities().regions(), vec!["AT", "DE", "BR"]);

    let plan = YamlPlanLoader::new(demo("plan.yaml")).load().unwrap();
    assert_eq!(plan.scenario.deltas.len(), 2);
    assert_eq!(plan.perspectives.len(), 2);
    assert_eq!(plan.report_prefix, "demo");
}

#[test]
fn demo_run_writes_json_report() {
    let out = TempDir::new().unwrap();
    let plan = YamlPlanLoader::new(demo("plan.yaml")).load().unwrap();
    let handler = RunAnalysisHandler::new(
        Arc::new(JsonModelSource::new(demo("model.json"))),
        Arc::new(JsonReportWriter::new(out.path())),
    );

    let summary = handler.handle(RunAnalysisCommand { plan }).unwrap();
    assert_eq!(summary.analyses.len(), 3);
    assert!(summary.zero_baseline_indicators.is_empty());

    let files: Vec<_> = fs::read_dir(out.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("demo_"));
    assert!(name.ends_with(&format!("_{}.json", summary.run_id.short())));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&files[0]).unwrap()).unwrap();
    let tables: Vec<&str> = report["tables"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(tables.len(), 9);
    assert!(tables.contains(&"geo_ghg_detail"));
    assert!(tables.contains(&"imp_eu_footprint_categories"));
    assert!(tables.contains(&"sec_fert_compost_totals"));
}

#[test]
fn compost_substitution_trades_fertiliser_for_compost_emissions() {
    let out = TempDir::new().unwrap();
    let plan = YamlPlanLoader::new(demo("plan.yaml")).load().unwrap();
    let handler = RunAnalysisHandler::new(
        Arc::new(JsonModelSource::new(demo("model.json"))),
        Arc::new(JsonReportWriter::new(out.path())),
    );

    let summary = handler.handle(RunAnalysisCommand { plan }).unwrap();

    // rows: EU, LAC, EU footprint
    let sectoral = summary.analysis("sec_fert_compost").unwrap();
    assert_eq!(sectoral.rows, 3);
    assert_eq!(sectoral.categories.len(), 1);
    assert_eq!(sectoral.categories[0].category, "win-lose");
    assert_eq!(sectoral.categories[0].count, 3);
}

#[test]
fn missing_model_file_is_reported() {
    let out = TempDir::new().unwrap();
    let plan = YamlPlanLoader::new(demo("plan.yaml")).load().unwrap();
    let handler = RunAnalysisHandler::new(
        Arc::new(JsonModelSource::new(out.path().join("absent.json"))),
        Arc::new(JsonReportWriter::new(out.path().join("reports"))),
    );

    let err = handler.handle(RunAnalysisCommand { plan }).unwrap_err();
    assert!(matches!(
        err,
        circularity_tradeoffs::application::RunAnalysisError::Storage(StorageError::NotFound(_))
    ));
    assert!(!out.path().join("reports").exists());
}
