//! RunAnalysisHandler - Command handler for one trade-off analysis run.
//!
//! Pipeline: load → characterize → baseline solve → perturbation →
//! counterfactual solve → footprints → harmonization → aggregation →
//! classification → reporting. The first failing stage aborts the run and
//! nothing is written.

use std::fmt;
use std::sync::Arc;

use crate::application::AnalysisPlan;
use crate::domain::analysis::{AnalysisSummary, RunSummary, TradeoffAnalyzer};
use crate::domain::foundation::{AnalysisError, RunId, Timestamp, ValidationError};
use crate::domain::harmonization::Harmonizer;
use crate::domain::io_model::{compute_footprint, ImpactTable, LeontiefSolver};
use crate::domain::reporting::RunReport;
use crate::domain::scenario::PerturbationEngine;
use crate::ports::{ModelSource, ReportSink, StorageError};

/// Command to run the analysis described by a plan.
#[derive(Debug, Clone)]
pub struct RunAnalysisCommand {
    pub plan: AnalysisPlan,
}

/// Pipeline stage, used to locate failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Characterization,
    BaselineSolve,
    Perturbation,
    CounterfactualSolve,
    Footprint,
    Harmonization,
    Aggregation,
    Classification,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Characterization => "characterization",
            Stage::BaselineSolve => "baseline solve",
            Stage::Perturbation => "scenario perturbation",
            Stage::CounterfactualSolve => "counterfactual solve",
            Stage::Footprint => "footprint",
            Stage::Harmonization => "harmonization",
            Stage::Aggregation => "aggregation",
            Stage::Classification => "classification",
        };
        write!(f, "{}", s)
    }
}

/// Error type for an analysis run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunAnalysisError {
    /// The plan is inconsistent.
    InvalidPlan(ValidationError),
    /// Loading the model or writing the report failed.
    Storage(StorageError),
    /// A pipeline stage failed.
    Analysis { stage: Stage, source: AnalysisError },
}

impl RunAnalysisError {
    /// Stage that failed, if the failure happened inside the pipeline.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            RunAnalysisError::Analysis { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl fmt::Display for RunAnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunAnalysisError::InvalidPlan(err) => write!(f, "Invalid analysis plan: {}", err),
            RunAnalysisError::Storage(err) => write!(f, "{}", err),
            RunAnalysisError::Analysis { stage, source } => {
                write!(f, "{} failed [{}]: {}", stage, source.code(), source)
            }
        }
    }
}

impl std::error::Error for RunAnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunAnalysisError::InvalidPlan(err) => Some(err),
            RunAnalysisError::Storage(err) => Some(err),
            RunAnalysisError::Analysis { source, .. } => Some(source),
        }
    }
}

impl From<StorageError> for RunAnalysisError {
    fn from(err: StorageError) -> Self {
        RunAnalysisError::Storage(err)
    }
}

fn at(stage: Stage) -> impl Fn(AnalysisError) -> RunAnalysisError {
    move |source| RunAnalysisError::Analysis { stage, source }
}

/// Handler for analysis runs.
pub struct RunAnalysisHandler {
    model_source: Arc<dyn ModelSource>,
    report_sink: Arc<dyn ReportSink>,
}

impl RunAnalysisHandler {
    pub fn new(model_source: Arc<dyn ModelSource>, report_sink: Arc<dyn ReportSink>) -> Self {
        Self {
            model_source,
            report_sink,
        }
    }

    pub fn handle(&self, cmd: RunAnalysisCommand) -> Result<RunSummary, RunAnalysisError> {
        let plan = cmd.plan;
        let run_id = RunId::new();
        let started_at = Timestamp::now();

        // 1. Check the plan before touching data
        plan.validate().map_err(RunAnalysisError::InvalidPlan)?;
        tracing::info!(%run_id, scenario = %plan.scenario.name, "Starting analysis run");

        // 2. Load the model, folding emission stressors if requested
        let mut model = self.model_source.load()?;
        if let Some(characterization) = &plan.characterization {
            let satellite = characterization
                .factors()
                .characterize(model.satellite())
                .map_err(at(Stage::Characterization))?;
            model = model
                .with_satellite(satellite)
                .map_err(|e| at(Stage::Characterization)(e.into()))?;
        }

        // 3. Baseline inverse and intensities, computed once
        let baseline = LeontiefSolver::new(model.coefficients()).map_err(at(Stage::BaselineSolve))?;
        let intensities = baseline
            .solve_intensities(model.satellite(), model.final_demand(), &plan.indicators)
            .map_err(at(Stage::BaselineSolve))?;

        // 4. Counterfactual matrices and their inverse
        let counterfactual =
            PerturbationEngine::apply_scenario(&model, &plan.scenario).map_err(at(Stage::Perturbation))?;
        let scenario_solver =
            LeontiefSolver::new(&counterfactual.coefficients).map_err(at(Stage::CounterfactualSolve))?;

        // 5. Footprints, harmonization and aggregation per perspective
        let harmonizer = Harmonizer::new(plan.sign_flip.iter().cloned());
        let mut zero_baseline_indicators: Vec<String> = Vec::new();
        let mut tables = Vec::with_capacity(plan.perspectives.len());

        for perspective in &plan.perspectives {
            let before = compute_footprint(&perspective.scope, &intensities, &baseline, model.final_demand())
                .map_err(at(Stage::Footprint))?;
            let after = compute_footprint(
                &perspective.scope,
                &intensities,
                &scenario_solver,
                &counterfactual.final_demand,
            )
            .map_err(at(Stage::Footprint))?;

            let delta = harmonizer
                .harmonize(&before, &after)
                .map_err(at(Stage::Harmonization))?;
            for indicator in delta.zero_baseline_indicators {
                if !zero_baseline_indicators.contains(&indicator) {
                    zero_baseline_indicators.push(indicator);
                }
            }

            tables.push(
                perspective
                    .aggregation
                    .apply(&delta.table)
                    .map_err(at(Stage::Aggregation))?,
            );
        }
        let combined = ImpactTable::concat(&tables).map_err(at(Stage::Aggregation))?;

        // 6. Classification
        let analyses = plan
            .analyses
            .iter()
            .map(|spec| TradeoffAnalyzer::run(spec, &combined))
            .collect::<Result<Vec<_>, _>>()
            .map_err(at(Stage::Classification))?;

        // 7. Report
        let summary = RunSummary {
            run_id,
            scenario: plan.scenario.name.clone(),
            started_at,
            completed_at: Timestamp::now(),
            zero_baseline_indicators,
            analyses: analyses.iter().map(AnalysisSummary::from).collect(),
        };
        let report = RunReport::new(plan.report_prefix.clone(), summary.clone(), &analyses);
        let location = self.report_sink.write(&report)?;

        tracing::info!(
            %run_id,
            scenario = %summary.scenario,
            analyses = summary.analyses.len(),
            zero_baseline = summary.zero_baseline_indicators.len(),
            elapsed_ms = summary.completed_at.duration_since(&started_at).num_milliseconds(),
            report = %location,
            "Analysis run completed"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::model::InMemoryModelSource;
    use crate::adapters::reporting::InMemoryReportSink;
    use crate::application::Perspective;
    use crate::domain::analysis::AnalysisSpec;
    use crate::domain::foundation::AxisIndex;
    use crate::domain::harmonization::{Aggregation, RegionGroup};
    use crate::domain::io_model::{
        CoefficientMatrix, FinalDemandMatrix, FootprintScope, LabeledMatrix, MrioModel,
        SatelliteAccount,
    };
    use crate::domain::scenario::{MatrixTarget, Rate, Scenario, ScenarioDelta, Selector};

    fn model() -> MrioModel {
        let entities = AxisIndex::product(&["AT", "BR"], &["Agriculture", "Fertilisers"]).unwrap();
        let a = LabeledMatrix::from_rows(
            "coefficients",
            entities.clone(),
            entities.clone(),
            vec![
                vec![0.10, 0.00, 0.02, 0.00],
                vec![0.20, 0.05, 0.00, 0.00],
                vec![0.00, 0.00, 0.10, 0.00],
                vec![0.00, 0.00, 0.25, 0.05],
            ],
        )
        .unwrap();
        let y = LabeledMatrix::from_rows(
            "final_demand",
            entities.clone(),
            AxisIndex::product(&["AT", "BR"], &["Households"]).unwrap(),
            vec![vec![8.0, 1.0], vec![0.5, 0.0], vec![1.0, 6.0], vec![0.0, 0.5]],
        )
        .unwrap();
        let satellite = SatelliteAccount::from_rows(
            vec!["Value Added".to_string(), "GHG".to_string()],
            entities,
            vec![vec![4.0, 1.0, 3.0, 0.8], vec![2.0, 5.0, 3.0, 6.0]],
        )
        .unwrap();
        MrioModel::new(
            CoefficientMatrix::new(a).unwrap(),
            FinalDemandMatrix::new(y),
            satellite,
        )
        .unwrap()
    }

    fn plan() -> AnalysisPlan {
        AnalysisPlan {
            scenario: Scenario::new(
                "CE",
                vec![ScenarioDelta::RateChange {
                    name: "less fertiliser".to_string(),
                    target: MatrixTarget::Coefficients,
                    rows: Selector::all().with_items(["Fertilisers"]),
                    columns: Selector::all().with_items(["Agriculture"]),
                    rate: Rate::Value(-0.5),
                }],
            ),
            indicators: vec!["Value Added".to_string(), "GHG".to_string()],
            sign_flip: vec!["GHG".to_string()],
            characterization: None,
            perspectives: vec![Perspective {
                scope: FootprintScope::Production,
                aggregation: Aggregation::Groups {
                    groups: vec![RegionGroup::new("EU", ["AT"]), RegionGroup::new("LAC", ["BR"])],
                },
            }],
            analyses: vec![AnalysisSpec::Sectoral {
                name: "sec_ghg".to_string(),
                items: vec!["Fertilisers".to_string(), "Agriculture".to_string()],
                indicator: "GHG".to_string(),
            }],
            report_prefix: "test".to_string(),
        }
    }

    fn handler(sink: Arc<InMemoryReportSink>) -> RunAnalysisHandler {
        RunAnalysisHandler::new(Arc::new(InMemoryModelSource::new(model())), sink)
    }

    #[test]
    fn run_writes_one_report_and_returns_summary() {
        let sink = Arc::new(InMemoryReportSink::new());
        let summary = handler(sink.clone())
            .handle(RunAnalysisCommand { plan: plan() })
            .unwrap();

        assert_eq!(summary.scenario, "CE");
        assert!(summary.zero_baseline_indicators.is_empty());
        let sec = summary.analysis("sec_ghg").unwrap();
        assert_eq!(sec.rows, 2);

        let reports = sink.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].tables.len(), 3);
        assert!(reports[0].table("sec_ghg_categories").is_some());
    }

    #[test]
    fn fertiliser_cut_is_an_emission_win_for_fertilisers() {
        let sink = Arc::new(InMemoryReportSink::new());
        handler(sink.clone())
            .handle(RunAnalysisCommand { plan: plan() })
            .unwrap();

        let report = &sink.reports()[0];
        let detail = report.table("sec_ghg_detail").unwrap();
        // rows are regions; the first value column is Fertilisers
        for row in &detail.rows {
            match &row[1] {
                crate::domain::reporting::Cell::Number(v) => assert!(*v > 0.0),
                other => panic!("unexpected cell {:?}", other),
            }
        }
    }

    #[test]
    fn invalid_plan_fails_before_loading() {
        let sink = Arc::new(InMemoryReportSink::new());
        let mut plan = plan();
        plan.indicators.clear();
        let err = handler(sink.clone())
            .handle(RunAnalysisCommand { plan })
            .unwrap_err();
        assert!(matches!(err, RunAnalysisError::InvalidPlan(_)));
        assert!(sink.reports().is_empty());
    }

    #[test]
    fn selector_mismatch_aborts_at_perturbation() {
        let sink = Arc::new(InMemoryReportSink::new());
        let mut plan = plan();
        plan.scenario.deltas = vec![ScenarioDelta::RateChange {
            name: "typo".to_string(),
            target: MatrixTarget::Coefficients,
            rows: Selector::regions(["XX"]),
            columns: Selector::all(),
            rate: Rate::Value(-0.5),
        }];
        let err = handler(sink.clone())
            .handle(RunAnalysisCommand { plan })
            .unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Perturbation));
        assert!(sink.reports().is_empty());
    }

    #[test]
    fn unknown_analysis_region_aborts_at_classification() {
        let sink = Arc::new(InMemoryReportSink::new());
        let mut plan = plan();
        plan.analyses = vec![AnalysisSpec::Geographical {
            name: "geo".to_string(),
            regions: vec!["EU".to_string(), "APAC".to_string()],
            indicator: "GHG".to_string(),
        }];
        let err = handler(sink.clone())
            .handle(RunAnalysisCommand { plan })
            .unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Classification));
        assert!(err.to_string().starts_with("classification failed [SELECTOR_MISMATCH]"));
    }
}
