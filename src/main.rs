use std::process::ExitCode;
use std::sync::Arc;

use circularity_tradeoffs::adapters::{JsonModelSource, JsonReportWriter, YamlPlanLoader};
use circularity_tradeoffs::application::{RunAnalysisCommand, RunAnalysisHandler};
use circularity_tradeoffs::config::{AppConfig, LoggingConfig};

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    let filter = logging.env_filter().map_err(|e| e.to_string())?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("error: {e}");
        return ExitCode::from(2);
    }
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {e}");
        return ExitCode::from(2);
    }

    tracing::debug!(
        model = %config.io.model_path.display(),
        plan = %config.io.plan_path.display(),
        output = %config.io.output_dir.display(),
        "circularity-tradeoffs starting"
    );

    let plan = match YamlPlanLoader::new(&config.io.plan_path).load() {
        Ok(plan) => plan,
        Err(e) => {
            tracing::error!("Failed to load analysis plan: {e}");
            return ExitCode::from(1);
        }
    };

    let handler = RunAnalysisHandler::new(
        Arc::new(JsonModelSource::new(&config.io.model_path)),
        Arc::new(JsonReportWriter::new(&config.io.output_dir)),
    );

    match handler.handle(RunAnalysisCommand { plan }) {
        Ok(summary) => {
            for analysis in &summary.analyses {
                println!("{} ({} rows)", analysis.name, analysis.rows);
                for count in &analysis.categories {
                    println!("  {:<16} {}", count.category, count.count);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(1)
        }
    }
}
