//! Stage orchestration
//!
//! One explicit entry point; every path comes from `PipelineConfig`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;
use anyhow::Result;
use tracing::{debug, info};

use crate::cleaning::{prepare_customer_review, prepare_marketing_campaign};
use crate::data::write_csv;
use crate::config::PipelineConfig;
use crate::kpi::{run_kpi_stage, scored_dir_paths, KpiPaths, KpiRecord, KpiRun};
use crate::report::{DashboardReport, JsonFormatter};
use crate::sentiment::LexiconScorer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// raw → processed
    Clean,
    /// processed → scored
    Kpi,
    /// Re-score the scored directory, then write the report
    Report,
    /// Clean, KPI, report
    All,
}

impl FromStr for Stage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clean" => Ok(Stage::Clean),
            "kpi" => Ok(Stage::Kpi),
            "report" => Ok(Stage::Report),
            "all" => Ok(Stage::All),
            other => anyhow::bail!("Unknown stage '{}' (expected clean, kpi, report or all)", other),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Clean => "clean",
            Stage::Kpi => "kpi",
            Stage::Report => "report",
            Stage::All => "all",
        };
        f.write_str(name)
    }
}

/// What a pipeline run produced
#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
    pub cleaned_reviews: Option<usize>,
    pub cleaned_profiles: Option<usize>,
    pub scored_reviews: Option<usize>,
    pub scored_profiles: Option<usize>,
    pub kpis: Option<KpiRecord>,
    pub report: Option<DashboardReport>,
    pub written: Vec<PathBuf>,
}

/// Run `stage` with the layout and column selection in `config`
///
/// Stages run in order and stop at the first error; files written by an
/// earlier stage are kept.
pub fn run_pipeline(config: &PipelineConfig, stage: Stage) -> Result<PipelineOutcome> {
    let start = Instant::now();
    info!("Running pipeline stage '{}' in {:?}", stage, config.data_dir);

    let mut outcome = PipelineOutcome::default();
    let scorer = LexiconScorer::new();

    if matches!(stage, Stage::Clean | Stage::All) {
        run_clean(config, &mut outcome)?;
    }

    let kpi_paths = match stage {
        Stage::Kpi | Stage::All => Some(KpiPaths {
            reviews: config.cleaned_reviews_path(),
            profiles: config.cleaned_profiles_path(),
            output_dir: config.scored_dir_path(),
        }),
        Stage::Report => Some(scored_dir_paths(&config.scored_dir_path())),
        Stage::Clean => None,
    };

    if let Some(paths) = kpi_paths {
        let stage_start = Instant::now();
        let run = run_kpi_stage(&paths, &config.columns, &scorer)?;
        info!("KPI stage: {:.1} ms", stage_start.elapsed().as_secs_f64() * 1000.0);

        outcome.scored_reviews = Some(run.tables.reviews.height());
        outcome.scored_profiles = Some(run.tables.profiles.height());
        outcome.kpis = Some(run.record);
        outcome.written.extend(run.written.iter().cloned());
        debug!("KPI summary: {}", JsonFormatter::format_kpis(&run.record));

        if matches!(stage, Stage::Report | Stage::All) {
            run_report(config, &run, &mut outcome)?;
        }
    }

    info!(
        "Pipeline stage '{}' complete: {} files written ({:.1} ms)",
        stage,
        outcome.written.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(outcome)
}

/// Both tables are cleaned before either is written, so a bad input leaves
/// the processed directory untouched
fn run_clean(config: &PipelineConfig, outcome: &mut PipelineOutcome) -> Result<()> {
    let stage_start = Instant::now();

    info!("Cleaning customer reviews: {:?}", config.raw_reviews_path());
    let mut reviews = prepare_customer_review(&config.raw_reviews_path())?;
    info!("Cleaning marketing campaign: {:?}", config.raw_profiles_path());
    let mut profiles = prepare_marketing_campaign(&config.raw_profiles_path())?;

    let reviews_out = config.cleaned_reviews_path();
    let profiles_out = config.cleaned_profiles_path();
    write_csv(&mut reviews, &reviews_out, None)?;
    write_csv(&mut profiles, &profiles_out, None)?;

    info!(
        "  {} reviews → {:?}, {} profiles → {:?}",
        reviews.height(),
        reviews_out,
        profiles.height(),
        profiles_out
    );

    outcome.cleaned_reviews = Some(reviews.height());
    outcome.cleaned_profiles = Some(profiles.height());
    outcome.written.push(reviews_out);
    outcome.written.push(profiles_out);

    info!("Cleaning stage: {:.1} ms", stage_start.elapsed().as_secs_f64() * 1000.0);
    Ok(())
}

fn run_report(config: &PipelineConfig, run: &KpiRun, outcome: &mut PipelineOutcome) -> Result<()> {
    let stage_start = Instant::now();

    let report = DashboardReport::build(&run.tables, &run.record, config.histogram_bins)?;
    let written = report.write(&config.scored_dir_path())?;

    outcome.written.extend(written);
    outcome.report = Some(report);

    info!("Report stage: {:.1} ms", stage_start.elapsed().as_secs_f64() * 1000.0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_parsing() {
        assert_eq!("clean".parse::<Stage>().unwrap(), Stage::Clean);
        assert_eq!(" KPI ".parse::<Stage>().unwrap(), Stage::Kpi);
        assert_eq!("report".parse::<Stage>().unwrap(), Stage::Report);
        assert_eq!("all".parse::<Stage>().unwrap(), Stage::All);
        assert!("publish".parse::<Stage>().is_err());
    }

    #[test]
    fn test_stage_display_round_trips() {
        for stage in [Stage::Clean, Stage::Kpi, Stage::Report, Stage::All] {
            assert_eq!(stage.to_string().parse::<Stage>().unwrap(), stage);
        }
    }

    #[test]
    fn test_missing_raw_input_fails_clean_stage() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::from_data_dir(dir.path());

        let err = run_pipeline(&config, Stage::Clean).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::PipelineError>(),
            Some(crate::PipelineError::MissingFile { .. })
        ));
    }

    #[test]
    fn test_clean_stage_writes_nothing_when_profiles_missing() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        std::fs::create_dir_all(&raw).unwrap();
        std::fs::write(
            raw.join("Customer_Review.csv"),
            "Gender,Education,Review,Purchased\nmale,phd,Great,1\n",
        )
        .unwrap();
        let config = PipelineConfig::from_data_dir(dir.path());

        assert!(run_pipeline(&config, Stage::Clean).is_err());
        assert!(!config.cleaned_reviews_path().exists());
        assert!(!config.cleaned_profiles_path().exists());
    }
}
