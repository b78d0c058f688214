use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, info_span, trace};

use samara_ingest::{read_sheet, write_result};
use samara_map::{
    AnalysisRequest, StoredAnalysis, load_analysis, matcher_from_settings, save_analysis,
};
use samara_merge::{MergeOptions, merge_rows};
use samara_model::{MergeResult, Sheet};

use crate::cli::{AnalyzeArgs, CompareArgs, ConfigAction, MatcherArgs, MergeArgs, SheetArgs};
use crate::logging::redact_value;
use crate::settings::{Settings, save_settings_to, settings_path};
use crate::types::{AnalysisReport, MergeReport, SheetInfo};

pub fn run_analyze(args: &AnalyzeArgs, settings: &Settings) -> Result<AnalysisReport> {
    let _span = info_span!("analyze").entered();
    let settings = with_matcher_args(settings, &args.matcher);
    let (left, right) = load_pair(&args.sheets)?;
    let report = analyze(&args.sheets, &left, &right, &settings);

    if let Some(path) = &args.save {
        let stored = StoredAnalysis::new(
            report.analysis.clone(),
            &report.matcher,
            &left.headers,
            &right.headers,
        );
        save_analysis(path, &stored)
            .with_context(|| format!("save analysis to {}", path.display()))?;
    }
    Ok(report)
}

pub fn run_merge(args: &MergeArgs, settings: &Settings) -> Result<MergeReport> {
    let _span = info_span!("merge", output = %args.output.display()).entered();
    let settings = with_matcher_args(settings, &args.matcher);
    let (left, right) = load_pair(&args.sheets)?;

    let report = match &args.analysis {
        Some(path) => stored_report(path, &args.sheets, &left, &right)?,
        None => analyze(&args.sheets, &left, &right, &settings),
    };

    let mut options = settings.merge.options();
    if let Some(separator) = &args.separator {
        options.separator.clone_from(separator);
    }
    let options = with_join_key(options, args.join_key.as_deref());

    let result = merge(&left, &right, &report, &options)?;
    write_result(&args.output, &result)
        .with_context(|| format!("write {}", args.output.display()))?;

    Ok(MergeReport {
        analysis: report,
        result,
        output: Some(args.output.clone()),
    })
}

pub fn run_compare(args: &CompareArgs, settings: &Settings) -> Result<MergeReport> {
    let _span = info_span!("compare").entered();
    let settings = with_matcher_args(settings, &args.matcher);
    let (left, right) = load_pair(&args.sheets)?;
    let report = analyze(&args.sheets, &left, &right, &settings);

    let options = with_join_key(settings.merge.options(), args.join_key.as_deref());
    let result = merge(&left, &right, &report, &options)?;

    Ok(MergeReport {
        analysis: report,
        result,
        output: None,
    })
}

/// Handles `config path|show|init`; returns the text to print.
pub fn run_config(
    action: ConfigAction,
    explicit: Option<&Path>,
    settings: &Settings,
) -> Result<String> {
    let path = || -> Result<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(settings_path)
            .ok_or_else(|| anyhow!("could not determine settings path"))
    };
    match action {
        ConfigAction::Path => Ok(path()?.display().to_string()),
        ConfigAction::Show => settings.redacted().to_toml(),
        ConfigAction::Init { force } => {
            let path = path()?;
            save_settings_to(&path, &Settings::default(), force)?;
            Ok(format!("Wrote default settings to {}", path.display()))
        }
    }
}

/// Analysis as printed by `analyze --json`.
pub fn analysis_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(&report.analysis).context("serialize analysis")
}

fn with_matcher_args(settings: &Settings, args: &MatcherArgs) -> Settings {
    let mut settings = settings.clone();
    settings.apply_matcher_args(args);
    settings
}

fn with_join_key(options: MergeOptions, key: Option<&str>) -> MergeOptions {
    match key {
        Some(key) => options.with_key(key),
        None => options,
    }
}

fn load_pair(args: &SheetArgs) -> Result<(Sheet, Sheet)> {
    let left = read_sheet(&args.left, args.left_sheet.as_deref())
        .with_context(|| format!("read left sheet {}", args.left.display()))?;
    let right = read_sheet(&args.right, args.right_sheet.as_deref())
        .with_context(|| format!("read right sheet {}", args.right.display()))?;
    Ok((left, right))
}

fn analyze(args: &SheetArgs, left: &Sheet, right: &Sheet, settings: &Settings) -> AnalysisReport {
    let matcher = matcher_from_settings(&settings.llm);
    let request = AnalysisRequest::from_sheets(left, right, settings.llm.sample_rows);
    let analysis = matcher.analyze(&request);
    info!(
        matcher = matcher.name(),
        mapped = analysis.mappings.len(),
        unmatched_left = analysis.unmatched_left.len(),
        unmatched_right = analysis.unmatched_right.len(),
        strategy = %analysis.merge_strategy,
        "analyzed columns"
    );
    AnalysisReport {
        left: SheetInfo::new(&args.left, left),
        right: SheetInfo::new(&args.right, right),
        matcher: matcher.name().to_string(),
        analysis,
    }
}

fn stored_report(
    path: &Path,
    args: &SheetArgs,
    left: &Sheet,
    right: &Sheet,
) -> Result<AnalysisReport> {
    let stored =
        load_analysis(path).with_context(|| format!("load analysis {}", path.display()))?;
    stored
        .verify(&left.headers, &right.headers)
        .with_context(|| format!("analysis {} does not fit these sheets", path.display()))?;
    debug!(
        path = %path.display(),
        matcher = %stored.matcher,
        "using stored analysis"
    );
    Ok(AnalysisReport {
        left: SheetInfo::new(&args.left, left),
        right: SheetInfo::new(&args.right, right),
        matcher: stored.matcher,
        analysis: stored.analysis,
    })
}

fn merge(
    left: &Sheet,
    right: &Sheet,
    report: &AnalysisReport,
    options: &MergeOptions,
) -> Result<MergeResult> {
    let result = merge_rows(left, right, &report.analysis, options).context("merge rows")?;
    for conflict in &result.conflicts {
        trace!(
            row = conflict.row,
            column = %conflict.column,
            left = redact_value(&conflict.left),
            right = redact_value(&conflict.right),
            "conflicting cell"
        );
    }
    Ok(result)
}
