use std::path::Path;

use color_pipeline::{
    color::{color_ranges, parse_colors},
    PipelineError, SelectionPolicy, TrackerConfig,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackCliError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("No target colors given. Pass --colors or set 'target_colors' in the config file")]
    NoTargetColors,
}

/// Command-line overrides applied on top of an optional config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub colors: Option<String>,
    pub selection: Option<SelectionPolicy>,
    pub no_annotation: bool,
}

/// Load the config file (if any) and apply command-line overrides.
///
/// `--colors` replaces the configured list rather than extending it.
pub fn resolve_config(path: Option<&Path>, overrides: &Overrides) -> Result<TrackerConfig, TrackCliError> {
    let mut config = match path {
        Some(path) => TrackerConfig::from_file(path)?,
        None => TrackerConfig::default(),
    };

    if let Some(colors) = &overrides.colors {
        config.target_colors = parse_colors(colors)?.iter().collect();
    }
    if let Some(selection) = overrides.selection {
        config.selection = selection;
    }
    if overrides.no_annotation {
        config.annotation.enabled = false;
    }

    if config.target_colors.is_empty() {
        return Err(TrackCliError::NoTargetColors);
    }
    Ok(config)
}

/// Human-readable listing of the color table
pub fn color_table() -> String {
    let mut out = format!("{:<8} {:>16} {:>16}  {}\n", "color", "lower (h,s,v)", "upper (h,s,v)", "wraps");
    for range in color_ranges() {
        let (lower, upper) = range.range();
        out.push_str(&format!(
            "{:<8} {:>16} {:>16}  {}\n",
            range.label.to_string(),
            format!("{}, {}, {}", lower.hue, lower.saturation, lower.value),
            format!("{}, {}, {}", upper.hue, upper.saturation, upper.value),
            if range.wraps() { "yes" } else { "no" },
        ));
    }
    out
}
