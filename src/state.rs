use std::path::{Path, PathBuf};

use crate::analysis::comparison::{compare_densities, DensityComparison, DensitySettings};
use crate::analysis::kde::BandwidthRule;
use crate::analysis::stats::{
    movement_ellipses, summarize_by_pitch_type, CategorySummary, MovementEllipse,
};
use crate::color::PitchColorMap;
use crate::config::AppConfig;
use crate::data::filter::{select_pitch_type, select_pitcher};
use crate::data::loader::load_file;
use crate::data::model::{pitch_types_of, PitchTable};

// ---------------------------------------------------------------------------
// Application context: everything fixed once a table is loaded
// ---------------------------------------------------------------------------

/// The loaded table plus the lookups every computation reads. Read-only.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub table: PitchTable,
    pub source: PathBuf,
    pub colors: PitchColorMap,
}

// ---------------------------------------------------------------------------
// Derived views for the current selection
// ---------------------------------------------------------------------------

/// Everything shown for one pitcher.
#[derive(Debug, Clone, PartialEq)]
pub struct PitcherView {
    pub pitcher: String,
    pub pitch_count: usize,
    /// Pitch types in order of first appearance.
    pub pitch_types: Vec<String>,
    pub summaries: Vec<CategorySummary>,
    pub ellipses: Vec<MovementEllipse>,
}

/// Everything shown for one pitch type of one pitcher.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchTypeView {
    pub pitch_type: String,
    pub selected_count: usize,
    pub rest_count: usize,
    pub comparisons: Vec<DensityComparison>,
}

/// Group and summarise one pitcher's records.
pub fn analyze_pitcher(ctx: &AppContext, pitcher: &str) -> PitcherView {
    let records = select_pitcher(&ctx.table, pitcher);
    let summaries = summarize_by_pitch_type(&records);
    let ellipses = movement_ellipses(&summaries);
    log::debug!(
        "{pitcher}: {} pitches, {} groups, {} ellipses",
        records.len(),
        summaries.len(),
        ellipses.len()
    );
    PitcherView {
        pitcher: pitcher.to_string(),
        pitch_count: records.len(),
        pitch_types: pitch_types_of(records.iter().copied()),
        summaries,
        ellipses,
    }
}

/// Density comparisons of `pitch_type` against the rest of `pitcher`'s arsenal.
pub fn analyze_pitch_type(
    ctx: &AppContext,
    pitcher: &str,
    pitch_type: &str,
    settings: DensitySettings,
) -> PitchTypeView {
    let records = select_pitcher(&ctx.table, pitcher);
    let partition = select_pitch_type(&records, pitch_type);
    let comparisons = compare_densities(&partition, settings);
    log::debug!(
        "{pitcher}/{pitch_type}: {} selected vs {} rest",
        partition.matching.len(),
        partition.complement.len()
    );
    PitchTypeView {
        pitch_type: pitch_type.to_string(),
        selected_count: partition.matching.len(),
        rest_count: partition.complement.len(),
        comparisons,
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded data (None until a file loads successfully).
    pub context: Option<AppContext>,

    /// Pitchers in order of first appearance.
    pub pitchers: Vec<String>,

    pub pitcher_view: Option<PitcherView>,
    pub pitch_type_view: Option<PitchTypeView>,

    pub density: DensitySettings,
    pub ellipse_segments: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            context: None,
            pitchers: Vec::new(),
            pitcher_view: None,
            pitch_type_view: None,
            density: config.density_settings(),
            ellipse_segments: config.ellipse_segments,
            status_message: None,
        }
    }

    /// Load a file and make it the current table. On failure the previous
    /// table is discarded and the error is shown.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => self.set_table(table, path.to_path_buf()),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.clear();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded table and select its first pitcher.
    pub fn set_table(&mut self, table: PitchTable, source: PathBuf) {
        self.pitchers = table.pitchers();
        self.context = Some(AppContext {
            table,
            source,
            colors: PitchColorMap::default(),
        });
        self.status_message = None;

        match self.pitchers.first().cloned() {
            Some(first) => self.select_pitcher(&first),
            None => {
                self.pitcher_view = None;
                self.pitch_type_view = None;
                self.status_message = Some("No complete pitch rows in file".to_string());
            }
        }
    }

    fn clear(&mut self) {
        self.context = None;
        self.pitchers.clear();
        self.pitcher_view = None;
        self.pitch_type_view = None;
    }

    pub fn selected_pitcher(&self) -> Option<&str> {
        self.pitcher_view.as_ref().map(|v| v.pitcher.as_str())
    }

    pub fn selected_pitch_type(&self) -> Option<&str> {
        self.pitch_type_view.as_ref().map(|v| v.pitch_type.as_str())
    }

    /// Recompute the pitcher view and reset the pitch type to that
    /// pitcher's first one.
    pub fn select_pitcher(&mut self, pitcher: &str) {
        let Some(ctx) = &self.context else {
            return;
        };
        let view = analyze_pitcher(ctx, pitcher);
        let first_type = view.pitch_types.first().cloned();
        self.pitcher_view = Some(view);
        self.pitch_type_view = None;

        if let Some(pitch_type) = first_type {
            self.select_pitch_type(&pitch_type);
        }
    }

    /// Recompute the density comparisons for the current pitcher.
    pub fn select_pitch_type(&mut self, pitch_type: &str) {
        let (Some(ctx), Some(pitcher)) = (&self.context, self.selected_pitcher()) else {
            return;
        };
        let view = analyze_pitch_type(ctx, pitcher, pitch_type, self.density);
        self.pitch_type_view = Some(view);
    }

    /// Switch bandwidth rule and refresh the current comparisons.
    pub fn set_bandwidth(&mut self, rule: BandwidthRule) {
        if self.density.bandwidth == rule {
            return;
        }
        self.density.bandwidth = rule;
        if let Some(pitch_type) = self.selected_pitch_type().map(str::to_string) {
            self.select_pitch_type(&pitch_type);
        }
    }
}
