use std::collections::BTreeMap;
use std::f64::consts::TAU;

use crate::data::model::{AngleFeature, PitchRecord, PitchType};

/// Fewest records a pitch type needs before it gets a movement ellipse.
pub const MIN_ELLIPSE_SAMPLES: usize = 2;

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (N − 1 denominator); NaN below two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Mean and sample standard deviation of one measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub std: f64,
}

impl Summary {
    pub fn of(values: &[f64]) -> Self {
        Summary {
            mean: mean(values),
            std: sample_std(values),
        }
    }
}

// ---------------------------------------------------------------------------
// Per pitch-type release-angle summaries
// ---------------------------------------------------------------------------

/// Release-angle summary for one pitch type of one pitcher.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub pitch_type: String,
    pub count: usize,
    /// `HorzRelAngle`
    pub horizontal: Summary,
    /// `VertRelAngle`
    pub vertical: Summary,
}

/// Group `records` by pitch-type label (sorted by label) and summarise the
/// horizontal and vertical release angle of each group.
pub fn summarize_by_pitch_type(records: &[&PitchRecord]) -> Vec<CategorySummary> {
    let mut groups: BTreeMap<&str, Vec<&PitchRecord>> = BTreeMap::new();
    for &r in records {
        groups.entry(r.pitch_type.as_str()).or_default().push(r);
    }

    groups
        .into_iter()
        .map(|(label, group)| {
            let horz = feature_values(&group, AngleFeature::HorzRelAngle);
            let vert = feature_values(&group, AngleFeature::VertRelAngle);
            CategorySummary {
                pitch_type: label.to_string(),
                count: group.len(),
                horizontal: Summary::of(&horz),
                vertical: Summary::of(&vert),
            }
        })
        .collect()
}

/// Collect one feature across a set of records.
pub fn feature_values(records: &[&PitchRecord], feature: AngleFeature) -> Vec<f64> {
    records.iter().map(|r| feature.value(r)).collect()
}

// ---------------------------------------------------------------------------
// Movement ellipses
// ---------------------------------------------------------------------------

/// Axis-aligned 1-SD ellipse of release angles for one pitch type.
///
/// Half-axes are the per-axis standard deviations; correlation between the
/// two angles is not represented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementEllipse {
    pub pitch_type: PitchType,
    pub count: usize,
    /// `[mean horizontal, mean vertical]`
    pub center: [f64; 2],
    /// `[std horizontal, std vertical]`
    pub half_axes: [f64; 2],
}

impl MovementEllipse {
    /// Polygon approximation of the ellipse boundary with `segments` vertices
    /// (at least 3). The last vertex is not repeated.
    pub fn outline(&self, segments: usize) -> Vec<[f64; 2]> {
        let segments = segments.max(3);
        let [cx, cy] = self.center;
        let [a, b] = self.half_axes;
        (0..segments)
            .map(|i| {
                let theta = TAU * i as f64 / segments as f64;
                [cx + a * theta.cos(), cy + b * theta.sin()]
            })
            .collect()
    }
}

/// Ellipses for every summary whose label is a known pitch type and whose
/// group has at least [`MIN_ELLIPSE_SAMPLES`] records. Others are skipped.
pub fn movement_ellipses(summaries: &[CategorySummary]) -> Vec<MovementEllipse> {
    summaries
        .iter()
        .filter(|s| s.count >= MIN_ELLIPSE_SAMPLES)
        .filter_map(|s| {
            let pitch_type = PitchType::from_label(&s.pitch_type)?;
            Some(MovementEllipse {
                pitch_type,
                count: s.count,
                center: [s.horizontal.mean, s.vertical.mean],
                half_axes: [s.horizontal.std, s.vertical.std],
            })
        })
        .collect()
}
