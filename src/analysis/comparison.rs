use crate::data::filter::Partition;
use crate::data::model::{AngleFeature, PitchRecord};

use super::kde::{estimate_density, BandwidthRule, DensityCurve, DEFAULT_GRID_SIZE};
use super::stats::feature_values;

/// Knobs for density estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DensitySettings {
    pub grid_size: usize,
    pub bandwidth: BandwidthRule,
}

impl Default for DensitySettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            bandwidth: BandwidthRule::default(),
        }
    }
}

/// Selected pitch type vs. rest of the arsenal for one feature.
///
/// Either side is `None` when it has too few records for an estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityComparison {
    pub feature: AngleFeature,
    pub selected: Option<DensityCurve>,
    pub rest: Option<DensityCurve>,
}

/// One comparison per angular feature, in [`AngleFeature::ALL`] order.
/// The two sides are estimated independently, each over its own range.
pub fn compare_densities(partition: &Partition<'_>, settings: DensitySettings) -> Vec<DensityComparison> {
    AngleFeature::ALL
        .into_iter()
        .map(|feature| {
            let estimate = |records: &[&PitchRecord]| {
                estimate_density(
                    &feature_values(records, feature),
                    settings.grid_size,
                    settings.bandwidth,
                )
            };
            DensityComparison {
                feature,
                selected: estimate(&partition.matching),
                rest: estimate(&partition.complement),
            }
        })
        .collect()
}
