use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// AngleFeature – the four angular measurements of a pitch
// ---------------------------------------------------------------------------

/// One of the four angular columns carried by every pitch record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AngleFeature {
    VertRelAngle,
    HorzRelAngle,
    VertApprAngle,
    HorzApprAngle,
}

impl AngleFeature {
    /// All features, in the order the density charts are laid out.
    pub const ALL: [AngleFeature; 4] = [
        AngleFeature::VertRelAngle,
        AngleFeature::HorzRelAngle,
        AngleFeature::VertApprAngle,
        AngleFeature::HorzApprAngle,
    ];

    /// Column name in the source file.
    pub fn column(self) -> &'static str {
        match self {
            AngleFeature::VertRelAngle => "VertRelAngle",
            AngleFeature::HorzRelAngle => "HorzRelAngle",
            AngleFeature::VertApprAngle => "VertApprAngle",
            AngleFeature::HorzApprAngle => "HorzApprAngle",
        }
    }

    /// Human-readable axis label.
    pub fn label(self) -> &'static str {
        match self {
            AngleFeature::VertRelAngle => "Vertical Release Angle (°)",
            AngleFeature::HorzRelAngle => "Horizontal Release Angle (°)",
            AngleFeature::VertApprAngle => "Vertical Approach Angle (°)",
            AngleFeature::HorzApprAngle => "Horizontal Approach Angle (°)",
        }
    }

    /// Read this feature off a record.
    pub fn value(self, record: &PitchRecord) -> f64 {
        match self {
            AngleFeature::VertRelAngle => record.vert_rel_angle,
            AngleFeature::HorzRelAngle => record.horz_rel_angle,
            AngleFeature::VertApprAngle => record.vert_appr_angle,
            AngleFeature::HorzApprAngle => record.horz_appr_angle,
        }
    }
}

impl fmt::Display for AngleFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// PitchType – the categories the colour map knows about
// ---------------------------------------------------------------------------

/// Pitch-type labels with an assigned display colour.
///
/// Records keep their raw `TaggedPitchType` string; this enum only decides
/// whether a label is a known category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PitchType {
    Fastball,
    FourSeam,
    Sinker,
    Slider,
    Sweeper,
    Curveball,
    ChangeUp,
    Splitter,
    Cutter,
    Undefined,
    PitchOut,
}

impl PitchType {
    pub const ALL: [PitchType; 11] = [
        PitchType::Fastball,
        PitchType::FourSeam,
        PitchType::Sinker,
        PitchType::Slider,
        PitchType::Sweeper,
        PitchType::Curveball,
        PitchType::ChangeUp,
        PitchType::Splitter,
        PitchType::Cutter,
        PitchType::Undefined,
        PitchType::PitchOut,
    ];

    /// The label as it appears in the `TaggedPitchType` column.
    pub fn label(self) -> &'static str {
        match self {
            PitchType::Fastball => "Fastball",
            PitchType::FourSeam => "Four-Seam",
            PitchType::Sinker => "Sinker",
            PitchType::Slider => "Slider",
            PitchType::Sweeper => "Sweeper",
            PitchType::Curveball => "Curveball",
            PitchType::ChangeUp => "ChangeUp",
            PitchType::Splitter => "Splitter",
            PitchType::Cutter => "Cutter",
            PitchType::Undefined => "Undefined",
            PitchType::PitchOut => "PitchOut",
        }
    }

    /// Exact (case-sensitive) label lookup; `None` for unknown categories.
    pub fn from_label(label: &str) -> Option<PitchType> {
        PitchType::ALL.into_iter().find(|pt| pt.label() == label)
    }
}

impl fmt::Display for PitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// PitchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single pitch event with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchRecord {
    pub pitcher: String,
    pub pitch_type: String,
    pub vert_rel_angle: f64,
    pub horz_rel_angle: f64,
    pub vert_appr_angle: f64,
    pub horz_appr_angle: f64,
}

// ---------------------------------------------------------------------------
// PitchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All valid pitch records from one source file. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct PitchTable {
    records: Vec<PitchRecord>,
    /// Source rows discarded because a required field was missing.
    dropped_rows: usize,
}

impl PitchTable {
    pub fn new(records: Vec<PitchRecord>, dropped_rows: usize) -> Self {
        PitchTable {
            records,
            dropped_rows,
        }
    }

    pub fn records(&self) -> &[PitchRecord] {
        &self.records
    }

    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct pitcher identifiers in order of first appearance.
    pub fn pitchers(&self) -> Vec<String> {
        unique_in_order(self.records.iter().map(|r| r.pitcher.as_str()))
    }
}

/// Distinct pitch-type labels of `records`, in order of first appearance.
pub fn pitch_types_of<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a PitchRecord>,
{
    unique_in_order(records.into_iter().map(|r| r.pitch_type.as_str()))
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(pitcher: &str, pitch_type: &str, horz: f64, vert: f64) -> PitchRecord {
        PitchRecord {
            pitcher: pitcher.to_string(),
            pitch_type: pitch_type.to_string(),
            vert_rel_angle: vert,
            horz_rel_angle: horz,
            vert_appr_angle: vert - 5.0,
            horz_appr_angle: horz + 1.0,
        }
    }

    #[test]
    fn pitchers_keep_first_appearance_order() {
        let table = PitchTable::new(
            vec![
                record("Smith", "Slider", 0.0, 0.0),
                record("Jones", "Fastball", 0.0, 0.0),
                record("Smith", "Fastball", 0.0, 0.0),
                record("Adams", "Cutter", 0.0, 0.0),
            ],
            0,
        );
        assert_eq!(table.pitchers(), vec!["Smith", "Jones", "Adams"]);
        assert_eq!(
            pitch_types_of(table.records()),
            vec!["Slider", "Fastball", "Cutter"]
        );
    }

    #[test]
    fn pitch_type_labels_round_trip_and_unknowns_are_rejected() {
        for pt in PitchType::ALL {
            assert_eq!(PitchType::from_label(pt.label()), Some(pt));
        }
        assert_eq!(PitchType::from_label("Knuckleball"), None);
        assert_eq!(PitchType::from_label("fastball"), None);
    }

    #[test]
    fn feature_reads_matching_field() {
        let r = record("Smith", "Slider", 1.5, -2.0);
        assert_eq!(AngleFeature::HorzRelAngle.value(&r), 1.5);
        assert_eq!(AngleFeature::VertRelAngle.value(&r), -2.0);
        assert_eq!(AngleFeature::VertApprAngle.value(&r), -7.0);
        assert_eq!(AngleFeature::HorzApprAngle.value(&r), 2.5);
        assert_eq!(AngleFeature::HorzApprAngle.column(), "HorzApprAngle");
    }
}
