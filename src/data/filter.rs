use super::model::{PitchRecord, PitchTable};

// ---------------------------------------------------------------------------
// Pitcher selection
// ---------------------------------------------------------------------------

/// Records thrown by `pitcher_id`, in table order.
///
/// An unknown pitcher yields an empty selection rather than an error.
pub fn select_pitcher<'a>(table: &'a PitchTable, pitcher_id: &str) -> Vec<&'a PitchRecord> {
    table
        .records()
        .iter()
        .filter(|r| r.pitcher == pitcher_id)
        .collect()
}

// ---------------------------------------------------------------------------
// Pitch-type partition
// ---------------------------------------------------------------------------

/// A pitcher's records split by one pitch type.
///
/// `matching` and `complement` are disjoint and together hold every input
/// record exactly once, each side in input order.
#[derive(Debug, Clone, Default)]
pub struct Partition<'a> {
    pub matching: Vec<&'a PitchRecord>,
    pub complement: Vec<&'a PitchRecord>,
}

/// Split `records` into the selected pitch type and the rest of the arsenal.
pub fn select_pitch_type<'a>(records: &[&'a PitchRecord], pitch_type: &str) -> Partition<'a> {
    let (matching, complement): (Vec<_>, Vec<_>) = records
        .iter()
        .copied()
        .partition(|r| r.pitch_type == pitch_type);
    Partition {
        matching,
        complement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn table() -> PitchTable {
        PitchTable::new(
            vec![
                record("Smith", "Fastball", 1.0, 2.0),
                record("Jones", "Slider", 3.0, 4.0),
                record("Smith", "Slider", 5.0, 6.0),
                record("Smith", "Fastball", 7.0, 8.0),
                record("Smith", "Knuckleball", 9.0, 10.0),
            ],
            0,
        )
    }

    #[test]
    fn select_pitcher_keeps_only_that_pitcher() {
        let table = table();
        let smith = select_pitcher(&table, "Smith");
        assert_eq!(smith.len(), 4);
        assert!(smith.iter().all(|r| r.pitcher == "Smith"));
    }

    #[test]
    fn unknown_pitcher_is_empty_not_an_error() {
        let table = table();
        assert!(select_pitcher(&table, "Nobody").is_empty());
        assert!(select_pitcher(&table, "smith").is_empty());
    }

    #[test]
    fn partition_is_disjoint_and_complete() {
        let table = table();
        let smith = select_pitcher(&table, "Smith");

        for pitch_type in ["Fastball", "Slider", "Knuckleball", "Cutter"] {
            let part = select_pitch_type(&smith, pitch_type);
            assert_eq!(part.matching.len() + part.complement.len(), smith.len());
            assert!(part.matching.iter().all(|r| r.pitch_type == pitch_type));
            assert!(part.complement.iter().all(|r| r.pitch_type != pitch_type));
            for r in &smith {
                let in_matching = part.matching.iter().any(|m| std::ptr::eq(*m, *r));
                let in_complement = part.complement.iter().any(|c| std::ptr::eq(*c, *r));
                assert!(in_matching ^ in_complement);
            }
        }
    }

    #[test]
    fn partition_preserves_input_order() {
        let table = table();
        let smith = select_pitcher(&table, "Smith");
        let part = select_pitch_type(&smith, "Fastball");
        let horz: Vec<f64> = part.matching.iter().map(|r| r.horz_rel_angle).collect();
        assert_eq!(horz, vec![1.0, 7.0]);
        let rest: Vec<f64> = part.complement.iter().map(|r| r.horz_rel_angle).collect();
        assert_eq!(rest, vec![5.0, 9.0]);
    }
}
