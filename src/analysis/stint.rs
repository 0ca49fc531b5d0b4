//! Stint grouping

use crate::types::LapRecord;

/// One driver's laps on a single tire set, ordered by lap number
#[derive(Debug, Clone, PartialEq)]
pub struct Stint<'a> {
    /// Stint identifier carried on the lap records
    pub id: u32,
    /// Laps of the stint, ascending `lap_number`
    pub laps: Vec<&'a LapRecord>,
}

impl<'a> Stint<'a> {
    /// Laps of this stint admitted by `predicate`, keeping lap order.
    pub fn clean_laps(&self, predicate: impl Fn(&LapRecord) -> bool) -> Vec<&'a LapRecord> {
        self.laps.iter().copied().filter(|lap| predicate(lap)).collect()
    }

    fn first_lap_number(&self) -> u32 {
        self.laps.first().map_or(u32::MAX, |lap| lap.lap_number)
    }
}

/// Partition one driver's laps into stints.
///
/// Laps without a stint id are dropped. Stints come out ordered by the lap number of
/// their first lap, with ties kept in discovery order; the numeric value of the stint
/// id plays no part in ordering.
pub fn group_by_stint<'a>(laps: &[&'a LapRecord]) -> Vec<Stint<'a>> {
    let mut stints: Vec<Stint<'a>> = Vec::new();

    for &lap in laps {
        let Some(id) = lap.stint_id else {
            continue;
        };
        match stints.iter_mut().find(|stint| stint.id == id) {
            Some(stint) => stint.laps.push(lap),
            None => stints.push(Stint { id, laps: vec![lap] }),
        }
    }

    for stint in &mut stints {
        stint.laps.sort_by_key(|lap| lap.lap_number);
    }
    stints.sort_by_key(Stint::first_lap_number);
    stints
}
