//! Driver scope resolution

use crate::types::{LapRecord, Session};

/// All laps of one driver, in session order
#[derive(Debug, Clone, PartialEq)]
pub struct DriverLaps<'a> {
    /// Driver code shared by every lap in `laps`
    pub code: &'a str,
    pub laps: Vec<&'a LapRecord>,
}

/// Resolve the drivers an analysis covers.
///
/// Without a filter every driver in the session is returned, in order of first
/// appearance. With a filter only laps whose driver code or driver number equals it
/// exactly are kept; an unknown driver yields an empty scope rather than an error.
pub fn resolve_drivers<'a>(session: &'a Session, driver_filter: Option<&str>) -> Vec<DriverLaps<'a>> {
    let mut drivers: Vec<DriverLaps<'a>> = Vec::new();

    let in_scope = session
        .laps
        .iter()
        .filter(|lap| driver_filter.is_none_or(|identifier| lap.matches_driver(identifier)));

    for lap in in_scope {
        match drivers.iter_mut().find(|driver| driver.code == lap.driver_code) {
            Some(driver) => driver.laps.push(lap),
            None => drivers.push(DriverLaps { code: &lap.driver_code, laps: vec![lap] }),
        }
    }

    drivers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SessionKey, SessionType};

    fn session() -> Session {
        let lap = |code: &str, number: &str, lap_number: u32| LapRecord {
            driver_code: code.to_string(),
            driver_number: number.to_string(),
            lap_number,
            ..Default::default()
        };
        Session::new(
            SessionKey::new(2024, "Silverstone", SessionType::Race),
            "British Grand Prix",
            vec![
                lap("HAM", "44", 1),
                lap("VER", "1", 1),
                lap("HAM", "44", 2),
                lap("NOR", "4", 1),
                lap("VER", "1", 2),
            ],
        )
    }

    #[test]
    fn all_drivers_in_first_appearance_order() {
        let session = session();
        let drivers = resolve_drivers(&session, None);
        let codes: Vec<&str> = drivers.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec!["HAM", "VER", "NOR"]);
        assert_eq!(drivers[0].laps.len(), 2);
        assert_eq!(drivers[2].laps.len(), 1);
    }

    #[test]
    fn filter_matches_code_or_number() {
        let session = session();

        let by_code = resolve_drivers(&session, Some("VER"));
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].laps.len(), 2);

        let by_number = resolve_drivers(&session, Some("44"));
        assert_eq!(by_number.len(), 1);
        assert_eq!(by_number[0].code, "HAM");
    }

    #[test]
    fn filter_is_exact() {
        let session = session();
        assert!(resolve_drivers(&session, Some("ver")).is_empty());
        assert!(resolve_drivers(&session, Some("LEC")).is_empty());
    }
}
