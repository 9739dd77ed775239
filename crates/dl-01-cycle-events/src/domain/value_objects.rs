//! Value objects describing the production cycle.

use serde::{Deserialize, Serialize};
use shared_types::{short_hex, Hash};
use std::fmt;
use std::time::Duration;

use super::error::CycleError;

/// The four stages of a cycle, in cycle order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PhaseName {
    Construction,
    Campaigning,
    Voting,
    Synchronisation,
}

impl PhaseName {
    pub const ALL: [PhaseName; 4] = [
        PhaseName::Construction,
        PhaseName::Campaigning,
        PhaseName::Voting,
        PhaseName::Synchronisation,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PhaseName::Construction => "Construction",
            PhaseName::Campaigning => "Campaigning",
            PhaseName::Voting => "Voting",
            PhaseName::Synchronisation => "Synchronisation",
        }
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a phase is currently allowed to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PhaseStatus {
    Producing,
    Collecting,
    Idle,
}

impl PhaseStatus {
    pub const ALL: [PhaseStatus; 3] = [
        PhaseStatus::Producing,
        PhaseStatus::Collecting,
        PhaseStatus::Idle,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PhaseStatus::Producing => "Producing",
            PhaseStatus::Collecting => "Collecting",
            PhaseStatus::Idle => "Idle",
        }
    }
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schedule of one phase within the cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseTimings {
    /// Distance from the cycle start.
    pub offset: Duration,
    pub production_time: Duration,
    pub collection_time: Duration,
}

impl PhaseTimings {
    pub fn new(offset: Duration, production_time: Duration, collection_time: Duration) -> Self {
        Self {
            offset,
            production_time,
            collection_time,
        }
    }

    pub fn total_time(&self) -> Duration {
        self.production_time + self.collection_time
    }

    /// Offset from the cycle start at which the phase enters `status`.
    pub fn offset_of(&self, status: PhaseStatus) -> Duration {
        match status {
            PhaseStatus::Producing => self.offset,
            PhaseStatus::Collecting => self.offset + self.production_time,
            PhaseStatus::Idle => self.offset + self.total_time(),
        }
    }
}

/// The four chained phase schedules of a cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleConfiguration {
    construction: PhaseTimings,
    campaigning: PhaseTimings,
    voting: PhaseTimings,
    synchronisation: PhaseTimings,
    cycle_duration: Duration,
}

impl Default for CycleConfiguration {
    fn default() -> Self {
        let secs = Duration::from_secs;
        Self::chained([
            (secs(2), secs(2)),
            (secs(3), secs(3)),
            (secs(3), secs(2)),
            (secs(2), secs(2)),
        ])
    }
}

impl CycleConfiguration {
    /// Build from `(production, collection)` pairs in cycle order; offsets are
    /// the running sum of the preceding phases.
    pub fn chained(durations: [(Duration, Duration); 4]) -> Self {
        let mut offset = Duration::ZERO;
        let timings = durations.map(|(production, collection)| {
            let timings = PhaseTimings::new(offset, production, collection);
            offset += timings.total_time();
            timings
        });
        let [construction, campaigning, voting, synchronisation] = timings;
        Self {
            construction,
            campaigning,
            voting,
            synchronisation,
            cycle_duration: offset,
        }
    }

    /// Build from explicit timings, rejecting any that do not chain.
    pub fn from_timings(timings: [PhaseTimings; 4]) -> Result<Self, CycleError> {
        let [construction, campaigning, voting, synchronisation] = timings;
        let cycle_duration = timings.iter().map(PhaseTimings::total_time).sum();
        let config = Self {
            construction,
            campaigning,
            voting,
            synchronisation,
            cycle_duration,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the scheduler relies on.
    pub fn validate(&self) -> Result<(), CycleError> {
        if self.cycle_duration.is_zero() {
            return Err(CycleError::InvalidConfiguration(
                "cycle duration must be greater than zero".into(),
            ));
        }
        if self.cycle_duration.as_millis() == 0 {
            return Err(CycleError::InvalidConfiguration(format!(
                "cycle duration {:?} is below clock resolution",
                self.cycle_duration
            )));
        }

        let mut expected_offset = Duration::ZERO;
        for (name, timings) in self.phases() {
            if timings.offset != expected_offset {
                return Err(CycleError::InvalidConfiguration(format!(
                    "{name} starts at {:?}, expected {:?}",
                    timings.offset, expected_offset
                )));
            }
            expected_offset += timings.total_time();
        }
        Ok(())
    }

    pub fn cycle_duration(&self) -> Duration {
        self.cycle_duration
    }

    pub fn timings(&self, name: PhaseName) -> &PhaseTimings {
        match name {
            PhaseName::Construction => &self.construction,
            PhaseName::Campaigning => &self.campaigning,
            PhaseName::Voting => &self.voting,
            PhaseName::Synchronisation => &self.synchronisation,
        }
    }

    /// All phases in cycle order.
    pub fn phases(&self) -> [(PhaseName, PhaseTimings); 4] {
        PhaseName::ALL.map(|name| (name, *self.timings(name)))
    }
}

/// A phase transition as observed by subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Phase {
    /// Latest accepted delta when the transition fired.
    pub previous_delta_hash: Hash,
    pub name: PhaseName,
    pub status: PhaseStatus,
    /// Unix millis at which the transition was emitted.
    pub utc_start_time: u64,
}

impl Phase {
    pub fn new(
        previous_delta_hash: Hash,
        name: PhaseName,
        status: PhaseStatus,
        utc_start_time: u64,
    ) -> Self {
        Self {
            previous_delta_hash,
            name,
            status,
            utc_start_time,
        }
    }

    pub fn is(&self, name: PhaseName, status: PhaseStatus) -> bool {
        self.name == name && self.status == status
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} @{} prev={}",
            self.name,
            self.status,
            self.utc_start_time,
            short_hex(&self.previous_delta_hash)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cycle_is_nineteen_seconds() {
        let config = CycleConfiguration::default();
        assert_eq!(config.cycle_duration(), Duration::from_secs(19));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_offsets_chain_previous_totals() {
        let config = CycleConfiguration::default();
        let offsets: Vec<u64> = config
            .phases()
            .iter()
            .map(|(_, t)| t.offset.as_secs())
            .collect();
        assert_eq!(offsets, vec![0, 4, 10, 15]);

        let sync = config.timings(PhaseName::Synchronisation);
        assert_eq!(sync.offset + sync.total_time(), config.cycle_duration());
    }

    #[test]
    fn test_status_offsets_within_phase() {
        let voting = *CycleConfiguration::default().timings(PhaseName::Voting);
        assert_eq!(voting.offset_of(PhaseStatus::Producing).as_secs(), 10);
        assert_eq!(voting.offset_of(PhaseStatus::Collecting).as_secs(), 13);
        assert_eq!(voting.offset_of(PhaseStatus::Idle).as_secs(), 15);
    }

    #[test]
    fn test_zero_cycle_rejected() {
        let config = CycleConfiguration::chained([(Duration::ZERO, Duration::ZERO); 4]);
        assert!(matches!(
            config.validate(),
            Err(CycleError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_sub_millisecond_cycle_rejected() {
        let config = CycleConfiguration::chained([(Duration::from_micros(10), Duration::ZERO); 4]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unchained_timings_rejected() {
        let secs = Duration::from_secs;
        let result = CycleConfiguration::from_timings([
            PhaseTimings::new(secs(0), secs(1), secs(1)),
            PhaseTimings::new(secs(3), secs(1), secs(1)),
            PhaseTimings::new(secs(5), secs(1), secs(1)),
            PhaseTimings::new(secs(7), secs(1), secs(1)),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_chained_timings_accepted() {
        let secs = Duration::from_secs;
        let config = CycleConfiguration::from_timings([
            PhaseTimings::new(secs(0), secs(1), secs(1)),
            PhaseTimings::new(secs(2), secs(1), secs(1)),
            PhaseTimings::new(secs(4), secs(1), secs(1)),
            PhaseTimings::new(secs(6), secs(1), secs(1)),
        ])
        .unwrap();
        assert_eq!(config.cycle_duration(), secs(8));
    }

    #[test]
    fn test_enum_ordinals_follow_cycle_order() {
        assert_eq!(PhaseName::Construction.ordinal(), 0);
        assert_eq!(PhaseName::Synchronisation.ordinal(), 3);
        assert!(PhaseStatus::Producing < PhaseStatus::Collecting);
        assert!(PhaseStatus::Collecting < PhaseStatus::Idle);
    }
}
