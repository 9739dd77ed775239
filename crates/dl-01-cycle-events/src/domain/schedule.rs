//! Periodic phase transitions and their chronological merge.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::time::Duration;

use super::value_objects::{CycleConfiguration, PhaseName, PhaseStatus, PhaseTimings};

/// One scheduled transition, relative to the first aligned cycle start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseTransition {
    pub at: Duration,
    pub cycle: u32,
    pub name: PhaseName,
    pub status: PhaseStatus,
}

impl PhaseTransition {
    fn merge_key(&self) -> (Duration, u32, PhaseName, PhaseStatus) {
        (self.at, self.cycle, self.name, self.status)
    }
}

impl Ord for PhaseTransition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.merge_key().cmp(&other.merge_key())
    }
}

impl PartialOrd for PhaseTransition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Endless Producing → Collecting → Idle transitions of a single phase,
/// repeating every cycle.
#[derive(Clone, Debug)]
pub struct StatefulPhase {
    name: PhaseName,
    timings: PhaseTimings,
    cycle_duration: Duration,
    cycle: u32,
    next_status: usize,
}

impl StatefulPhase {
    pub fn new(name: PhaseName, timings: PhaseTimings, cycle_duration: Duration) -> Self {
        Self {
            name,
            timings,
            cycle_duration,
            cycle: 0,
            next_status: 0,
        }
    }

    pub fn name(&self) -> PhaseName {
        self.name
    }
}

impl Iterator for StatefulPhase {
    type Item = PhaseTransition;

    fn next(&mut self) -> Option<Self::Item> {
        let status = PhaseStatus::ALL[self.next_status];
        let at = self
            .cycle_duration
            .saturating_mul(self.cycle)
            .saturating_add(self.timings.offset_of(status));
        let transition = PhaseTransition {
            at,
            cycle: self.cycle,
            name: self.name,
            status,
        };

        self.next_status += 1;
        if self.next_status == PhaseStatus::ALL.len() {
            self.next_status = 0;
            self.cycle = self.cycle.saturating_add(1);
        }
        Some(transition)
    }
}

/// Stable merge of the four phases' transitions.
///
/// Transitions due at the same instant come out ordered by cycle, then phase,
/// then status, so `Synchronisation:Idle` of one cycle always precedes
/// `Construction:Producing` of the next.
pub struct CycleSchedule {
    phases: Vec<Peekable<StatefulPhase>>,
}

impl CycleSchedule {
    pub fn new(config: &CycleConfiguration) -> Self {
        let cycle_duration = config.cycle_duration();
        let phases = config
            .phases()
            .into_iter()
            .map(|(name, timings)| StatefulPhase::new(name, timings, cycle_duration).peekable())
            .collect();
        Self { phases }
    }
}

impl Iterator for CycleSchedule {
    type Item = PhaseTransition;

    fn next(&mut self) -> Option<Self::Item> {
        let earliest = self
            .phases
            .iter_mut()
            .enumerate()
            .filter_map(|(index, phase)| phase.peek().map(|transition| (index, *transition)))
            .min_by_key(|(_, transition)| *transition)
            .map(|(index, _)| index)?;
        self.phases[earliest].next()
    }
}

/// Delay until the next wall-clock multiple of `cycle_duration`, zero when
/// `now_millis` already sits on one.
pub fn time_until_next_cycle_start(now_millis: u64, cycle_duration: Duration) -> Duration {
    let cycle_millis = cycle_duration.as_millis() as u64;
    if cycle_millis == 0 {
        return Duration::ZERO;
    }
    match now_millis % cycle_millis {
        0 => Duration::ZERO,
        elapsed => Duration::from_millis(cycle_millis - elapsed),
    }
}
