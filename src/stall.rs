use std::fmt;

use crate::utils::fmt_time_ns;

/// Which handshake the master was waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallPhase {
    /// `awready && wready` after asserting the write address and data.
    WriteAccept,
    /// `arready` after asserting the read address.
    ReadAccept,
    /// `rvalid` after the read address was accepted.
    ReadData,
}

impl fmt::Display for StallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StallPhase::WriteAccept => "Slow to write to address",
            StallPhase::ReadAccept => "Slow to accept read address",
            StallPhase::ReadData => "Slow to return data at address",
        };
        f.write_str(s)
    }
}

/// One stall diagnostic. Emitting it never aborts the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StallEvent {
    pub time_ns: u64,
    pub address: u32,
    pub phase: StallPhase,
}

impl fmt::Display for StallEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {:#010x}",
            fmt_time_ns(self.time_ns),
            self.phase,
            self.address
        )
    }
}

/// Counts steps spent waiting on one handshake and fires every `threshold`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StallCounter {
    threshold: u32,
    waited: u32,
}

impl StallCounter {
    pub(crate) fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            waited: 0,
        }
    }

    /// Record one waited step. Returns true, and starts counting again from
    /// zero, when the threshold has just been reached.
    #[inline]
    pub(crate) fn step(&mut self) -> bool {
        self.waited += 1;
        if crate::unlikely(self.waited >= self.threshold) {
            self.waited = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_threshold_steps() {
        let mut counter = StallCounter::new(4);
        let fired: Vec<bool> = (0..12).map(|_| counter.step()).collect();
        assert_eq!(
            fired,
            [false, false, false, true, false, false, false, true, false, false, false, true]
        );
    }

    #[test]
    fn zero_threshold_behaves_as_one() {
        let mut counter = StallCounter::new(0);
        assert!(counter.step());
        assert!(counter.step());
    }

    #[test]
    fn event_renders_time_phase_and_address() {
        let ev = StallEvent {
            time_ns: 1_234_565,
            address: 0x40,
            phase: StallPhase::ReadData,
        };
        assert_eq!(
            ev.to_string(),
            "1,234,565ns: Slow to return data at address 0x00000040"
        );
    }
}
