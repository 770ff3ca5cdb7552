use crate::config::DriverConfig;
use crate::sim_if::SimIf;
use crate::trace::Trace;

/// Result of a single clock step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Step {
    Stepped,
    /// Simulated time reached its ceiling; nothing was changed.
    Horizon,
}

/// Simulation time and clock level for one design.
///
/// Every step toggles the clock once and advances time by one half-period.
/// Time never moves backwards and is never reset.
#[derive(Debug, Clone)]
pub struct SimClock {
    time_ns: u64,
    level: bool,
    max_time_ns: u64,
    half_period_ns: u64,
}

impl SimClock {
    /// Starts at time 0 with the clock high, matching the level driven
    /// before reset.
    pub fn new(max_time_ns: u64, half_period_ns: u64) -> Self {
        Self {
            time_ns: 0,
            level: true,
            max_time_ns,
            half_period_ns,
        }
    }

    /// Start from `level` instead of high. Starting low makes the level
    /// after `N` steps equal `N % 2 == 1`.
    pub fn with_initial_level(mut self, level: bool) -> Self {
        self.level = level;
        self
    }

    pub fn from_config(config: &DriverConfig) -> Self {
        Self::new(config.max_time_ns, config.half_period_ns)
    }

    pub fn time_ns(&self) -> u64 {
        self.time_ns
    }

    pub fn level(&self) -> bool {
        self.level
    }

    pub fn max_time_ns(&self) -> u64 {
        self.max_time_ns
    }

    pub fn half_period_ns(&self) -> u64 {
        self.half_period_ns
    }

    pub fn at_horizon(&self) -> bool {
        self.time_ns >= self.max_time_ns
    }

    /// Advance by one clock edge: sample the trace, toggle the clock, let
    /// the design settle, then move time forward.
    pub fn tick<D, T>(&mut self, dut: &mut D, trace: &mut T) -> Step
    where
        D: SimIf + ?Sized,
        T: Trace + ?Sized,
    {
        if crate::unlikely(self.at_horizon()) {
            return Step::Horizon;
        }
        trace.dump(self.time_ns, dut.port());

        self.level = !self.level;
        dut.port_mut().aclk = self.level;
        dut.eval();

        self.time_ns += self.half_period_ns;
        Step::Stepped
    }
}
