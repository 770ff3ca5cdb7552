use tracing::{debug, trace, warn};

use crate::clock::{SimClock, Step};
use crate::config::DriverConfig;
use crate::error::{ConfigError, HorizonReached, StartError};
use crate::signal::AxiLitePort;
use crate::sim_if::SimIf;
use crate::stall::{StallCounter, StallEvent, StallPhase};
use crate::trace::{NoTrace, Trace};
use crate::utils::fmt_time_ns;

/// Write strobe driven with every `write32`: all four byte lanes.
pub const FULL_WORD_STRB: u8 = 0b1111;

/// Blocking single-word AXI4-Lite master driving one simulated design.
///
/// Each transaction steps the clock itself and returns only once the
/// handshake has completed. A slave that is slow to answer produces a
/// [`StallEvent`] every `stall_threshold` steps while the master keeps
/// waiting. The only way out of a wait is the simulation horizon.
///
/// Transactions must not overlap; the `&mut self` receivers make that hold.
#[derive(Debug)]
pub struct AxiLiteMaster<D: SimIf, T: Trace = NoTrace> {
    dut: D,
    trace: T,
    clock: SimClock,
    stall_threshold: u32,
    stalls: Vec<StallEvent>,
}

impl<D: SimIf> AxiLiteMaster<D, NoTrace> {
    pub fn new(dut: D, config: &DriverConfig) -> Result<Self, StartError> {
        Self::with_trace(dut, NoTrace, config)
    }
}

impl<D: SimIf, T: Trace> AxiLiteMaster<D, T> {
    pub fn with_trace(dut: D, trace: T, config: &DriverConfig) -> Result<Self, StartError> {
        Self::with_clock(dut, trace, SimClock::from_config(config), config)
    }

    /// Build on an existing clock. Only the stall and reset settings of
    /// `config` are used; time limits come from `clock`.
    pub fn with_clock(
        dut: D,
        trace: T,
        clock: SimClock,
        config: &DriverConfig,
    ) -> Result<Self, StartError> {
        config.validate()?;
        if clock.half_period_ns() == 0 {
            return Err(ConfigError::Invalid("clock half period must be non-zero".into()).into());
        }
        let mut master = Self {
            dut,
            trace,
            clock,
            stall_threshold: config.stall_threshold,
            stalls: Vec::new(),
        };
        master.reset(config.reset_steps)?;
        Ok(master)
    }

    /// Drive the idle bus with reset asserted for `steps` steps, then
    /// release reset with `bready` held high for another `steps`.
    fn reset(&mut self, steps: u32) -> Result<(), HorizonReached> {
        let mut port = AxiLitePort::initial();
        port.aclk = self.clock.level();
        self.dut.port_mut().drive_master_from(&port);

        debug!(steps, "asserting reset");
        for _ in 0..steps {
            self.step()?;
        }

        let port = self.dut.port_mut();
        port.aresetn = true;
        port.bready = true;
        for _ in 0..steps {
            self.step()?;
        }
        debug!(time = %fmt_time_ns(self.clock.time_ns()), "reset released");
        Ok(())
    }

    /// Advance by one half-period.
    #[inline]
    pub fn tick(&mut self) -> Step {
        self.clock.tick(&mut self.dut, &mut self.trace)
    }

    #[inline]
    fn step(&mut self) -> Result<(), HorizonReached> {
        match self.tick() {
            Step::Stepped => Ok(()),
            Step::Horizon => Err(HorizonReached {
                time_ns: self.clock.time_ns(),
            }),
        }
    }

    /// Run `n` full clock cycles.
    pub fn cycles(&mut self, n: u32) -> Result<(), HorizonReached> {
        for _ in 0..2 * n {
            self.step()?;
        }
        Ok(())
    }

    /// Step until `ready` holds on the port, reporting a stall every
    /// `stall_threshold` steps.
    fn wait_until(
        &mut self,
        ready: impl Fn(&AxiLitePort) -> bool,
        address: u32,
        phase: StallPhase,
    ) -> Result<(), HorizonReached> {
        let mut stall = StallCounter::new(self.stall_threshold);
        while !ready(self.dut.port()) {
            self.step()?;
            if stall.step() {
                self.report_stall(address, phase);
            }
        }
        Ok(())
    }

    #[cold]
    fn report_stall(&mut self, address: u32, phase: StallPhase) {
        let event = StallEvent {
            time_ns: self.clock.time_ns(),
            address,
            phase,
        };
        warn!(
            time_ns = event.time_ns,
            address = %format!("{:#010x}", address),
            ?phase,
            "{}",
            event
        );
        self.stalls.push(event);
    }

    pub fn write32(&mut self, address: u32, data: u32) -> Result<(), HorizonReached> {
        trace!(
            time = %fmt_time_ns(self.clock.time_ns()),
            address = %format!("{:#010x}", address),
            data = %format!("{:#010x}", data),
            "write32"
        );
        self.step()?;

        let port = self.dut.port_mut();
        port.wdata = data;
        port.wstrb = FULL_WORD_STRB;
        port.awaddr = address;
        port.awvalid = true;
        port.wvalid = true;

        self.wait_until(AxiLitePort::write_accepted, address, StallPhase::WriteAccept)?;

        // close the transaction window
        self.cycles(1)?;
        let port = self.dut.port_mut();
        port.awvalid = false;
        port.wvalid = false;

        self.step()
    }

    pub fn read32(&mut self, address: u32) -> Result<u32, HorizonReached> {
        trace!(
            time = %fmt_time_ns(self.clock.time_ns()),
            address = %format!("{:#010x}", address),
            "read32"
        );
        self.step()?;

        let port = self.dut.port_mut();
        port.arvalid = true;
        port.araddr = address;

        self.wait_until(|p| p.arready, address, StallPhase::ReadAccept)?;
        self.wait_until(|p| p.rvalid, address, StallPhase::ReadData)?;

        // data is taken one step after rvalid is seen, never on the same step
        self.step()?;
        let data = self.dut.port().rdata;

        let port = self.dut.port_mut();
        port.arvalid = false;
        port.rready = true;
        self.cycles(1)?;
        self.dut.port_mut().rready = false;

        trace!(data = %format!("{:#010x}", data), "read32 done");
        Ok(data)
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn time_ns(&self) -> u64 {
        self.clock.time_ns()
    }

    pub fn dut(&self) -> &D {
        &self.dut
    }

    pub fn dut_mut(&mut self) -> &mut D {
        &mut self.dut
    }

    pub fn trace(&self) -> &T {
        &self.trace
    }

    pub fn stall_threshold(&self) -> u32 {
        self.stall_threshold
    }

    /// Stall diagnostics emitted so far, oldest first.
    pub fn stalls(&self) -> &[StallEvent] {
        &self.stalls
    }

    pub fn clear_stalls(&mut self) {
        self.stalls.clear();
    }

    /// Flush the trace, finalize the design and hand both back.
    pub fn finish(mut self) -> (D, T) {
        self.trace.flush();
        self.dut.finalize();
        debug!(time = %fmt_time_ns(self.clock.time_ns()), "simulation finished");
        (self.dut, self.trace)
    }
}
