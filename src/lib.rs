//! Cycle-stepped AXI4-Lite master for clocked designs under simulation.
//!
//! An [`AxiLiteMaster`](master::AxiLiteMaster) owns the design, its trace
//! collector and a [`SimClock`](clock::SimClock). Every `read32` / `write32`
//! walks the handshake one clock edge at a time and returns once the slave
//! has completed it.

pub mod clock;
pub mod config;
pub mod error;
mod junit;
pub mod master;
pub mod models;
pub mod prelude;
pub mod sequence;
pub mod signal;
pub mod sim_if;
pub mod stall;
pub mod trace;
pub mod utils;
#[cfg(feature = "verilator")]
pub mod verilator;
mod vl_abi;

#[inline]
#[cold]
fn cold() {}

#[inline]
fn unlikely(b: bool) -> bool {
    if b {
        cold()
    }
    b
}
