#![allow(dead_code)]

use libaxil::prelude::*;
use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn config(max_time_ns: u64, stall_threshold: u32) -> DriverConfig {
    DriverConfig {
        max_time_ns,
        stall_threshold,
        ..DriverConfig::default()
    }
}

/// Slave that never drives anything.
#[derive(Debug, Default)]
pub struct Stuck {
    pub port: AxiLitePort,
}

impl SimIf for Stuck {
    fn port(&self) -> &AxiLitePort {
        &self.port
    }
    fn port_mut(&mut self) -> &mut AxiLitePort {
        &mut self.port
    }
    fn eval(&mut self) {}
}

/// Read-only slave counting evaluations while `arvalid` is high: `arready`
/// after `ar_after` of them, `rvalid` with `data` after `r_after` more.
/// `rvalid` drops once `rready` is seen.
#[derive(Debug)]
pub struct Delayed {
    pub port: AxiLitePort,
    pub ar_after: u32,
    pub r_after: u32,
    pub data: u32,
    pub seen_addr: Option<u32>,
    count: u32,
}

impl Delayed {
    pub fn new(ar_after: u32, r_after: u32, data: u32) -> Self {
        Self {
            port: AxiLitePort::default(),
            ar_after,
            r_after,
            data,
            seen_addr: None,
            count: 0,
        }
    }
}

impl SimIf for Delayed {
    fn port(&self) -> &AxiLitePort {
        &self.port
    }
    fn port_mut(&mut self) -> &mut AxiLitePort {
        &mut self.port
    }
    fn eval(&mut self) {
        let p = &mut self.port;
        if p.arvalid {
            self.count = self.count.saturating_add(1);
            self.seen_addr = Some(p.araddr);
        } else {
            self.count = 0;
        }
        p.arready = p.arvalid && self.count >= self.ar_after;
        if p.arvalid && self.count >= self.ar_after.saturating_add(self.r_after) {
            p.rvalid = true;
            p.rdata = self.data;
        }
        if p.rready && p.rvalid {
            p.rvalid = false;
        }
    }
}

/// Slave with every ready and `rvalid` tied high. Stores on rising edges,
/// reads are combinational, so a transaction never waits.
#[derive(Debug)]
pub struct Eager {
    pub port: AxiLitePort,
    pub regs: [u32; 16],
    prev_clk: bool,
}

impl Eager {
    pub fn new() -> Self {
        Self {
            port: AxiLitePort {
                awready: true,
                wready: true,
                arready: true,
                rvalid: true,
                ..AxiLitePort::default()
            },
            regs: [0; 16],
            prev_clk: false,
        }
    }
}

impl SimIf for Eager {
    fn port(&self) -> &AxiLitePort {
        &self.port
    }
    fn port_mut(&mut self) -> &mut AxiLitePort {
        &mut self.port
    }
    fn eval(&mut self) {
        let p = &mut self.port;
        let rising = p.aclk && !self.prev_clk;
        self.prev_clk = p.aclk;
        if rising && p.aresetn && p.awvalid && p.wvalid {
            self.regs[(p.awaddr as usize >> 2) % 16] = p.wdata;
        }
        p.rdata = self.regs[(p.araddr as usize >> 2) % 16];
    }
}

/// Read slave whose data bus only settles one step after `rvalid` rises:
/// `early` on the rising step, `data` on the next, `late` once `rready`
/// is seen.
#[derive(Debug)]
pub struct SettlingData {
    pub port: AxiLitePort,
    pub early: u32,
    pub data: u32,
    pub late: u32,
}

impl SettlingData {
    pub fn new(early: u32, data: u32, late: u32) -> Self {
        Self {
            port: AxiLitePort::default(),
            early,
            data,
            late,
        }
    }
}

impl SimIf for SettlingData {
    fn port(&self) -> &AxiLitePort {
        &self.port
    }
    fn port_mut(&mut self) -> &mut AxiLitePort {
        &mut self.port
    }
    fn eval(&mut self) {
        let p = &mut self.port;
        if p.rvalid && p.rready {
            p.rvalid = false;
            p.rdata = self.late;
        } else if p.rvalid {
            p.rdata = self.data;
        } else if p.arvalid && p.arready {
            p.rvalid = true;
            p.rdata = self.early;
        }
        p.arready = p.arvalid;
    }
}
