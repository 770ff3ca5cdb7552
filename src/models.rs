use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::signal::{AxiLitePort, Resp};
use crate::sim_if::SimIf;

/// Behavioral AXI4-Lite slave backed by a flat array of 32-bit registers.
///
/// Registered logic: everything happens on rising `aclk` edges seen by
/// `eval`, using the wire values from before the edge. Register `n` lives at
/// byte offset `4 * n`; the low two address bits are ignored. Accesses past
/// the end answer `SLVERR`, read as zero and store nothing.
#[derive(Debug)]
pub struct RegisterFile {
    port: AxiLitePort,
    regs: Vec<u32>,
    prev_clk: bool,

    accept_latency: u32,
    response_latency: u32,
    jitter: Option<(StdRng, u32)>,

    aw_delay: Option<u32>,
    ar_delay: Option<u32>,
    pending_read: Option<(u32, u32)>,

    writes: u64,
    reads: u64,
}

impl RegisterFile {
    pub fn new(words: usize) -> Self {
        Self {
            port: AxiLitePort::default(),
            regs: vec![0; words],
            prev_clk: false,
            accept_latency: 0,
            response_latency: 0,
            jitter: None,
            aw_delay: None,
            ar_delay: None,
            pending_read: None,
            writes: 0,
            reads: 0,
        }
    }

    /// Extra cycles between seeing a valid address and raising its ready.
    pub fn with_accept_latency(mut self, cycles: u32) -> Self {
        self.accept_latency = cycles;
        self
    }

    /// Extra cycles between accepting a read address and raising `rvalid`.
    pub fn with_response_latency(mut self, cycles: u32) -> Self {
        self.response_latency = cycles;
        self
    }

    /// Add `0..=max` random cycles to every latency, drawn from a seeded RNG.
    pub fn with_jitter(mut self, max: u32, seed: u64) -> Self {
        self.jitter = Some((StdRng::seed_from_u64(seed), max));
        self
    }

    pub fn words(&self) -> usize {
        self.regs.len()
    }

    pub fn peek(&self, addr: u32) -> Option<u32> {
        self.regs.get(index(addr)).copied()
    }

    pub fn poke(&mut self, addr: u32, value: u32) -> bool {
        match self.regs.get_mut(index(addr)) {
            Some(reg) => {
                *reg = value;
                true
            }
            None => false,
        }
    }

    /// Completed write handshakes.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Completed read-address handshakes.
    pub fn reads(&self) -> u64 {
        self.reads
    }

    fn latency(&mut self, base: u32) -> u32 {
        match self.jitter.as_mut() {
            Some((rng, max)) => base + rng.gen_range(0..=*max),
            None => base,
        }
    }

    fn store(&mut self, addr: u32, data: u32, strb: u8) -> Resp {
        let Some(reg) = self.regs.get_mut(index(addr)) else {
            return Resp::SlvErr;
        };
        let mut mask = 0u32;
        for lane in 0..4 {
            if strb & (1 << lane) != 0 {
                mask |= 0xff << (8 * lane);
            }
        }
        *reg = (*reg & !mask) | (data & mask);
        Resp::Okay
    }

    fn load(&self, addr: u32) -> (u32, Resp) {
        match self.regs.get(index(addr)) {
            Some(&value) => (value, Resp::Okay),
            None => (0, Resp::SlvErr),
        }
    }

    fn reset(&mut self) {
        let p = &mut self.port;
        p.awready = false;
        p.wready = false;
        p.bvalid = false;
        p.bresp = Resp::Okay;
        p.arready = false;
        p.rvalid = false;
        p.rdata = 0;
        p.rresp = Resp::Okay;
        self.aw_delay = None;
        self.ar_delay = None;
        self.pending_read = None;
    }

    fn rising_edge(&mut self) {
        let cur = self.port;
        if !cur.aresetn {
            self.reset();
            return;
        }
        let mut next = cur;

        // write response
        if cur.bvalid && cur.bready {
            next.bvalid = false;
        }

        // write address + data
        if cur.awready && cur.awvalid && cur.wready && cur.wvalid {
            next.bresp = self.store(cur.awaddr, cur.wdata, cur.wstrb);
            next.bvalid = true;
            next.awready = false;
            next.wready = false;
            self.writes += 1;
        } else if cur.awready || cur.wready {
            next.awready = false;
            next.wready = false;
        } else if cur.awvalid && cur.wvalid && (!cur.bvalid || cur.bready) {
            let base = self.accept_latency;
            let delay = match self.aw_delay {
                Some(d) => d,
                None => self.latency(base),
            };
            if delay == 0 {
                next.awready = true;
                next.wready = true;
                self.aw_delay = None;
            } else {
                self.aw_delay = Some(delay - 1);
            }
        }

        // read data
        if cur.rvalid && cur.rready {
            next.rvalid = false;
        }

        // read address
        if cur.arready && cur.arvalid {
            next.arready = false;
            let delay = self.latency(self.response_latency);
            self.pending_read = Some((cur.araddr, delay));
            self.reads += 1;
        } else if cur.arready {
            next.arready = false;
        } else if cur.arvalid && self.pending_read.is_none() && !cur.rvalid {
            let base = self.accept_latency;
            let delay = match self.ar_delay {
                Some(d) => d,
                None => self.latency(base),
            };
            if delay == 0 {
                next.arready = true;
                self.ar_delay = None;
            } else {
                self.ar_delay = Some(delay - 1);
            }
        }

        if let Some((addr, delay)) = self.pending_read {
            if delay == 0 {
                let (data, resp) = self.load(addr);
                next.rdata = data;
                next.rresp = resp;
                next.rvalid = true;
                self.pending_read = None;
            } else {
                self.pending_read = Some((addr, delay - 1));
            }
        }

        self.port = next;
    }
}

#[inline]
fn index(addr: u32) -> usize {
    (addr >> 2) as usize
}

impl SimIf for RegisterFile {
    fn port(&self) -> &AxiLitePort {
        &self.port
    }

    fn port_mut(&mut self) -> &mut AxiLitePort {
        &mut self.port
    }

    fn eval(&mut self) {
        let rising = self.port.aclk && !self.prev_clk;
        self.prev_clk = self.port.aclk;
        if rising {
            self.rising_edge();
        }
    }
}
