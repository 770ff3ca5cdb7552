/// Wires of an AXI4-Lite slave port plus its clock and active-low reset.
///
/// Field names follow the usual `s_axi_*` HDL naming without the prefix. The
/// master drives `aclk`, `aresetn`, the valids, addresses, write data, strobe,
/// prot and the two response readies. Everything else is driven by the slave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxiLitePort {
    pub aclk: bool,
    pub aresetn: bool,

    // write address channel
    pub awaddr: u32,
    pub awprot: u8,
    pub awvalid: bool,
    pub awready: bool,

    // write data channel
    pub wdata: u32,
    pub wstrb: u8,
    pub wvalid: bool,
    pub wready: bool,

    // write response channel
    pub bresp: Resp,
    pub bvalid: bool,
    pub bready: bool,

    // read address channel
    pub araddr: u32,
    pub arprot: u8,
    pub arvalid: bool,
    pub arready: bool,

    // read data channel
    pub rdata: u32,
    pub rresp: Resp,
    pub rvalid: bool,
    pub rready: bool,
}

/// AXI response code carried on `bresp` / `rresp`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Resp {
    #[default]
    Okay,
    ExOkay,
    SlvErr,
    DecErr,
}

impl Resp {
    pub fn bits(self) -> u8 {
        match self {
            Resp::Okay => 0b00,
            Resp::ExOkay => 0b01,
            Resp::SlvErr => 0b10,
            Resp::DecErr => 0b11,
        }
    }

    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Resp::Okay,
            0b01 => Resp::ExOkay,
            0b10 => Resp::SlvErr,
            _ => Resp::DecErr,
        }
    }
}

impl AxiLitePort {
    /// Port state the master establishes before reset: clock high, reset
    /// asserted, every master-driven wire low.
    pub fn initial() -> Self {
        Self {
            aclk: true,
            aresetn: false,
            ..Self::default()
        }
    }

    /// Copy only the master-driven wires of `other` into `self`.
    pub fn drive_master_from(&mut self, other: &AxiLitePort) {
        self.aclk = other.aclk;
        self.aresetn = other.aresetn;
        self.awaddr = other.awaddr;
        self.awprot = other.awprot;
        self.awvalid = other.awvalid;
        self.wdata = other.wdata;
        self.wstrb = other.wstrb;
        self.wvalid = other.wvalid;
        self.bready = other.bready;
        self.araddr = other.araddr;
        self.arprot = other.arprot;
        self.arvalid = other.arvalid;
        self.rready = other.rready;
    }

    /// True when no master-side handshake is in progress.
    pub fn master_idle(&self) -> bool {
        !self.awvalid && !self.wvalid && !self.arvalid && !self.rready
    }

    pub fn write_accepted(&self) -> bool {
        self.awready && self.wready
    }
}
