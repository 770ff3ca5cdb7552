//! Wire layout shared with the `axil_vl_*` C shim, and the conversions
//! between it and [`AxiLitePort`].
//!
//! Every 1-bit signal crosses as a `u8` holding 0 or 1; the shim treats any
//! non-zero byte as high.
#![cfg_attr(not(feature = "verilator"), allow(dead_code))]

use crate::signal::{AxiLitePort, Resp};

/// Master-driven signals, in the order the shim reads them.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VlInputs {
    pub aclk: u8,
    pub aresetn: u8,
    pub awaddr: u32,
    pub awprot: u8,
    pub awvalid: u8,
    pub wdata: u32,
    pub wstrb: u8,
    pub wvalid: u8,
    pub bready: u8,
    pub araddr: u32,
    pub arprot: u8,
    pub arvalid: u8,
    pub rready: u8,
}

/// Slave-driven signals, in the order the shim writes them.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VlOutputs {
    pub awready: u8,
    pub wready: u8,
    pub bresp: u8,
    pub bvalid: u8,
    pub arready: u8,
    pub rdata: u32,
    pub rresp: u8,
    pub rvalid: u8,
}

pub(crate) fn inputs_from(p: &AxiLitePort) -> VlInputs {
    VlInputs {
        aclk: p.aclk.into(),
        aresetn: p.aresetn.into(),
        awaddr: p.awaddr,
        awprot: p.awprot,
        awvalid: p.awvalid.into(),
        wdata: p.wdata,
        wstrb: p.wstrb,
        wvalid: p.wvalid.into(),
        bready: p.bready.into(),
        araddr: p.araddr,
        arprot: p.arprot,
        arvalid: p.arvalid.into(),
        rready: p.rready.into(),
    }
}

/// Copy the slave side of `out` onto `p`. Master-driven fields are left alone.
pub(crate) fn apply_outputs(p: &mut AxiLitePort, out: &VlOutputs) {
    p.awready = out.awready != 0;
    p.wready = out.wready != 0;
    p.bresp = Resp::from_bits(out.bresp);
    p.bvalid = out.bvalid != 0;
    p.arready = out.arready != 0;
    p.rdata = out.rdata;
    p.rresp = Resp::from_bits(out.rresp);
    p.rvalid = out.rvalid != 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_signals_cross_as_bytes() {
        let port = AxiLitePort {
            aclk: true,
            aresetn: false,
            awaddr: 0x1000_0004,
            awprot: 0b010,
            awvalid: true,
            wdata: 0xdead_beef,
            wstrb: 0b0110,
            wvalid: true,
            bready: false,
            araddr: 0x2000_0008,
            arprot: 0b001,
            arvalid: false,
            rready: true,
            ..AxiLitePort::default()
        };
        let vl = inputs_from(&port);
        assert_eq!(
            vl,
            VlInputs {
                aclk: 1,
                aresetn: 0,
                awaddr: 0x1000_0004,
                awprot: 0b010,
                awvalid: 1,
                wdata: 0xdead_beef,
                wstrb: 0b0110,
                wvalid: 1,
                bready: 0,
                araddr: 0x2000_0008,
                arprot: 0b001,
                arvalid: 0,
                rready: 1,
            }
        );
    }

    #[test]
    fn slave_outputs_land_on_the_port() {
        let mut port = AxiLitePort::initial();
        port.awaddr = 0x44;
        let out = VlOutputs {
            awready: 1,
            wready: 0,
            bresp: 0b10,
            bvalid: 1,
            arready: 0,
            rdata: 0x0bad_cafe,
            rresp: 0b11,
            rvalid: 1,
        };
        apply_outputs(&mut port, &out);

        assert!(port.awready);
        assert!(!port.wready);
        assert_eq!(port.bresp, Resp::SlvErr);
        assert!(port.bvalid);
        assert!(!port.arready);
        assert_eq!(port.rdata, 0x0bad_cafe);
        assert_eq!(port.rresp, Resp::DecErr);
        assert!(port.rvalid);
        // master side untouched
        assert_eq!(port.awaddr, 0x44);
        assert!(!port.aresetn);
    }

    #[test]
    fn any_nonzero_byte_reads_high() {
        let mut port = AxiLitePort::default();
        let out = VlOutputs {
            arready: 0xff,
            rvalid: 2,
            bresp: 0b101,
            ..VlOutputs::default()
        };
        apply_outputs(&mut port, &out);
        assert!(port.arready);
        assert!(port.rvalid);
        // only the low two bits carry the response
        assert_eq!(port.bresp, Resp::ExOkay);
        assert_eq!(port.rresp, Resp::Okay);
    }

    #[test]
    fn response_bits_survive_the_boundary() {
        for resp in [Resp::Okay, Resp::ExOkay, Resp::SlvErr, Resp::DecErr] {
            let mut port = AxiLitePort::default();
            let out = VlOutputs {
                bresp: resp.bits(),
                rresp: resp.bits(),
                ..VlOutputs::default()
            };
            apply_outputs(&mut port, &out);
            assert_eq!(port.bresp, resp);
            assert_eq!(port.rresp, resp);
        }
    }
}
