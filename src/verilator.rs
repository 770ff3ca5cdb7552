//! Binding to a verilated AXI4-Lite design.
//!
//! The verilated model is reached through a small C shim that the bench
//! links in, exporting the `axil_vl_*` symbols below. The shim owns the
//! `V<top>` instance and its VCD writer; this side only moves wire values
//! across and tells it when to evaluate, dump and finish.

use std::ffi::{c_char, c_void, CString};
use std::path::Path;
use std::ptr::NonNull;
use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::signal::AxiLitePort;
use crate::sim_if::SimIf;
use crate::trace::Trace;
use crate::vl_abi::{apply_outputs, inputs_from, VlInputs, VlOutputs};

extern "C" {
    fn axil_vl_new(vcd_path: *const c_char) -> *mut c_void;
    fn axil_vl_set_inputs(model: *mut c_void, inputs: *const VlInputs);
    fn axil_vl_eval(model: *mut c_void);
    fn axil_vl_get_outputs(model: *mut c_void, outputs: *mut VlOutputs);
    fn axil_vl_dump(model: *mut c_void, time: u64);
    fn axil_vl_flush(model: *mut c_void);
    fn axil_vl_final(model: *mut c_void);
    fn axil_vl_delete(model: *mut c_void);
}

#[derive(Debug, Error)]
pub enum VerilatorError {
    #[error("trace path contains a NUL byte or is not UTF-8: {0}")]
    BadPath(String),
    #[error("verilated model could not be created")]
    Create,
}

// Shared between the design and its VCD trace. Rc is enough: the simulation
// is single threaded.
#[derive(Debug)]
struct Model(NonNull<c_void>);

impl Model {
    fn ptr(&self) -> *mut c_void {
        self.0.as_ptr()
    }
}

impl Drop for Model {
    fn drop(&mut self) {
        // SAFETY: the pointer came from axil_vl_new and this is its only owner.
        unsafe { axil_vl_delete(self.ptr()) }
    }
}

/// A verilated design driven through the `axil_vl_*` shim.
#[derive(Debug)]
pub struct Verilator {
    model: Rc<Model>,
    port: AxiLitePort,
    finalized: bool,
}

impl Verilator {
    /// Create the model. With `vcd_path` the shim opens a VCD file there,
    /// and [`Verilator::vcd_trace`] returns a collector writing into it.
    pub fn new(vcd_path: Option<&Path>) -> Result<Self, VerilatorError> {
        let path = match vcd_path {
            Some(p) => {
                let s = p
                    .to_str()
                    .ok_or_else(|| VerilatorError::BadPath(p.display().to_string()))?;
                Some(CString::new(s).map_err(|_| VerilatorError::BadPath(s.to_string()))?)
            }
            None => None,
        };
        let raw = path.as_ref().map_or(std::ptr::null(), |p| p.as_ptr());
        // SAFETY: raw is either null or a NUL-terminated string alive for the call.
        let model = NonNull::new(unsafe { axil_vl_new(raw) }).ok_or(VerilatorError::Create)?;
        debug!(vcd = ?vcd_path, "verilated model created");
        Ok(Self {
            model: Rc::new(Model(model)),
            port: AxiLitePort::default(),
            finalized: false,
        })
    }

    pub fn vcd_trace(&self) -> VcdTrace {
        VcdTrace {
            model: Rc::clone(&self.model),
        }
    }
}

impl SimIf for Verilator {
    fn port(&self) -> &AxiLitePort {
        &self.port
    }

    fn port_mut(&mut self) -> &mut AxiLitePort {
        &mut self.port
    }

    fn eval(&mut self) {
        let inputs = inputs_from(&self.port);
        let mut outputs = VlOutputs::default();
        let model = self.model.ptr();
        // SAFETY: model is live for as long as self.model; both structs are
        // repr(C) and outlive the calls.
        unsafe {
            axil_vl_set_inputs(model, &inputs);
            axil_vl_eval(model);
            axil_vl_get_outputs(model, &mut outputs);
        }
        apply_outputs(&mut self.port, &outputs);
    }

    fn finalize(&mut self) {
        if !self.finalized {
            // SAFETY: model is live; final is called at most once.
            unsafe { axil_vl_final(self.model.ptr()) };
            self.finalized = true;
        }
    }
}

impl Drop for Verilator {
    fn drop(&mut self) {
        self.finalize();
    }
}

/// Dumps the verilated model's own signals into the VCD opened at creation.
#[derive(Debug, Clone)]
pub struct VcdTrace {
    model: Rc<Model>,
}

impl Trace for VcdTrace {
    fn dump(&mut self, time_ns: u64, _port: &AxiLitePort) {
        // SAFETY: the Rc keeps the model alive.
        unsafe { axil_vl_dump(self.model.ptr(), time_ns) }
    }

    fn flush(&mut self) {
        // SAFETY: as above.
        unsafe { axil_vl_flush(self.model.ptr()) }
    }
}
