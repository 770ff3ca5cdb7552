use crate::signal::AxiLitePort;

/// A clocked design under simulation exposing an AXI4-Lite slave port.
///
/// Signal assignments made through `port_mut` only become visible to the
/// design's logic on the next `eval`. Slave-driven wires read through `port`
/// reflect the most recent `eval`.
pub trait SimIf {
    fn port(&self) -> &AxiLitePort;
    fn port_mut(&mut self) -> &mut AxiLitePort;

    /// Settle the design for the current input values. Zero logical delay.
    fn eval(&mut self);

    /// Called once when the driver is torn down.
    fn finalize(&mut self) {}
}

impl<S: SimIf + ?Sized> SimIf for Box<S> {
    fn port(&self) -> &AxiLitePort {
        (**self).port()
    }
    fn port_mut(&mut self) -> &mut AxiLitePort {
        (**self).port_mut()
    }
    fn eval(&mut self) {
        (**self).eval()
    }
    fn finalize(&mut self) {
        (**self).finalize()
    }
}
