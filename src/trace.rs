use crate::signal::AxiLitePort;

/// Receives one sample per clock step, taken before the clock toggles.
pub trait Trace {
    fn dump(&mut self, time_ns: u64, port: &AxiLitePort);

    fn flush(&mut self) {}
}

/// Discards every sample.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl Trace for NoTrace {
    #[inline]
    fn dump(&mut self, _time_ns: u64, _port: &AxiLitePort) {}
}

/// Keeps `(time, clock level)` pairs in memory.
#[derive(Debug, Default, Clone)]
pub struct SampleLog {
    samples: Vec<(u64, bool)>,
}

impl SampleLog {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn samples(&self) -> &[(u64, bool)] {
        &self.samples
    }
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Trace for SampleLog {
    fn dump(&mut self, time_ns: u64, port: &AxiLitePort) {
        self.samples.push((time_ns, port.aclk));
    }
}

impl<T: Trace + ?Sized> Trace for &mut T {
    fn dump(&mut self, time_ns: u64, port: &AxiLitePort) {
        (**self).dump(time_ns, port)
    }
    fn flush(&mut self) {
        (**self).flush()
    }
}
