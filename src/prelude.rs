pub use crate::clock::{SimClock, Step};
pub use crate::config::DriverConfig;
pub use crate::error::{ConfigError, HorizonReached, ReportError, SeqError, StartError};
pub use crate::master::AxiLiteMaster;
pub use crate::models::RegisterFile;
pub use crate::sequence::{ensure_eq, Report, SeqResult, Sequences, Verdict};
pub use crate::signal::{AxiLitePort, Resp};
pub use crate::sim_if::SimIf;
pub use crate::stall::{StallEvent, StallPhase};
pub use crate::trace::{NoTrace, SampleLog, Trace};
pub use crate::utils;
#[cfg(feature = "verilator")]
pub use crate::verilator::{VcdTrace, Verilator};
