use std::fmt;
use std::time;

use prettytable::{row, Table};
use tracing::{error, info};

use crate::error::SeqError;
use crate::master::AxiLiteMaster;
use crate::sim_if::SimIf;
use crate::trace::Trace;
use crate::utils::fmt_time_ns;

pub type SeqResult = Result<String, SeqError>;
pub type SeqFn<D, T> = fn(&mut AxiLiteMaster<D, T>) -> SeqResult;

/// A named bus sequence run against a live master.
pub struct Sequence<D: SimIf, T: Trace> {
    pub name: String,
    pub body: SeqFn<D, T>,
}

impl<D: SimIf, T: Trace> fmt::Debug for Sequence<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence").field("name", &self.name).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
    /// Not run because an earlier sequence used up the simulation time.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub name: String,
    pub verdict: Verdict,
    pub message: String,
    pub time_secs: f64,
    pub sim_time_ns: u64,
    pub stalls: usize,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Passed
    }
}

/// Ordered list of sequences sharing one master.
#[derive(Debug)]
pub struct Sequences<D: SimIf, T: Trace>(Vec<Sequence<D, T>>);

impl<D: SimIf, T: Trace> Default for Sequences<D, T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<D: SimIf, T: Trace> Sequences<D, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, name: impl Into<String>, body: SeqFn<D, T>) {
        self.0.push(Sequence {
            name: name.into(),
            body,
        });
    }

    /// Run every sequence in order. Hitting the horizon fails the running
    /// sequence and skips the rest, since no simulation time is left.
    pub fn run(&self, master: &mut AxiLiteMaster<D, T>) -> Report {
        let sim_start = master.time_ns();
        let wall_start = time::Instant::now();
        let mut outcomes = Vec::with_capacity(self.0.len());
        let mut exhausted = false;

        for seq in &self.0 {
            if exhausted {
                outcomes.push(Outcome {
                    name: seq.name.clone(),
                    verdict: Verdict::Skipped,
                    message: "simulation horizon already reached".to_string(),
                    time_secs: 0.0,
                    sim_time_ns: 0,
                    stalls: 0,
                });
                continue;
            }

            let time_start = time::Instant::now();
            let sim_time_start = master.time_ns();
            let stalls_start = master.stalls().len();

            let result = (seq.body)(master);

            let (verdict, message) = match result {
                Ok(msg) => (Verdict::Passed, msg),
                Err(e) => {
                    exhausted = matches!(e, SeqError::Horizon(_));
                    (Verdict::Failed, e.to_string())
                }
            };
            let outcome = Outcome {
                name: seq.name.clone(),
                verdict,
                message,
                time_secs: time_start.elapsed().as_secs_f64(),
                sim_time_ns: master.time_ns() - sim_time_start,
                stalls: master.stalls().len().saturating_sub(stalls_start),
            };
            match outcome.verdict {
                Verdict::Passed => info!(sequence = %outcome.name, "{}", outcome.message),
                _ => error!(sequence = %outcome.name, "{}", outcome.message),
            }
            outcomes.push(outcome);
        }

        Report {
            outcomes,
            time_secs: wall_start.elapsed().as_secs_f64(),
            sim_time_ns: master.time_ns() - sim_start,
        }
    }
}

/// Results of one [`Sequences::run`].
#[derive(Debug, Clone)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
    pub time_secs: f64,
    pub sim_time_ns: u64,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(Outcome::passed)
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed()).count()
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.set_titles(row![
            "Sequence",
            "Result",
            "Time [s]",
            "SimTime",
            "SimSpeed [ns/s]",
            "Stalls"
        ]);
        for o in &self.outcomes {
            let result = match o.verdict {
                Verdict::Passed => "passed",
                Verdict::Failed => "failed",
                Verdict::Skipped => "skipped",
            };
            table.add_row(row![
                o.name,
                result,
                format!("{:.3}", o.time_secs),
                fmt_time_ns(o.sim_time_ns),
                format!("{:.3}", sim_speed(o.sim_time_ns, o.time_secs)),
                o.stalls
            ]);
        }
        table
    }

    /// Log the per-sequence table followed by totals.
    pub fn log_summary(&self) {
        for line in self.table().to_string().lines() {
            info!("{}", line);
        }
        info!("Simulation time: {}", fmt_time_ns(self.sim_time_ns));
        info!("Real time: {:.3} s", self.time_secs);
        info!(
            "Simulation speed: {:.3} ns/s",
            sim_speed(self.sim_time_ns, self.time_secs)
        );
    }
}

fn sim_speed(sim_time_ns: u64, secs: f64) -> f64 {
    if secs > 0.0 {
        sim_time_ns as f64 / secs
    } else {
        0.0
    }
}

/// Fail a sequence unless `actual == expected`.
pub fn ensure_eq(what: &str, actual: u32, expected: u32) -> Result<(), SeqError> {
    if actual == expected {
        Ok(())
    } else {
        Err(SeqError::failed(format!(
            "{}: expected {:#010x}, got {:#010x}",
            what, expected, actual
        )))
    }
}
