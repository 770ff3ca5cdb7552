use num_format::{Locale, ToFormattedString};
use rand as rnd;

/// Render a simulation time stamp the way diagnostics print it, e.g.
/// `1,234,565ns`.
pub fn fmt_time_ns(time_ns: u64) -> String {
    format!("{}ns", time_ns.to_formatted_string(&Locale::en))
}

#[inline]
pub fn rand_word() -> u32 {
    rnd::random::<u32>()
}

/// Random value in `0..ceil`, or 0 when `ceil` is 0.
#[inline]
pub fn rand_int(ceil: u32) -> u32 {
    match ceil {
        0 => 0,
        _ => rnd::random::<u32>() % ceil,
    }
}

/// Random word-aligned offset inside a register file of `words` registers.
/// An empty register file always yields offset 0.
#[inline]
pub fn rand_reg_addr(words: u32) -> u32 {
    rand_int(words) * 4
}
