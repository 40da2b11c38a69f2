// File: crates/meridian-core/src/ticks.rs
// Summary: Tick marks, symbol tables, label formats and the 1-2-5 tick size selector.

/// Largest |power| the selector will step to before reporting "no further step".
pub const DEFAULT_MAX_POWER: i32 = 300;
/// Powers above this switch labels to scientific notation.
pub const SCIENTIFIC_POWER_THRESHOLD: i32 = 6;

/// One labeled reference point on an axis.
#[derive(Clone, Debug, PartialEq)]
pub struct TickMark {
    pub value: f64,
    pub label: String,
}

impl TickMark {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self { value, label: label.into() }
    }
}

/// A `{value, label}` entry of a symbol table (categorical labels on a numeric axis).
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub value: f64,
    pub label: String,
}

impl Symbol {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self { value, label: label.into() }
    }
}

/// Display precision for tick labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickFormat {
    /// Fixed-point with the given number of decimals.
    Fixed { decimals: usize },
    /// Scientific notation, e.g. `2e7`.
    Scientific { decimals: usize },
    /// Shortest readable form; used when no step size is known.
    General,
}

impl TickFormat {
    /// Format matching a step of `factor * 10^power`.
    pub fn for_power(power: i32) -> Self {
        if power > SCIENTIFIC_POWER_THRESHOLD {
            Self::Scientific { decimals: 0 }
        } else {
            Self::Fixed { decimals: power.min(0).unsigned_abs() as usize }
        }
    }

    /// Format matching an arbitrary step size.
    pub fn for_step(step: f64) -> Self {
        if step <= 0.0 || !step.is_finite() {
            return Self::General;
        }
        // 1e-9 absorbs representation error (log10(0.001) = -2.9999999999999996).
        let power = (step.log10() + 1e-9).floor();
        Self::for_power(power.clamp(-f64::from(DEFAULT_MAX_POWER), f64::from(DEFAULT_MAX_POWER)) as i32)
    }

    pub fn format(&self, value: f64) -> String {
        match *self {
            Self::Fixed { decimals } => {
                let half_unit = 0.5 * 10_f64.powi(-(decimals as i32));
                let v = if value.abs() < half_unit { 0.0 } else { value };
                format!("{v:.decimals$}")
            }
            Self::Scientific { decimals } => format!("{value:.decimals$e}"),
            Self::General => format_general(value),
        }
    }
}

fn format_general(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return if value.is_finite() { "0".to_string() } else { value.to_string() };
    }
    let a = value.abs();
    if !(1e-4..1e7).contains(&a) {
        let s = format!("{value:.2e}");
        // 1.50e7 -> 1.5e7, 1.00e7 -> 1e7
        match s.split_once('e') {
            Some((mantissa, exp)) => format!("{}e{}", trim_decimals(mantissa), exp),
            None => s,
        }
    } else {
        trim_decimals(&format!("{value:.4}")).to_string()
    }
}

fn trim_decimals(s: &str) -> &str {
    if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { s }
}

/// Cursor over the canonical step sequence `1, 2, 5 × 10^power`.
///
/// `next()` moves to the next larger step, `previous()` to the next smaller.
/// Both return `false` instead of moving once `|power|` would pass the cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickSelector {
    power: i32,
    factor: u8,
    max_power: i32,
}

impl TickSelector {
    pub fn new() -> Self {
        Self { power: 0, factor: 1, max_power: DEFAULT_MAX_POWER }
    }

    /// Change the anti-runaway power ceiling (at least 1).
    pub fn with_max_power(mut self, max_power: i32) -> Self {
        self.max_power = max_power.saturating_abs().max(1);
        self.power = self.power.clamp(-self.max_power, self.max_power);
        self
    }

    /// Position the cursor at the smallest power of ten not below `reference`.
    pub fn select(&mut self, reference: f64) {
        let power = if reference > 0.0 && reference.is_finite() {
            reference.log10().ceil()
        } else {
            0.0
        };
        let cap = f64::from(self.max_power);
        self.power = power.clamp(-cap, cap) as i32;
        self.factor = 1;
    }

    pub fn power(&self) -> i32 { self.power }
    pub fn factor(&self) -> u8 { self.factor }
    pub fn max_power(&self) -> i32 { self.max_power }

    /// Step to the next larger tick size.
    pub fn next(&mut self) -> bool {
        match self.factor {
            1 => self.factor = 2,
            2 => self.factor = 5,
            _ => {
                if self.power >= self.max_power {
                    return false;
                }
                self.power += 1;
                self.factor = 1;
            }
        }
        true
    }

    /// Step to the next smaller tick size.
    pub fn previous(&mut self) -> bool {
        match self.factor {
            5 => self.factor = 2,
            2 => self.factor = 1,
            _ => {
                if self.power <= -self.max_power {
                    return false;
                }
                self.power -= 1;
                self.factor = 5;
            }
        }
        true
    }

    pub fn tick_size(&self) -> f64 {
        f64::from(self.factor) * 10_f64.powi(self.power)
    }

    pub fn tick_format(&self) -> TickFormat {
        TickFormat::for_power(self.power)
    }
}

impl Default for TickSelector {
    fn default() -> Self { Self::new() }
}
