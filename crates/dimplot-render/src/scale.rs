//! Band and linear scales with d3-compatible semantics (`scaleBand`, `scaleLinear`, `ticks`,
//! default `tickFormat`).

/// Maps category names to equal-width horizontal bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    step: f64,
    start: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Band scale with equal inner and outer padding, centered in `range` (d3 `padding(p)`,
    /// `align(0.5)`, no rounding).
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let mut scale = Self {
            domain,
            range,
            padding_inner: padding,
            padding_outer: padding,
            step: 0.0,
            start: 0.0,
            bandwidth: 0.0,
        };
        scale.rescale();
        scale
    }

    fn rescale(&mut self) {
        const ALIGN: f64 = 0.5;
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let step = (stop - start) / f64::max(1.0, n - self.padding_inner + self.padding_outer * 2.0);
        self.start = start + (stop - start - step * (n - self.padding_inner)) * ALIGN;
        self.step = step;
        self.bandwidth = step * (1.0 - self.padding_inner);
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Start of the band for `name`, or `None` when `name` is not in the domain.
    pub fn position(&self, name: &str) -> Option<f64> {
        let i = self.domain.iter().position(|d| d == name)?;
        let pos = self.start + self.step * i as f64;
        // Reversed ranges place the first category on the right.
        if self.range.1 < self.range.0 {
            Some(self.range.0 + self.range.1 - pos - self.bandwidth)
        } else {
            Some(pos)
        }
    }

    pub fn center(&self, name: &str) -> Option<f64> {
        self.position(name).map(|x| x + self.bandwidth / 2.0)
    }
}

/// Continuous mapping from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span.is_infinite() {
            // Domains wider than f64::MAX are measured in halves.
            (value / 2.0 - d0 / 2.0) / (d1 / 2.0 - d0 / 2.0)
        } else {
            (value - d0) / span
        };
        // A collapsed domain maps everything to the middle of the range.
        let t = if t.is_finite() { t } else { 0.5 };
        r0 + t * (r1 - r0)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Tick values paired with their default labels.
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let (d0, d1) = self.domain;
        let precision = tick_step(d0, d1, count)
            .map(precision_fixed)
            .unwrap_or(0);
        self.ticks(count)
            .into_iter()
            .map(|t| (t, format_fixed(t, precision)))
            .collect()
    }
}

/// Value domain spanning `[min, max]` widened by `padding_fraction` of the range on both ends.
///
/// When every observation is equal the range is zero; the padding then falls back to a tenth of
/// the magnitude of the value, or `1` for zero, so the axis never collapses to a point.
///
/// The result is clamped to finite values, even for observations near `f64::MAX`.
pub fn padded_domain(min: f64, max: f64, padding_fraction: f64) -> (f64, f64) {
    let span = max - min;
    let pad = if span.is_infinite() {
        (max / 2.0 - min / 2.0) * padding_fraction * 2.0
    } else if span > 0.0 {
        span * padding_fraction
    } else if min != 0.0 {
        min.abs() * 0.1
    } else {
        1.0
    };
    ((min - pad).max(f64::MIN), (max + pad).min(f64::MAX))
}

#[derive(Debug, Clone, Copy)]
struct TickSpec {
    i1: i64,
    i2: i64,
    /// Positive: tick `i` is `i * inc`. Negative: tick `i` is `i / -inc` (keeps decimals exact).
    inc: f64,
}

impl TickSpec {
    fn value(&self, i: i64) -> f64 {
        if self.inc < 0.0 {
            i as f64 / -self.inc
        } else {
            i as f64 * self.inc
        }
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<TickSpec> {
    const E10: f64 = 7.0710678118654755; // sqrt(50)
    const E5: f64 = 3.1622776601683795; // sqrt(10)
    const E2: f64 = std::f64::consts::SQRT_2;

    let count = count.max(0.0);
    let mut step = (stop - start) / count;
    if step.is_infinite() {
        step = stop / count - start / count;
    }
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let spec = if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        if !inc.is_finite() {
            return None;
        }
        let mut i1 = tick_index(start * inc)?;
        let mut i2 = tick_index(stop * inc)?;
        if (i1 as f64) / inc < start {
            i1 = i1.checked_add(1)?;
        }
        if (i2 as f64) / inc > stop {
            i2 = i2.checked_sub(1)?;
        }
        TickSpec { i1, i2, inc: -inc }
    } else {
        let inc = 10f64.powf(power) * factor;
        if !inc.is_finite() {
            return None;
        }
        let mut i1 = tick_index(start / inc)?;
        let mut i2 = tick_index(stop / inc)?;
        if (i1 as f64) * inc < start {
            i1 = i1.checked_add(1)?;
        }
        if (i2 as f64) * inc > stop {
            i2 = i2.checked_sub(1)?;
        }
        TickSpec { i1, i2, inc }
    };

    if spec.i2 < spec.i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some(spec)
}

/// Rounds a scaled domain end to a tick index; `None` once it no longer fits in an `i64`.
fn tick_index(scaled: f64) -> Option<i64> {
    const LIMIT: f64 = 9.0e15;
    let rounded = scaled.round();
    (rounded.is_finite() && rounded.abs() <= LIMIT).then_some(rounded as i64)
}

/// Roughly `count` evenly spaced "nice" values in `[start, stop]` (steps of 1, 2 or 5 times a
/// power of ten).
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let Some(spec) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    if spec.i2 < spec.i1 {
        return Vec::new();
    }

    let mut out: Vec<f64> = (spec.i1..=spec.i2).map(|i| spec.value(i)).collect();
    if reverse {
        out.reverse();
    }
    out
}

/// Distance between adjacent ticks produced by [`ticks`].
pub fn tick_step(start: f64, stop: f64, count: usize) -> Option<f64> {
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let spec = tick_spec(lo, hi, count as f64)?;
    let step = if spec.inc < 0.0 {
        1.0 / -spec.inc
    } else {
        spec.inc
    };
    Some(if reverse { -step } else { step })
}

/// Decimal places needed to tell apart values `step` apart (d3 `precisionFixed`).
pub fn precision_fixed(step: f64) -> usize {
    let sci = format!("{:e}", step.abs());
    let exponent = sci
        .split_once('e')
        .and_then(|(_, e)| e.parse::<i32>().ok())
        .unwrap_or(0);
    usize::try_from(-exponent).unwrap_or(0)
}

/// Fixed-point formatting with thousands separators and a typographic minus (d3 `,.Nf`).
pub fn format_fixed(value: f64, precision: usize) -> String {
    let digits = format!("{:.*}", precision, value.abs());
    let negative = value < 0.0 && digits.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + int_part.len() / 3 + 3);
    if negative {
        out.push('\u{2212}');
    }
    let lead = int_part.len() % 3;
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
