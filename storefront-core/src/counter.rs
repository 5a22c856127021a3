//! Eased percentage counters for the stats band.

/// `1 - (1 - t)^4`, with `t` clamped to `[0, 1]`.
#[must_use]
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// Parse a `data-target` attribute the way browsers parse leading integers:
/// optional whitespace and sign, then digits; trailing text is ignored.
#[must_use]
pub fn parse_target(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    rest[..digits_end].parse::<i64>().ok().map(|v| v * sign)
}

/// One counter counting from zero to `target` over `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    duration_ms: f64,
}

/// Displayed value for a frame and whether the animation has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: i64,
    pub done: bool,
}

impl CounterFrame {
    #[must_use]
    pub fn label(self) -> String {
        format!("{}%", self.value)
    }
}

impl CounterAnimation {
    #[must_use]
    pub fn new(target: i64, duration_ms: u32) -> Self {
        Self {
            target,
            duration_ms: f64::from(duration_ms),
        }
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn frame(&self, elapsed_ms: f64) -> CounterFrame {
        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        };
        let value = (self.target as f64 * ease_out_quart(progress)).round() as i64;
        CounterFrame {
            value,
            done: progress >= 1.0,
        }
    }
}
