use std::sync::LazyLock;

use regex::Regex;

static RE_DOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+\.?\d*)\s*(mg|mcg|g)").unwrap());

/// Convert a quantity to whole milligrams. Fractions are truncated,
/// so `250 mcg` is `0` and `1.5 mg` is `1`. Quantities that do not fit
/// in a `u32` are rejected rather than clamped.
pub fn convert_to_mg(value: f64, unit: &str) -> Option<u32> {
    let mg = match unit.to_lowercase().as_str() {
        "mg" => value,
        "g" => value * 1000.0,
        "mcg" => value / 1000.0,
        _ => return None,
    }
    .trunc();

    if !(0.0..=f64::from(u32::MAX)).contains(&mg) {
        tracing::debug!(value, unit, "Dose out of range, ignored");
        return None;
    }
    Some(mg as u32)
}

/// Find the first `<number> <unit>` quantity in a lookahead window.
pub fn parse_dose_mg(window: &str) -> Option<u32> {
    let caps = RE_DOSE.captures(window)?;
    let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
    convert_to_mg(value, caps.get(2)?.as_str())
}
