//! Display formatting for tank values
//!
//! Pure string production only; the rendering surface itself lives
//! outside this crate.

use crate::overlay::TankOptions;

/// Scale a raw value by the configured factor and render it with the
/// configured number of decimal places. Ties round half away from
/// zero, as `toFixed` does, not half to even.
pub fn adjusted_value(value: f64, options: &TankOptions) -> String {
    let places = options.places();
    let scale = 10f64.powi(places as i32);
    let rounded = (value * options.factor() * scale).round() / scale;
    format!("{:.*}", places as usize, rounded)
}

/// Tank index extracted from a dotted path (`tanks.<kind>.<n>...`),
/// 0 when the path has no index component.
pub fn tank_number(path: &str) -> u32 {
    path.split('.')
        .nth(2)
        .and_then(|part| part.parse().ok())
        .unwrap_or(0)
}

/// Human-readable tank name: `Tank <n> (<configured name or kind>)`.
pub fn meaningful_name(path: &str, options: &TankOptions) -> String {
    let mut parts = path.split('.');
    let kind = parts.nth(1).unwrap_or("");
    let number = parts.next().unwrap_or("0");
    let name = options.name.as_deref().unwrap_or(kind);
    format!("Tank {} ({})", number, name)
}
