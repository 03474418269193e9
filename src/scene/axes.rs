use glam::DVec3;
use serde::Serialize;

use crate::options::AxesOptions;
use crate::pov::{format_scalar, format_vector};

/// Colours of the x, y and z arrows.
const COLOURS: [&str; 3] = ["Red", "Green", "Blue"];
/// Tip length relative to the shaft length.
const TIP_LENGTH_FACTOR: f64 = 0.2;
/// Tip base radius relative to the shaft radius.
const TIP_BASE_FACTOR: f64 = 3.0;

/// One coordinate axis drawn as a cylinder topped by a cone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AxisItem {
    /// Start of the shaft.
    pub begin: String,
    /// End of the shaft, base of the tip.
    pub end: String,
    /// Apex of the tip.
    pub tip: String,
    /// Shaft radius.
    pub radius: String,
    /// Radius of the tip's base.
    pub tip_base_radius: String,
    /// Colour of shaft and tip.
    pub colour: String,
}

/// Arrows along x, y and z from the camera focus.
#[must_use]
pub fn draw_axes(origin: DVec3, opts: &AxesOptions) -> Vec<AxisItem> {
    let tip_length = opts.length * TIP_LENGTH_FACTOR;
    [DVec3::X, DVec3::Y, DVec3::Z]
        .into_iter()
        .zip(COLOURS)
        .map(|(unit, colour)| AxisItem {
            begin: format_vector(origin),
            end: format_vector(origin + unit * opts.length),
            tip: format_vector(origin + unit * (opts.length + tip_length)),
            radius: format_scalar(opts.radius),
            tip_base_radius: format_scalar(opts.radius * TIP_BASE_FACTOR),
            colour: colour.to_owned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_coloured_arrows() {
        let origin = DVec3::new(1.0, 1.0, 1.0);
        let axes = draw_axes(origin, &AxesOptions::default());
        assert_eq!(axes.len(), 3);

        let colours: Vec<&str> = axes.iter().map(|a| a.colour.as_str()).collect();
        assert_eq!(colours, COLOURS);

        let y = &axes[1];
        assert_eq!(y.begin, format_vector(origin));
        assert_eq!(y.end, format_vector(DVec3::new(1.0, 3.0, 1.0)));
        assert_eq!(y.tip, format_vector(DVec3::new(1.0, 3.4, 1.0)));
        assert_eq!(y.radius, " 0.0500");
        assert_eq!(y.tip_base_radius, " 0.1500");
    }

    #[test]
    fn keys_are_kebab_case() {
        let axes = draw_axes(DVec3::ZERO, &AxesOptions::default());
        let value = serde_json::to_value(&axes[0]).unwrap();
        assert!(value.get("tip-base-radius").is_some());
    }
}
