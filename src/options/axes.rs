use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Axes", inline)]
#[serde(default)]
/// Coordinate axes drawn at the camera focus, an aid for picking angles.
pub struct AxesOptions {
    /// Whether to draw the axes at all.
    #[schemars(title = "Draw Axes")]
    pub draw: bool,
    /// Length of each axis shaft.
    #[schemars(title = "Length", range(min = 0.0))]
    pub length: f64,
    /// Radius of each axis shaft.
    #[schemars(title = "Radius", range(min = 0.0))]
    pub radius: f64,
}

impl Default for AxesOptions {
    fn default() -> Self {
        Self {
            draw: false,
            length: 2.0,
            radius: 0.05,
        }
    }
}
