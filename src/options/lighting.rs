use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Area light placed relative to the camera.
///
/// Location and focus are offsets from the camera location and the camera
/// focus, so the light follows the camera by default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Light", inline)]
#[serde(default)]
pub struct LightOptions {
    /// Offset of the light centre from the camera location.
    #[schemars(title = "Location")]
    pub location: [f64; 3],
    /// Offset of the light target from the camera focus.
    #[schemars(title = "Focus")]
    pub focus: [f64; 3],
    /// POV-Ray colour of the light.
    #[schemars(title = "Colour")]
    pub colour: String,
    /// Edge length of the square light area.
    #[schemars(title = "Size", range(min = 0.0))]
    pub size: f64,
    /// Point lights along each side of the area.
    #[schemars(title = "Number", range(min = 1, max = 65))]
    pub number: u32,
    /// Adaptive sampling depth, zero to disable.
    #[schemars(title = "Adaptive", range(min = 0, max = 6))]
    pub adaptive: u32,
    /// Jitter the point lights for smoother shadows.
    #[schemars(title = "Jitter")]
    pub jitter: bool,
}

impl Default for LightOptions {
    fn default() -> Self {
        Self {
            location: [0.0, 1.0, 0.0],
            focus: [0.0; 3],
            colour: "rgb <1.0, 1.0, 1.0>".to_owned(),
            size: 2.0,
            number: 5,
            adaptive: 1,
            jitter: true,
        }
    }
}
