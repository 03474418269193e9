use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera placement in spherical coordinates around a focus point.
pub struct CameraOptions {
    /// Focus offset from the centroid of the atoms, in angstroms.
    #[schemars(title = "Focus")]
    pub focus: [f64; 3],
    /// Distance from the camera to the focus.
    #[schemars(title = "Distance", range(min = 0.0))]
    pub distance: f64,
    /// Inclination from the +z axis, in degrees.
    #[schemars(title = "Theta", range(min = 0.0, max = 180.0))]
    pub theta: f64,
    /// Azimuth from the +x axis, in degrees.
    #[schemars(title = "Phi", range(min = -360.0, max = 360.0))]
    pub phi: f64,
    /// Roll within the picture plane, in degrees.
    #[schemars(title = "Rotation", range(min = -360.0, max = 360.0))]
    pub rotation: f64,
    /// Picture width over height.
    #[schemars(title = "Aspect Ratio", range(min = 0.1, max = 10.0))]
    pub aspect_ratio: f64,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            focus: [0.0; 3],
            distance: 15.0,
            theta: 0.0,
            phi: 0.0,
            rotation: 0.0,
            aspect_ratio: 4.0 / 3.0,
        }
    }
}
