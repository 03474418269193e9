use glam::DVec3;
use serde::Serialize;

use crate::options::CameraOptions;
use crate::pov::format_vector;
use crate::structure::Structure;

/// One line of the POV-Ray `camera { }` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CameraDirective {
    /// Keyword such as `location` or `look_at`.
    pub op_name: String,
    /// Its POV-Ray value.
    pub op_value: String,
}

impl CameraDirective {
    fn vector(name: &str, v: DVec3) -> Self {
        Self {
            op_name: name.to_owned(),
            op_value: format_vector(v),
        }
    }
}

/// Camera placed around a focus point, with its POV-Ray directives.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position.
    pub location: DVec3,
    /// Look-at target.
    pub focus: DVec3,
    /// Roll within the picture plane, in radians.
    pub rotation: f64,
    /// Directives in emission order.
    pub directives: Vec<CameraDirective>,
}

impl Camera {
    /// Place the camera at spherical coordinates around the focus.
    ///
    /// The focus is the centroid of the structure shifted by the configured
    /// offset. `right` points along -x so that POV-Ray's left-handed frame
    /// shows the structure the way chemists draw it.
    #[must_use]
    pub fn new(opts: &CameraOptions, structure: &Structure) -> Self {
        let focus = structure.centroid() + DVec3::from_array(opts.focus);
        let theta = opts.theta.to_radians();
        let phi = opts.phi.to_radians();
        let rotation = opts.rotation.to_radians();

        let location = focus
            + DVec3::new(
                theta.sin() * phi.cos(),
                theta.sin() * phi.sin(),
                theta.cos(),
            ) * opts.distance;
        let sky = DVec3::new(rotation.sin(), rotation.cos(), 0.0);

        let directives = vec![
            CameraDirective::vector("location", location),
            CameraDirective::vector("up", DVec3::Y),
            CameraDirective::vector(
                "right",
                DVec3::new(-opts.aspect_ratio, 0.0, 0.0),
            ),
            CameraDirective::vector("sky", sky),
            CameraDirective::vector("look_at", focus),
        ];

        Self {
            location,
            focus,
            rotation,
            directives,
        }
    }
}
