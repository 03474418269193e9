use glam::{DQuat, DVec3};
use serde::Serialize;

use super::camera::Camera;
use crate::options::LightOptions;
use crate::pov::format_vector;

/// The `light-*` keys of the render context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LightSource {
    /// Centre of the area light.
    pub light_location: String,
    /// POV-Ray colour.
    pub light_colour: String,
    /// First side of the light square.
    pub light_area_vec_1: String,
    /// Second side of the light square.
    pub light_area_vec_2: String,
    /// Point lights per side.
    pub light_number: u32,
    /// Adaptive sampling depth, absent when disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_adaptive: Option<u32>,
    /// Jittered point lights.
    pub light_jitter: bool,
}

impl LightSource {
    /// Place a square area light facing its focus.
    ///
    /// Location and focus are offsets from the camera's. The square is
    /// rolled with the camera and then turned by the shortest rotation
    /// taking +z onto the light direction.
    #[must_use]
    pub fn new(opts: &LightOptions, camera: &Camera) -> Self {
        let location = camera.location + DVec3::from_array(opts.location);
        let focus = camera.focus + DVec3::from_array(opts.focus);
        let direction = (focus - location).normalize_or_zero();
        let turn = if direction == DVec3::ZERO {
            DQuat::IDENTITY
        } else {
            DQuat::from_rotation_arc(DVec3::Z, direction)
        };

        let (sin, cos) = camera.rotation.sin_cos();
        let side_1 = DVec3::new(cos, sin, 0.0) * opts.size;
        let side_2 = DVec3::new(-sin, cos, 0.0) * opts.size;

        Self {
            light_location: format_vector(location),
            light_colour: opts.colour.clone(),
            light_area_vec_1: format_vector(turn * side_1),
            light_area_vec_2: format_vector(turn * side_2),
            light_number: opts.number,
            light_adaptive: (opts.adaptive > 0).then_some(opts.adaptive),
            light_jitter: opts.jitter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(location: DVec3, focus: DVec3) -> Camera {
        Camera {
            location,
            focus,
            rotation: 0.0,
            directives: Vec::new(),
        }
    }

    fn parse_vector(text: &str) -> DVec3 {
        let parts: Vec<f64> = text
            .trim_matches(|c| c == '<' || c == '>')
            .split(',')
            .map(|p| p.trim().parse().unwrap())
            .collect();
        DVec3::new(parts[0], parts[1], parts[2])
    }

    fn sides(light: &LightSource) -> [DVec3; 2] {
        [
            parse_vector(&light.light_area_vec_1),
            parse_vector(&light.light_area_vec_2),
        ]
    }

    #[test]
    fn light_follows_the_camera() {
        let light = LightSource::new(
            &LightOptions::default(),
            &camera(DVec3::new(0.0, 0.0, 10.0), DVec3::ZERO),
        );
        assert_eq!(
            light.light_location,
            format_vector(DVec3::new(0.0, 1.0, 10.0))
        );
        assert_eq!(light.light_colour, "rgb <1.0, 1.0, 1.0>");
        assert_eq!(light.light_number, 5);
        assert_eq!(light.light_adaptive, Some(1));
        assert!(light.light_jitter);
    }

    #[test]
    fn square_is_perpendicular_to_direction() {
        let opts = LightOptions {
            location: [0.0; 3],
            size: 1.5,
            ..LightOptions::default()
        };
        let locations = [
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 10.0),
            DVec3::new(0.0, 0.0, -10.0),
        ];
        for location in locations {
            let light =
                LightSource::new(&opts, &camera(location, DVec3::ZERO));
            let [a, b] = sides(&light);
            let direction = -location.normalize();
            assert!(a.dot(direction).abs() < 1e-5);
            assert!(b.dot(direction).abs() < 1e-5);
            assert!(a.dot(b).abs() < 1e-5);
            assert!((a.length() - 1.5).abs() < 1e-5);
        }
    }

    #[test]
    fn adaptive_zero_is_omitted() {
        let opts = LightOptions {
            adaptive: 0,
            ..LightOptions::default()
        };
        let light = LightSource::new(&opts, &camera(DVec3::Z, DVec3::ZERO));
        assert_eq!(light.light_adaptive, None);
        let value = serde_json::to_value(&light).unwrap();
        assert!(value.get("light-adaptive").is_none());
        assert!(value.get("light-area-vec-1").is_some());
    }

    #[test]
    fn coincident_focus_does_not_rotate() {
        let opts = LightOptions {
            location: [0.0; 3],
            size: 1.0,
            ..LightOptions::default()
        };
        let light =
            LightSource::new(&opts, &camera(DVec3::ZERO, DVec3::ZERO));
        assert_eq!(light.light_area_vec_1, format_vector(DVec3::X));
        assert_eq!(light.light_area_vec_2, format_vector(DVec3::Y));
    }
}
