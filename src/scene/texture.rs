use serde::Serialize;

use crate::options::TextureSpec;

/// Literal lines of a POV-Ray texture, one list per block.
///
/// Flattened into atom and bond items for the `texturedef` partial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextureDef {
    /// Lines directly inside `texture { }`.
    pub texture: Vec<String>,
    /// Lines inside `pigment { }`.
    pub pigment: Vec<String>,
    /// Lines inside `normal { }`.
    pub normal: Vec<String>,
    /// Lines inside `finish { }`.
    pub finish: Vec<String>,
}

impl TextureDef {
    /// Build the texture of an object of the given colour.
    #[must_use]
    pub fn new(spec: &TextureSpec, colour: &str) -> Self {
        let mut pigment = spec.pigment.clone();
        if spec.use_colour {
            pigment.push(format!("colour {colour}"));
        }
        Self {
            texture: spec.texture.clone(),
            pigment,
            normal: spec.normal.clone(),
            finish: spec.finish.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_goes_last_in_pigment() {
        let spec = TextureSpec {
            pigment: vec!["transmit 0.3".to_owned()],
            ..TextureSpec::default()
        };
        let def = TextureDef::new(&spec, "Red");
        assert_eq!(def.pigment, ["transmit 0.3", "colour Red"]);
        assert_eq!(def.finish, spec.finish);
    }

    #[test]
    fn colour_can_be_turned_off() {
        let spec = TextureSpec {
            use_colour: false,
            ..TextureSpec::default()
        };
        assert!(TextureDef::new(&spec, "Red").pigment.is_empty());
    }
}
