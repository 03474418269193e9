use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[schemars(title = "Background", inline)]
#[serde(default)]
/// Scene background.
pub struct BackgroundOptions {
    /// POV-Ray colour of the background; empty for a transparent image.
    #[schemars(title = "Colour")]
    pub colour: String,
}

impl BackgroundOptions {
    /// Whether a background block is emitted.
    #[must_use]
    pub fn is_set(&self) -> bool {
        !self.colour.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Render", inline)]
#[serde(default)]
/// Settings for invoking POV-Ray.
pub struct RenderOptions {
    /// Program name or path of the POV-Ray executable.
    #[schemars(title = "POV-Ray Program")]
    pub povray_program: String,
    /// Image width in pixels; the height follows the aspect ratio.
    #[schemars(title = "Width", range(min = 1))]
    pub width: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            povray_program: "povray".to_owned(),
            width: 800,
        }
    }
}
