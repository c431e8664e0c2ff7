use pvweb_format::Base64Mode;
use serde::{Deserialize, Serialize};

use crate::error::SceneResult;
use crate::legend::LEGEND_HEIGHT;
use crate::material::TRANSPARENT_BIN;

/// Knobs for [`SceneReader`](crate::SceneReader). Every field has a default,
/// so a TOML file only needs the keys it changes:
///
/// ```toml
/// base64 = "lenient"
/// legend_height = 40.0
/// canvas = [1024, 768]
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    pub base64: Base64Mode,
    /// Legend height in pixels.
    pub legend_height: f32,
    /// Render bin for objects flagged transparent.
    pub transparent_bin: i32,
    /// Canvas size used when none is supplied, in pixels.
    pub canvas: [u32; 2],
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            base64: Base64Mode::Strict,
            legend_height: LEGEND_HEIGHT,
            transparent_bin: TRANSPARENT_BIN,
            canvas: [800, 600],
        }
    }
}

impl ReaderOptions {
    pub fn from_toml_str(text: &str) -> SceneResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn base64_mode(&self) -> Base64Mode {
        self.base64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(ReaderOptions::from_toml_str("").unwrap(), ReaderOptions::default());
    }

    #[test]
    fn test_partial_toml() {
        let opts = ReaderOptions::from_toml_str("base64 = \"lenient\"\ncanvas = [1024, 768]\n").unwrap();
        assert_eq!(opts.base64_mode(), Base64Mode::Lenient);
        assert_eq!(opts.canvas, [1024, 768]);
        assert_eq!(opts.legend_height, 30.0);
        assert_eq!(opts.transparent_bin, 1000);
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            ReaderOptions::from_toml_str("base64 = \"loose\""),
            Err(SceneError::Options(_))
        ));
    }
}
