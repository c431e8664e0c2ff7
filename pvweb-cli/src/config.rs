use std::path::Path;

use anyhow::Context;
use pvweb_format::Base64Mode;
use pvweb_render::ReaderOptions;

/// Reader options from `path`, or the defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> anyhow::Result<ReaderOptions> {
    let Some(path) = path else {
        return Ok(ReaderOptions::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let options = ReaderOptions::from_toml_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    log::info!("reader options loaded from {}", path.display());
    Ok(options)
}

/// Command-line flags win over the options file.
pub fn apply_overrides(
    mut options: ReaderOptions,
    width: Option<u32>,
    height: Option<u32>,
    lenient: bool,
) -> ReaderOptions {
    if let Some(width) = width {
        options.canvas[0] = width;
    }
    if let Some(height) = height {
        options.canvas[1] = height;
    }
    if lenient {
        options.base64 = Base64Mode::Lenient;
    }
    options
}
