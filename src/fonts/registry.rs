use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{CountdownError, CountdownResult};

/// Weight of one registered face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Used for unit labels.
    Regular,
    /// Used for unit values.
    Bold,
}

/// One font file, parsed enough to know its family name.
#[derive(Clone)]
pub struct FontFace {
    pub(crate) family: String,
    pub(crate) byte_len: usize,
    pub(crate) blob: parley::fontique::Blob<u8>,
    pub(crate) paint: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("bytes", &self.byte_len)
            .finish()
    }
}

impl FontFace {
    /// Parse font bytes and capture the family name of the first face.
    pub fn from_bytes(bytes: Vec<u8>) -> CountdownResult<Self> {
        if bytes.is_empty() {
            return Err(CountdownError::font("font file is empty"));
        }
        let byte_len = bytes.len();
        let paint =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);
        let blob = parley::fontique::Blob::from(bytes);
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(blob.clone(), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CountdownError::font("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CountdownError::font("registered font family has no name"))?
            .to_string();

        Ok(Self {
            family,
            byte_len,
            blob,
            paint,
        })
    }

    /// Read and parse a font file.
    pub fn load(path: &Path) -> CountdownResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            CountdownError::font(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(bytes).map_err(|e| match e {
            CountdownError::Font(msg) => {
                CountdownError::font(format!("font '{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Family name reported by the font.
    pub fn family(&self) -> &str {
        &self.family
    }
}

/// The regular and bold faces every frame needs, shared read-only across requests.
#[derive(Clone, Debug)]
pub struct FontRegistry {
    regular: Arc<FontFace>,
    bold: Arc<FontFace>,
}

impl FontRegistry {
    /// Build a registry from already-parsed faces.
    pub fn new(regular: FontFace, bold: FontFace) -> Self {
        Self {
            regular: Arc::new(regular),
            bold: Arc::new(bold),
        }
    }

    /// Load both faces from disk. Any failure here is a startup failure.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(regular = %regular.display(), bold = %bold.display())
    )]
    pub fn load(regular: &Path, bold: &Path) -> CountdownResult<Self> {
        let registry = Self::new(FontFace::load(regular)?, FontFace::load(bold)?);
        tracing::info!(
            regular = registry.regular.family(),
            bold = registry.bold.family(),
            "registered fonts"
        );
        Ok(registry)
    }

    /// Face for `weight`.
    pub fn face(&self, weight: FontWeight) -> &FontFace {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

/// Well-known system locations of a regular/bold pair, tried in order.
pub const SYSTEM_FONT_CANDIDATES: [(&str, &str); 3] = [
    (
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    ),
];

/// Load the first complete pair from [`SYSTEM_FONT_CANDIDATES`].
pub fn load_system_fonts() -> Option<FontRegistry> {
    SYSTEM_FONT_CANDIDATES
        .iter()
        .find(|(regular, bold)| Path::new(regular).is_file() && Path::new(bold).is_file())
        .and_then(|(regular, bold)| FontRegistry::load(Path::new(regular), Path::new(bold)).ok())
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/registry.rs"]
mod tests;
