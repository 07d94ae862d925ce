//! Rasterizes a scene so it can be shown in a plain pixel window.
//!
//! Uses `usvg` for parsing and `resvg` for rendering into a `tiny_skia`
//! pixmap. System fonts are loaded once so tick labels and readouts show up.

use std::fmt;
use std::sync::Arc;

use log::debug;
use resvg::usvg::{fontdb, Options, Transform, Tree};
use tiny_skia::Pixmap;

use crate::error::RasterError;
use crate::scene::Scene;

/// Renders scenes into RGBA frames of a fixed size.
pub struct Rasterizer {
    fonts: Arc<fontdb::Database>,
    pixmap: Pixmap,
    background: (u8, u8, u8),
}

impl fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rasterizer")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("font_faces", &self.fonts.len())
            .finish()
    }
}

impl Rasterizer {
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let pixmap = Pixmap::new(width, height).ok_or(RasterError::Pixmap { width, height })?;
        let mut fonts = fontdb::Database::new();
        fonts.load_system_fonts();
        debug!("rasterizer {width}x{height}: {} font faces", fonts.len());
        Ok(Self {
            fonts: Arc::new(fonts),
            pixmap,
            background: (0xff, 0xff, 0xff),
        })
    }

    /// Renders `scene` scaled to fill the pixmap and copies it into `frame`,
    /// which must be `width * height * 4` RGBA bytes.
    pub fn render_into(&mut self, scene: &Scene, frame: &mut [u8]) -> Result<(), RasterError> {
        let expected = self.pixmap.data().len();
        if frame.len() != expected {
            return Err(RasterError::FrameSize {
                expected,
                actual: frame.len(),
            });
        }

        let options = Options {
            fontdb: Arc::clone(&self.fonts),
            ..Options::default()
        };
        let tree = Tree::from_str(&scene.to_svg(), &options)
            .map_err(|e| RasterError::Parse(e.to_string()))?;

        let (r, g, b) = self.background;
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 0xff));
        let size = tree.size();
        let transform = Transform::from_scale(
            self.pixmap.width() as f32 / size.width(),
            self.pixmap.height() as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut self.pixmap.as_mut());

        // Opaque background, so premultiplied and straight alpha agree.
        frame.copy_from_slice(self.pixmap.data());
        Ok(())
    }
}
