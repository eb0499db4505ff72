use std::fmt::Write as _;
use std::sync::Arc;

use crate::{
    core::{Rect, Rgba, VirtualCanvas},
    error::{SplashError, SplashResult},
    scene::{GlyphNode, GlyphSlot, Measure, Scene},
};

/// Static fills used when exporting a scene snapshot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SvgTheme {
    pub background: Rgba,
    pub face_fill: Rgba,
    pub shadow_fill: Rgba,
}

impl Default for SvgTheme {
    fn default() -> Self {
        Self {
            background: Rgba::opaque(10, 15, 25),
            face_fill: Rgba::opaque(0, 0, 0),
            shadow_fill: Rgba::opaque(10, 15, 25).with_alpha(0.35),
        }
    }
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_text(out: &mut String, node_text: &str, x: f64, y: f64, font: &crate::scene::FontAttrs, fill: &str) {
    let _ = write!(
        out,
        r#"<text x="{x}" y="{y}" font-size="{size}" font-weight="{weight}" font-family="{family}" fill="{fill}">{text}</text>"#,
        size = font.size_px,
        weight = font.weight,
        family = xml_escape(&font.family),
        text = xml_escape(node_text),
    );
}

/// Serialize the laid-out scene as a standalone SVG document: extrusion
/// layers render first, then the shadow copies, then the front faces, all
/// inside the wrap transform computed by the fit engine.
pub fn scene_to_svg(scene: &Scene, canvas: VirtualCanvas, theme: &SvgTheme) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height,
    );
    let _ = write!(
        out,
        r#"<rect width="{w}" height="{h}" fill="{bg}"/>"#,
        w = canvas.width,
        h = canvas.height,
        bg = theme.background.to_css(),
    );
    let _ = write!(
        out,
        r#"<g transform="translate({tx},{ty}) scale({s})">"#,
        tx = scene.wrap.translate.x,
        ty = scene.wrap.translate.y,
        s = scene.wrap.scale,
    );

    out.push_str("<g>");
    for stack in &scene.extrusion {
        out.push_str("<g>");
        for layer in &stack.layers {
            write_text(
                &mut out,
                &layer.text,
                layer.x,
                layer.y,
                &layer.font,
                &layer.fill.to_css(),
            );
        }
        out.push_str("</g>");
    }
    out.push_str("</g>");

    out.push_str("<g>");
    for slot in GlyphSlot::ORDER {
        let n = scene.shadow(slot);
        write_text(&mut out, &n.text, n.x, n.y, &n.font, &theme.shadow_fill.to_css());
    }
    out.push_str("</g>");

    out.push_str("<g>");
    for slot in GlyphSlot::ORDER {
        let n = scene.face(slot);
        write_text(&mut out, &n.text, n.x, n.y, &n.font, &theme.face_fill.to_css());
    }
    out.push_str("</g>");

    out.push_str("</g></svg>");
    out
}

/// [`Measure`] implementation with real font metrics: each glyph node is
/// rendered into a minimal SVG document and its bounding box read back from
/// the parsed tree, the headless equivalent of measuring attached text.
pub struct SvgMeasurer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for SvgMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgMeasurer {
    /// Load system fonts once; measurement itself is pure afterwards.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self {
            fontdb: Arc::new(db),
        }
    }

    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }

    /// Number of font faces available for measurement.
    pub fn font_faces(&self) -> usize {
        self.fontdb.faces().count()
    }
}

impl Measure for SvgMeasurer {
    fn glyph_bbox(&self, node: &GlyphNode) -> SplashResult<Rect> {
        // Generous canvas so the glyph never sits outside the document.
        let extent = (node.x.abs() + node.y.abs() + node.font.size_px) * 4.0 + 1024.0;
        let mut doc = String::new();
        let _ = write!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{extent}" height="{extent}">"#,
        );
        write_text(&mut doc, &node.text, node.x, node.y, &node.font, "#000");
        doc.push_str("</svg>");

        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(doc.as_bytes(), &opts)
            .map_err(|e| SplashError::measure(format!("parse measurement svg: {e}")))?;

        let b = tree.root().abs_bounding_box();
        let rect = Rect::new(
            f64::from(b.x()),
            f64::from(b.y()),
            f64::from(b.x() + b.width()),
            f64::from(b.y() + b.height()),
        );
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Err(SplashError::measure(format!(
                "glyph '{}' measured empty; fonts not available",
                node.text
            )));
        }
        Ok(rect)
    }
}
