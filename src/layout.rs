use crate::{
    error::SplashResult,
    scene::{GlyphSlot, Measure, Scene},
};

/// Inline layout constants: shared baseline plus the horizontal gap for each
/// adjacency (lead→accent, accent→word).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutConfig {
    pub baseline: f64,
    pub gap_lead_accent: f64,
    pub gap_accent_word: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            baseline: 360.0,
            gap_lead_accent: 18.0,
            gap_accent_word: 26.0,
        }
    }
}

/// Place the three glyph slots adjacent on the shared baseline.
///
/// The lead glyph's x is the anchor and is never moved. Each subsequent slot
/// is placed at the previous slot's measured bounding-box right edge plus the
/// configured gap, measuring after the previous slot has settled (font
/// metrics feed back into each step). Shadow copies receive identical
/// positions.
///
/// Precondition: `measure` must reflect real metrics for the scene's font
/// attributes; a failing measurement is a precondition violation and is
/// propagated as-is.
#[tracing::instrument(skip(scene, measure))]
pub fn layout_inline(
    scene: &mut Scene,
    measure: impl Measure,
    cfg: &LayoutConfig,
) -> SplashResult<()> {
    for slot in GlyphSlot::ORDER {
        let x = scene.face(slot).x;
        scene.place(slot, x, cfg.baseline);
    }

    let lead_box = measure.glyph_bbox(scene.face(GlyphSlot::Lead))?;
    scene.place(
        GlyphSlot::Accent,
        lead_box.x1 + cfg.gap_lead_accent,
        cfg.baseline,
    );

    let accent_box = measure.glyph_bbox(scene.face(GlyphSlot::Accent))?;
    scene.place(
        GlyphSlot::Word,
        accent_box.x1 + cfg.gap_accent_word,
        cfg.baseline,
    );

    Ok(())
}
