use crate::{
    core::{FitTransform, Rect, Rgba},
    error::{SplashError, SplashResult},
};

/// Front-face glyph slots in fixed left-to-right order: the lead letter, the
/// dropping accent letter, and the trailing word.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum GlyphSlot {
    Lead,
    Accent,
    Word,
}

impl GlyphSlot {
    pub const ORDER: [GlyphSlot; 3] = [GlyphSlot::Lead, GlyphSlot::Accent, GlyphSlot::Word];

    fn index(self) -> usize {
        match self {
            Self::Lead => 0,
            Self::Accent => 1,
            Self::Word => 2,
        }
    }
}

/// Font attributes inherited from the scene spec, never computed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontAttrs {
    pub size_px: f64,
    pub weight: u16,
    pub family: String,
}

impl Default for FontAttrs {
    fn default() -> Self {
        Self {
            size_px: 200.0,
            weight: 800,
            family: "sans-serif".to_string(),
        }
    }
}

/// A renderable unit of text: fixed content and font, mutable position.
/// `y` is the text baseline, as in SVG.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphNode {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: FontAttrs,
}

/// One layer of the fake-3D extrusion behind a front face.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExtrudedGlyph {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: FontAttrs,
    pub fill: Rgba,
}

/// The generated extrusion layers for one front face, ordered far-to-near.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExtrusionStack {
    pub slot: GlyphSlot,
    pub layers: Vec<ExtrudedGlyph>,
}

/// Bounding-box measurement capability. Implementations reflect real font
/// metrics of an attached rendering surface; the engines stay pure.
pub trait Measure {
    fn glyph_bbox(&self, node: &GlyphNode) -> SplashResult<Rect>;
}

impl<M: Measure + ?Sized> Measure for &M {
    fn glyph_bbox(&self, node: &GlyphNode) -> SplashResult<Rect> {
        (**self).glyph_bbox(node)
    }
}

/// Deterministic em-based metrics, for tests and for hosts without a
/// measurable surface. Advance, ascent, and descent are fractions of the
/// font size; the bbox origin tracks the node's baseline position.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct HeuristicMeasurer {
    pub advance_em: f64,
    pub ascent_em: f64,
    pub descent_em: f64,
}

impl Default for HeuristicMeasurer {
    fn default() -> Self {
        Self {
            advance_em: 0.62,
            ascent_em: 0.74,
            descent_em: 0.21,
        }
    }
}

impl Measure for HeuristicMeasurer {
    fn glyph_bbox(&self, node: &GlyphNode) -> SplashResult<Rect> {
        let size = node.font.size_px;
        if !size.is_finite() || size <= 0.0 {
            return Err(SplashError::measure("font size must be finite and > 0"));
        }
        let width = self.advance_em * size * node.text.chars().count() as f64;
        let top = node.y - self.ascent_em * size;
        let height = (self.ascent_em + self.descent_em) * size;
        Ok(Rect::new(node.x, top, node.x + width, top + height))
    }
}

/// Declarative description of the mark, typically loaded from JSON.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SceneSpec {
    pub lead_text: String,
    pub accent_text: String,
    pub word_text: String,
    pub mark_font: FontAttrs,
    pub word_font: FontAttrs,
    /// Anchor x of the lead glyph; the layout engine never moves it.
    pub anchor_x: f64,
}

impl Default for SceneSpec {
    fn default() -> Self {
        Self {
            lead_text: "M".to_string(),
            accent_text: "o".to_string(),
            word_text: "Digital".to_string(),
            mark_font: FontAttrs::default(),
            word_font: FontAttrs {
                size_px: 120.0,
                ..FontAttrs::default()
            },
            anchor_x: 120.0,
        }
    }
}

impl SceneSpec {
    pub fn validate(&self) -> SplashResult<()> {
        for (name, text) in [
            ("lead_text", &self.lead_text),
            ("accent_text", &self.accent_text),
            ("word_text", &self.word_text),
        ] {
            if text.is_empty() {
                return Err(SplashError::validation(format!("{name} must be non-empty")));
            }
        }
        for (name, font) in [("mark_font", &self.mark_font), ("word_font", &self.word_font)] {
            if !font.size_px.is_finite() || font.size_px <= 0.0 {
                return Err(SplashError::validation(format!(
                    "{name} size_px must be finite and > 0"
                )));
            }
        }
        if !self.anchor_x.is_finite() {
            return Err(SplashError::validation("anchor_x must be finite"));
        }
        Ok(())
    }
}

/// All per-session mutable state of the splash artwork: three front faces,
/// three shadow copies, the generated extrusion stacks, and the wrap
/// transform computed by the fit engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    faces: [GlyphNode; 3],
    shadows: [GlyphNode; 3],
    pub extrusion: Vec<ExtrusionStack>,
    pub wrap: FitTransform,
}

impl Scene {
    pub fn from_spec(spec: &SceneSpec) -> SplashResult<Self> {
        spec.validate()?;
        let node = |text: &str, font: &FontAttrs, x: f64| GlyphNode {
            text: text.to_string(),
            x,
            y: 0.0,
            font: font.clone(),
        };
        let faces = [
            node(&spec.lead_text, &spec.mark_font, spec.anchor_x),
            node(&spec.accent_text, &spec.mark_font, spec.anchor_x),
            node(&spec.word_text, &spec.word_font, spec.anchor_x),
        ];
        let shadows = faces.clone();
        Ok(Self {
            faces,
            shadows,
            extrusion: Vec::new(),
            wrap: FitTransform::IDENTITY,
        })
    }

    pub fn face(&self, slot: GlyphSlot) -> &GlyphNode {
        &self.faces[slot.index()]
    }

    pub fn face_mut(&mut self, slot: GlyphSlot) -> &mut GlyphNode {
        &mut self.faces[slot.index()]
    }

    pub fn shadow(&self, slot: GlyphSlot) -> &GlyphNode {
        &self.shadows[slot.index()]
    }

    /// Move a face and its shadow copy together; shadows never drift.
    pub fn place(&mut self, slot: GlyphSlot, x: f64, y: f64) {
        let i = slot.index();
        self.faces[i].x = x;
        self.faces[i].y = y;
        self.shadows[i].x = x;
        self.shadows[i].y = y;
    }

    /// Union bounding box of the three front faces. This is the content box
    /// the fit engine works from; the extrusion halo deliberately bleeds
    /// past it.
    pub fn faces_bbox(&self, measure: impl Measure) -> SplashResult<Rect> {
        let mut bbox: Option<Rect> = None;
        for slot in GlyphSlot::ORDER {
            let b = measure.glyph_bbox(self.face(slot))?;
            bbox = Some(match bbox {
                Some(acc) => acc.union(b),
                None => b,
            });
        }
        bbox.ok_or_else(|| SplashError::layout("scene has no faces"))
    }
}
