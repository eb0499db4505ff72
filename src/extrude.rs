use crate::{
    core::Rgba,
    error::{SplashError, SplashResult},
    scene::{ExtrudedGlyph, ExtrusionStack, GlyphNode, GlyphSlot, Scene},
};

/// Extrusion constants: stack depth, per-step offset, and the dark base fill
/// the alpha ramp is applied to.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExtrusionConfig {
    pub depth: u32,
    pub dx: f64,
    pub dy: f64,
    pub base_fill: Rgba,
}

impl Default for ExtrusionConfig {
    fn default() -> Self {
        Self {
            depth: 14,
            dx: 1.2,
            dy: 1.2,
            base_fill: Rgba::opaque(10, 15, 25),
        }
    }
}

impl ExtrusionConfig {
    pub fn validate(&self) -> SplashResult<()> {
        if self.depth == 0 {
            return Err(SplashError::validation("extrusion depth must be > 0"));
        }
        if !self.dx.is_finite() || !self.dy.is_finite() {
            return Err(SplashError::validation("extrusion offsets must be finite"));
        }
        Ok(())
    }

    /// Fill alpha for layer `i` (1..=depth): the farthest layer
    /// (`i == depth`) is faintest and the stack darkens toward the true
    /// face, reading as depth falloff.
    pub fn layer_alpha(&self, i: u32) -> f64 {
        0.55 - (f64::from(i) / f64::from(self.depth)) * 0.45
    }
}

/// Synthesize the extrusion stack for one front face, layers ordered
/// far-to-near so they render beneath the face.
pub fn extrusion_for(
    slot: GlyphSlot,
    face: &GlyphNode,
    cfg: &ExtrusionConfig,
) -> SplashResult<ExtrusionStack> {
    cfg.validate()?;
    let mut layers = Vec::with_capacity(cfg.depth as usize);
    for i in (1..=cfg.depth).rev() {
        let step = f64::from(i);
        layers.push(ExtrudedGlyph {
            text: face.text.clone(),
            x: face.x + cfg.dx * step,
            y: face.y + cfg.dy * step,
            font: face.font.clone(),
            fill: cfg.base_fill.with_alpha(cfg.layer_alpha(i)),
        });
    }
    Ok(ExtrusionStack { slot, layers })
}

/// Discard and regenerate every extrusion stack from the current face
/// positions. Positions are baked into each layer at creation time, so this
/// must run after every layout pass.
pub fn rebuild_extrusion(scene: &mut Scene, cfg: &ExtrusionConfig) -> SplashResult<()> {
    let mut stacks = Vec::with_capacity(GlyphSlot::ORDER.len());
    for slot in GlyphSlot::ORDER {
        stacks.push(extrusion_for(slot, scene.face(slot), cfg)?);
    }
    scene.extrusion = stacks;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Scene, SceneSpec};

    fn face() -> GlyphNode {
        let scene = Scene::from_spec(&SceneSpec::default()).unwrap();
        scene.face(GlyphSlot::Lead).clone()
    }

    #[test]
    fn stack_has_exactly_depth_layers() {
        let cfg = ExtrusionConfig::default();
        let stack = extrusion_for(GlyphSlot::Lead, &face(), &cfg).unwrap();
        assert_eq!(stack.layers.len(), 14);
    }

    #[test]
    fn layers_are_ordered_far_to_near_and_darken_toward_the_face() {
        let cfg = ExtrusionConfig::default();
        let stack = extrusion_for(GlyphSlot::Lead, &face(), &cfg).unwrap();

        // First emitted layer is the base (i == depth), farthest offset and
        // faintest fill.
        let base = &stack.layers[0];
        let near = stack.layers.last().unwrap();
        assert!(base.x > near.x);
        assert!(base.y > near.y);

        for pair in stack.layers.windows(2) {
            assert!(pair[0].fill.alpha < pair[1].fill.alpha);
        }
    }

    #[test]
    fn alpha_follows_the_ramp_formula() {
        let cfg = ExtrusionConfig::default();
        for i in 1..=cfg.depth {
            let expected = 0.55 - (f64::from(i) / 14.0) * 0.45;
            assert!((cfg.layer_alpha(i) - expected).abs() < 1e-12);
        }
        assert!((cfg.layer_alpha(cfg.depth) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn layer_offsets_are_multiples_of_the_step() {
        let cfg = ExtrusionConfig::default();
        let f = face();
        let stack = extrusion_for(GlyphSlot::Lead, &f, &cfg).unwrap();
        let base = &stack.layers[0];
        assert_eq!(base.x, f.x + cfg.dx * 14.0);
        assert_eq!(base.y, f.y + cfg.dy * 14.0);
    }

    #[test]
    fn rebuild_replaces_previous_stacks() {
        let mut scene = Scene::from_spec(&SceneSpec::default()).unwrap();
        let cfg = ExtrusionConfig::default();
        rebuild_extrusion(&mut scene, &cfg).unwrap();
        assert_eq!(scene.extrusion.len(), 3);

        scene.place(GlyphSlot::Lead, 999.0, 360.0);
        rebuild_extrusion(&mut scene, &cfg).unwrap();
        assert_eq!(scene.extrusion.len(), 3);
        assert_eq!(scene.extrusion[0].layers[0].x, 999.0 + cfg.dx * 14.0);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let cfg = ExtrusionConfig {
            depth: 0,
            ..ExtrusionConfig::default()
        };
        assert!(extrusion_for(GlyphSlot::Lead, &face(), &cfg).is_err());
    }
}
