use splashmark::{
    GlyphNode, GlyphSlot, Measure, Scene, SceneSpec, SplashConfig, SplashResult, Viewport,
    relayout,
};

/// Route relayout/fit tracing through the test harness output.
fn init_diagnostics() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Fixed advance widths per glyph text, with SVG-like baseline metrics.
struct TableMeasurer {
    widths: Vec<(String, f64)>,
    ascent: f64,
    descent: f64,
}

impl TableMeasurer {
    fn new(widths: &[(&str, f64)]) -> Self {
        Self {
            widths: widths
                .iter()
                .map(|(t, w)| (t.to_string(), *w))
                .collect(),
            ascent: 150.0,
            descent: 40.0,
        }
    }
}

impl Measure for TableMeasurer {
    fn glyph_bbox(&self, node: &GlyphNode) -> SplashResult<kurbo::Rect> {
        let width = self
            .widths
            .iter()
            .find(|(t, _)| *t == node.text)
            .map(|(_, w)| *w)
            .unwrap_or(100.0);
        let top = node.y - self.ascent;
        Ok(kurbo::Rect::new(
            node.x,
            top,
            node.x + width,
            top + self.ascent + self.descent,
        ))
    }
}

#[test]
fn adjacency_holds_for_arbitrary_width_tables() {
    init_diagnostics();
    let tables: &[&[(&str, f64)]] = &[
        &[("M", 180.0), ("o", 120.0), ("Digital", 420.0)],
        &[("M", 1.0), ("o", 1.0), ("Digital", 1.0)],
        &[("M", 333.3), ("o", 0.5), ("Digital", 1200.0)],
    ];

    for widths in tables {
        let measure = TableMeasurer::new(widths);
        let mut scene = Scene::from_spec(&SceneSpec::default()).unwrap();
        let cfg = SplashConfig::default();
        let viewport = Viewport::new(1280.0, 720.0).unwrap();
        relayout(&mut scene, &measure, viewport, &cfg).unwrap();

        let lead = measure.glyph_bbox(scene.face(GlyphSlot::Lead)).unwrap();
        assert_eq!(
            scene.face(GlyphSlot::Accent).x,
            lead.x1 + cfg.layout.gap_lead_accent
        );
        let accent = measure.glyph_bbox(scene.face(GlyphSlot::Accent)).unwrap();
        assert_eq!(
            scene.face(GlyphSlot::Word).x,
            accent.x1 + cfg.layout.gap_accent_word
        );
    }
}

#[test]
fn relayout_is_bit_for_bit_idempotent() {
    init_diagnostics();
    let measure = TableMeasurer::new(&[("M", 180.0), ("o", 120.0), ("Digital", 420.0)]);
    let mut scene = Scene::from_spec(&SceneSpec::default()).unwrap();
    let cfg = SplashConfig::default();
    let viewport = Viewport::new(800.0, 600.0).unwrap();

    let first = relayout(&mut scene, &measure, viewport, &cfg).unwrap();
    let snapshot = scene.clone();
    let second = relayout(&mut scene, &measure, viewport, &cfg).unwrap();

    assert_eq!(first.scale.to_bits(), second.scale.to_bits());
    assert_eq!(first.translate.x.to_bits(), second.translate.x.to_bits());
    assert_eq!(first.translate.y.to_bits(), second.translate.y.to_bits());
    assert_eq!(scene, snapshot);
}

#[test]
fn extrusion_tracks_relayout_positions() {
    init_diagnostics();
    let measure = TableMeasurer::new(&[("M", 180.0), ("o", 120.0), ("Digital", 420.0)]);
    let mut scene = Scene::from_spec(&SceneSpec::default()).unwrap();
    let cfg = SplashConfig::default();
    relayout(
        &mut scene,
        &measure,
        Viewport::new(1280.0, 720.0).unwrap(),
        &cfg,
    )
    .unwrap();

    assert_eq!(scene.extrusion.len(), 3);
    for (stack, slot) in scene.extrusion.iter().zip(GlyphSlot::ORDER) {
        let face = scene.face(slot);
        assert_eq!(stack.slot, slot);
        assert_eq!(stack.layers.len(), cfg.extrusion.depth as usize);
        let base = &stack.layers[0];
        assert_eq!(base.x, face.x + cfg.extrusion.dx * f64::from(cfg.extrusion.depth));
        assert_eq!(base.y, face.y + cfg.extrusion.dy * f64::from(cfg.extrusion.depth));
    }
}

#[test]
fn fitted_faces_stay_within_the_visible_budget() {
    init_diagnostics();
    let measure = TableMeasurer::new(&[("M", 180.0), ("o", 120.0), ("Digital", 420.0)]);
    let cfg = SplashConfig::default();

    for (w, h) in [(800.0, 600.0), (1920.0, 1080.0), (390.0, 844.0)] {
        let mut scene = Scene::from_spec(&SceneSpec::default()).unwrap();
        let viewport = Viewport::new(w, h).unwrap();
        let fit = relayout(&mut scene, &measure, viewport, &cfg).unwrap();

        let bbox = scene.faces_bbox(&measure).unwrap();
        let s_view = (w / cfg.canvas.width).max(h / cfg.canvas.height);
        let vis_w = w / s_view;
        let vis_h = h / s_view;
        let small = w.min(h) <= cfg.fit.small_threshold;
        let max_w = vis_w * cfg.fit.width_frac;
        let max_h = vis_h
            * if small {
                cfg.fit.height_frac_small
            } else {
                cfg.fit.height_frac_large
            };

        assert!(fit.scale * bbox.width() <= max_w + 1e-9);
        assert!(fit.scale * bbox.height() <= max_h + 1e-9);
    }
}
