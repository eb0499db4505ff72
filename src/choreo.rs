use crate::{
    core::Rgba,
    ease::Ease,
    scene::GlyphSlot,
    timeline::{NodeRole, Prop, TimePos, TimelineEngine, TweenSpec},
};

/// Label the choreography attaches to its completion callback; the controller
/// routes it to teardown.
pub const COMPLETION_LABEL: &str = "teardown";

/// Colors the choreography animates between.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    pub brand_red: Rgba,
    pub face_dark: Rgba,
    pub drop_white: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            brand_red: Rgba::opaque(0xff, 0x3b, 0x3b),
            face_dark: Rgba::opaque(0, 0, 0),
            drop_white: Rgba::opaque(0xff, 0xff, 0xff),
        }
    }
}

// Drop height of the accent glyph, in virtual-canvas units.
const ACCENT_RAISE_Y: f64 = -420.0;

/// The fixed splash choreography. One linear sequence, no branching: the
/// accent glyph drops and settles while the mark flashes, every letter turns
/// brand red, a highlight sweeps across, and a final glow pulse hands off to
/// the completion callback.
pub struct Choreography;

impl Choreography {
    pub fn build(engine: &mut dyn TimelineEngine, palette: &Palette) {
        let faces = [
            NodeRole::Face(GlyphSlot::Lead),
            NodeRole::Face(GlyphSlot::Accent),
            NodeRole::Face(GlyphSlot::Word),
        ];
        let rot_groups = [
            NodeRole::RotGroup(GlyphSlot::Lead),
            NodeRole::RotGroup(GlyphSlot::Accent),
            NodeRole::RotGroup(GlyphSlot::Word),
        ];
        let accent = NodeRole::Face(GlyphSlot::Accent);
        let accent_rot = NodeRole::RotGroup(GlyphSlot::Accent);

        // Start states: lead and word dark, accent white and raised with its
        // rotation group tilted in perspective.
        engine.set(
            &[accent_rot],
            &[
                Prop::Perspective(900.0),
                Prop::RotationX(-55.0),
                Prop::RotationY(18.0),
            ],
            TimePos::At(0.0),
        );
        engine.set(
            &[accent],
            &[Prop::Y(ACCENT_RAISE_Y), Prop::Fill(palette.drop_white)],
            TimePos::At(0.0),
        );
        engine.set(
            &[NodeRole::Face(GlyphSlot::Lead), NodeRole::Face(GlyphSlot::Word)],
            &[Prop::Fill(palette.face_dark)],
            TimePos::At(0.0),
        );

        // Pre flash.
        engine.set(&[NodeRole::PreFlash], &[Prop::Opacity(1.0)], TimePos::At(0.0));
        engine.tween(
            TweenSpec::new(
                vec![NodeRole::PreFlash],
                vec![Prop::Opacity(0.0)],
                0.7,
                Ease::OutQuad,
            ),
            TimePos::At(0.0),
        );

        // Accent drop, rotation settle, and a quick squash.
        engine.tween(
            TweenSpec::new(vec![accent], vec![Prop::Y(0.0)], 1.05, Ease::OutBounce),
            TimePos::At(0.0),
        );
        engine.tween(
            TweenSpec::new(
                vec![accent_rot],
                vec![Prop::RotationX(0.0), Prop::RotationY(0.0)],
                0.9,
                Ease::OutCubic,
            ),
            TimePos::AfterPrev(0.1),
        );
        engine.tween(
            TweenSpec::new(
                vec![accent_rot],
                vec![
                    Prop::ScaleY(0.96),
                    Prop::ScaleX(1.03),
                    Prop::Origin {
                        x_frac: 0.5,
                        y_frac: 0.6,
                    },
                ],
                0.08,
                Ease::OutCubic,
            )
            .repeat(1)
            .yoyo(),
            TimePos::AfterPrev(0.85),
        );

        // Warm pulse behind the mark.
        pulse_rect(engine, NodeRole::PulseGlow, TimePos::FromEnd(-0.05));

        // All letters turn brand red.
        engine.tween(
            TweenSpec::new(
                faces.to_vec(),
                vec![Prop::Fill(palette.brand_red)],
                0.35,
                Ease::OutQuad,
            )
            .stagger(0.03),
            TimePos::AfterPrev(0.05),
        );

        // Subtle 3D lift and settle across all rotation groups.
        engine.tween(
            TweenSpec::new(
                rot_groups.to_vec(),
                vec![Prop::RotationX(-6.0)],
                0.18,
                Ease::OutQuad,
            ),
            TimePos::AfterPrev(0.0),
        );
        engine.tween(
            TweenSpec::new(
                rot_groups.to_vec(),
                vec![Prop::RotationX(0.0)],
                0.28,
                Ease::InOutQuad,
            ),
            TimePos::AfterPrev(0.18),
        );

        // Sweeping highlight: the overlay fades in while the gradient line
        // travels across the mark and back.
        engine.tween(
            TweenSpec::new(
                vec![NodeRole::SweepOverlay],
                vec![Prop::Opacity(1.0)],
                0.25,
                Ease::OutQuad,
            ),
            TimePos::AfterPrev(0.0),
        );
        engine.set(
            &[NodeRole::SweepGradient],
            &[Prop::SweepX1(-600.0), Prop::SweepX2(0.0)],
            TimePos::AfterPrev(0.0),
        );
        engine.tween(
            TweenSpec::new(
                vec![NodeRole::SweepGradient],
                vec![Prop::SweepX1(1200.0), Prop::SweepX2(1800.0)],
                2.4,
                Ease::InOutSine,
            )
            .repeat(1)
            .yoyo(),
            TimePos::AfterPrev(0.0),
        );

        // Final glow, then hand off to the host.
        pulse_rect(engine, NodeRole::FinalGlow, TimePos::AfterPrev(0.35));
        engine.on_complete(COMPLETION_LABEL);
    }
}

/// Five-op glow pulse: snap to a squashed, invisible state, flare up, settle
/// twice, and fade. Offsets chain each segment from the previous one's start.
pub fn pulse_rect(engine: &mut dyn TimelineEngine, target: NodeRole, pos: TimePos) {
    engine.set(
        &[target],
        &[
            Prop::Opacity(0.0),
            Prop::ScaleY(0.85),
            Prop::Origin {
                x_frac: 0.5,
                y_frac: 0.0,
            },
        ],
        pos,
    );
    engine.tween(
        TweenSpec::new(
            vec![target],
            vec![Prop::Opacity(1.0), Prop::ScaleY(1.03)],
            0.22,
            Ease::OutQuad,
        ),
        TimePos::AfterPrev(0.0),
    );
    engine.tween(
        TweenSpec::new(vec![target], vec![Prop::ScaleY(0.98)], 0.14, Ease::InOutQuad),
        TimePos::AfterPrev(0.22),
    );
    engine.tween(
        TweenSpec::new(vec![target], vec![Prop::ScaleY(1.05)], 0.20, Ease::OutQuad),
        TimePos::AfterPrev(0.14),
    );
    engine.tween(
        TweenSpec::new(vec![target], vec![Prop::Opacity(0.0)], 0.55, Ease::InQuad),
        TimePos::AfterPrev(0.15),
    );
}
