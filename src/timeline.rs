use crate::{core::Rgba, ease::Ease, scene::GlyphSlot};

/// Logical roles of the host-page elements the choreography addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum NodeRole {
    Face(GlyphSlot),
    Shadow(GlyphSlot),
    /// Per-slot 3D-rotation group wrapping a face.
    RotGroup(GlyphSlot),
    BrandWrap,
    PreFlash,
    PulseGlow,
    FinalGlow,
    SweepOverlay,
    SweepGradient,
    Container,
}

/// A single animatable property with its target value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Prop {
    Opacity(f64),
    X(f64),
    Y(f64),
    ScaleX(f64),
    ScaleY(f64),
    RotationX(f64),
    RotationY(f64),
    Perspective(f64),
    /// Transform origin as fractions of the target's box.
    Origin { x_frac: f64, y_frac: f64 },
    Fill(Rgba),
    /// Sweep gradient endpoint x coordinates, in virtual-canvas units.
    SweepX1(f64),
    SweepX2(f64),
}

/// Placement of an insert on the timeline, mirroring the relative-offset
/// positioning of timeline animation engines.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TimePos {
    /// Append at the current end of the timeline.
    End,
    /// Absolute time in seconds.
    At(f64),
    /// Offset from the previous insert's start time.
    AfterPrev(f64),
    /// Offset from the current end of the timeline (usually negative).
    FromEnd(f64),
}

/// One tween: targets, property endpoints, duration, and repeat shaping.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenSpec {
    pub targets: Vec<NodeRole>,
    pub props: Vec<Prop>,
    pub duration: f64,
    pub ease: Ease,
    pub repeat: u32,
    pub yoyo: bool,
    /// Per-target start offset when animating several targets at once.
    pub stagger: f64,
}

impl TweenSpec {
    pub fn new(targets: Vec<NodeRole>, props: Vec<Prop>, duration: f64, ease: Ease) -> Self {
        Self {
            targets,
            props,
            duration,
            ease,
            repeat: 0,
            yoyo: false,
            stagger: 0.0,
        }
    }

    pub fn repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    fn total_duration(&self) -> f64 {
        self.duration * f64::from(self.repeat + 1)
    }
}

/// Minimal capability interface over an external timeline animation engine:
/// instantaneous property sets, tweens, labelled callbacks, and a completion
/// notification. The choreography is emitted onto this trait so it can run
/// against a real engine bridge or the in-memory recorder alike.
pub trait TimelineEngine {
    fn set(&mut self, targets: &[NodeRole], props: &[Prop], pos: TimePos);
    fn tween(&mut self, spec: TweenSpec, pos: TimePos);
    fn call(&mut self, label: &str, pos: TimePos);
    fn on_complete(&mut self, label: &str);
}

/// A recorded, time-resolved timeline operation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TimelineOp {
    Set {
        target: NodeRole,
        props: Vec<Prop>,
        at: f64,
    },
    Tween {
        target: NodeRole,
        props: Vec<Prop>,
        at: f64,
        duration: f64,
        ease: Ease,
        repeat: u32,
        yoyo: bool,
    },
    Call {
        label: String,
        at: f64,
    },
}

impl TimelineOp {
    pub fn start(&self) -> f64 {
        match self {
            Self::Set { at, .. } | Self::Tween { at, .. } | Self::Call { at, .. } => *at,
        }
    }
}

/// Reference [`TimelineEngine`] that resolves positions to absolute seconds
/// and records every operation. Used by the tests and by hosts that replay
/// the recording onto a real engine.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    ops: Vec<TimelineOp>,
    completion_labels: Vec<String>,
    end: f64,
    prev_start: f64,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[TimelineOp] {
        &self.ops
    }

    pub fn completion_labels(&self) -> &[String] {
        &self.completion_labels
    }

    /// Current timeline end in seconds.
    pub fn duration(&self) -> f64 {
        self.end
    }

    fn resolve(&self, pos: TimePos) -> f64 {
        let t = match pos {
            TimePos::End => self.end,
            TimePos::At(t) => t,
            TimePos::AfterPrev(offset) => self.prev_start + offset,
            TimePos::FromEnd(offset) => self.end + offset,
        };
        t.max(0.0)
    }

    fn record(&mut self, start: f64, total: f64, op: TimelineOp) {
        self.prev_start = start;
        self.end = self.end.max(start + total);
        self.ops.push(op);
    }
}

impl TimelineEngine for RecordingEngine {
    fn set(&mut self, targets: &[NodeRole], props: &[Prop], pos: TimePos) {
        let at = self.resolve(pos);
        for &target in targets {
            self.record(
                at,
                0.0,
                TimelineOp::Set {
                    target,
                    props: props.to_vec(),
                    at,
                },
            );
        }
    }

    fn tween(&mut self, spec: TweenSpec, pos: TimePos) {
        let base = self.resolve(pos);
        let total = spec.total_duration();
        for (k, &target) in spec.targets.iter().enumerate() {
            let at = base + spec.stagger * k as f64;
            self.record(
                at,
                total,
                TimelineOp::Tween {
                    target,
                    props: spec.props.clone(),
                    at,
                    duration: spec.duration,
                    ease: spec.ease,
                    repeat: spec.repeat,
                    yoyo: spec.yoyo,
                },
            );
        }
        // A staggered group reads as one insert: later positions relative to
        // "previous start" refer to the group's first target.
        if spec.targets.len() > 1 {
            self.prev_start = base;
        }
    }

    fn call(&mut self, label: &str, pos: TimePos) {
        let at = self.resolve(pos);
        self.record(
            at,
            0.0,
            TimelineOp::Call {
                label: label.to_string(),
                at,
            },
        );
    }

    fn on_complete(&mut self, label: &str) {
        self.completion_labels.push(label.to_string());
    }
}
