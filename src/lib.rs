//! Splashmark is a headless engine for an animated brand-mark splash screen.
//!
//! The effect is a fixed choreography over a small piece of typographic
//! artwork: a lead letter, a dropping accent letter, and a trailing word,
//! backed by a fake-3D extrusion stack. Splashmark computes the artwork's
//! geometry and emits the choreography; actually drawing and animating it is
//! the embedding host's job.
//!
//! # Pipeline overview
//!
//! 1. **Layout**: place the glyph slots adjacent on a shared baseline from
//!    measured bounding boxes ([`layout_inline`]).
//! 2. **Extrude**: regenerate the offset, fading duplicate stacks from the
//!    fresh positions ([`rebuild_extrusion`]).
//! 3. **Fit**: scale and center the artwork into the visible region of the
//!    virtual canvas for the current viewport ([`fit_and_center`]).
//! 4. **Choreograph**: emit the fixed timeline onto a [`TimelineEngine`]
//!    and hand completion back to the controller ([`Choreography`]).
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: layout, extrusion, and fitting are pure functions of
//!   their inputs; re-running a relayout with unchanged inputs yields a
//!   bit-identical transform.
//! - **No rendering environment**: bounding-box measurement ([`Measure`]),
//!   the animation engine ([`TimelineEngine`]), and the page ([`Host`]) are
//!   injected capabilities, so the whole effect runs and tests headless.
#![forbid(unsafe_code)]

pub mod choreo;
pub mod core;
pub mod ease;
pub mod error;
pub mod extrude;
pub mod fit;
pub mod host;
pub mod layout;
pub mod pipeline;
pub mod scene;
pub mod svg;
pub mod timeline;

pub use crate::choreo::{COMPLETION_LABEL, Choreography, Palette, pulse_rect};
pub use crate::core::{FitTransform, Rgba, Viewport, VirtualCanvas};
pub use crate::ease::Ease;
pub use crate::error::{SplashError, SplashResult};
pub use crate::extrude::{ExtrusionConfig, extrusion_for, rebuild_extrusion};
pub use crate::fit::{FitConfig, fit_and_center};
pub use crate::host::{BRAND_RED_FALLBACK, BRAND_RED_VAR, Host, MemoryHost, brand_red, teardown};
pub use crate::layout::{LayoutConfig, layout_inline};
pub use crate::pipeline::{
    DONE_FADE, EngineProvider, FALLBACK_FADE, RecordingProvider, Splash, SplashConfig, relayout,
};
pub use crate::scene::{
    ExtrudedGlyph, ExtrusionStack, FontAttrs, GlyphNode, GlyphSlot, HeuristicMeasurer, Measure,
    Scene, SceneSpec,
};
pub use crate::svg::{SvgMeasurer, SvgTheme, scene_to_svg};
pub use crate::timeline::{
    NodeRole, Prop, RecordingEngine, TimePos, TimelineEngine, TimelineOp, TweenSpec,
};
