use std::time::Duration;

use crate::{
    choreo::{COMPLETION_LABEL, Choreography, Palette},
    core::{FitTransform, Viewport, VirtualCanvas},
    error::{SplashError, SplashResult},
    extrude::{ExtrusionConfig, rebuild_extrusion},
    fit::{FitConfig, fit_and_center},
    host::{Host, brand_red, teardown},
    layout::{LayoutConfig, layout_inline},
    scene::{Measure, Scene, SceneSpec},
    timeline::{RecordingEngine, TimelineEngine},
};

/// Delay before the container is removed, leaving time for the fade-out.
pub const DONE_FADE: Duration = Duration::from_millis(600);

/// Shorter delay on the no-animation fallback path.
pub const FALLBACK_FADE: Duration = Duration::from_millis(100);

/// All tunables of the effect in one serializable bundle.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SplashConfig {
    pub canvas: VirtualCanvas,
    pub layout: LayoutConfig,
    pub extrusion: ExtrusionConfig,
    pub fit: FitConfig,
}

/// One combined relayout pass: inline layout, extrusion rebuild from the new
/// positions, then fit-and-center of the faces bounding box. Re-run on every
/// resize and once fonts settle; safe to run redundantly, and idempotent for
/// unchanged inputs.
#[tracing::instrument(skip(scene, measure))]
pub fn relayout(
    scene: &mut Scene,
    measure: impl Measure,
    viewport: Viewport,
    cfg: &SplashConfig,
) -> SplashResult<FitTransform> {
    layout_inline(scene, &measure, &cfg.layout)?;
    rebuild_extrusion(scene, &cfg.extrusion)?;
    let bbox = scene.faces_bbox(&measure)?;
    let fit = fit_and_center(cfg.canvas, viewport, bbox, &cfg.fit)?;
    scene.wrap = fit;
    Ok(fit)
}

/// Source of the external timeline animation engine. Acquisition may fail
/// (the dependency never became available); the controller then skips the
/// animation entirely.
pub trait EngineProvider {
    type Engine: TimelineEngine;

    fn acquire(&mut self) -> SplashResult<Self::Engine>;
}

/// Provider yielding a fresh in-memory recorder; the default for headless
/// runs and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordingProvider;

impl EngineProvider for RecordingProvider {
    type Engine = RecordingEngine;

    fn acquire(&mut self) -> SplashResult<RecordingEngine> {
        Ok(RecordingEngine::new())
    }
}

/// Top-level controller: owns the scene and host, sequences
/// relayout → choreography → teardown, and reacts to resize, font-load,
/// skip, and completion events.
pub struct Splash<H: Host, M: Measure> {
    scene: Scene,
    config: SplashConfig,
    host: H,
    measure: M,
}

impl<H: Host, M: Measure> Splash<H, M> {
    pub fn new(spec: &SceneSpec, config: SplashConfig, host: H, measure: M) -> SplashResult<Self> {
        Ok(Self {
            scene: Scene::from_spec(spec)?,
            config,
            host,
            measure,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &SplashConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Raise the preloading flag, lay out the artwork, and build the
    /// choreography on a freshly acquired engine. If the engine cannot be
    /// acquired, the failure is logged and the teardown path runs
    /// immediately with no animation.
    pub fn start<P: EngineProvider>(
        &mut self,
        provider: &mut P,
    ) -> SplashResult<Option<P::Engine>> {
        self.host.set_preloading(true);
        self.relayout()?;

        match provider.acquire() {
            Ok(mut engine) => {
                let palette = Palette {
                    brand_red: brand_red(&self.host),
                    ..Palette::default()
                };
                Choreography::build(&mut engine, &palette);
                Ok(Some(engine))
            }
            Err(err) => {
                tracing::warn!(error = %err, "timeline engine unavailable; skipping animation");
                teardown(&mut self.host, FALLBACK_FADE)?;
                Ok(None)
            }
        }
    }

    /// Re-run the combined layout/fit pass against the host's current
    /// viewport.
    pub fn relayout(&mut self) -> SplashResult<FitTransform> {
        relayout(
            &mut self.scene,
            &self.measure,
            self.host.viewport(),
            &self.config,
        )
    }

    pub fn on_resize(&mut self) -> SplashResult<FitTransform> {
        self.relayout()
    }

    /// Font metrics settled; bounding boxes may have changed.
    pub fn on_fonts_ready(&mut self) -> SplashResult<FitTransform> {
        self.relayout()
    }

    /// Manual dismiss: short-circuits to the completion path.
    pub fn skip(&mut self) -> SplashResult<bool> {
        teardown(&mut self.host, DONE_FADE)
    }

    /// Completion callback from the engine. Returns whether teardown ran
    /// (false once the container is already gone).
    pub fn on_complete(&mut self, label: &str) -> SplashResult<bool> {
        if label != COMPLETION_LABEL {
            return Err(SplashError::choreography(format!(
                "unknown completion label '{label}'"
            )));
        }
        teardown(&mut self.host, DONE_FADE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::scene::HeuristicMeasurer;

    struct FailingProvider;

    impl EngineProvider for FailingProvider {
        type Engine = RecordingEngine;

        fn acquire(&mut self) -> SplashResult<RecordingEngine> {
            Err(SplashError::dependency("engine failed to load"))
        }
    }

    fn splash() -> Splash<MemoryHost, HeuristicMeasurer> {
        let host = MemoryHost::new(Viewport::new(1280.0, 720.0).unwrap());
        Splash::new(
            &SceneSpec::default(),
            SplashConfig::default(),
            host,
            HeuristicMeasurer::default(),
        )
        .unwrap()
    }

    #[test]
    fn relayout_is_idempotent() {
        let mut s = splash();
        let first = s.relayout().unwrap();
        let second = s.relayout().unwrap();
        assert_eq!(first, second);
        assert_eq!(s.scene().wrap, first);
    }

    #[test]
    fn resize_changes_the_transform() {
        let mut s = splash();
        let wide = s.relayout().unwrap();
        s.host_mut().viewport = Viewport::new(390.0, 844.0).unwrap();
        let narrow = s.on_resize().unwrap();
        assert_ne!(wide, narrow);
    }

    #[test]
    fn start_builds_a_choreography_and_raises_the_flag() {
        let mut s = splash();
        let engine = s.start(&mut RecordingProvider).unwrap().unwrap();
        assert!(s.host().preloading);
        assert!(s.host().container_present);
        assert!(!engine.ops().is_empty());
        assert_eq!(engine.completion_labels().len(), 1);
    }

    #[test]
    fn failed_engine_acquisition_falls_back_to_teardown() {
        let mut s = splash();
        let engine = s.start(&mut FailingProvider).unwrap();
        assert!(engine.is_none());
        assert!(!s.host().preloading);
        assert!(!s.host().container_present);
        assert_eq!(s.host().removal_delays, [FALLBACK_FADE]);
    }

    #[test]
    fn completion_and_skip_both_tear_down_idempotently() {
        let mut s = splash();
        s.start(&mut RecordingProvider).unwrap();
        assert!(s.on_complete(COMPLETION_LABEL).unwrap());
        assert!(!s.skip().unwrap());
        assert!(!s.host().container_present);
        assert_eq!(s.host().removal_delays, [DONE_FADE]);
    }

    #[test]
    fn unknown_completion_label_is_an_error() {
        let mut s = splash();
        assert!(s.on_complete("bogus").is_err());
    }

    #[test]
    fn config_json_roundtrip() {
        let cfg = SplashConfig::default();
        let s = serde_json::to_string_pretty(&cfg).unwrap();
        let de: SplashConfig = serde_json::from_str(&s).unwrap();
        assert_eq!(de, cfg);
    }
}
