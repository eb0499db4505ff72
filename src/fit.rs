use crate::{
    core::{FitTransform, Rect, Vec2, Viewport, VirtualCanvas},
    error::{SplashError, SplashResult},
};

/// Fractional bounds and bias constants for fitting the artwork into the
/// visible region of the virtual canvas. "Small" viewports (phones) get a
/// taller height budget and a gentler upward bias.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FitConfig {
    pub width_frac: f64,
    pub height_frac_small: f64,
    pub height_frac_large: f64,
    pub small_threshold: f64,
    pub bias_frac_small: f64,
    pub bias_frac_large: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            width_frac: 0.92,
            height_frac_small: 0.78,
            height_frac_large: 0.74,
            small_threshold: 600.0,
            bias_frac_small: 0.10,
            bias_frac_large: 0.20,
        }
    }
}

impl FitConfig {
    pub fn is_small(&self, viewport: Viewport) -> bool {
        viewport.min_side() <= self.small_threshold
    }
}

/// Compute the uniform scale + translation that centers `content` within the
/// fractional bounds of the viewport's visible region.
///
/// The virtual canvas is assumed to cover the viewport without letterboxing
/// (a "slice" fit), so the visible region is the centered sub-rectangle of
/// the canvas that survives the cover scale. The content is scaled by the
/// binding constraint (width or height budget, whichever is tighter) and its
/// center is mapped to the visible-region center, biased upward by a fixed
/// fraction of the visible height.
#[tracing::instrument]
pub fn fit_and_center(
    canvas: VirtualCanvas,
    viewport: Viewport,
    content: Rect,
    cfg: &FitConfig,
) -> SplashResult<FitTransform> {
    if content.width() <= 0.0 || content.height() <= 0.0 {
        return Err(SplashError::validation(
            "content bounding box must have positive width and height",
        ));
    }

    let s_view = (viewport.width / canvas.width).max(viewport.height / canvas.height);
    let vis_w = viewport.width / s_view;
    let vis_h = viewport.height / s_view;
    let off_x = (canvas.width - vis_w) / 2.0;
    let off_y = (canvas.height - vis_h) / 2.0;

    let small = cfg.is_small(viewport);
    let max_w = vis_w * cfg.width_frac;
    let max_h = vis_h
        * if small {
            cfg.height_frac_small
        } else {
            cfg.height_frac_large
        };

    let scale = (max_w / content.width()).min(max_h / content.height());

    let cx = off_x + vis_w / 2.0;
    let cy = off_y + vis_h / 2.0;
    let bias = vis_h
        * if small {
            cfg.bias_frac_small
        } else {
            cfg.bias_frac_large
        };

    let center = content.center();
    let translate = Vec2::new(cx - scale * center.x, (cy - bias) - scale * center.y);

    let fit = FitTransform { scale, translate };
    tracing::debug!(scale = fit.scale, tx = translate.x, ty = translate.y, small, "fit computed");
    Ok(fit)
}
