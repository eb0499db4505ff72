use crate::error::{SplashError, SplashResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Real viewport dimensions, in CSS-pixel-like units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> SplashResult<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(SplashError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn min_side(self) -> f64 {
        self.width.min(self.height)
    }
}

/// Fixed design-time canvas the artwork is authored against.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VirtualCanvas {
    pub width: f64,
    pub height: f64,
}

impl Default for VirtualCanvas {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 680.0,
        }
    }
}

impl VirtualCanvas {
    pub fn new(width: f64, height: f64) -> SplashResult<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(SplashError::validation(
                "canvas width/height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

/// Straight (non-premultiplied) RGBA color with a float alpha in [0,1].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl Rgba {
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional), as found in host
    /// style variables.
    pub fn from_hex(s: &str) -> SplashResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        // Length checks and digit slicing below assume one byte per char.
        if !hex.is_ascii() {
            return Err(SplashError::validation(format!(
                "invalid hex color '{s}': expected #rgb or #rrggbb"
            )));
        }
        let parse = |s: &str| {
            u8::from_str_radix(s, 16)
                .map_err(|_| SplashError::validation(format!("invalid hex color '{s}'")))
        };
        match hex.len() {
            6 => Ok(Self::opaque(
                parse(&hex[0..2])?,
                parse(&hex[2..4])?,
                parse(&hex[4..6])?,
            )),
            3 => {
                let widen = |c: u8| c << 4 | c;
                Ok(Self::opaque(
                    widen(parse(&hex[0..1])?),
                    widen(parse(&hex[1..2])?),
                    widen(parse(&hex[2..3])?),
                ))
            }
            _ => Err(SplashError::validation(format!(
                "invalid hex color '{s}': expected #rgb or #rrggbb"
            ))),
        }
    }

    /// CSS `rgba(r,g,b,a)` form with alpha to three decimals, the format the
    /// extrusion layers are emitted in.
    pub fn to_css(self) -> String {
        format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.alpha)
    }
}

/// Uniform scale followed by translation: `p' = translate + scale * p`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FitTransform {
    pub scale: f64,
    pub translate: Vec2,
}

impl FitTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate: Vec2::ZERO,
    };

    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }

    pub fn apply(self, p: Point) -> Point {
        Point::new(
            self.translate.x + self.scale * p.x,
            self.translate.y + self.scale * p.y,
        )
    }
}
