use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, Vec2};
use crate::foundation::error::{SlidesError, SlidesResult};
use crate::foundation::math::Fnv1a64;

/// Geometry of a drawable object, centred on the object's origin.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned rectangle.
    Rect {
        /// Width in pixels.
        width: f64,
        /// Height in pixels.
        height: f64,
    },
    /// Rectangle with rounded corners.
    RoundedRect {
        /// Width in pixels.
        width: f64,
        /// Height in pixels.
        height: f64,
        /// Corner radius in pixels.
        radius: f64,
    },
    /// Ellipse with the given radii.
    Ellipse {
        /// Horizontal radius.
        rx: f64,
        /// Vertical radius.
        ry: f64,
    },
    /// Arbitrary SVG path data, in object-local coordinates.
    Path {
        /// SVG `d` attribute.
        svg_path_d: String,
    },
}

impl Shape {
    /// Check dimensions and path syntax.
    pub fn validate(&self) -> SlidesResult<()> {
        match self {
            Self::Rect { width, height } | Self::RoundedRect { width, height, .. } => {
                if !(*width > 0.0 && *height > 0.0) {
                    return Err(SlidesError::authoring("rect dimensions must be > 0"));
                }
                if let Self::RoundedRect { radius, .. } = self
                    && *radius < 0.0
                {
                    return Err(SlidesError::authoring("corner radius must be >= 0"));
                }
                Ok(())
            }
            Self::Ellipse { rx, ry } => {
                if !(*rx > 0.0 && *ry > 0.0) {
                    return Err(SlidesError::authoring("ellipse radii must be > 0"));
                }
                Ok(())
            }
            Self::Path { svg_path_d } => {
                BezPath::from_svg(svg_path_d.trim())
                    .map(|_| ())
                    .map_err(|e| SlidesError::authoring(format!("invalid svg_path_d: {e}")))
            }
        }
    }

    /// Stable key for memoizing the tessellated outline.
    pub(crate) fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::default();
        match self {
            Self::Rect { width, height } => {
                h.tag(0);
                h.float(*width);
                h.float(*height);
            }
            Self::RoundedRect {
                width,
                height,
                radius,
            } => {
                h.tag(1);
                h.float(*width);
                h.float(*height);
                h.float(*radius);
            }
            Self::Ellipse { rx, ry } => {
                h.tag(2);
                h.float(*rx);
                h.float(*ry);
            }
            Self::Path { svg_path_d } => {
                h.tag(3);
                h.bytes(svg_path_d.trim().as_bytes());
            }
        }
        h.finish()
    }

    /// Build the outline in object-local coordinates.
    pub(crate) fn outline(&self) -> SlidesResult<BezPath> {
        use kurbo::Shape as _;

        const TOLERANCE: f64 = 0.1;
        let path = match self {
            Self::Rect { width, height } => {
                kurbo::Rect::new(-width / 2.0, -height / 2.0, width / 2.0, height / 2.0)
                    .to_path(TOLERANCE)
            }
            Self::RoundedRect {
                width,
                height,
                radius,
            } => kurbo::RoundedRect::new(
                -width / 2.0,
                -height / 2.0,
                width / 2.0,
                height / 2.0,
                *radius,
            )
            .to_path(TOLERANCE),
            Self::Ellipse { rx, ry } => {
                kurbo::Ellipse::new((0.0, 0.0), (*rx, *ry), 0.0).to_path(TOLERANCE)
            }
            Self::Path { svg_path_d } => BezPath::from_svg(svg_path_d.trim())
                .map_err(|e| SlidesError::render(format!("invalid svg_path_d: {e}")))?,
        };
        Ok(path)
    }
}

/// Continuous behaviour applied to an object on every update, including idle phases.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Updater {
    /// Spin around the object origin.
    Rotate {
        /// Angular velocity.
        radians_per_sec: f64,
    },
    /// Translate at constant velocity.
    Drift {
        /// Velocity in pixels per second.
        velocity: Vec2,
    },
}

impl Updater {
    fn apply(self, obj: &mut SceneObject, dt: f64) {
        match self {
            Self::Rotate { radians_per_sec } => obj.rotation += radians_per_sec * dt,
            Self::Drift { velocity } => obj.position += velocity * dt,
        }
    }
}

fn one() -> f64 {
    1.0
}

fn white() -> Color {
    Color::rgba(1.0, 1.0, 1.0, 1.0)
}

/// A drawable object owned by a slide's stage.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneObject {
    /// Unique id within the slide.
    pub id: String,
    /// Outline.
    pub shape: Shape,
    /// Fill colour.
    #[serde(default = "white")]
    pub fill: Color,
    /// Position of the object origin, in canvas pixels.
    #[serde(default)]
    pub position: Vec2,
    /// Uniform scale.
    #[serde(default = "one")]
    pub scale: f64,
    /// Rotation in radians.
    #[serde(default)]
    pub rotation: f64,
    /// Opacity in `[0, 1]`.
    #[serde(default = "one")]
    pub opacity: f64,
    /// Optional time-based behaviour.
    #[serde(default)]
    pub updater: Option<Updater>,
}

impl SceneObject {
    /// Opaque white object at the canvas origin.
    pub fn new(id: impl Into<String>, shape: Shape) -> Self {
        Self {
            id: id.into(),
            shape,
            fill: white(),
            position: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
            updater: None,
        }
    }

    /// Set the position.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Set the fill colour.
    pub fn fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Set the opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Attach an updater.
    pub fn with_updater(mut self, updater: Updater) -> Self {
        self.updater = Some(updater);
        self
    }

    /// Object-to-canvas transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.position) * Affine::rotate(self.rotation) * Affine::scale(self.scale)
    }

    /// Run this object's updater, if any.
    pub(crate) fn update(&mut self, dt: f64) {
        if let Some(u) = self.updater {
            u.apply(self, dt);
        }
    }

    pub(crate) fn validate(&self) -> SlidesResult<()> {
        if self.id.trim().is_empty() {
            return Err(SlidesError::authoring("object id must be non-empty"));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(SlidesError::authoring(format!(
                "object '{}' opacity must be within [0, 1]",
                self.id
            )));
        }
        self.shape
            .validate()
            .map_err(|e| SlidesError::authoring(format!("object '{}': {e}", self.id)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/object.rs"]
mod tests;
