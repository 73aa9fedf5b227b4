//! Camera auto-framing.
//!
//! After a model loads, [`compute_framing`] turns its bounding volume into a
//! camera position and look-at target that keeps the whole model in view
//! from a three-quarter elevated angle. [`apply_frame`] then pushes the
//! result into anything implementing [`FramingTarget`], so the math stays
//! free of GPU and windowing state.

use glam::Vec3;

/// Extra distance applied on top of the exact fit so the model does not
/// touch the viewport edges.
pub const FRAMING_MARGIN: f32 = 1.2;

/// Sideways camera offset as a fraction of the largest model dimension.
pub const OFFSET_X_RATIO: f32 = 0.5;

/// Upward camera offset as a fraction of the largest model dimension.
pub const OFFSET_Y_RATIO: f32 = 0.3;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl BoundingVolume {
    /// Zero-sized volume at the origin, used for empty scenes.
    pub const EMPTY: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    /// Build a volume from its corners. Swapped components are reordered so
    /// the size is never negative.
    #[must_use]
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Build a volume from a center point and per-axis extents.
    #[must_use]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest volume enclosing every point. An empty iterator gives
    /// [`BoundingVolume::EMPTY`].
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::EMPTY;
        };
        let (min, max) =
            iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Self { min, max }
    }

    /// Center point of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extents along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest of the three extents.
    #[must_use]
    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }

    /// Grow this volume to also enclose `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Same center, extents multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self::from_center_size(self.center(), self.size() * factor)
    }
}

/// Camera placement produced by [`compute_framing`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera and orbit controls look at.
    pub target: Vec3,
    /// Vertical field of view the frame was computed for, in radians.
    pub vertical_fov: f32,
}

/// Distance from the model center at which its largest dimension fits the
/// vertical field of view, including [`FRAMING_MARGIN`].
#[must_use]
pub fn required_distance(max_dimension: f32, vertical_fov: f32) -> f32 {
    (max_dimension / 2.0 / (vertical_fov / 2.0).tan()).abs() * FRAMING_MARGIN
}

/// Compute a camera frame that fits `bounds` into a vertical field of view
/// of `vertical_fov` radians.
///
/// `vertical_fov` must lie in `(0, π)`. Zero-sized bounds are valid: the
/// camera then collapses onto the center with no offset, and callers that
/// need a visible camera for empty scenes must apply their own floor.
#[must_use]
pub fn compute_framing(
    bounds: &BoundingVolume,
    vertical_fov: f32,
) -> CameraFrame {
    let center = bounds.center();
    let max_dim = bounds.max_dimension();

    let distance = required_distance(max_dim, vertical_fov);
    let offset_x = max_dim * OFFSET_X_RATIO;
    let offset_y = max_dim * OFFSET_Y_RATIO;

    CameraFrame {
        position: center + Vec3::new(offset_x, offset_y, distance),
        target: center,
        vertical_fov,
    }
}

/// The narrow camera surface a [`CameraFrame`] is applied through.
///
/// Implemented by the orbit controller; tests implement it with a recorder.
pub trait FramingTarget {
    /// Move the camera eye.
    fn set_position(&mut self, position: Vec3);
    /// Orient the camera toward `target`.
    fn look_at(&mut self, target: Vec3);
    /// Set the point the orbit controls rotate around.
    fn set_orbit_target(&mut self, target: Vec3);
    /// Let the orbit controls recompute their internal state.
    fn update_orbit(&mut self);
}

/// Apply `frame` to `target`. The eye is positioned before the look-at is
/// applied, then the orbit target is moved and the controls refreshed.
pub fn apply_frame(frame: &CameraFrame, target: &mut impl FramingTarget) {
    target.set_position(frame.position);
    target.look_at(frame.target);
    target.set_orbit_target(frame.target);
    target.update_orbit();
}
