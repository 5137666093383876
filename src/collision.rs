//! Hit testing.

use crate::entities::Projectile;
use crate::surface::Rect;

/// True when a fired projectile's top-left point lies inside `target`
/// (edges inclusive).  The projectile is treated as a point, not a box.
pub fn overlaps(projectile: &Projectile, target: Rect) -> bool {
    projectile.fired && target.contains(projectile.body.x, projectile.body.y)
}
