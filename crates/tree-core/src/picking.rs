use crate::camera::{Camera, Ray};
use crate::card::{CardId, CardRecord};
use crate::registry::CardRegistry;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardHit {
    pub id: CardId,
    /// Distance along the ray.
    pub distance: f32,
}

/// Intersect a camera-facing card quad. Cards are billboards: their plane is
/// perpendicular to the view axis and their quad is rotated in that plane.
pub fn ray_card(camera: &Camera, ray: &Ray, card: &CardRecord) -> Option<f32> {
    let view = camera.view_matrix();
    let center = view.transform_point3(card.live.position);
    let origin = view.transform_point3(ray.origin);
    let dir = view.transform_vector3(ray.dir);
    if dir.z.abs() < 1e-6 {
        return None;
    }
    let t = (center.z - origin.z) / dir.z;
    if t <= 0.0 {
        return None;
    }
    let hit: Vec3 = origin + dir * t;
    let local = Vec2::new(hit.x - center.x, hit.y - center.y);
    let (sin, cos) = (-card.live.rotation).sin_cos();
    let unrotated = Vec2::new(
        local.x * cos - local.y * sin,
        local.x * sin + local.y * cos,
    );
    let half = card.live.scale * 0.5;
    (unrotated.x.abs() <= half.x && unrotated.y.abs() <= half.y).then_some(t)
}

/// Every visible card under the ray, nearest first.
pub fn pick_all(cards: &CardRegistry, camera: &Camera, ray: &Ray) -> SmallVec<[CardHit; 8]> {
    let tuning = cards.tuning();
    let mut hits: SmallVec<[CardHit; 8]> = cards
        .iter()
        .filter(|c| c.is_visible(tuning))
        .filter_map(|c| {
            ray_card(camera, ray, c).map(|distance| CardHit {
                id: c.id,
                distance,
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Nearest visible card under the pointer.
#[inline]
pub fn pick(cards: &CardRegistry, camera: &Camera, ndc: Vec2) -> Option<CardId> {
    let ray = camera.ray_from_ndc(ndc);
    pick_all(cards, camera, &ray).first().map(|h| h.id)
}
