use crate::ease::Approach;
use crate::registry::CardRegistry;

/// Eases every card's live pose toward its target pose. Position, scale,
/// rotation and opacity each use their own factor, so they settle at
/// different times.
pub fn step_cards(cards: &mut CardRegistry, exploded: bool, time: f32) {
    let tuning = *cards.tuning();
    for card in cards.iter_mut() {
        let target = card.target_pose(exploded, time, &tuning);
        card.live
            .position
            .approach(target.position, tuning.position_smoothing);
        card.live.scale.approach(target.scale, tuning.scale_smoothing);
        card.live
            .rotation
            .approach(target.rotation, tuning.rotation_smoothing);
        card.live
            .opacity
            .approach(target.opacity, tuning.opacity_smoothing);
    }
}
