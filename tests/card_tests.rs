// Host-side tests for card placement, the registry and card artwork layout.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::animator::step_cards;
use tree_core::card::{place_attached, place_detached};
use tree_core::{CardArtwork, CardError, CardId, CardRegistry, CardTuning, PolaroidLayout};

fn registry_with(n: usize, seed: u64) -> CardRegistry {
    let mut reg = CardRegistry::new(CardTuning::default());
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..n {
        reg.create(600, 400, &mut rng).unwrap();
    }
    reg
}

#[test]
fn ids_follow_creation_order() {
    let reg = registry_with(4, 1);
    let ids: Vec<usize> = reg.iter().map(|c| c.id.index()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert!(reg.get(CardId(3)).is_some());
    assert!(reg.get(CardId(4)).is_none());
}

#[test]
fn zero_sized_photo_creates_no_card() {
    let mut reg = CardRegistry::new(CardTuning::default());
    let mut rng = StdRng::seed_from_u64(2);
    assert_eq!(
        reg.create(0, 480, &mut rng),
        Err(CardError::EmptyImage {
            width: 0,
            height: 480
        })
    );
    assert!(reg.is_empty());
}

#[test]
fn only_one_card_is_expanded_at_a_time() {
    let mut reg = registry_with(3, 3);
    let (x, y) = (CardId(0), CardId(1));

    assert_eq!(reg.toggle_expanded(x), Some(true));
    assert_eq!(reg.expanded(), Some(x));
    assert_eq!(reg.toggle_expanded(y), Some(true));
    assert!(!reg.get(x).unwrap().expanded());
    assert!(reg.get(y).unwrap().expanded());

    let raised: Vec<_> = reg
        .iter()
        .filter(|c| c.render_priority() == 10_000)
        .map(|c| c.id)
        .collect();
    assert_eq!(raised, vec![y]);
    assert!(reg
        .iter()
        .filter(|c| c.id != y)
        .all(|c| c.render_priority() == 999));

    assert_eq!(reg.toggle_expanded(y), Some(false));
    assert_eq!(reg.expanded(), None);
    assert_eq!(reg.toggle_expanded(CardId(9)), None);
}

#[test]
fn collapse_all_reports_whether_anything_closed() {
    let mut reg = registry_with(2, 4);
    assert!(!reg.collapse_all());
    reg.toggle_expanded(CardId(1));
    assert!(reg.collapse_all());
    assert_eq!(reg.expanded(), None);
}

#[test]
fn attached_spots_hug_the_cone() {
    let tuning = CardTuning::default();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..1_000 {
        let p = place_attached(&tuning, &mut rng);
        assert!((-50.0..=50.0).contains(&p.y));
        let h = (p.y + 50.0) / 100.0;
        let planar = (p.x * p.x + p.z * p.z).sqrt();
        assert!((planar - (45.0 * (1.0 - h) + 5.0)).abs() < 1e-2);
    }
}

#[test]
fn detached_spots_keep_their_distance_unless_exhausted() {
    let reg = registry_with(120, 6);
    let tuning = reg.tuning();
    let cards: Vec<_> = reg.iter().collect();
    let mut exhausted = 0;
    for (j, card) in cards.iter().enumerate() {
        if card.placement_exhausted {
            exhausted += 1;
            continue;
        }
        for earlier in &cards[..j] {
            assert!(
                card.detached.distance(earlier.detached) >= tuning.min_separation,
                "cards {} and {} overlap",
                earlier.id.0,
                card.id.0
            );
        }
    }
    // the box cannot hold 120 well separated cards
    assert!(exhausted > 0);
}

#[test]
fn exhausted_placement_is_pushed_back() {
    let tuning = CardTuning {
        min_separation: 1_000.0,
        placement_attempts: 5,
        ..CardTuning::default()
    };
    let mut rng = StdRng::seed_from_u64(7);
    let placed = [Vec3::ZERO];
    let p = place_detached(&placed, &tuning, &mut rng);
    assert!(p.exhausted);
    assert!(p.position.z <= tuning.burst_max.z - 10.0 + 1e-4);
    assert!(p.position.z >= tuning.burst_min.z - 10.0 - 1e-4);

    let first = place_detached(&[], &tuning, &mut rng);
    assert!(!first.exhausted);
}

#[test]
fn new_cards_start_hidden_on_the_tree() {
    let reg = registry_with(5, 8);
    for card in &reg {
        assert_eq!(card.live.position, card.attached);
        assert_eq!(card.live.opacity, 0.0);
        assert!(!card.is_visible(reg.tuning()));
        assert!(card.tilt.abs() <= 0.5);
    }
}

#[test]
fn target_pose_follows_mode_and_expansion() {
    let mut reg = registry_with(1, 9);
    let tuning = *reg.tuning();
    let id = CardId(0);
    let card = reg.get(id).unwrap().clone();

    let tree = card.target_pose(false, 3.0, &tuning);
    assert_eq!(tree.position, card.attached);
    assert_eq!(tree.opacity, 0.0);
    assert_eq!(tree.rotation, card.tilt);

    let burst = card.target_pose(true, 3.0, &tuning);
    assert_eq!(burst.position.x, card.detached.x);
    assert!((burst.position.y - card.detached.y - card.float.offset(3.0)).abs() < 1e-4);
    assert_eq!(burst.opacity, 1.0);

    reg.toggle_expanded(id);
    let expanded = reg.get(id).unwrap().target_pose(true, 3.0, &tuning);
    assert_eq!(expanded.position, card.detached);
    assert_eq!(expanded.rotation, 0.0);
    assert_eq!(expanded.scale, card.base_scale * 4.0);
}

#[test]
fn each_card_property_eases_at_its_own_rate() {
    let mut reg = registry_with(1, 12);
    let id = CardId(0);
    reg.toggle_expanded(id);
    let tuning = *reg.tuning();
    let before = reg.get(id).unwrap().live;
    let target = reg.get(id).unwrap().target_pose(true, 0.0, &tuning);
    assert_ne!(target.scale, before.scale);
    assert_ne!(target.rotation, before.rotation);

    step_cards(&mut reg, true, 0.0);
    let after = reg.get(id).unwrap().live;

    let moved = before.position + (target.position - before.position) * 0.05;
    assert!(after.position.distance(moved) < 1e-4, "{after:?}");
    let scaled = before.scale + (target.scale - before.scale) * 0.1;
    assert!(after.scale.distance(scaled) < 1e-4, "{after:?}");
    let turned = before.rotation + (target.rotation - before.rotation) * 0.1;
    assert!((after.rotation - turned).abs() < 1e-6);
    assert!((after.opacity - 0.05).abs() < 1e-6);
}

#[test]
fn extremely_tall_photo_is_rejected() {
    assert!(matches!(
        PolaroidLayout::for_photo(1, 10_000),
        Err(CardError::ArtworkTooLarge { max: 8192, .. })
    ));
    let mut reg = CardRegistry::new(CardTuning::default());
    let mut rng = StdRng::seed_from_u64(13);
    assert!(reg.create(1, 10_000, &mut rng).is_err());
    assert!(reg.is_empty());
    // 8192 - 105 leaves room for a photo 26x taller than wide
    assert!(PolaroidLayout::for_photo(10, 260).is_ok());
}

#[test]
fn polaroid_layout_for_landscape_photo() {
    let layout = PolaroidLayout::for_photo(600, 400).unwrap();
    assert_eq!(layout.photo_width, 300.0);
    assert_eq!(layout.photo_height, 200.0);
    assert_eq!(layout.card_height, 305.0);
    assert_eq!(layout.canvas_size(), (350, 305));
    let scale = layout.base_scale();
    assert_eq!(scale.x, 8.0);
    assert!((scale.y - 8.0 * 305.0 / 350.0).abs() < 1e-5);
}

#[test]
fn polaroid_layout_for_portrait_photo_rounds_up() {
    let layout = PolaroidLayout::for_photo(3, 7).unwrap();
    assert!((layout.photo_height - 700.0).abs() < 1e-3);
    let (w, h) = layout.canvas_size();
    assert_eq!(w, 350);
    assert!(h as f32 >= layout.card_height);
    assert!(layout.aspect() < 1.0);
}

#[test]
fn artwork_checks_buffer_length() {
    assert!(CardArtwork::new(2, 2, vec![0; 16]).is_ok());
    assert_eq!(
        CardArtwork::new(2, 2, vec![0; 15]).unwrap_err(),
        CardError::ArtworkSize {
            expected: 16,
            actual: 15
        }
    );
    assert!(matches!(
        CardArtwork::new(0, 2, Vec::new()),
        Err(CardError::EmptyImage { .. })
    ));
}
