// Host-side tests for click resolution, picking and the frame driver.

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::animator::step_cards;
use tree_core::picking::{pick, pick_all, ray_card};
use tree_core::{
    CardId, ClickOutcome, CloudParams, FrameDriver, InputEvent, LoadedImage, Ray, SceneConfig,
    SceneState, TimedInput,
};

const W: f32 = 800.0;
const H: f32 = 600.0;
const CORNER: Vec2 = Vec2::new(2.0, 2.0);

fn config() -> SceneConfig {
    SceneConfig {
        cloud: CloudParams {
            count: 200,
            ..CloudParams::default()
        },
        ..SceneConfig::default()
    }
}

fn at(t: f64, event: InputEvent) -> TimedInput {
    TimedInput { at: t, event }
}

/// Press, release and click at `pos` without moving.
fn tap(scene: &mut SceneState, pos: Vec2, t: f64) -> Option<ClickOutcome> {
    scene.apply(at(t, InputEvent::PointerDown { pos }));
    scene.apply(at(t + 0.05, InputEvent::PointerUp));
    scene.apply(at(t + 0.051, InputEvent::Click))
}

/// A burst scene with `n` fully faded-in cards.
fn burst_scene(n: usize) -> SceneState {
    let mut scene = SceneState::new(&config());
    scene.set_viewport(W, H);
    let mut rng = StdRng::seed_from_u64(21);
    for _ in 0..n {
        scene.cards.create(640, 480, &mut rng).unwrap();
    }
    scene.set_exploded(true);
    for _ in 0..400 {
        step_cards(&mut scene.cards, true, 0.0);
    }
    scene
}

fn screen_pos(scene: &SceneState, world: Vec3) -> Vec2 {
    let ndc = scene.camera.view_proj().project_point3(world);
    Vec2::new((ndc.x + 1.0) * 0.5 * W, (1.0 - ndc.y) * 0.5 * H)
}

#[test]
fn background_tap_toggles_mode() {
    let mut scene = SceneState::new(&config());
    scene.set_viewport(W, H);
    assert!(!scene.exploded());
    assert!(scene.topper.visible);

    let outcome = tap(&mut scene, Vec2::new(400.0, 300.0), 0.0);
    assert_eq!(outcome, Some(ClickOutcome::ModeToggled { exploded: true }));
    assert!(scene.exploded());
    assert!(!scene.topper.visible);

    let outcome = tap(&mut scene, Vec2::new(400.0, 300.0), 1.0);
    assert_eq!(outcome, Some(ClickOutcome::ModeToggled { exploded: false }));
    assert!(scene.topper.visible);
}

#[test]
fn drag_in_burst_spins_without_toggling() {
    let mut scene = burst_scene(3);
    scene.apply(at(1.0, InputEvent::PointerDown { pos: CORNER }));
    scene.apply(at(1.02, InputEvent::PointerMove { pos: CORNER + Vec2::new(60.0, 0.0) }));
    scene.apply(at(1.1, InputEvent::PointerUp));
    let outcome = scene.apply(at(1.101, InputEvent::Click));

    assert_eq!(outcome, Some(ClickOutcome::Suppressed));
    assert!(scene.exploded());
    assert_eq!(scene.cards.expanded(), None);
    assert!(scene.input.rotation_offset() > 0.0);
}

#[test]
fn ray_through_card_centre_hits_it() {
    let scene = burst_scene(1);
    let card = scene.cards.get(CardId(0)).unwrap();
    let eye = scene.camera.eye;
    let ray = Ray {
        origin: eye,
        dir: (card.live.position - eye).normalize(),
    };
    let t = ray_card(&scene.camera, &ray, card).unwrap();
    assert!(t > 0.0);

    let away = Ray {
        origin: eye,
        dir: -ray.dir,
    };
    assert_eq!(ray_card(&scene.camera, &away, card), None);
}

#[test]
fn picking_returns_hits_nearest_first() {
    let scene = burst_scene(20);
    for card in &scene.cards {
        let ndc = scene.camera.view_proj().project_point3(card.live.position);
        let ray = scene.camera.ray_from_ndc(Vec2::new(ndc.x, ndc.y));
        let hits = pick_all(&scene.cards, &scene.camera, &ray);
        assert!(hits.iter().any(|h| h.id == card.id));
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert_eq!(
            pick(&scene.cards, &scene.camera, Vec2::new(ndc.x, ndc.y)),
            hits.first().map(|h| h.id)
        );
    }
}

#[test]
fn faded_cards_cannot_be_picked() {
    let mut scene = burst_scene(1);
    let pos = scene.cards.get(CardId(0)).unwrap().live.position;
    scene.set_exploded(false);
    for _ in 0..400 {
        step_cards(&mut scene.cards, false, 0.0);
    }
    let card = scene.cards.get(CardId(0)).unwrap();
    assert!(!card.is_visible(scene.cards.tuning()));
    let eye = scene.camera.eye;
    let ray = Ray {
        origin: eye,
        dir: (pos - eye).normalize(),
    };
    assert!(pick_all(&scene.cards, &scene.camera, &ray).is_empty());
}

#[test]
fn tapping_cards_expands_then_background_closes() {
    let mut scene = burst_scene(5);
    let target = scene.cards.get(CardId(2)).unwrap().live.position;
    let pos = screen_pos(&scene, target);
    let expected = pick(&scene.cards, &scene.camera, scene.viewport().to_ndc(pos))
        .expect("card under pointer");

    let outcome = tap(&mut scene, pos, 2.0);
    assert_eq!(
        outcome,
        Some(ClickOutcome::CardToggled {
            id: expected,
            expanded: true
        })
    );
    assert_eq!(scene.cards.expanded(), Some(expected));

    // background click closes the card but stays in the burst
    let outcome = tap(&mut scene, CORNER, 3.0);
    assert_eq!(outcome, Some(ClickOutcome::CardClosed));
    assert!(scene.exploded());
    assert_eq!(scene.cards.expanded(), None);

    let outcome = tap(&mut scene, CORNER, 4.0);
    assert_eq!(outcome, Some(ClickOutcome::ModeToggled { exploded: false }));
}

#[test]
fn leaving_the_burst_collapses_cards() {
    let mut scene = burst_scene(2);
    scene.cards.toggle_expanded(CardId(1));
    scene.set_exploded(false);
    assert_eq!(scene.cards.expanded(), None);
}

#[test]
fn resize_only_changes_aspect() {
    let mut scene = SceneState::new(&config());
    let mut rng = StdRng::seed_from_u64(5);
    scene.cards.create(640, 480, &mut rng).unwrap();
    let eye = scene.camera.eye;
    let target = scene.camera.target;
    let fov = scene.camera.fovy_radians;
    let card = scene.cards.get(CardId(0)).unwrap().clone();

    scene.apply(at(
        0.0,
        InputEvent::Resize {
            width: 1600.0,
            height: 400.0,
        },
    ));
    assert_eq!(scene.camera.aspect, 4.0);
    assert_eq!(scene.camera.eye, eye);
    assert_eq!(scene.camera.target, target);
    assert_eq!(scene.camera.fovy_radians, fov);
    assert!(!scene.exploded());
    let after = scene.cards.get(CardId(0)).unwrap();
    assert_eq!(after.attached, card.attached);
    assert_eq!(after.detached, card.detached);
}

#[test]
fn frame_driver_end_to_end_with_three_cards() {
    let mut driver: FrameDriver<&'static str> =
        FrameDriver::with_rng(config(), StdRng::seed_from_u64(42));
    let loads = driver.load_sender();
    let inputs = driver.input_sender();
    for (i, name) in ["a", "b", "c"].into_iter().enumerate() {
        loads
            .send(LoadedImage {
                source: format!("p{}.jpg", i + 1),
                width: 640,
                height: 480,
                handle: name,
            })
            .unwrap();
    }
    // zero-sized images are dropped
    loads
        .send(LoadedImage {
            source: "broken.jpg".into(),
            width: 0,
            height: 0,
            handle: "x",
        })
        .unwrap();
    inputs
        .send(at(0.0, InputEvent::Resize { width: W, height: H }))
        .unwrap();

    let dt = 1.0 / 60.0;
    let mut now = 0.0;
    let report = driver.tick(dt, now);
    let created: Vec<_> = report.created.iter().map(|(id, h)| (id.0, *h)).collect();
    assert_eq!(created, vec![(0, "a"), (1, "b"), (2, "c")]);
    assert_eq!(driver.scene().cards.len(), 3);
    assert!(!driver.scene().exploded());
    assert!(driver.view().topper.is_some());
    assert!(driver.view().cards.is_empty());

    for e in [
        InputEvent::PointerDown { pos: CORNER },
        InputEvent::PointerUp,
        InputEvent::Click,
    ] {
        inputs.send(at(0.5, e)).unwrap();
    }
    now += dt as f64;
    let report = driver.tick(dt, now);
    assert_eq!(
        report.clicks.as_slice(),
        &[ClickOutcome::ModeToggled { exploded: true }]
    );
    assert!(driver.view().topper.is_none());

    for _ in 0..300 {
        now += dt as f64;
        driver.tick(dt, now);
    }
    let tuning = *driver.scene().cards.tuning();
    let time = driver.scene().time();
    for card in &driver.scene().cards {
        let target = card.target_pose(true, time, &tuning);
        assert_eq!(target.position.x, card.detached.x);
        assert!((card.live.position.x - card.detached.x).abs() < 0.05);
        assert!((card.live.position.z - card.detached.z).abs() < 0.05);
        assert!(card.is_visible(&tuning));
    }
    let view = driver.view();
    assert_eq!(view.cards.len(), 3);
    assert_eq!(view.positions.len(), 200 * 3);
    drop(view);

    for e in [
        InputEvent::PointerDown { pos: CORNER },
        InputEvent::PointerUp,
        InputEvent::Click,
    ] {
        inputs.send(at(now + 0.1, e)).unwrap();
    }
    let report = driver.tick(dt, now + 0.2);
    assert_eq!(
        report.clicks.as_slice(),
        &[ClickOutcome::ModeToggled { exploded: false }]
    );
    for _ in 0..300 {
        now += dt as f64;
        driver.tick(dt, now + 0.2);
    }
    for card in &driver.scene().cards {
        assert!(card.live.position.distance(card.attached) < 0.05);
        assert!(!card.is_visible(driver.scene().cards.tuning()));
    }
    assert!(driver.view().cards.is_empty());
    assert!(driver.view().topper.is_some());
}

#[test]
fn card_drawn_on_top_is_the_one_a_click_picks() {
    let mut driver: FrameDriver<()> = FrameDriver::with_rng(config(), StdRng::seed_from_u64(7));
    let loads = driver.load_sender();
    for i in 0..2 {
        loads
            .send(LoadedImage {
                source: format!("p{}.jpg", i + 1),
                width: 640,
                height: 480,
                handle: (),
            })
            .unwrap();
    }
    driver.tick(1.0 / 60.0, 0.0);
    driver.scene_mut().set_exploded(true);
    for i in 1..400 {
        driver.tick(1.0 / 60.0, i as f64 / 60.0);
    }

    // The older card sits in front of the newer one on the view axis.
    let ray = driver.scene().camera.ray_from_ndc(Vec2::ZERO);
    for (id, dist) in [(CardId(0), 40.0), (CardId(1), 100.0)] {
        let card = driver.scene_mut().cards.get_mut(id).unwrap();
        card.live.position = ray.origin + ray.dir * dist;
    }

    let scene = driver.scene();
    let picked = pick(&scene.cards, &scene.camera, Vec2::ZERO);
    assert_eq!(picked, Some(CardId(0)));
    let order: Vec<CardId> = driver.view().cards.iter().map(|c| c.id).collect();
    assert_eq!(order, vec![CardId(1), CardId(0)]);

    // An expanded card is drawn last whatever its depth.
    driver.scene_mut().cards.toggle_expanded(CardId(1));
    let order: Vec<CardId> = driver.view().cards.iter().map(|c| c.id).collect();
    assert_eq!(order, vec![CardId(0), CardId(1)]);
}

#[test]
fn cloud_follows_the_mode() {
    let mut driver: FrameDriver<()> = FrameDriver::with_rng(config(), StdRng::seed_from_u64(3));
    driver.scene_mut().set_exploded(true);
    let before = driver.blend().distance_to(driver.cloud().detached());
    for i in 0..30 {
        driver.tick(1.0 / 60.0, i as f64 / 60.0);
    }
    assert!(driver.blend().distance_to(driver.cloud().detached()) < before);
    assert!(driver.scene().cloud_rotation() != 0.0);
}
