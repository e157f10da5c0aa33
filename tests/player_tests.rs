//! Player Tests
//!
//! Tests for:
//! - Frame stepping of play / wait
//! - Per-tick ordering of updaters, interpolation and rendering
//! - Cooperative cancellation and run outcomes
//! - Parallel playback and removers
//! - Rejection of bad frame durations

use std::cell::RefCell;
use std::rc::Rc;

use kinema::animation::{show_creation, uncreate, update_from_func};
use kinema::app::logging;
use kinema::core::constants::{ORIGIN, RIGHT, UP};
use kinema::core::{EngineSettings, KinemaError};
use kinema::scene::{Mobject, MobjectKey, Scene, Updater};
use kinema::{Animation, Display, Flow, Player, RunOutcome};

const EPSILON: f64 = 1e-9;

/// Four frames per second keeps every frame duration exact in binary.
fn player() -> Player {
    Player::with_settings(EngineSettings::default().with_frame_rate(4.0))
}

fn square(scene: &mut Scene) -> MobjectKey {
    scene.spawn(Mobject::vmobject_corners(&[ORIGIN, RIGHT, RIGHT + UP, UP, ORIGIN]).unwrap())
}

type Journal = Rc<RefCell<Vec<&'static str>>>;

struct RecordingDisplay {
    dt: f64,
    journal: Journal,
}

impl Display for RecordingDisplay {
    fn next_frame(&mut self) -> f64 {
        self.dt
    }

    fn render(&mut self, _scene: &Scene) {
        self.journal.borrow_mut().push("render");
    }
}

fn recorder(journal: &Journal) -> Updater {
    let journal = Rc::clone(journal);
    Updater::new(move |_, _, _| {
        journal.borrow_mut().push("updater");
        Ok(())
    })
}

// ============================================================================
// Stepping
// ============================================================================

#[test]
fn play_steps_through_the_run_time() {
    let mut player = player();
    let sq = square(player.scene_mut());
    let mut anim = show_creation(player.scene(), sq);

    let flow = player.play(&mut anim).unwrap();
    assert_eq!(flow, Flow::Continue);

    let state = player.frame_state();
    assert_eq!(state.frame_count, 4);
    assert!((state.time - 1.0).abs() < EPSILON);
    assert!((state.dt - 0.25).abs() < EPSILON);
    assert_eq!(player.display().frames_rendered(), 4);

    // begin put the square on the list and finish drew all of it.
    assert!(player.scene().mobject_list().contains(&sq));
    assert_eq!(player.scene().get(sq).unwrap().num_curves(), 4);
}

#[test]
fn wait_runs_only_updaters() {
    let mut player = player();
    let sq = square(player.scene_mut());
    player.scene_mut().add(&[sq]);
    let drift = Updater::new(|scene, key, dt| scene.shift(key, RIGHT * dt));
    player.scene_mut().add_updater(sq, drift, None, false).unwrap();

    assert_eq!(player.wait(0.5).unwrap(), Flow::Continue);
    assert_eq!(player.frame_state().frame_count, 2);
    let first = player.scene().get(sq).unwrap().points[0];
    assert!(first.abs_diff_eq(RIGHT * 0.5, 1e-9));
}

#[test]
fn tick_order_is_updaters_then_interpolation_then_render() {
    let journal = Journal::default();
    let display = RecordingDisplay {
        dt: 0.25,
        journal: Rc::clone(&journal),
    };
    let mut player = Player::new(Scene::new(), display);

    let background = square(player.scene_mut());
    player.scene_mut().add(&[background]);
    player
        .scene_mut()
        .add_updater(background, recorder(&journal), None, false)
        .unwrap();

    let sq = square(player.scene_mut());
    let animated_updater = {
        let journal = Rc::clone(&journal);
        Updater::new(move |_, _, _| {
            journal.borrow_mut().push("animated updater");
            Ok(())
        })
    };
    player.scene_mut().add_updater(sq, animated_updater, None, false).unwrap();

    let log = Rc::clone(&journal);
    let mut anim = update_from_func(player.scene(), sq, move |_, _| {
        log.borrow_mut().push("interpolate");
        Ok(())
    })
    .with_run_time(0.25);

    player.play(&mut anim).unwrap();
    assert_eq!(
        *journal.borrow(),
        vec![
            // begin
            "interpolate",
            // the single tick
            "updater",
            "animated updater",
            "interpolate",
            "render",
            // finish, then the zero-length update of the list [sq, background]
            "interpolate",
            "animated updater",
            "updater",
        ]
    );
}

#[test]
fn animated_child_of_a_listed_group_updates_once_per_tick() {
    let mut player = player();
    let sq = square(player.scene_mut());
    let group = player.scene_mut().group(&[sq]).unwrap();
    player.scene_mut().add(&[group]);

    let ticks = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&ticks);
    let counter = Updater::new(move |_, _, dt| {
        if dt > 0.0 {
            seen.borrow_mut().push(dt);
        }
        Ok(())
    });
    player.scene_mut().add_updater(sq, counter, None, false).unwrap();

    let mut anim = show_creation(player.scene(), sq);
    player.play(&mut anim).unwrap();

    assert_eq!(player.frame_state().frame_count, 4);
    assert_eq!(ticks.borrow().len(), 4);
    let integrated: f64 = ticks.borrow().iter().sum();
    assert!((integrated - 1.0).abs() < EPSILON);
    // The animated square was already drawn through its group.
    assert_eq!(player.scene().mobject_list(), &[group]);
}

#[test]
fn suspended_animation_freezes_a_grouped_mobject() {
    let mut player = player();
    let sq = square(player.scene_mut());
    let group = player.scene_mut().group(&[sq]).unwrap();
    player.scene_mut().add(&[group]);
    let drift = Updater::new(|scene, key, dt| scene.shift(key, RIGHT * dt));
    player.scene_mut().add_updater(sq, drift, None, false).unwrap();

    let mut anim = update_from_func(player.scene(), sq, |_, _| Ok(()))
        .with_suspend_mobject_updating(true)
        .with_run_time(0.5);
    player.play(&mut anim).unwrap();

    assert!(player.scene().get(sq).unwrap().points[0].abs_diff_eq(ORIGIN, 1e-9));
}

// ============================================================================
// Cancellation
// ============================================================================

#[test]
fn cancelling_from_an_updater_ends_the_scene() {
    let mut player = player();
    let sq = square(player.scene_mut());
    player.scene_mut().add(&[sq]);

    let token = player.cancellation_token();
    let stopper = Updater::new(move |scene, _, _| {
        if scene.time() >= 0.5 {
            token.cancel();
        }
        Ok(())
    });
    player.scene_mut().add_updater(sq, stopper, None, false).unwrap();

    let outcome = player.run(|p| p.wait(2.0)).unwrap();

    assert_eq!(outcome, RunOutcome::EndedEarly);
    assert_eq!(player.frame_state().frame_count, 3);
    assert!((player.scene().time() - 0.75).abs() < EPSILON);
}

#[test]
fn cancelled_player_skips_further_animations() {
    let mut player = player();
    let sq = square(player.scene_mut());
    player.cancellation_token().cancel();

    let mut anim = show_creation(player.scene(), sq);
    assert_eq!(player.play(&mut anim).unwrap(), Flow::EndedEarly);
    assert_eq!(player.frame_state().frame_count, 0);
    assert_eq!(anim.state(), kinema::AnimationState::Unstarted);

    player.cancellation_token().reset();
    assert_eq!(player.play(&mut anim).unwrap(), Flow::Continue);
}

#[test]
fn completed_run_renders_a_final_frame() {
    let mut player = player();
    let sq = square(player.scene_mut());
    let outcome = player
        .run(|p| {
            let mut anim = show_creation(p.scene(), sq);
            p.play(&mut anim)
        })
        .unwrap();
    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(player.display().frames_rendered(), 5);
}

// ============================================================================
// Composition and removal
// ============================================================================

#[test]
fn play_many_runs_in_parallel() {
    let mut player = player();
    let a = square(player.scene_mut());
    let b = square(player.scene_mut());
    player.scene_mut().shift(b, UP * 2.0).unwrap();

    let anims = vec![
        show_creation(player.scene(), a).boxed(),
        show_creation(player.scene(), b).boxed(),
    ];
    player.play_many(anims).unwrap();

    assert_eq!(player.frame_state().frame_count, 4);
    let listed = player.scene().mobject_list();
    assert!(listed.contains(&a));
    assert!(listed.contains(&b));
    // Only the two squares remain listed; the group node is gone.
    assert_eq!(listed.len(), 2);
}

#[test]
fn remover_leaves_the_draw_list() {
    let mut player = player();
    let sq = square(player.scene_mut());
    player.scene_mut().add(&[sq]);

    let mut anim = uncreate(player.scene(), sq);
    player.play(&mut anim).unwrap();
    assert!(!player.scene().mobject_list().contains(&sq));
}

#[test]
fn moving_mobjects_start_at_the_first_animated_one() {
    let mut player = player();
    let still = square(player.scene_mut());
    let moving = square(player.scene_mut());
    player.scene_mut().add_to_back(&[still, moving]);

    let anim = show_creation(player.scene(), moving);
    assert_eq!(player.moving_mobjects(&anim), vec![moving]);
    assert_eq!(player.top_level_mobjects(), vec![still, moving]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn zero_frame_duration_is_rejected() {
    let display = RecordingDisplay {
        dt: 0.0,
        journal: Journal::default(),
    };
    let mut player = Player::new(Scene::new(), display);
    let sq = square(player.scene_mut());
    let mut anim = show_creation(player.scene(), sq);
    assert!(matches!(player.play(&mut anim), Err(KinemaError::InvalidArgument(_))));
}

#[test]
fn logger_installs_once() {
    let _ = logging::init_with_filter("warn");
    assert!(!logging::init_with_filter("warn"));
}
