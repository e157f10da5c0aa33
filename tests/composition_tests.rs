//! Animation Composition Tests
//!
//! Tests for:
//! - AnimationGroup timeline layout and local alphas
//! - Succession hand-over between children
//! - LaggedStart defaults
//! - Group bookkeeping mobjects

use std::cell::RefCell;
use std::rc::Rc;

use kinema::animation::{AnimationGroup, Succession, lagged_start};
use kinema::core::Result;
use kinema::scene::{Mobject, MobjectKey, Scene};
use kinema::{Animation, AnimationState};

const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Begin(usize),
    Finish(usize),
}

type Journal = Rc<RefCell<Vec<Event>>>;

/// Records its lifecycle and the last alpha it was given.
struct Probe {
    id: usize,
    mobject: MobjectKey,
    run_time: f64,
    journal: Journal,
    alpha: Rc<RefCell<f64>>,
    state: AnimationState,
}

impl Probe {
    fn new(scene: &mut Scene, id: usize, run_time: f64, journal: &Journal) -> (Self, Rc<RefCell<f64>>) {
        let alpha = Rc::new(RefCell::new(-1.0));
        let probe = Self {
            id,
            mobject: scene.spawn(Mobject::new()),
            run_time,
            journal: Rc::clone(journal),
            alpha: Rc::clone(&alpha),
            state: AnimationState::Unstarted,
        };
        (probe, alpha)
    }
}

impl Animation for Probe {
    fn begin(&mut self, _scene: &mut Scene) -> Result<()> {
        self.journal.borrow_mut().push(Event::Begin(self.id));
        self.state = AnimationState::Active;
        Ok(())
    }

    fn finish(&mut self, _scene: &mut Scene) -> Result<()> {
        self.journal.borrow_mut().push(Event::Finish(self.id));
        self.state = AnimationState::Finished;
        Ok(())
    }

    fn interpolate(&mut self, _scene: &mut Scene, alpha: f64) -> Result<()> {
        *self.alpha.borrow_mut() = alpha;
        Ok(())
    }

    fn update_mobjects(&mut self, _scene: &mut Scene, _dt: f64) -> Result<()> {
        Ok(())
    }

    fn clean_up_from_scene(&mut self, _scene: &mut Scene) -> Result<()> {
        Ok(())
    }

    fn mobject(&self) -> MobjectKey {
        self.mobject
    }

    fn run_time(&self) -> f64 {
        self.run_time
    }

    fn is_remover(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "Probe"
    }

    fn state(&self) -> AnimationState {
        self.state
    }
}

fn probes(scene: &mut Scene, run_times: &[f64], journal: &Journal) -> (Vec<Box<dyn Animation>>, Vec<Rc<RefCell<f64>>>) {
    run_times
        .iter()
        .enumerate()
        .map(|(id, &run_time)| {
            let (probe, alpha) = Probe::new(scene, id, run_time, journal);
            (Box::new(probe) as Box<dyn Animation>, alpha)
        })
        .unzip()
}

fn alpha_of(cell: &Rc<RefCell<f64>>) -> f64 {
    *cell.borrow()
}

// ============================================================================
// AnimationGroup
// ============================================================================

#[test]
fn parallel_group_spans_the_longest_child() {
    let mut scene = Scene::new();
    let journal = Journal::default();
    let (anims, alphas) = probes(&mut scene, &[1.0, 2.0], &journal);
    let mut group = AnimationGroup::new(&mut scene, anims).unwrap().with_lag_ratio(0.0);
    assert!((group.run_time() - 2.0).abs() < EPSILON);

    group.begin(&mut scene).unwrap();
    assert_eq!(*journal.borrow(), vec![Event::Begin(0), Event::Begin(1)]);

    group.interpolate(&mut scene, 0.0).unwrap();
    assert_eq!(alpha_of(&alphas[0]), 0.0);
    assert_eq!(alpha_of(&alphas[1]), 0.0);

    group.interpolate(&mut scene, 0.5).unwrap();
    assert!((alpha_of(&alphas[0]) - 1.0).abs() < EPSILON);
    assert!((alpha_of(&alphas[1]) - 0.5).abs() < EPSILON);

    group.interpolate(&mut scene, 1.0).unwrap();
    assert_eq!(alpha_of(&alphas[0]), 1.0);
    assert_eq!(alpha_of(&alphas[1]), 1.0);
}

#[test]
fn back_to_back_children_with_full_lag() {
    let mut scene = Scene::new();
    let journal = Journal::default();
    let (anims, alphas) = probes(&mut scene, &[1.0, 1.0], &journal);
    let mut group = AnimationGroup::new(&mut scene, anims).unwrap().with_lag_ratio(1.0);
    assert!((group.run_time() - 2.0).abs() < EPSILON);

    group.begin(&mut scene).unwrap();
    group.interpolate(&mut scene, 0.25).unwrap();
    assert!((alpha_of(&alphas[0]) - 0.5).abs() < EPSILON);
    assert_eq!(alpha_of(&alphas[1]), 0.0);
}

#[test]
fn explicit_run_time_overrides_the_timeline() {
    let mut scene = Scene::new();
    let journal = Journal::default();
    let (anims, _) = probes(&mut scene, &[1.0, 1.0], &journal);
    let group = AnimationGroup::new(&mut scene, anims).unwrap().with_run_time(5.0);
    assert!((group.run_time() - 5.0).abs() < EPSILON);
    assert!((group.max_end_time() - 1.0).abs() < EPSILON);
}

#[test]
fn group_node_is_freed_on_clean_up() {
    let mut scene = Scene::new();
    let journal = Journal::default();
    let (anims, _) = probes(&mut scene, &[1.0, 1.0], &journal);
    let children: Vec<_> = anims.iter().map(|anim| anim.mobject()).collect();
    let mut group = AnimationGroup::new(&mut scene, anims).unwrap();
    let node = group.mobject();

    assert_eq!(scene.get(node).unwrap().submobjects(), children.as_slice());
    assert_eq!(group.animated_mobjects(), children);

    group.begin(&mut scene).unwrap();
    group.finish(&mut scene).unwrap();
    group.clean_up_from_scene(&mut scene).unwrap();
    assert!(!scene.contains(node));
    assert!(children.iter().all(|&key| scene.contains(key)));
}

#[test]
fn lagged_start_uses_the_configured_lag() {
    let mut scene = Scene::new();
    let journal = Journal::default();
    let (anims, _) = probes(&mut scene, &[1.0, 1.0, 1.0], &journal);
    let group = lagged_start(&mut scene, anims).unwrap();

    assert_eq!(group.name(), "LaggedStart");
    assert!((group.lag_ratio() - 0.05).abs() < EPSILON);
    let starts: Vec<f64> = group.timings().iter().map(|t| t.start).collect();
    assert!((starts[1] - 0.05).abs() < EPSILON);
    assert!((starts[2] - 0.1).abs() < EPSILON);
    assert!((group.run_time() - 1.1).abs() < EPSILON);
}

// ============================================================================
// Succession
// ============================================================================

#[test]
fn succession_hands_over_at_bin_edges() {
    let mut scene = Scene::new();
    let journal = Journal::default();
    let (anims, alphas) = probes(&mut scene, &[1.0, 1.0, 1.0], &journal);
    let mut succession = Succession::new(&mut scene, anims).unwrap();
    assert!((succession.run_time() - 3.0).abs() < EPSILON);

    succession.begin(&mut scene).unwrap();
    assert_eq!(*journal.borrow(), vec![Event::Begin(0)]);

    succession.interpolate(&mut scene, 0.2).unwrap();
    assert_eq!(succession.active_index(), 0);
    assert!((alpha_of(&alphas[0]) - 0.6).abs() < EPSILON);

    succession.interpolate(&mut scene, 1.0 / 3.0).unwrap();
    assert_eq!(succession.active_index(), 1);
    assert_eq!(
        *journal.borrow(),
        vec![Event::Begin(0), Event::Finish(0), Event::Begin(1)]
    );
    assert!(alpha_of(&alphas[1]).abs() < EPSILON);
}

#[test]
fn skipped_children_still_run_their_lifecycle() {
    let mut scene = Scene::new();
    let journal = Journal::default();
    let (anims, _) = probes(&mut scene, &[1.0, 1.0, 1.0], &journal);
    let mut succession = Succession::new(&mut scene, anims).unwrap();

    succession.begin(&mut scene).unwrap();
    succession.interpolate(&mut scene, 0.9).unwrap();
    assert_eq!(succession.active_index(), 2);
    assert_eq!(
        *journal.borrow(),
        vec![
            Event::Begin(0),
            Event::Finish(0),
            Event::Begin(1),
            Event::Finish(1),
            Event::Begin(2),
        ]
    );
}

#[test]
fn succession_finish_closes_the_last_child() {
    let mut scene = Scene::new();
    let journal = Journal::default();
    let (anims, alphas) = probes(&mut scene, &[1.0, 1.0], &journal);
    let mut succession = Succession::new(&mut scene, anims).unwrap();

    succession.begin(&mut scene).unwrap();
    succession.finish(&mut scene).unwrap();
    assert_eq!(succession.state(), AnimationState::Finished);
    assert_eq!(alpha_of(&alphas[1]), 1.0);

    let events = journal.borrow();
    assert_eq!(events.iter().filter(|e| matches!(e, Event::Begin(_))).count(), 2);
    assert_eq!(events.iter().filter(|e| matches!(e, Event::Finish(_))).count(), 2);
    assert_eq!(events.last(), Some(&Event::Finish(1)));
}
