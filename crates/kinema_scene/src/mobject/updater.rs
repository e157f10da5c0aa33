use std::fmt;
use std::rc::Rc;

use kinema_core::errors::Result;
use rustc_hash::FxHashSet;

use crate::MobjectKey;
use crate::scene::Scene;

type UpdateFn = dyn Fn(&mut Scene, MobjectKey, f64) -> Result<()>;

/// Per-frame callback attached to a mobject.
///
/// Receives the scene, the key of the mobject it is attached to and the
/// frame delta in seconds. Identity is by pointer, so a clone of an updater
/// can be used to remove it again.
#[derive(Clone)]
pub struct Updater(Rc<UpdateFn>);

impl Updater {
    pub fn new(func: impl Fn(&mut Scene, MobjectKey, f64) -> Result<()> + 'static) -> Self {
        Self(Rc::new(func))
    }

    #[inline]
    pub fn call(&self, scene: &mut Scene, key: MobjectKey, dt: f64) -> Result<()> {
        (self.0)(scene, key, dt)
    }

    #[inline]
    #[must_use]
    pub fn same_as(&self, other: &Updater) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Updater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Updater(..)")
    }
}

impl Scene {
    /// Appends `updater` (or inserts it at `index`) and, when `call_now` is
    /// set, runs a zero-time update of the mobject right away.
    pub fn add_updater(&mut self, key: MobjectKey, updater: Updater, index: Option<usize>, call_now: bool) -> Result<()> {
        let mob = self.get_mut(key)?;
        match index {
            Some(i) => {
                let i = i.min(mob.updaters.len());
                mob.updaters.insert(i, updater);
            }
            None => mob.updaters.push(updater),
        }
        if call_now {
            self.update(key, 0.0, true)?;
        }
        Ok(())
    }

    pub fn remove_updater(&mut self, key: MobjectKey, updater: &Updater) -> Result<()> {
        self.get_mut(key)?.updaters.retain(|u| !u.same_as(updater));
        Ok(())
    }

    pub fn clear_updaters(&mut self, key: MobjectKey, recursive: bool) -> Result<()> {
        let targets = if recursive { self.family(key)? } else { vec![key] };
        for k in targets {
            if let Some(mob) = self.mobjects.get_mut(k) {
                mob.updaters.clear();
            }
        }
        Ok(())
    }

    /// Replaces `key`'s updaters with the ones attached to `source`.
    pub fn match_updaters(&mut self, key: MobjectKey, source: MobjectKey) -> Result<()> {
        let updaters = self.get(source)?.updaters.clone();
        self.clear_updaters(key, true)?;
        for updater in updaters {
            self.add_updater(key, updater, None, true)?;
        }
        Ok(())
    }

    /// All updaters attached anywhere in the family of `key`.
    pub fn family_updaters(&self, key: MobjectKey) -> Result<Vec<Updater>> {
        Ok(self
            .family(key)?
            .into_iter()
            .filter_map(|k| self.mobjects.get(k))
            .flat_map(|m| m.updaters.iter().cloned())
            .collect())
    }

    pub fn suspend_updating(&mut self, key: MobjectKey, recursive: bool) -> Result<()> {
        self.set_updating_suspended(key, recursive, true)
    }

    pub fn resume_updating(&mut self, key: MobjectKey, recursive: bool) -> Result<()> {
        self.set_updating_suspended(key, recursive, false)
    }

    fn set_updating_suspended(&mut self, key: MobjectKey, recursive: bool, suspended: bool) -> Result<()> {
        let targets = if recursive { self.family(key)? } else { vec![key] };
        for k in targets {
            if let Some(mob) = self.mobjects.get_mut(k) {
                mob.updating_suspended = suspended;
            }
        }
        Ok(())
    }

    /// Runs the updaters of `key` and, when `recursive`, of its descendants.
    ///
    /// A suspended mobject skips its own updaters and its whole subtree. A
    /// descendant reachable through several parents is updated once.
    pub fn update(&mut self, key: MobjectKey, dt: f64, recursive: bool) -> Result<()> {
        let mut visited = FxHashSet::default();
        self.update_inner(key, dt, recursive, &mut visited)
    }

    /// Runs the updaters of every key in `roots` and their families, except
    /// the families of `skip`. Each mobject is updated at most once, even
    /// when several roots share it.
    pub fn update_all_except(&mut self, roots: &[MobjectKey], dt: f64, skip: &[MobjectKey]) -> Result<()> {
        let mut visited: FxHashSet<MobjectKey> = self.families_of(skip).into_iter().collect();
        for &key in roots {
            if !self.contains(key) {
                log::warn!("Skipping stale mobject {key:?} during scene update");
                continue;
            }
            self.update_inner(key, dt, true, &mut visited)?;
        }
        Ok(())
    }

    fn update_inner(
        &mut self,
        key: MobjectKey,
        dt: f64,
        recursive: bool,
        visited: &mut FxHashSet<MobjectKey>,
    ) -> Result<()> {
        if !visited.insert(key) {
            return Ok(());
        }
        let mob = self.get(key)?;
        if mob.updating_suspended {
            return Ok(());
        }

        // Updaters may edit the tree, including this node's updater list.
        let updaters = mob.updaters.clone();
        for updater in &updaters {
            updater.call(self, key, dt)?;
        }

        if recursive {
            let children = match self.mobjects.get(key) {
                Some(mob) => mob.submobjects.clone(),
                None => {
                    log::warn!("Mobject {key:?} was removed by its own updater");
                    return Ok(());
                }
            };
            for child in children {
                if !self.mobjects.contains_key(child) {
                    log::warn!("Skipping stale submobject {child:?} during update");
                    continue;
                }
                self.update_inner(child, dt, recursive, visited)?;
            }
        }
        Ok(())
    }
}
