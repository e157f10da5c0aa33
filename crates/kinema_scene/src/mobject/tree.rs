use rustc_hash::FxHashMap;

use kinema_core::errors::{KinemaError, Result};

use crate::MobjectKey;
use crate::mobject::Mobject;
use crate::scene::Scene;

impl Scene {
    // ========================================================================
    // Structural edits
    // ========================================================================

    /// Same as [`Scene::add_submobjects_to_front`].
    pub fn add_submobjects(&mut self, parent: MobjectKey, children: &[MobjectKey]) -> Result<()> {
        self.add_submobjects_to_front(parent, children)
    }

    /// Makes `children` the first submobjects of `parent`, in the given
    /// order. Children already attached are moved, not duplicated.
    pub fn add_submobjects_to_front(&mut self, parent: MobjectKey, children: &[MobjectKey]) -> Result<()> {
        self.check_insertion(parent, children)?;
        let mob = self.get(parent)?;
        let mut list = children.to_vec();
        list.extend(mob.submobjects.iter().copied().filter(|k| !children.contains(k)));
        log::debug!("{}: {} submobjects after add to front", mob.name, list.len());
        self.replace_children(parent, list)
    }

    /// Makes `children` the last submobjects of `parent`, in the given order.
    pub fn add_submobjects_to_back(&mut self, parent: MobjectKey, children: &[MobjectKey]) -> Result<()> {
        self.check_insertion(parent, children)?;
        let mob = self.get(parent)?;
        let mut list: Vec<_> = mob.submobjects.iter().copied().filter(|k| !children.contains(k)).collect();
        list.extend_from_slice(children);
        log::debug!("{}: {} submobjects after add to back", mob.name, list.len());
        self.replace_children(parent, list)
    }

    pub fn remove_submobjects(&mut self, parent: MobjectKey, children: &[MobjectKey]) -> Result<()> {
        let kept = self
            .get(parent)?
            .submobjects
            .iter()
            .copied()
            .filter(|k| !children.contains(k))
            .collect();
        self.replace_children(parent, kept)
    }

    /// Replaces the children of `parent` wholesale.
    pub fn set_submobjects(&mut self, parent: MobjectKey, children: Vec<MobjectKey>) -> Result<()> {
        self.check_insertion(parent, &children)?;
        self.replace_children(parent, children)
    }

    fn check_insertion(&self, parent: MobjectKey, children: &[MobjectKey]) -> Result<()> {
        if children.contains(&parent) {
            return Err(KinemaError::SelfContainment);
        }
        for &child in children {
            if self.family(child)?.contains(&parent) {
                return Err(KinemaError::CycleDetected(self.get(child)?.name.clone()));
            }
        }
        Ok(())
    }

    /// Spawns a plain group holding `children`.
    pub fn group(&mut self, children: &[MobjectKey]) -> Result<MobjectKey> {
        let key = self.spawn(Mobject::group());
        self.add_submobjects(key, children)?;
        Ok(key)
    }

    /// Spawns a vectorized group holding `children`.
    pub fn vgroup(&mut self, children: &[MobjectKey]) -> Result<MobjectKey> {
        let key = self.spawn(Mobject::vgroup());
        self.add_submobjects(key, children)?;
        Ok(key)
    }

    // ========================================================================
    // Copies
    // ========================================================================

    /// Deep copy of `key` and its descendants.
    ///
    /// Sharing inside the copied subtree is preserved: a child reachable
    /// through two parents is copied once and both copied parents point at
    /// that one copy. Updaters are not copied; `target` links are kept as
    /// they are.
    pub fn copy(&mut self, key: MobjectKey) -> Result<MobjectKey> {
        let mut copies = FxHashMap::default();
        self.copy_inner(key, &mut copies)
    }

    fn copy_inner(&mut self, key: MobjectKey, copies: &mut FxHashMap<MobjectKey, MobjectKey>) -> Result<MobjectKey> {
        if let Some(&existing) = copies.get(&key) {
            return Ok(existing);
        }
        let original = self.get(key)?;
        let mut node = original.detached_copy();
        node.target = original.target;
        let children = original.submobjects.clone();

        let new_key = self.spawn(node);
        copies.insert(key, new_key);

        let mut new_children = Vec::with_capacity(children.len());
        for child in children {
            new_children.push(self.copy_inner(child, copies)?);
        }
        self.replace_children(new_key, new_children)?;
        Ok(new_key)
    }

    /// Stores a fresh copy of `key` as its `target` and returns it.
    pub fn generate_target(&mut self, key: MobjectKey) -> Result<MobjectKey> {
        self.get_mut(key)?.target = None;
        let target = self.copy(key)?;
        self.get_mut(key)?.target = Some(target);
        Ok(target)
    }

    /// Moves the points of `key` into a childless copy appended as its last
    /// submobject, leaving `key` itself without points.
    pub fn push_self_into_submobjects(&mut self, key: MobjectKey) -> Result<MobjectKey> {
        let node = self.get(key)?.detached_copy();
        let copy = self.spawn(node);
        self.get_mut(key)?.points.clear();
        self.add_submobjects_to_back(key, &[copy])?;
        Ok(copy)
    }
}
