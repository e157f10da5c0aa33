//! Scene container: the mobject arena plus the ordered top-level list.
//!
//! The arena owns every mobject ever spawned; the top-level list decides
//! what is drawn and updated each frame. Removing a mobject from the list
//! leaves it alive in the arena, so animations can keep referring to it.

use rustc_hash::FxHashSet;
use slotmap::{SecondaryMap, SlotMap};
use smallvec::SmallVec;

use kinema_core::errors::{KinemaError, Result};
use kinema_core::settings::EngineSettings;

use crate::MobjectKey;
use crate::mobject::Mobject;
use crate::wrapper::MobjectRef;

pub struct Scene {
    pub(crate) mobjects: SlotMap<MobjectKey, Mobject>,
    /// Reverse child links, kept in step with every `submobjects` list.
    parents: SecondaryMap<MobjectKey, SmallVec<[MobjectKey; 2]>>,
    /// Top-level draw list, back to front.
    top_level: Vec<MobjectKey>,
    time: f64,
    settings: EngineSettings,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(EngineSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            mobjects: SlotMap::with_key(),
            parents: SecondaryMap::new(),
            top_level: Vec::new(),
            time: 0.0,
            settings,
        }
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut EngineSettings {
        &mut self.settings
    }

    // ========================================================================
    // Arena
    // ========================================================================

    /// Stores `mobject` in the arena without adding it to the draw list.
    pub fn spawn(&mut self, mobject: Mobject) -> MobjectKey {
        let children = mobject.submobjects.clone();
        let key = self.mobjects.insert(mobject);
        self.parents.insert(key, SmallVec::new());
        for child in children {
            self.link(key, child);
        }
        key
    }

    /// Vectorized mobject using the configured stroke width and point
    /// tolerance.
    pub fn spawn_vmobject(&mut self, color: kinema_core::math::Color) -> MobjectKey {
        let mut mob = Mobject::vmobject(color);
        if let Some(data) = mob.vectorized_mut() {
            data.stroke_width = self.settings.default_stroke_width;
            data.point_tolerance = self.settings.point_tolerance;
        }
        self.spawn(mob)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, key: MobjectKey) -> bool {
        self.mobjects.contains_key(key)
    }

    pub fn get(&self, key: MobjectKey) -> Result<&Mobject> {
        self.mobjects
            .get(key)
            .ok_or_else(|| KinemaError::StaleHandle(format!("{key:?}")))
    }

    pub fn get_mut(&mut self, key: MobjectKey) -> Result<&mut Mobject> {
        self.mobjects
            .get_mut(key)
            .ok_or_else(|| KinemaError::StaleHandle(format!("{key:?}")))
    }

    /// Chainable wrapper around one mobject.
    pub fn mobject(&mut self, key: MobjectKey) -> MobjectRef<'_> {
        MobjectRef::new(self, key)
    }

    /// Frees `key` alone; its children stay in the arena.
    pub fn despawn(&mut self, key: MobjectKey) -> Result<()> {
        self.get(key)?;
        self.forget(&std::iter::once(key).collect());
        Ok(())
    }

    /// Frees the whole family of `key` from the arena and drops the freed
    /// keys from the draw list and from any surviving parent.
    ///
    /// Only meant for families nothing else shares, such as the snapshots
    /// an animation takes.
    pub fn despawn_family(&mut self, key: MobjectKey) -> Result<()> {
        let family: FxHashSet<MobjectKey> = self.family(key)?.into_iter().collect();
        self.forget(&family);
        Ok(())
    }

    /// Frees `family` and detaches it from surviving parents through the
    /// reverse links, so the cost follows the family, not the arena.
    fn forget(&mut self, family: &FxHashSet<MobjectKey>) {
        let mut surviving_parents = FxHashSet::default();
        for &key in family {
            if let Some(parents) = self.parents.remove(key) {
                surviving_parents.extend(parents.into_iter().filter(|p| !family.contains(p)));
            }
            if let Some(mob) = self.mobjects.remove(key) {
                for child in mob.submobjects {
                    if !family.contains(&child) {
                        self.unlink(key, child);
                    }
                }
            }
        }
        for parent in surviving_parents {
            if let Some(mob) = self.mobjects.get_mut(parent) {
                mob.submobjects.retain(|k| !family.contains(k));
            }
        }
        self.top_level.retain(|k| !family.contains(k));
    }

    // ========================================================================
    // Parent links
    // ========================================================================

    /// Mobjects that list `key` among their submobjects.
    #[must_use]
    pub fn parents(&self, key: MobjectKey) -> &[MobjectKey] {
        self.parents.get(key).map_or(&[], |parents| parents.as_slice())
    }

    /// Swaps in a new child list for `parent` and updates the reverse links.
    pub(crate) fn replace_children(&mut self, parent: MobjectKey, children: Vec<MobjectKey>) -> Result<()> {
        let old = std::mem::replace(&mut self.get_mut(parent)?.submobjects, children);
        let current: FxHashSet<MobjectKey> = self.get(parent)?.submobjects.iter().copied().collect();
        for child in old {
            if !current.contains(&child) {
                self.unlink(parent, child);
            }
        }
        for child in current {
            self.link(parent, child);
        }
        Ok(())
    }

    fn link(&mut self, parent: MobjectKey, child: MobjectKey) {
        if let Some(parents) = self.parents.get_mut(child)
            && !parents.contains(&parent)
        {
            parents.push(parent);
        }
    }

    fn unlink(&mut self, parent: MobjectKey, child: MobjectKey) {
        if let Some(parents) = self.parents.get_mut(child) {
            parents.retain(|p| *p != parent);
        }
    }

    // ========================================================================
    // Time
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn increment_time(&mut self, dt: f64) {
        self.time += dt;
    }

    // ========================================================================
    // Top-level list
    // ========================================================================

    /// Same as [`Scene::add_to_front`].
    pub fn add(&mut self, keys: &[MobjectKey]) {
        self.add_to_front(keys);
    }

    /// Puts `keys` at the head of the draw list.
    ///
    /// The keys and their families are first taken out of the list, so
    /// adding a mobject again moves it instead of duplicating it, and a
    /// child that was drawn on its own is now drawn through its parent.
    pub fn add_to_front(&mut self, keys: &[MobjectKey]) {
        self.restructure(keys);
        let mut list = keys.to_vec();
        list.append(&mut self.top_level);
        self.top_level = list;
    }

    /// Puts `keys` at the tail of the draw list.
    pub fn add_to_back(&mut self, keys: &[MobjectKey]) {
        self.restructure(keys);
        self.top_level.extend_from_slice(keys);
    }

    /// Removes `keys` and their families from the draw list.
    ///
    /// A listed mobject whose family only partly intersects the removal set
    /// is replaced by its surviving children, recursively.
    pub fn remove(&mut self, keys: &[MobjectKey]) {
        self.restructure(keys);
    }

    pub fn bring_to_front(&mut self, keys: &[MobjectKey]) {
        self.add_to_front(keys);
    }

    pub fn bring_to_back(&mut self, keys: &[MobjectKey]) {
        self.add_to_back(keys);
    }

    /// Empties the draw list. The arena is left untouched.
    pub fn clear(&mut self) {
        self.top_level.clear();
    }

    #[must_use]
    pub fn mobject_list(&self) -> &[MobjectKey] {
        &self.top_level
    }

    fn restructure(&mut self, to_remove: &[MobjectKey]) {
        let removal: FxHashSet<MobjectKey> = self.families_of(to_remove).into_iter().collect();
        let current = std::mem::take(&mut self.top_level);
        let mut kept = Vec::with_capacity(current.len());
        self.collect_safe_mobjects(&current, &removal, &mut kept);
        self.top_level = kept;
    }

    fn collect_safe_mobjects(
        &self,
        list: &[MobjectKey],
        to_remove: &FxHashSet<MobjectKey>,
        out: &mut Vec<MobjectKey>,
    ) {
        for &key in list {
            if to_remove.contains(&key) {
                continue;
            }
            let Ok(family) = self.family(key) else {
                log::warn!("Dropping stale mobject {key:?} from the draw list");
                continue;
            };
            let intersect: FxHashSet<MobjectKey> =
                family.into_iter().filter(|k| to_remove.contains(k)).collect();
            if intersect.is_empty() {
                out.push(key);
            } else if let Some(mob) = self.mobjects.get(key) {
                log::debug!("Splitting {} to remove {} descendants", mob.name, intersect.len());
                self.collect_safe_mobjects(&mob.submobjects, &intersect, out);
            }
        }
    }

    /// Families of every listed mobject, flattened and deduplicated.
    #[must_use]
    pub fn mobject_families(&self) -> Vec<MobjectKey> {
        self.families_of(&self.top_level)
    }

    /// Listed mobjects that do not also appear inside another listed
    /// mobject's family.
    #[must_use]
    pub fn top_level_mobjects(&self) -> Vec<MobjectKey> {
        let families: Vec<FxHashSet<MobjectKey>> = self
            .top_level
            .iter()
            .map(|&k| self.family(k).unwrap_or_default().into_iter().collect())
            .collect();
        self.top_level
            .iter()
            .copied()
            .filter(|k| families.iter().filter(|f| f.contains(k)).count() == 1)
            .collect()
    }

    /// Suffix of the flattened families starting at the first mobject that
    /// is animated or carries updaters somewhere in its family.
    #[must_use]
    pub fn moving_mobjects(&self, animated: &[MobjectKey]) -> Vec<MobjectKey> {
        let mobjects = self.mobject_families();
        let first_moving = mobjects.iter().position(|&k| {
            animated.contains(&k) || self.family_updaters(k).is_ok_and(|u| !u.is_empty())
        });
        match first_moving {
            Some(i) => mobjects[i..].to_vec(),
            None => Vec::new(),
        }
    }

    /// Whether a frame needs to run mobject updaters at all.
    #[must_use]
    pub fn should_update_mobjects(&self) -> bool {
        self.settings.always_update_mobjects
            || self
                .mobject_families()
                .iter()
                .any(|&k| self.mobjects.get(k).is_some_and(Mobject::has_updaters))
    }

    /// Runs updaters of every listed mobject and its family, once each.
    pub fn update_mobjects(&mut self, dt: f64) -> Result<()> {
        let listed = self.top_level.clone();
        self.update_all_except(&listed, dt, &[])
    }
}
