use glam::DVec3;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use kinema_core::errors::Result;

use crate::MobjectKey;
use crate::scene::Scene;

impl Scene {
    /// `key` followed by all of its descendants in pre-order, each key once.
    ///
    /// A node reachable through several parents is listed at its first
    /// occurrence only. Stale child keys are skipped with a warning.
    pub fn family(&self, key: MobjectKey) -> Result<Vec<MobjectKey>> {
        self.get(key)?;
        let mut visited = FxHashSet::default();
        let mut out = Vec::new();
        self.push_family(key, &mut visited, &mut out);
        Ok(out)
    }

    /// Families of every key in `keys`, concatenated and deduplicated.
    #[must_use]
    pub fn families_of(&self, keys: &[MobjectKey]) -> Vec<MobjectKey> {
        let mut visited = FxHashSet::default();
        let mut out = Vec::new();
        for &key in keys {
            if self.contains(key) {
                self.push_family(key, &mut visited, &mut out);
            } else {
                log::warn!("Skipping stale mobject {key:?} in family extraction");
            }
        }
        out
    }

    fn push_family(&self, root: MobjectKey, visited: &mut FxHashSet<MobjectKey>, out: &mut Vec<MobjectKey>) {
        let mut stack: SmallVec<[MobjectKey; 16]> = SmallVec::new();
        stack.push(root);
        while let Some(key) = stack.pop() {
            if !visited.insert(key) {
                continue;
            }
            let Some(mob) = self.mobjects.get(key) else {
                log::warn!("Skipping stale submobject {key:?} in family traversal");
                continue;
            };
            out.push(key);
            stack.extend(mob.submobjects.iter().rev().copied());
        }
    }

    /// Family members that own at least one point.
    pub fn family_with_points(&self, key: MobjectKey) -> Result<Vec<MobjectKey>> {
        Ok(self
            .family(key)?
            .into_iter()
            .filter(|&k| self.mobjects.get(k).is_some_and(|m| m.has_points()))
            .collect())
    }

    /// Vectorized family members.
    pub fn vectorized_family(&self, key: MobjectKey) -> Result<Vec<MobjectKey>> {
        Ok(self
            .family(key)?
            .into_iter()
            .filter(|&k| self.mobjects.get(k).is_some_and(|m| m.is_vectorized()))
            .collect())
    }

    /// Points of every family member, in family order.
    pub fn all_points(&self, key: MobjectKey) -> Result<Vec<DVec3>> {
        Ok(self
            .family(key)?
            .into_iter()
            .filter_map(|k| self.mobjects.get(k))
            .flat_map(|m| m.points.iter().copied())
            .collect())
    }

    /// Applies `func` to each family member (or each member with points).
    pub fn apply_to_family(
        &mut self,
        key: MobjectKey,
        with_points_only: bool,
        mut func: impl FnMut(&mut crate::Mobject),
    ) -> Result<()> {
        let members = if with_points_only {
            self.family_with_points(key)?
        } else {
            self.family(key)?
        };
        for k in members {
            if let Some(mob) = self.mobjects.get_mut(k) {
                func(mob);
            }
        }
        Ok(())
    }
}
