//! Fill, stroke and background stroke styling.

use kinema_core::errors::Result;
use kinema_core::math::Color;
use kinema_core::math::array::{make_even, stretch_to_length};

use crate::MobjectKey;
use crate::scene::Scene;
use crate::vmobject::{Paint, VMobjectData, VMobjectStyle, merge_colors};

/// Which color list of a vectorized node an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Fill,
    Stroke,
    Background,
}

impl Channel {
    const ALL: [Channel; 3] = [Channel::Fill, Channel::Stroke, Channel::Background];

    fn list(self, data: &mut VMobjectData) -> &mut Vec<Color> {
        match self {
            Channel::Fill => &mut data.fill_colors,
            Channel::Stroke => &mut data.stroke_colors,
            Channel::Background => &mut data.background_stroke_colors,
        }
    }

    fn effective(self, data: &VMobjectData) -> Vec<Color> {
        match self {
            Channel::Fill => data.fill_colors(),
            Channel::Stroke => data.stroke_colors(),
            Channel::Background => data.background_stroke_colors(),
        }
    }
}

impl Scene {
    fn paint_targets(&self, key: MobjectKey, family: bool, operation: &'static str) -> Result<Vec<MobjectKey>> {
        if family {
            self.vectorized_family(key)
        } else {
            self.get(key)?.require_vectorized(operation)?;
            Ok(vec![key])
        }
    }

    fn apply_paint(&mut self, key: MobjectKey, paint: &Paint, channel: Channel, operation: &'static str) -> Result<()> {
        let colors = paint.merged_colors();
        for k in self.paint_targets(key, paint.family, operation)? {
            let data = self.get_mut(k)?.require_vectorized_mut(operation)?;
            merge_colors(channel.list(data), &colors);
            if let Some(width) = paint.width {
                match channel {
                    Channel::Fill => {}
                    Channel::Stroke => data.stroke_width = width,
                    Channel::Background => data.background_stroke_width = width,
                }
            }
        }
        Ok(())
    }

    /// Sets fill colors. A list longer than the new colors keeps its length
    /// and the new colors are stretched over it.
    pub fn set_fill(&mut self, key: MobjectKey, paint: &Paint) -> Result<()> {
        self.apply_paint(key, paint, Channel::Fill, "set_fill")
    }

    /// Sets stroke colors and, if given, the stroke width.
    pub fn set_stroke(&mut self, key: MobjectKey, paint: &Paint) -> Result<()> {
        self.apply_paint(key, paint, Channel::Stroke, "set_stroke")
    }

    /// Same as [`Scene::set_stroke`] for the stroke drawn behind the fill.
    pub fn set_background_stroke(&mut self, key: MobjectKey, paint: &Paint) -> Result<()> {
        self.apply_paint(key, paint, Channel::Background, "set_background_stroke")
    }

    pub fn style(&self, key: MobjectKey) -> Result<VMobjectStyle> {
        Ok(self.get(key)?.require_vectorized("get_style")?.style())
    }

    /// Applies `style` to `key`, or to its whole vectorized family.
    pub fn set_style(&mut self, key: MobjectKey, style: &VMobjectStyle, family: bool) -> Result<()> {
        for k in self.paint_targets(key, family, "set_style")? {
            self.get_mut(k)?.require_vectorized_mut("set_style")?.apply_style(style);
        }
        Ok(())
    }

    /// Copies the style of `other` onto `key`.
    ///
    /// With `family`, the vectorized children are matched pairwise after
    /// stretching both child lists to the same length; when `other` has no
    /// children, every child of `key` matches `other` itself.
    pub fn match_style(&mut self, key: MobjectKey, other: MobjectKey, family: bool) -> Result<()> {
        let style = self.style(other)?;
        self.set_style(key, &style, false)?;
        if !family {
            return Ok(());
        }

        let own = self.get(key)?.submobjects().to_vec();
        if own.is_empty() {
            return Ok(());
        }
        let mut theirs = self.get(other)?.submobjects().to_vec();
        if theirs.is_empty() {
            theirs = vec![other];
        }
        let own: Vec<_> = own.into_iter().filter(|&k| self.is_vectorized_key(k)).collect();
        let theirs: Vec<_> = theirs.into_iter().filter(|&k| self.is_vectorized_key(k)).collect();

        let (own, theirs) = make_even(&own, &theirs);
        for (a, b) in own.into_iter().zip(theirs) {
            self.match_style(a, b, true)?;
        }
        Ok(())
    }

    fn is_vectorized_key(&self, key: MobjectKey) -> bool {
        self.mobjects.get(key).is_some_and(crate::Mobject::is_vectorized)
    }

    /// Gives the two nodes color lists of equal length, channel by channel,
    /// by stretching the shorter list.
    pub fn align_colors(&mut self, a: MobjectKey, b: MobjectKey) -> Result<()> {
        for channel in Channel::ALL {
            let list_a = channel.effective(self.get(a)?.require_vectorized("align_colors")?);
            let list_b = channel.effective(self.get(b)?.require_vectorized("align_colors")?);
            if list_a.len() < list_b.len() {
                let data = self.get_mut(a)?.require_vectorized_mut("align_colors")?;
                *channel.list(data) = stretch_to_length(&list_a, list_b.len());
            } else if list_b.len() < list_a.len() {
                let data = self.get_mut(b)?.require_vectorized_mut("align_colors")?;
                *channel.list(data) = stretch_to_length(&list_b, list_a.len());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinema_core::constants::{BLUE, RED, TRANSPARENT, WHITE};
    use kinema_core::errors::KinemaError;

    use crate::Mobject;

    #[test]
    fn background_stroke_sizes_by_its_own_list() {
        let mut scene = Scene::new();
        let key = scene.spawn(Mobject::vmobject(WHITE));
        scene
            .set_stroke(key, &Paint::colors(vec![RED, BLUE, RED]))
            .unwrap();
        scene
            .set_background_stroke(key, &Paint::color(BLUE).with_width(2.0))
            .unwrap();

        let data = scene.get(key).unwrap().vectorized().unwrap();
        assert_eq!(data.background_stroke_colors, vec![BLUE]);
        assert_eq!(data.stroke_colors, vec![RED, BLUE, RED]);
        assert_eq!(data.background_stroke_width, 2.0);
    }

    #[test]
    fn family_paint_reaches_vectorized_children() {
        let mut scene = Scene::new();
        let child = scene.spawn(Mobject::vmobject(WHITE));
        let plain = scene.spawn(Mobject::new());
        let group = scene.vgroup(&[child, plain]).unwrap();

        scene.set_fill(group, &Paint::color(RED)).unwrap();
        assert_eq!(scene.get(child).unwrap().vectorized().unwrap().fill_colors, vec![RED]);
    }

    #[test]
    fn plain_node_rejects_direct_paint() {
        let mut scene = Scene::new();
        let plain = scene.spawn(Mobject::new());
        let result = scene.set_fill(plain, &Paint::color(RED).with_family(false));
        assert!(matches!(result, Err(KinemaError::NotImplemented { .. })));
    }

    #[test]
    fn align_colors_stretches_shorter_side() {
        let mut scene = Scene::new();
        let a = scene.spawn(Mobject::vmobject(WHITE));
        let b = scene.spawn(Mobject::vmobject(WHITE));
        scene.set_fill(a, &Paint::colors(vec![RED, BLUE])).unwrap();
        scene.align_colors(a, b).unwrap();

        let data_b = scene.get(b).unwrap().vectorized().unwrap();
        assert_eq!(data_b.fill_colors, vec![WHITE, WHITE]);
        assert_eq!(data_b.background_stroke_colors(), vec![TRANSPARENT]);
    }

    #[test]
    fn match_style_pairs_children() {
        let mut scene = Scene::new();
        let red = scene.spawn(Mobject::vmobject(RED));
        let source = scene.vgroup(&[red]).unwrap();
        let c1 = scene.spawn(Mobject::vmobject(WHITE));
        let c2 = scene.spawn(Mobject::vmobject(WHITE));
        let target = scene.vgroup(&[c1, c2]).unwrap();

        scene.match_style(target, source, true).unwrap();
        for child in [c1, c2] {
            assert_eq!(scene.get(child).unwrap().vectorized().unwrap().fill_color(), RED);
        }
    }
}
