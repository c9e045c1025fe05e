/// Skill tag transform: lift in logical pixels and scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagTransform {
    pub lift: f64,
    pub scale: f64,
}

impl TagTransform {
    pub const REST: TagTransform = TagTransform {
        lift: 0.0,
        scale: 1.0,
    };
    pub const HOVERED: TagTransform = TagTransform {
        lift: 2.0,
        scale: 1.05,
    };
}

#[derive(Debug, Clone)]
pub struct HoverEffects {
    hovered: Vec<bool>,
}

impl HoverEffects {
    pub fn new(tag_count: usize) -> Self {
        Self {
            hovered: vec![false; tag_count],
        }
    }

    pub fn pointer_enter(&mut self, index: usize) -> Option<TagTransform> {
        self.set(index, true)
    }

    pub fn pointer_leave(&mut self, index: usize) -> Option<TagTransform> {
        self.set(index, false)
    }

    fn set(&mut self, index: usize, hovered: bool) -> Option<TagTransform> {
        let slot = self.hovered.get_mut(index)?;
        *slot = hovered;
        Some(self.transform(index))
    }

    pub fn transform(&self, index: usize) -> TagTransform {
        match self.hovered.get(index) {
            Some(true) => TagTransform::HOVERED,
            _ => TagTransform::REST,
        }
    }
}
