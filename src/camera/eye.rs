use crate::render::ColorMask;

/// One of the two viewpoints of a stereo pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    /// Left eye.
    Left,
    /// Right eye.
    Right,
}

impl Eye {
    /// Both eyes, left first.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    /// Eye rendered for `view`: view 0 is the left eye and view 1 the right
    /// one, exchanged when `swap_eyes` is set.
    #[must_use]
    pub fn for_view(view: usize, swap_eyes: bool) -> Self {
        if (view == 0) != swap_eyes {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// Channels this eye owns in a red/cyan anaglyph.
    #[must_use]
    pub fn color_mask(self) -> ColorMask {
        match self {
            Self::Left => ColorMask::RED,
            Self::Right => ColorMask::CYAN,
        }
    }

    /// Resource label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "left eye",
            Self::Right => "right eye",
        }
    }
}

/// A lazily filled resource slot per eye.
#[derive(Debug)]
pub struct EyePair<T> {
    /// Left eye slot.
    pub left: Option<T>,
    /// Right eye slot.
    pub right: Option<T>,
}

impl<T> Default for EyePair<T> {
    fn default() -> Self {
        Self {
            left: None,
            right: None,
        }
    }
}

impl<T> EyePair<T> {
    /// Resource for `eye`, if allocated.
    #[must_use]
    pub fn get(&self, eye: Eye) -> Option<&T> {
        match eye {
            Eye::Left => self.left.as_ref(),
            Eye::Right => self.right.as_ref(),
        }
    }

    /// Slot for `eye`.
    pub fn slot_mut(&mut self, eye: Eye) -> &mut Option<T> {
        match eye {
            Eye::Left => &mut self.left,
            Eye::Right => &mut self.right,
        }
    }

    /// Empty both slots, dropping their resources.
    pub fn clear(&mut self) {
        self.left = None;
        self.right = None;
    }

    /// Number of allocated slots.
    #[must_use]
    pub fn count(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_exchanges_view_assignment() {
        assert_eq!(Eye::for_view(0, false), Eye::Left);
        assert_eq!(Eye::for_view(1, false), Eye::Right);
        assert_eq!(Eye::for_view(0, true), Eye::Right);
        assert_eq!(Eye::for_view(1, true), Eye::Left);
    }

    #[test]
    fn eye_masks_partition_color_channels() {
        let l = Eye::Left.color_mask();
        let r = Eye::Right.color_mask();
        assert!(l.red && !l.green && !l.blue && l.alpha);
        assert!(!r.red && r.green && r.blue && r.alpha);
    }

    #[test]
    fn pair_slots_fill_and_clear() {
        let mut pair: EyePair<u8> = EyePair::default();
        assert_eq!(pair.count(), 0);
        *pair.slot_mut(Eye::Right) = Some(7);
        assert_eq!(pair.get(Eye::Right), Some(&7));
        assert_eq!(pair.get(Eye::Left), None);
        assert_eq!(pair.count(), 1);
        pair.clear();
        assert_eq!(pair.count(), 0);
    }
}
