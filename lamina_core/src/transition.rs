// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition styles, specs, and resting placements.
//!
//! A [`TransitionStyle`] says how an appearing entry enters the display
//! surface and where the entry it covers ends up. Both are expressed as a
//! [`Placement`]: a pose relative to the container frame, so that the same
//! placement can be re-resolved to pixels after the frame changes (see
//! [`ContainerStack::rotate`](crate::stack::ContainerStack::rotate)).
//!
//! Removing an entry replays its style in reverse: the removed entry travels
//! back to [`TransitionStyle::appearing_from`] while the entry underneath
//! returns to [`Placement::IDENTITY`].

use core::time::Duration;

use kurbo::{Size, Vec2};

/// Duration used by [`TransitionSpec::new`].
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(400);

/// Scale at which [`TransitionStyle::EmergeFromCenter`] starts.
///
/// A zero scale produces a degenerate transform on most compositors.
pub const EMERGE_SCALE: f64 = 0.01;

/// A view pose in container-frame units.
///
/// `offset` is a fraction of the frame size: `(1.0, 0.0)` means shifted one
/// full frame width to the right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Offset in multiples of the frame width and height.
    pub offset: Vec2,
    /// Opacity, 0.0–1.0.
    pub alpha: f64,
    /// Uniform scale around the frame center.
    pub scale: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Placement {
    /// Fully visible, untransformed, filling the frame.
    pub const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        alpha: 1.0,
        scale: 1.0,
    };

    /// Creates a placement shifted by `(dx, dy)` frames.
    #[inline]
    #[must_use]
    pub const fn shifted(dx: f64, dy: f64) -> Self {
        Self {
            offset: Vec2::new(dx, dy),
            alpha: 1.0,
            scale: 1.0,
        }
    }

    /// Creates an untransformed placement with the given opacity.
    #[inline]
    #[must_use]
    pub const fn faded(alpha: f64) -> Self {
        Self {
            offset: Vec2::ZERO,
            alpha,
            scale: 1.0,
        }
    }

    /// Creates an unshifted placement with the given scale.
    #[inline]
    #[must_use]
    pub const fn scaled(scale: f64) -> Self {
        Self {
            offset: Vec2::ZERO,
            alpha: 1.0,
            scale,
        }
    }

    /// Returns whether the view sits outside the frame bounds.
    ///
    /// Such views depend on the frame size and must be repositioned when it
    /// changes.
    #[inline]
    #[must_use]
    pub fn is_off_surface(&self) -> bool {
        self.offset != Vec2::ZERO
    }

    /// Resolves this placement to a pixel pose for a frame of `size`.
    #[must_use]
    pub fn resolve(&self, size: Size) -> ViewPose {
        ViewPose {
            offset: Vec2::new(self.offset.x * size.width, self.offset.y * size.height),
            alpha: self.alpha,
            scale: self.scale,
        }
    }
}

/// A view pose in pixels, as handed to the animation player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewPose {
    /// Translation from the frame origin, in pixels.
    pub offset: Vec2,
    /// Opacity, 0.0–1.0.
    pub alpha: f64,
    /// Uniform scale around the frame center.
    pub scale: f64,
}

/// Visual style of a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionStyle {
    /// No visual effect; the change is applied instantly.
    #[default]
    None,
    /// The new view slides up from below, covering the old one.
    CoverFromBottom,
    /// The new view slides down from above, covering the old one.
    CoverFromTop,
    /// The new view slides in from the left, covering the old one.
    CoverFromLeft,
    /// The new view slides in from the right, covering the old one.
    CoverFromRight,
    /// The new view slides in from the top-left corner.
    CoverFromTopLeft,
    /// The new view slides in from the top-right corner.
    CoverFromTopRight,
    /// The new view slides in from the bottom-left corner.
    CoverFromBottomLeft,
    /// The new view slides in from the bottom-right corner.
    CoverFromBottomRight,
    /// The old view fades out while the new one fades in.
    CrossDissolve,
    /// The new view pushes the old one out through the top.
    PushFromBottom,
    /// The new view pushes the old one out through the bottom.
    PushFromTop,
    /// The new view pushes the old one out through the right.
    PushFromLeft,
    /// The new view pushes the old one out through the left.
    PushFromRight,
    /// The new view fades in over the old one.
    FadeIn,
    /// The new view grows from the center of the frame.
    EmergeFromCenter,
}

impl TransitionStyle {
    /// Where the appearing entry starts.
    #[must_use]
    pub const fn appearing_from(self) -> Placement {
        match self {
            Self::None => Placement::IDENTITY,
            Self::CoverFromBottom | Self::PushFromBottom => Placement::shifted(0.0, 1.0),
            Self::CoverFromTop | Self::PushFromTop => Placement::shifted(0.0, -1.0),
            Self::CoverFromLeft | Self::PushFromLeft => Placement::shifted(-1.0, 0.0),
            Self::CoverFromRight | Self::PushFromRight => Placement::shifted(1.0, 0.0),
            Self::CoverFromTopLeft => Placement::shifted(-1.0, -1.0),
            Self::CoverFromTopRight => Placement::shifted(1.0, -1.0),
            Self::CoverFromBottomLeft => Placement::shifted(-1.0, 1.0),
            Self::CoverFromBottomRight => Placement::shifted(1.0, 1.0),
            Self::CrossDissolve | Self::FadeIn => Placement::faded(0.0),
            Self::EmergeFromCenter => Placement::scaled(EMERGE_SCALE),
        }
    }

    /// Where the disappearing (covered) entry ends.
    #[must_use]
    pub const fn disappearing_to(self) -> Placement {
        match self {
            Self::PushFromBottom => Placement::shifted(0.0, -1.0),
            Self::PushFromTop => Placement::shifted(0.0, 1.0),
            Self::PushFromLeft => Placement::shifted(1.0, 0.0),
            Self::PushFromRight => Placement::shifted(-1.0, 0.0),
            Self::CrossDissolve => Placement::faded(0.0),
            Self::None
            | Self::CoverFromBottom
            | Self::CoverFromTop
            | Self::CoverFromLeft
            | Self::CoverFromRight
            | Self::CoverFromTopLeft
            | Self::CoverFromTopRight
            | Self::CoverFromBottomLeft
            | Self::CoverFromBottomRight
            | Self::FadeIn
            | Self::EmergeFromCenter => Placement::IDENTITY,
        }
    }
}

/// An immutable description of a transition: style plus duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionSpec {
    /// Visual style.
    pub style: TransitionStyle,
    /// Total duration of the visible part of the transition.
    pub duration: Duration,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self::NONE
    }
}

impl TransitionSpec {
    /// An instant transition with no visual effect.
    pub const NONE: Self = Self {
        style: TransitionStyle::None,
        duration: Duration::ZERO,
    };

    /// Creates a spec with the [default duration](DEFAULT_TRANSITION_DURATION).
    #[inline]
    #[must_use]
    pub const fn new(style: TransitionStyle) -> Self {
        Self {
            style,
            duration: DEFAULT_TRANSITION_DURATION,
        }
    }

    /// Creates a spec with an explicit duration.
    #[inline]
    #[must_use]
    pub const fn with_duration(style: TransitionStyle, duration: Duration) -> Self {
        Self { style, duration }
    }

    /// Returns whether playing this spec takes time.
    #[inline]
    #[must_use]
    pub const fn is_animated(&self) -> bool {
        !matches!(self.style, TransitionStyle::None) && !self.duration.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_styles_move_both_views_the_same_way() {
        for style in [
            TransitionStyle::PushFromBottom,
            TransitionStyle::PushFromTop,
            TransitionStyle::PushFromLeft,
            TransitionStyle::PushFromRight,
        ] {
            let from = style.appearing_from().offset;
            let to = style.disappearing_to().offset;
            assert_eq!(from, -to, "{style:?} should push the old view opposite to the new one");
        }
    }

    #[test]
    fn cover_styles_leave_the_covered_view_in_place() {
        assert_eq!(
            TransitionStyle::CoverFromTopLeft.disappearing_to(),
            Placement::IDENTITY
        );
        assert!(TransitionStyle::CoverFromTopLeft.appearing_from().is_off_surface());
    }

    #[test]
    fn dissolve_is_not_off_surface() {
        let p = TransitionStyle::CrossDissolve.disappearing_to();
        assert!(!p.is_off_surface());
        assert_eq!(p.alpha, 0.0);
    }

    #[test]
    fn resolve_scales_offset_by_frame_size() {
        let pose = Placement::shifted(-1.0, 0.5).resolve(Size::new(320.0, 480.0));
        assert_eq!(pose.offset, Vec2::new(-320.0, 240.0));
        assert_eq!(pose.alpha, 1.0);
    }

    #[test]
    fn none_and_zero_duration_are_not_animated() {
        assert!(!TransitionSpec::NONE.is_animated());
        assert!(
            !TransitionSpec::with_duration(TransitionStyle::CrossDissolve, Duration::ZERO)
                .is_animated()
        );
        assert!(
            !TransitionSpec::with_duration(TransitionStyle::None, Duration::from_secs(1))
                .is_animated()
        );
        assert!(TransitionSpec::new(TransitionStyle::PushFromLeft).is_animated());
        assert_eq!(
            TransitionSpec::new(TransitionStyle::FadeIn).duration,
            DEFAULT_TRANSITION_DURATION
        );
    }
}
