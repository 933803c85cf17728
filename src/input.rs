//! Platform-neutral primary input and its mode-dependent mapping.
//!
//! Pointer and touch polling are resolved upstream into [`PrimaryInput`] edge
//! events. [`InputAction::resolve`] turns an event into the action the current
//! [`LocomotionMode`] asks for.

use bevy::prelude::Message;

use crate::mode::LocomotionMode;

/// One edge of the primary input, as delivered by the input layer.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryInput {
    /// The input went down this frame.
    Pressed {
        /// The pointer is over interactive UI; the event must be ignored.
        over_ui: bool,
    },
    /// The input is still down.
    Held {
        /// The pointer is over interactive UI; the event must be ignored.
        over_ui: bool,
    },
    /// The input went up.
    Released,
    /// The platform cancelled the touch.
    Cancelled,
}

impl PrimaryInput {
    /// Press outside any UI element.
    pub const PRESS: Self = Self::Pressed { over_ui: false };
    /// Hold outside any UI element.
    pub const HOLD: Self = Self::Held { over_ui: false };

    /// Whether the event landed on interactive UI.
    #[must_use]
    pub const fn is_over_ui(self) -> bool {
        match self {
            Self::Pressed { over_ui } | Self::Held { over_ui } => over_ui,
            Self::Released | Self::Cancelled => false,
        }
    }
}

/// Action requested of the controller by an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Running: jump if grounded.
    Ascend,
    /// Flapping: unconditional upward flap.
    Flap,
    /// Flying: the jetpack input is held.
    HoldAscend,
    /// Flying: the jetpack input was let go.
    StopAscending,
}

impl InputAction {
    /// Maps `input` to an action under `mode`, or `None` when it is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use jetrunner::{InputAction, LocomotionMode, PrimaryInput};
    /// assert_eq!(
    ///     InputAction::resolve(LocomotionMode::Running, PrimaryInput::PRESS),
    ///     Some(InputAction::Ascend)
    /// );
    /// assert_eq!(
    ///     InputAction::resolve(LocomotionMode::Running, PrimaryInput::Pressed { over_ui: true }),
    ///     None
    /// );
    /// ```
    #[must_use]
    pub const fn resolve(mode: LocomotionMode, input: PrimaryInput) -> Option<Self> {
        if input.is_over_ui() {
            return None;
        }
        match (mode, input) {
            (LocomotionMode::Running, PrimaryInput::Pressed { .. }) => Some(Self::Ascend),
            (LocomotionMode::Flapping, PrimaryInput::Pressed { .. }) => Some(Self::Flap),
            (LocomotionMode::Flying, PrimaryInput::Pressed { .. } | PrimaryInput::Held { .. }) => {
                Some(Self::HoldAscend)
            }
            (LocomotionMode::Flying, PrimaryInput::Released | PrimaryInput::Cancelled) => {
                Some(Self::StopAscending)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LocomotionMode::Running, PrimaryInput::PRESS, Some(InputAction::Ascend))]
    #[case(LocomotionMode::Running, PrimaryInput::HOLD, None)]
    #[case(LocomotionMode::Running, PrimaryInput::Released, None)]
    #[case(LocomotionMode::Flapping, PrimaryInput::PRESS, Some(InputAction::Flap))]
    #[case(LocomotionMode::Flapping, PrimaryInput::HOLD, None)]
    #[case(LocomotionMode::Flapping, PrimaryInput::Cancelled, None)]
    #[case(LocomotionMode::Flying, PrimaryInput::PRESS, Some(InputAction::HoldAscend))]
    #[case(LocomotionMode::Flying, PrimaryInput::HOLD, Some(InputAction::HoldAscend))]
    #[case(LocomotionMode::Flying, PrimaryInput::Released, Some(InputAction::StopAscending))]
    #[case(LocomotionMode::Flying, PrimaryInput::Cancelled, Some(InputAction::StopAscending))]
    fn maps_inputs_per_mode(
        #[case] mode: LocomotionMode,
        #[case] input: PrimaryInput,
        #[case] expected: Option<InputAction>,
    ) {
        assert_eq!(InputAction::resolve(mode, input), expected);
    }

    #[rstest]
    fn ignores_everything_over_ui() {
        for mode in LocomotionMode::ALL {
            for input in [
                PrimaryInput::Pressed { over_ui: true },
                PrimaryInput::Held { over_ui: true },
            ] {
                assert_eq!(InputAction::resolve(mode, input), None);
            }
        }
    }
}
