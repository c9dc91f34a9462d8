// Copyright 2025 The Grim Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::theme::{ButtonStyle, KeypadTheme};

/// Continuous press phase.
#[derive(Clone, Copy, PartialEq, Debug)]
enum PressPhase {
    /// No press in progress.
    Idle,
    /// Press sends fires while held inside bounds.
    Active {
        /// Time when press started.
        pressed_at: f64,
        /// Amount of sent fires.
        fired: u32,
    },
    /// Press left bounds, waiting for release.
    Cancelled,
}

/// Repeated fires for a held button, one fire at press and one per elapsed interval.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ContinuousPress {
    /// Seconds between repeated fires.
    interval: f64,
    /// Current phase.
    phase: PressPhase,
}

impl ContinuousPress {
    /// Create repeat behavior with provided interval in seconds.
    pub fn new(interval: f64) -> Self {
        assert!(interval > 0.0, "Repeat interval should be positive");
        Self {
            interval,
            phase: PressPhase::Idle,
        }
    }

    /// Get seconds between repeated fires.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Check if press is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, PressPhase::Active { .. })
    }

    /// Advance phase with current time and press position, returning amount of fires.
    pub fn update(&mut self, now: f64, down: bool, inside: bool) -> u32 {
        match self.phase {
            PressPhase::Idle => {
                if down && inside {
                    self.phase = PressPhase::Active { pressed_at: now, fired: 1 };
                    return 1;
                }
                0
            }
            PressPhase::Active { pressed_at, fired } => {
                if !down {
                    self.phase = PressPhase::Idle;
                    return 0;
                }
                if !inside {
                    // Leaving bounds stops the cycle until a fresh press.
                    self.phase = PressPhase::Cancelled;
                    return 0;
                }
                let due = 1 + ((now - pressed_at) / self.interval) as u32;
                if due > fired {
                    self.phase = PressPhase::Active { pressed_at, fired: due };
                    return due - fired;
                }
                0
            }
            PressPhase::Cancelled => {
                if !down {
                    self.phase = PressPhase::Idle;
                }
                0
            }
        }
    }

    /// Stop press in progress.
    pub fn reset(&mut self) {
        self.phase = PressPhase::Idle;
    }
}

/// Single keypad key with style and press behavior.
pub struct KeypadButton {
    /// Current style.
    style: ButtonStyle,
    /// Draw key with rounded corners and shadow.
    rounded_corners: bool,
    /// Key accepts presses.
    enabled: bool,
    /// Repeated fires while key is held.
    repeat: Option<ContinuousPress>,
}

impl KeypadButton {
    /// Create key with provided style.
    pub fn new(style: ButtonStyle) -> Self {
        Self {
            style,
            rounded_corners: false,
            enabled: true,
            repeat: None,
        }
    }

    /// Get current style.
    pub fn style(&self) -> ButtonStyle {
        self.style
    }

    /// Change style, applying matching colors at once.
    pub fn set_style(&mut self, style: ButtonStyle) {
        self.style = style;
    }

    /// Get colors for current style.
    pub fn theme(&self) -> KeypadTheme {
        KeypadTheme::for_style(self.style)
    }

    /// Check if key is drawn with rounded corners.
    pub fn uses_rounded_corners(&self) -> bool {
        self.rounded_corners
    }

    /// Draw key with rounded corners and shadow.
    pub fn set_uses_rounded_corners(&mut self, rounded: bool) {
        self.rounded_corners = rounded;
    }

    /// Check if key accepts presses.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable key presses.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Setup repeated fires at provided interval in seconds, replacing previous setup.
    pub fn set_continuous_press(&mut self, interval: f64) {
        self.repeat = Some(ContinuousPress::new(interval));
    }

    /// Remove repeated fires on hold.
    pub fn remove_continuous_press(&mut self) {
        self.repeat = None;
    }

    /// Check if key sends repeated fires while held.
    pub fn has_continuous_press(&self) -> bool {
        self.repeat.is_some()
    }

    /// Advance repeat phase with current time and press position, returning amount of fires.
    pub fn repeat_fires(&mut self, now: f64, down: bool, inside: bool) -> u32 {
        match self.repeat.as_mut() {
            Some(repeat) => repeat.update(now, down, inside),
            None => 0,
        }
    }
}
