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

use egui::{Color32, ImageSource};

/// Logical keypad key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Key {
    /// Digit from 0 to 9.
    Digit(u8),
    /// Locale-resolved decimal separator.
    DecimalPoint,
    /// Removal of selection or char before the caret.
    Backspace,
    /// Caller-configured auxiliary key.
    Special,
    /// Key to finish editing.
    Done,
}

/// Keypad chrome around the keys.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PresentationStyle {
    /// Draw keys over surface background.
    Plain,
    /// Draw keys over keyboard backplate.
    Keyboard,
}

impl Default for PresentationStyle {
    fn default() -> Self {
        PresentationStyle::Keyboard
    }
}

/// Listener of keypad actions to approve default behavior.
pub trait KeypadDelegate: Send + Sync {
    /// Check if provided text can be inserted at the input.
    fn should_insert_text(&self, _text: &str) -> bool {
        true
    }

    /// Check if editing session can be finished.
    fn should_return(&self) -> bool {
        true
    }

    /// Check if removal before the caret can be performed.
    fn should_delete_backward(&self) -> bool {
        true
    }
}

/// Auxiliary key configuration.
pub(crate) struct SpecialKey {
    /// Image at the key face.
    pub image: ImageSource<'static>,
    /// Action on key press.
    pub action: Box<dyn FnMut() + Send>,
}

/// Return key color overrides applied over its [`crate::theme::ButtonStyle`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ReturnKeyColors {
    /// Key background.
    pub fill: Color32,
    /// Key background on press.
    pub highlighted_fill: Color32,
    /// Title color.
    pub title: Color32,
    /// Title color on press.
    pub highlighted_title: Color32,
}
