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

use std::sync::{Arc, Weak};

/// Text selection as char indexes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct CaretRange {
    /// Moving end of the selection.
    pub primary: usize,
    /// Fixed end of the selection.
    pub secondary: usize,
}

impl CaretRange {
    /// Create selection between provided char indexes.
    pub fn new(primary: usize, secondary: usize) -> Self {
        Self { primary, secondary }
    }

    /// Create empty selection at provided char index.
    pub fn caret(index: usize) -> Self {
        Self { primary: index, secondary: index }
    }

    /// Check if selection is empty.
    pub fn is_caret(&self) -> bool {
        self.primary == self.secondary
    }

    /// Get char index where selection starts.
    pub fn start(&self) -> usize {
        usize::min(self.primary, self.secondary)
    }

    /// Get char index where selection ends.
    pub fn end(&self) -> usize {
        usize::max(self.primary, self.secondary)
    }
}

/// Editable text target for keypad input.
pub trait TextInput: Send + Sync {
    /// Get current text.
    fn text(&self) -> String;

    /// Get current selection.
    fn selection(&self) -> CaretRange;

    /// Replace current selection.
    fn set_selection(&self, selection: CaretRange);

    /// Insert text at current selection.
    fn insert_text(&self, text: &str);

    /// Remove selected text or char before the caret.
    fn delete_backward(&self);

    /// Start editing session.
    fn begin_editing(&self);

    /// Finish editing session.
    fn end_editing(&self);

    /// Get installed input changes listener.
    fn input_delegate(&self) -> Option<Weak<dyn InputDelegate>>;

    /// Install input changes listener.
    fn set_input_delegate(&self, delegate: Option<Weak<dyn InputDelegate>>);
}

/// Listener of [`TextInput`] changes.
pub trait InputDelegate: Send + Sync {
    /// Called before text change with current text and selection.
    fn text_will_change(&self, _text: &str, _selection: CaretRange) {}

    /// Called after text change with new text and selection.
    fn text_did_change(&self, _text: &str, _selection: CaretRange) {}

    /// Called before selection change with current text and selection.
    fn selection_will_change(&self, _text: &str, _selection: CaretRange) {}

    /// Called after selection change with current text and new selection.
    fn selection_did_change(&self, _text: &str, _selection: CaretRange) {}
}

/// Upgrade optional weak [`InputDelegate`] reference.
pub(crate) fn upgrade_delegate(delegate: &Option<Weak<dyn InputDelegate>>)
                               -> Option<Arc<dyn InputDelegate>> {
    delegate.as_ref().and_then(|d| d.upgrade())
}
