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
use parking_lot::RwLock;

use crate::input;
use crate::input::types::{upgrade_delegate, CaretRange, InputDelegate, TextInput};

/// Inner [`EditBuffer`] content.
struct EditState {
    /// Current text.
    value: String,
    /// Current selection.
    caret: CaretRange,
    /// Installed changes listener.
    delegate: Option<Weak<dyn InputDelegate>>,
    /// Editing session is active.
    focused: bool,
}

/// Editable text value with caret to use as keypad input target.
pub struct EditBuffer {
    /// Buffer content state.
    state: RwLock<EditState>,
    /// Reference to itself to register at focused input.
    self_ref: Weak<EditBuffer>,
}

impl EditBuffer {
    /// Create buffer with provided text, placing caret at the end.
    pub fn new(text: &str) -> Arc<Self> {
        Arc::new_cyclic(|buffer| Self {
            state: RwLock::new(EditState {
                value: text.to_string(),
                caret: CaretRange::caret(text.chars().count()),
                delegate: None,
                focused: false,
            }),
            self_ref: buffer.clone(),
        })
    }

    /// Check if editing session is active.
    pub fn is_editing(&self) -> bool {
        let r_state = self.state.read();
        r_state.focused
    }

    /// Replace whole text keeping selection inside new bounds.
    pub fn set_text(&self, text: &str) {
        let same = {
            let r_state = self.state.read();
            r_state.value == text
        };
        if same {
            return;
        }
        let delegate = self.delegate_sink();
        if let Some(d) = &delegate {
            let (value, caret) = self.snapshot();
            d.text_will_change(&value, caret);
        }
        let (value, caret) = {
            let mut state = self.state.write();
            let chars = text.chars().count();
            state.value = text.to_string();
            state.caret = CaretRange::new(usize::min(state.caret.primary, chars),
                                          usize::min(state.caret.secondary, chars));
            (state.value.clone(), state.caret)
        };
        if let Some(d) = &delegate {
            d.text_did_change(&value, caret);
        }
    }

    /// Get alive changes listener.
    fn delegate_sink(&self) -> Option<Arc<dyn InputDelegate>> {
        let r_state = self.state.read();
        upgrade_delegate(&r_state.delegate)
    }

    /// Get current text and selection.
    fn snapshot(&self) -> (String, CaretRange) {
        let r_state = self.state.read();
        (r_state.value.clone(), r_state.caret)
    }
}

impl TextInput for EditBuffer {
    fn text(&self) -> String {
        let r_state = self.state.read();
        r_state.value.clone()
    }

    fn selection(&self) -> CaretRange {
        let r_state = self.state.read();
        r_state.caret
    }

    fn set_selection(&self, selection: CaretRange) {
        let clamped = {
            let r_state = self.state.read();
            let chars = r_state.value.chars().count();
            let clamped = CaretRange::new(usize::min(selection.primary, chars),
                                          usize::min(selection.secondary, chars));
            if clamped == r_state.caret {
                return;
            }
            clamped
        };
        let delegate = self.delegate_sink();
        if let Some(d) = &delegate {
            let (value, caret) = self.snapshot();
            d.selection_will_change(&value, caret);
        }
        let (value, caret) = {
            let mut state = self.state.write();
            state.caret = clamped;
            (state.value.clone(), state.caret)
        };
        if let Some(d) = &delegate {
            d.selection_did_change(&value, caret);
        }
    }

    fn insert_text(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        let delegate = self.delegate_sink();
        if let Some(d) = &delegate {
            let (value, caret) = self.snapshot();
            d.text_will_change(&value, caret);
        }
        let (value, caret) = {
            let mut state = self.state.write();
            let start = state.caret.start();
            let end = state.caret.end();
            state.value = {
                let part1: String = state.value.chars().take(start).collect();
                let part2: String = state.value.chars().skip(end).collect();
                format!("{}{}{}", part1, text, part2)
            };
            state.caret = CaretRange::caret(start + text.chars().count());
            (state.value.clone(), state.caret)
        };
        if let Some(d) = &delegate {
            d.text_did_change(&value, caret);
        }
    }

    fn delete_backward(&self) {
        {
            let r_state = self.state.read();
            if r_state.caret.is_caret() && r_state.caret.start() == 0 {
                return;
            }
        }
        let delegate = self.delegate_sink();
        if let Some(d) = &delegate {
            let (value, caret) = self.snapshot();
            d.text_will_change(&value, caret);
        }
        let (value, caret) = {
            let mut state = self.state.write();
            let start = state.caret.start();
            let end = state.caret.end();
            if start == end {
                state.value = {
                    let part1: String = state.value.chars().take(start - 1).collect();
                    let part2: String = state.value.chars().skip(start).collect();
                    format!("{}{}", part1, part2)
                };
                state.caret = CaretRange::caret(start - 1);
            } else {
                state.value = {
                    let part1: String = state.value.chars().take(start).collect();
                    let part2: String = state.value.chars().skip(end).collect();
                    format!("{}{}", part1, part2)
                };
                state.caret = CaretRange::caret(start);
            }
            (state.value.clone(), state.caret)
        };
        if let Some(d) = &delegate {
            d.text_did_change(&value, caret);
        }
    }

    fn begin_editing(&self) {
        {
            let mut state = self.state.write();
            if state.focused {
                return;
            }
            state.focused = true;
        }
        let input: Weak<dyn TextInput> = self.self_ref.clone();
        input::set_active_input(Some(input));
    }

    fn end_editing(&self) {
        {
            let mut state = self.state.write();
            if !state.focused {
                return;
            }
            state.focused = false;
        }
        let input: Weak<dyn TextInput> = self.self_ref.clone();
        input::clear_active_input(&input);
    }

    fn input_delegate(&self) -> Option<Weak<dyn InputDelegate>> {
        let r_state = self.state.read();
        r_state.delegate.clone()
    }

    fn set_input_delegate(&self, delegate: Option<Weak<dyn InputDelegate>>) {
        let mut state = self.state.write();
        state.delegate = delegate;
    }
}
