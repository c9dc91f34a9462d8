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
use lazy_static::lazy_static;
use parking_lot::RwLock;

mod types;
pub use types::{CaretRange, InputDelegate, TextInput};

mod proxy;
pub use proxy::InputDelegateProxy;

mod edit;
pub use edit::EditBuffer;

lazy_static! {
    /// Input target of the active editing session.
    static ref ACTIVE_INPUT: Arc<RwLock<Option<Weak<dyn TextInput>>>> = Arc::new(
        RwLock::new(None)
    );
}

#[cfg(test)]
lazy_static! {
    /// Serializes tests around the process-wide active input slot.
    pub(crate) static ref ACTIVE_INPUT_LOCK: parking_lot::Mutex<()> = parking_lot::Mutex::new(());
}

/// Get input target of the active editing session.
pub fn active_input() -> Option<Arc<dyn TextInput>> {
    let r_input = ACTIVE_INPUT.read();
    r_input.as_ref().and_then(|input| input.upgrade())
}

/// Register input target of the started editing session.
pub(crate) fn set_active_input(input: Option<Weak<dyn TextInput>>) {
    let mut w_input = ACTIVE_INPUT.write();
    *w_input = input;
}

/// Remove provided input target from the active editing session.
pub(crate) fn clear_active_input(input: &Weak<dyn TextInput>) {
    let mut w_input = ACTIVE_INPUT.write();
    let same = w_input.as_ref().map_or(false, |current| {
        same_object(current.as_ptr(), input.as_ptr())
    });
    if same {
        *w_input = None;
    }
}

/// Check if two references point at the same allocation.
pub(crate) fn same_object<T: ?Sized, U: ?Sized>(a: *const T, b: *const U) -> bool {
    a as *const () == b as *const ()
}
