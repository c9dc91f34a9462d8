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

use crate::input::types::{upgrade_delegate, CaretRange, InputDelegate, TextInput};

/// Proxy between [`TextInput`] and its previously installed [`InputDelegate`],
/// forwarding every change to the fresh listener before the previous one.
pub struct InputDelegateProxy {
    /// Listener to notify first.
    delegate: Weak<dyn InputDelegate>,
    /// Listener installed before the proxy.
    previous: Option<Weak<dyn InputDelegate>>,
    /// Input the proxy is installed at.
    input: Weak<dyn TextInput>,
}

impl InputDelegateProxy {
    /// Install proxy at provided input, keeping its current listener as previous.
    pub fn install(input: &Arc<dyn TextInput>, delegate: &Arc<dyn InputDelegate>) -> Arc<Self> {
        let proxy = Arc::new(Self {
            delegate: Arc::downgrade(delegate),
            previous: input.input_delegate(),
            input: Arc::downgrade(input),
        });
        let installed: Arc<dyn InputDelegate> = proxy.clone();
        input.set_input_delegate(Some(Arc::downgrade(&installed)));
        proxy
    }

    /// Remove proxy from the input, restoring previously installed listener.
    pub fn uninstall(self: &Arc<Self>) {
        if let Some(input) = self.input.upgrade() {
            if let Some(current) = upgrade_delegate(&input.input_delegate()) {
                let this: Arc<dyn InputDelegate> = self.clone();
                // Restore only when the slot was not replaced after install.
                if crate::input::same_object(Arc::as_ptr(&current), Arc::as_ptr(&this)) {
                    input.set_input_delegate(self.previous.clone());
                }
            }
        }
    }

    /// Get listener to notify first.
    pub fn delegate(&self) -> Option<Arc<dyn InputDelegate>> {
        self.delegate.upgrade()
    }

    /// Get listener installed before the proxy.
    pub fn previous(&self) -> Option<Arc<dyn InputDelegate>> {
        upgrade_delegate(&self.previous)
    }

    /// Collect alive listeners in notification order.
    fn sinks(&self) -> Vec<Arc<dyn InputDelegate>> {
        let mut sinks = Vec::with_capacity(2);
        if let Some(delegate) = self.delegate.upgrade() {
            sinks.push(delegate);
        }
        if let Some(previous) = upgrade_delegate(&self.previous) {
            sinks.push(previous);
        }
        sinks
    }
}

impl InputDelegate for InputDelegateProxy {
    fn text_will_change(&self, text: &str, selection: CaretRange) {
        for sink in self.sinks() {
            sink.text_will_change(text, selection);
        }
    }

    fn text_did_change(&self, text: &str, selection: CaretRange) {
        for sink in self.sinks() {
            sink.text_did_change(text, selection);
        }
    }

    fn selection_will_change(&self, text: &str, selection: CaretRange) {
        for sink in self.sinks() {
            sink.selection_will_change(text, selection);
        }
    }

    fn selection_did_change(&self, text: &str, selection: CaretRange) {
        for sink in self.sinks() {
            sink.selection_did_change(text, selection);
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::{Mutex, RwLock};

    use super::*;

    /// Input with a listener slot and no own content.
    struct SlotInput {
        delegate: RwLock<Option<Weak<dyn InputDelegate>>>,
    }

    impl SlotInput {
        fn new() -> Arc<dyn TextInput> {
            Arc::new(Self { delegate: RwLock::new(None) })
        }

        /// Send text change into the installed listener.
        fn fire(input: &Arc<dyn TextInput>, text: &str) {
            let delegate = upgrade_delegate(&input.input_delegate()).unwrap();
            delegate.text_did_change(text, CaretRange::caret(text.chars().count()));
        }
    }

    impl TextInput for SlotInput {
        fn text(&self) -> String {
            "".to_string()
        }

        fn selection(&self) -> CaretRange {
            CaretRange::caret(0)
        }

        fn set_selection(&self, _: CaretRange) {}

        fn insert_text(&self, _: &str) {}

        fn delete_backward(&self) {}

        fn begin_editing(&self) {}

        fn end_editing(&self) {}

        fn input_delegate(&self) -> Option<Weak<dyn InputDelegate>> {
            self.delegate.read().clone()
        }

        fn set_input_delegate(&self, delegate: Option<Weak<dyn InputDelegate>>) {
            let mut w_delegate = self.delegate.write();
            *w_delegate = delegate;
        }
    }

    /// Listener writing received changes into shared log.
    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn new(name: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Arc<Self> {
            Arc::new(Self { name, log: log.clone() })
        }
    }

    impl InputDelegate for Recorder {
        fn text_will_change(&self, text: &str, selection: CaretRange) {
            self.log.lock().push(format!("{} will {} {}..{}",
                                         self.name, text, selection.start(), selection.end()));
        }

        fn text_did_change(&self, text: &str, selection: CaretRange) {
            self.log.lock().push(format!("{} did {} {}..{}",
                                         self.name, text, selection.start(), selection.end()));
        }

        fn selection_will_change(&self, _: &str, selection: CaretRange) {
            self.log.lock().push(format!("{} sel_will {}..{}",
                                         self.name, selection.start(), selection.end()));
        }

        fn selection_did_change(&self, _: &str, selection: CaretRange) {
            self.log.lock().push(format!("{} sel_did {}..{}",
                                         self.name, selection.start(), selection.end()));
        }
    }

    #[test]
    fn forwards_to_fresh_listener_before_previous() {
        let log = Arc::new(Mutex::new(vec![]));
        let input = SlotInput::new();

        let d0 = Recorder::new("d0", &log);
        let d0_installed: Arc<dyn InputDelegate> = d0.clone();
        input.set_input_delegate(Some(Arc::downgrade(&d0_installed)));

        let d1 = Recorder::new("d1", &log);
        let d1_delegate: Arc<dyn InputDelegate> = d1.clone();
        let _proxy = InputDelegateProxy::install(&input, &d1_delegate);

        SlotInput::fire(&input, "42");
        let entries = log.lock().clone();
        assert_eq!(entries, vec!["d1 did 42 2..2".to_string(), "d0 did 42 2..2".to_string()],
                   "Both listeners should receive same change, fresh one first");
    }

    #[test]
    fn skips_dead_listener_silently() {
        let log = Arc::new(Mutex::new(vec![]));
        let input = SlotInput::new();

        let d0 = Recorder::new("d0", &log);
        let d0_installed: Arc<dyn InputDelegate> = d0.clone();
        input.set_input_delegate(Some(Arc::downgrade(&d0_installed)));

        let d1 = Recorder::new("d1", &log);
        let d1_delegate: Arc<dyn InputDelegate> = d1.clone();
        let proxy = InputDelegateProxy::install(&input, &d1_delegate);

        drop(d1_delegate);
        drop(d1);
        assert!(proxy.delegate().is_none());

        SlotInput::fire(&input, "1");
        let entries = log.lock().clone();
        assert_eq!(entries, vec!["d0 did 1 1..1".to_string()],
                   "Previous listener should receive change after fresh one died");
    }

    #[test]
    fn forwards_every_notification_kind() {
        let log = Arc::new(Mutex::new(vec![]));
        let input = SlotInput::new();
        let d1 = Recorder::new("d1", &log);
        let d1_delegate: Arc<dyn InputDelegate> = d1.clone();
        let _proxy = InputDelegateProxy::install(&input, &d1_delegate);

        let sink = upgrade_delegate(&input.input_delegate()).unwrap();
        sink.text_will_change("a", CaretRange::caret(0));
        sink.text_did_change("a", CaretRange::caret(1));
        sink.selection_will_change("a", CaretRange::caret(1));
        sink.selection_did_change("a", CaretRange::new(0, 1));

        let entries = log.lock().clone();
        assert_eq!(entries, vec!["d1 will a 0..0".to_string(),
                                 "d1 did a 1..1".to_string(),
                                 "d1 sel_will 1..1".to_string(),
                                 "d1 sel_did 0..1".to_string()]);
    }

    #[test]
    fn uninstall_restores_previous_listener() {
        let log = Arc::new(Mutex::new(vec![]));
        let input = SlotInput::new();

        let d0 = Recorder::new("d0", &log);
        let d0_installed: Arc<dyn InputDelegate> = d0.clone();
        input.set_input_delegate(Some(Arc::downgrade(&d0_installed)));

        let d1 = Recorder::new("d1", &log);
        let d1_delegate: Arc<dyn InputDelegate> = d1.clone();
        let proxy = InputDelegateProxy::install(&input, &d1_delegate);
        proxy.uninstall();

        SlotInput::fire(&input, "7");
        let entries = log.lock().clone();
        assert_eq!(entries, vec!["d0 did 7 1..1".to_string()],
                   "Previous listener should be back at the slot");
    }

    #[test]
    fn uninstall_keeps_foreign_listener() {
        let log = Arc::new(Mutex::new(vec![]));
        let input = SlotInput::new();

        let d1 = Recorder::new("d1", &log);
        let d1_delegate: Arc<dyn InputDelegate> = d1.clone();
        let proxy = InputDelegateProxy::install(&input, &d1_delegate);

        // Replace proxy with another listener before uninstall.
        let d2 = Recorder::new("d2", &log);
        let d2_installed: Arc<dyn InputDelegate> = d2.clone();
        input.set_input_delegate(Some(Arc::downgrade(&d2_installed)));
        proxy.uninstall();

        SlotInput::fire(&input, "9");
        let entries = log.lock().clone();
        assert_eq!(entries, vec!["d2 did 9 1..1".to_string()],
                   "Foreign listener should stay at the slot");
    }
}
