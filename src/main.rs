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

#![windows_subsystem = "windows"]

pub fn main() {
    #[allow(dead_code)]
    #[cfg(not(target_os = "android"))]
    real_main();
}

#[allow(dead_code)]
#[cfg(not(target_os = "android"))]
fn real_main() {
    #[cfg(debug_assertions)]
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    use std::sync::Arc;
    use eframe::icon_data::from_png_bytes;

    let mut viewport = egui::ViewportBuilder::default()
        .with_min_inner_size([320.0, 480.0])
        .with_inner_size([360.0, 560.0]);

    // Setup an icon.
    if let Ok(icon) = from_png_bytes(include_bytes!("../img/icon.png")) {
        viewport = viewport.with_icon(Arc::new(icon));
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    match eframe::run_native("Keypad", options, Box::new(|cc| {
        // Setup images support.
        egui_extras::install_image_loaders(&cc.egui_ctx);
        // Return app instance.
        Ok(Box::new(demo::App::new()))
    })) {
        Ok(_) => {}
        Err(e) => {
            panic!("{}", e);
        }
    }
}

#[cfg(not(target_os = "android"))]
mod demo {
    use std::sync::Arc;

    use egui::text_edit::TextEditState;
    use egui::{Align, RichText, TextStyle};
    use parking_lot::Mutex;

    use egui_keypad::input::{CaretRange, EditBuffer, InputDelegate, TextInput};
    use egui_keypad::keypad::PresentationStyle;
    use egui_keypad::{KeypadDelegate, NumberKeypad};

    /// Listener keeping view cursor in sync with keypad edits,
    /// fed by the keypad's change proxy as previously installed listener.
    #[derive(Default)]
    struct CursorSync {
        /// Selection after the last keypad edit.
        caret: Mutex<Option<CaretRange>>,
    }

    impl InputDelegate for CursorSync {
        fn text_did_change(&self, _: &str, selection: CaretRange) {
            let mut w_caret = self.caret.lock();
            *w_caret = Some(selection);
        }
    }

    /// Listener allowing a single decimal separator per value.
    struct SingleSeparator {
        /// Edited value.
        buffer: Arc<EditBuffer>,
        /// Separator inserted by the keypad.
        separator: String,
    }

    impl KeypadDelegate for SingleSeparator {
        fn should_insert_text(&self, text: &str) -> bool {
            if text == self.separator {
                return !self.buffer.text().contains(&self.separator);
            }
            true
        }
    }

    /// Demo content with amount input edited by the keypad.
    pub struct App {
        /// Edited amount value.
        buffer: Arc<EditBuffer>,
        /// Keypad below the content.
        keypad: NumberKeypad,
        /// Keypad actions listener, held for the keypad's weak reference.
        _delegate: Arc<SingleSeparator>,
        /// View cursor sync fed through the keypad's proxy.
        sync: Arc<CursorSync>,
        /// Strong reference behind the input listener slot.
        _sync_delegate: Arc<dyn InputDelegate>,
    }

    impl App {
        /// Amount input identifier.
        const INPUT_ID: &'static str = "amount_input";

        pub fn new() -> Self {
            let buffer = EditBuffer::new("0");
            buffer.begin_editing();

            // Install cursor sync before the keypad so its proxy forwards changes here.
            let sync = Arc::new(CursorSync::default());
            let sync_delegate: Arc<dyn InputDelegate> = sync.clone();
            buffer.set_input_delegate(Some(Arc::downgrade(&sync_delegate)));

            let mut keypad = NumberKeypad::new(None)
                .style(PresentationStyle::Keyboard);
            keypad.set_allows_decimal_point(true);
            keypad.set_rounded_corners(true);
            let input: Arc<dyn TextInput> = buffer.clone();
            keypad.set_key_input(Some(&input));

            let delegate = Arc::new(SingleSeparator {
                buffer: buffer.clone(),
                separator: keypad.decimal_separator().to_string(),
            });
            let keypad_delegate: Arc<dyn KeypadDelegate> = delegate.clone();
            keypad.set_delegate(Some(&keypad_delegate));

            // Setup key to negate the value.
            keypad.configure_special_key_with_target(
                egui::include_image!("../img/negate.png"),
                &buffer,
                |buffer| {
                    let text = buffer.text();
                    let negated = match text.strip_prefix('-') {
                        Some(stripped) => stripped.to_string(),
                        None => format!("-{}", text),
                    };
                    buffer.set_text(&negated);
                });

            Self {
                buffer,
                keypad,
                _delegate: delegate,
                sync,
                _sync_delegate: sync_delegate,
            }
        }

        /// Draw amount input synced with the keypad target.
        fn amount_ui(&mut self, ui: &mut egui::Ui) {
            let id = egui::Id::new(Self::INPUT_ID);
            let mut value = self.buffer.text();
            let resp = ui.add(egui::TextEdit::singleline(&mut value)
                .id(id)
                .font(TextStyle::Heading)
                .horizontal_align(Align::Center)
                .desired_width(220.0));
            // Apply text typed with a hardware keyboard.
            if resp.changed() {
                self.buffer.set_text(&value);
            }

            let keypad_caret = {
                let mut w_caret = self.sync.caret.lock();
                w_caret.take()
            };
            if let Some(caret) = keypad_caret {
                // Move view cursor after a keypad edit.
                if let Some(mut state) = TextEditState::load(ui.ctx(), id) {
                    if let Some(mut range) = state.cursor.char_range() {
                        range.primary.index = caret.primary;
                        range.secondary.index = caret.secondary;
                        state.cursor.set_char_range(Some(range));
                        TextEditState::store(state, ui.ctx(), id);
                    }
                }
            } else if resp.has_focus() {
                // Move keypad caret after view cursor.
                if let Some(state) = TextEditState::load(ui.ctx(), id) {
                    if let Some(range) = state.cursor.char_range() {
                        self.buffer.set_selection(CaretRange::new(range.primary.index,
                                                                  range.secondary.index));
                    }
                }
            }

            // Keep focus while editing session is active.
            if resp.gained_focus() {
                self.buffer.begin_editing();
            }
            if !resp.has_focus() && self.buffer.is_editing() {
                resp.request_focus();
            }
        }
    }

    impl eframe::App for App {
        fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.add_space(30.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Enter amount").size(17.0));
                    ui.add_space(8.0);
                    self.amount_ui(ui);
                });
            });
            self.keypad.window_ui(ctx);
        }
    }
}
