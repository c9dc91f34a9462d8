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

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use egui::{Align2, Button, Color32, CornerRadius, CursorIcon, Image, ImageSource, Margin, Rect,
           RichText, Sense, Shadow, Stroke, Vec2};
use log::debug;

use crate::icons::BACKSPACE;
use crate::input;
use crate::input::{CaretRange, InputDelegate, InputDelegateProxy, TextInput};
use crate::keypad::button::KeypadButton;
use crate::keypad::types::{Key, KeypadDelegate, PresentationStyle, ReturnKeyColors, SpecialKey};
use crate::locale::Locale;
use crate::theme::{ButtonStyle, Colors};

/// Listener to refresh the view after observed input changes.
struct KeypadObserver {
    /// Input changed since last drawn frame.
    dirty: AtomicBool,
}

impl KeypadObserver {
    /// Consume change flag.
    fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::Relaxed)
    }
}

impl InputDelegate for KeypadObserver {
    fn text_did_change(&self, _: &str, _: CaretRange) {
        self.dirty.store(true, Ordering::Relaxed);
    }

    fn selection_did_change(&self, _: &str, _: CaretRange) {
        self.dirty.store(true, Ordering::Relaxed);
    }
}

/// Numeric keypad content.
pub struct NumberKeypad {
    /// Chrome around the keys.
    presentation: PresentationStyle,
    /// Maximum keys layout width.
    max_width: f32,
    /// Input target for key presses.
    key_input: Option<Weak<dyn TextInput>>,
    /// Listener of keypad actions.
    delegate: Option<Weak<dyn KeypadDelegate>>,
    /// Proxy installed at the input target.
    proxy: Option<Arc<InputDelegateProxy>>,
    /// Listener to refresh the view after input changes.
    observer: Arc<KeypadObserver>,
    /// Keys by their logical value.
    buttons: BTreeMap<Key, KeypadButton>,
    /// Decimal separator key is present.
    allows_decimal_point: bool,
    /// Locale-resolved decimal separator.
    decimal_separator: String,
    /// Return key title.
    return_key_title: String,
    /// Return key color overrides.
    return_key_colors: Option<ReturnKeyColors>,
    /// Auxiliary key configuration.
    special: Option<SpecialKey>,
}

impl NumberKeypad {
    /// Maximum keys layout width.
    const MAX_WIDTH: f32 = 400.0;
    /// Single keys row height.
    const ROW_HEIGHT: f32 = 55.0;
    /// Space around a key with rounded corners.
    const ROUNDED_PADDING: f32 = 3.0;
    /// Seconds between backspace fires while held.
    const BACKSPACE_REPEAT_INTERVAL: f64 = 0.15;
    /// Default return key title.
    const RETURN_KEY_TITLE: &'static str = "Done";

    /// Keypad window id.
    pub const WINDOW_ID: &'static str = "numeric_keypad_window";

    /// Create keypad resolving decimal separator from provided or system locale.
    pub fn new(locale: Option<Locale>) -> Self {
        let locale = locale.unwrap_or_else(Locale::system);
        let mut buttons = BTreeMap::new();
        for digit in 0..=9 {
            buttons.insert(Key::Digit(digit), KeypadButton::new(ButtonStyle::White));
        }
        buttons.insert(Key::DecimalPoint, KeypadButton::new(ButtonStyle::White));
        let mut backspace = KeypadButton::new(ButtonStyle::Gray);
        backspace.set_continuous_press(Self::BACKSPACE_REPEAT_INTERVAL);
        buttons.insert(Key::Backspace, backspace);
        buttons.insert(Key::Special, KeypadButton::new(ButtonStyle::Gray));
        buttons.insert(Key::Done, KeypadButton::new(ButtonStyle::Done));
        Self {
            presentation: PresentationStyle::default(),
            max_width: Self::MAX_WIDTH,
            key_input: None,
            delegate: None,
            proxy: None,
            observer: Arc::new(KeypadObserver { dirty: AtomicBool::new(false) }),
            buttons,
            allows_decimal_point: false,
            decimal_separator: locale.decimal_separator(),
            return_key_title: Self::RETURN_KEY_TITLE.to_string(),
            return_key_colors: None,
            special: None,
        }
    }

    /// Setup chrome around the keys.
    pub fn style(mut self, style: PresentationStyle) -> Self {
        self.presentation = style;
        self
    }

    /// Setup maximum keys layout width.
    pub fn max_width(mut self, width: f32) -> Self {
        self.max_width = width;
        self
    }

    /// Setup input target for key presses, moving change proxy to its listener slot.
    pub fn set_key_input(&mut self, input: Option<&Arc<dyn TextInput>>) {
        if let Some(proxy) = self.proxy.take() {
            proxy.uninstall();
        }
        self.key_input = input.map(|input| {
            let observer: Arc<dyn InputDelegate> = self.observer.clone();
            self.proxy = Some(InputDelegateProxy::install(input, &observer));
            Arc::downgrade(input)
        });
    }

    /// Get input target for key presses, explicit or from active editing session.
    pub fn key_input(&self) -> Option<Arc<dyn TextInput>> {
        self.key_input.as_ref()
            .and_then(|input| input.upgrade())
            .or_else(input::active_input)
    }

    /// Setup listener of keypad actions.
    pub fn set_delegate(&mut self, delegate: Option<&Arc<dyn KeypadDelegate>>) {
        self.delegate = delegate.map(Arc::downgrade);
    }

    /// Check if decimal separator key is present.
    pub fn allows_decimal_point(&self) -> bool {
        self.allows_decimal_point
    }

    /// Show or hide decimal separator key.
    pub fn set_allows_decimal_point(&mut self, allows: bool) {
        self.allows_decimal_point = allows;
    }

    /// Get decimal separator inserted by the keypad.
    pub fn decimal_separator(&self) -> &str {
        self.decimal_separator.as_str()
    }

    /// Get return key title.
    pub fn return_key_title(&self) -> &str {
        self.return_key_title.as_str()
    }

    /// Setup return key title.
    pub fn set_return_key_title(&mut self, title: String) {
        self.return_key_title = title;
    }

    /// Setup return key style.
    pub fn set_return_key_style(&mut self, style: ButtonStyle) {
        if let Some(button) = self.buttons.get_mut(&Key::Done) {
            button.set_style(style);
        }
    }

    /// Setup return key color overrides.
    pub fn set_return_key_colors(&mut self, colors: Option<ReturnKeyColors>) {
        self.return_key_colors = colors;
    }

    /// Draw keys with rounded corners and shadows.
    pub fn set_rounded_corners(&mut self, rounded: bool) {
        for button in self.buttons.values_mut() {
            button.set_uses_rounded_corners(rounded);
        }
    }

    /// Setup auxiliary key with image and press action, replacing previous setup.
    pub fn configure_special_key(&mut self,
                                 image: ImageSource<'static>,
                                 action: impl FnMut() + Send + 'static) {
        self.special = Some(SpecialKey {
            image,
            action: Box::new(action),
        });
    }

    /// Setup auxiliary key with image and action at provided target,
    /// skipping presses after target is gone.
    pub fn configure_special_key_with_target<T: Send + Sync + 'static>(
        &mut self,
        image: ImageSource<'static>,
        target: &Arc<T>,
        action: fn(&T)
    ) {
        let target = Arc::downgrade(target);
        self.configure_special_key(image, move || {
            if let Some(target) = target.upgrade() {
                action(&target);
            }
        });
    }

    /// Remove auxiliary key.
    pub fn remove_special_key(&mut self) {
        self.special = None;
    }

    /// Get keys at the layout in draw order.
    pub fn visible_keys(&self) -> Vec<Key> {
        let rect = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(4.0, 4.0));
        self.layout(rect).iter().map(|(key, _)| *key).collect()
    }

    /// Send key press into the input target after listener approval.
    pub fn press_key(&mut self, key: Key) {
        match key {
            Key::Digit(digit) => {
                assert!(digit <= 9, "Digit key should be from 0 to 9");
                self.insert_approved(digit.to_string());
            }
            Key::DecimalPoint => {
                let separator = self.decimal_separator.clone();
                self.insert_approved(separator);
            }
            Key::Backspace => {
                if !self.delegate_allows(|d| d.should_delete_backward()) {
                    return;
                }
                if let Some(input) = self.key_input() {
                    input.delete_backward();
                }
            }
            Key::Done => {
                if !self.delegate_allows(|d| d.should_return()) {
                    return;
                }
                if let Some(input) = self.key_input() {
                    input.end_editing();
                }
            }
            Key::Special => {
                if let Some(special) = self.special.as_mut() {
                    (special.action)();
                }
            }
        }
    }

    /// Insert text into the input target after listener approval.
    fn insert_approved(&mut self, text: String) {
        if !self.delegate_allows(|d| d.should_insert_text(&text)) {
            return;
        }
        match self.key_input() {
            Some(input) => input.insert_text(&text),
            None => debug!("Key press without alive input target"),
        }
    }

    /// Ask listener for approval, assuming yes without alive listener.
    fn delegate_allows(&self, approve: impl FnOnce(&dyn KeypadDelegate) -> bool) -> bool {
        match self.delegate.as_ref().and_then(|d| d.upgrade()) {
            Some(delegate) => approve(delegate.as_ref()),
            None => true,
        }
    }

    /// Draw keypad content.
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Refresh the view once after observed input changes.
        if self.observer.take_dirty() {
            ui.ctx().request_repaint();
        }
        // Setup spacing between keys.
        ui.style_mut().spacing.item_spacing = egui::vec2(0.0, 0.0);

        let width = f32::min(ui.available_width(), self.max_width);
        ui.vertical_centered(|ui| {
            ui.set_max_width(width);
            self.keys_ui(width, ui);
        });
    }

    /// Draw keypad content as separate [`egui::Window`] at the bottom of the screen.
    pub fn window_ui(&mut self, ctx: &egui::Context) {
        let width = ctx.content_rect().width();
        let dark = ctx.style().visuals.dark_mode;
        let layer_id = egui::Window::new(Self::WINDOW_ID)
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .min_width(width)
            .default_width(width)
            .anchor(Align2::CENTER_BOTTOM, Vec2::new(0.0, 0.0))
            .frame(egui::Frame {
                shadow: Shadow {
                    offset: Default::default(),
                    blur: 30,
                    spread: 3,
                    color: Color32::from_black_alpha(32),
                },
                inner_margin: Margin {
                    left: 0,
                    right: 0,
                    top: 1,
                    bottom: 0,
                },
                fill: self.chrome_fill(dark),
                ..Default::default()
            })
            .show(ctx, |ui| {
                ui.set_min_width(width);
                self.ui(ui);
            }).unwrap().response.layer_id;

        // Always show keypad above other windows.
        ctx.move_to_top(layer_id);
    }

    /// Draw keys grid.
    fn keys_ui(&mut self, width: f32, ui: &mut egui::Ui) {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, Self::ROW_HEIGHT * 4.0),
                                               Sense::hover());
        let dark = ui.visuals().dark_mode;
        ui.painter().rect_filled(rect, CornerRadius::ZERO, self.chrome_fill(dark));

        let mut pressed = vec![];
        for (key, key_rect) in self.layout(rect) {
            self.key_ui(key, key_rect, &mut pressed, ui);
        }
        for key in pressed {
            self.press_key(key);
        }
    }

    /// Calculate rectangles for keys at the layout.
    fn layout(&self, rect: Rect) -> Vec<(Key, Rect)> {
        let key_size = egui::vec2(rect.width() / 4.0, rect.height() / 4.0);
        let cell = |col: usize, row: usize| -> Rect {
            Rect::from_min_size(egui::pos2(rect.left() + col as f32 * key_size.x,
                                           rect.top() + row as f32 * key_size.y), key_size)
        };
        let mut keys = Vec::with_capacity(14);
        // Digits from 1 to 9 at the top.
        for row in 0..3 {
            for col in 0..3 {
                let digit = (row * 3 + col + 1) as u8;
                keys.push((Key::Digit(digit), cell(col, row)));
            }
        }
        // Bottom row with zero covering place of hidden neighbors.
        if self.special.is_some() {
            keys.push((Key::Special, cell(0, 3)));
        }
        let zero = Rect::from_min_max(
            if self.special.is_some() { cell(1, 3).min } else { cell(0, 3).min },
            if self.allows_decimal_point { cell(1, 3).max } else { cell(2, 3).max });
        keys.push((Key::Digit(0), zero));
        if self.allows_decimal_point {
            keys.push((Key::DecimalPoint, cell(2, 3)));
        }
        // Utility column at the right side.
        keys.push((Key::Backspace, cell(3, 0)));
        keys.push((Key::Done, Rect::from_min_max(cell(3, 1).min, cell(3, 3).max)));
        keys
    }

    /// Draw single key at provided rectangle.
    fn key_ui(&mut self, key: Key, rect: Rect, pressed: &mut Vec<Key>, ui: &mut egui::Ui) {
        let (theme, enabled, rounded, repeat) = {
            let button = match self.buttons.get(&key) {
                Some(button) => button,
                None => return,
            };
            (button.theme(), button.is_enabled(), button.uses_rounded_corners(),
             button.has_continuous_press())
        };
        let dark = ui.visuals().dark_mode;

        // Resolve colors with return key overrides.
        let mut fill = theme.fill.resolve(dark);
        let mut highlighted_fill = theme.highlighted_fill.resolve(dark);
        let mut control = theme.control.resolve(dark);
        let mut highlighted_control = theme.highlighted_control.resolve(dark);
        if key == Key::Done {
            if let Some(colors) = self.return_key_colors {
                fill = colors.fill;
                highlighted_fill = colors.highlighted_fill;
                control = colors.title;
                highlighted_control = colors.highlighted_title;
            }
        }

        // Setup key rectangle, drawing shadow under rounded key.
        let key_rect = if rounded {
            let key_rect = rect.shrink(Self::ROUNDED_PADDING);
            ui.painter().rect_filled(key_rect.translate(egui::vec2(0.0, 1.5)),
                                     CornerRadius::same(4),
                                     theme.shadow.resolve(dark));
            key_rect
        } else {
            rect
        };

        let corner_radius = if rounded {
            CornerRadius::same(4)
        } else {
            CornerRadius::ZERO
        };
        let mut button = match key {
            Key::Digit(digit) => Button::new(RichText::new(digit.to_string()).size(18.0)),
            Key::DecimalPoint => {
                Button::new(RichText::new(self.decimal_separator.clone()).size(18.0))
            }
            Key::Backspace => Button::new(RichText::new(BACKSPACE).size(18.0)),
            Key::Done => Button::new(RichText::new(self.return_key_title.clone()).size(18.0)),
            Key::Special => {
                match self.special.as_ref() {
                    Some(special) => {
                        Button::image(Image::new(special.image.clone())
                            .fit_to_exact_size(egui::vec2(22.0, 22.0)))
                    }
                    None => return,
                }
            }
        };
        button = button.corner_radius(corner_radius);
        // Setup hold tracking for repeated fires.
        if repeat {
            button = button.sense(Sense::click_and_drag());
        }

        // Draw key button.
        let resp = ui.scope(|ui| {
            if !enabled {
                ui.disable();
            }
            // Disable expansion on click/hover.
            ui.style_mut().visuals.widgets.hovered.expansion = 0.0;
            ui.style_mut().visuals.widgets.active.expansion = 0.0;
            // Setup fill colors.
            ui.visuals_mut().widgets.inactive.weak_bg_fill = fill;
            ui.visuals_mut().widgets.hovered.weak_bg_fill = fill;
            ui.visuals_mut().widgets.active.weak_bg_fill = highlighted_fill;
            ui.visuals_mut().widgets.noninteractive.weak_bg_fill =
                theme.disabled_fill.resolve(dark);
            // Setup content colors.
            ui.visuals_mut().widgets.inactive.fg_stroke.color = control;
            ui.visuals_mut().widgets.hovered.fg_stroke.color = control;
            ui.visuals_mut().widgets.active.fg_stroke.color = highlighted_control;
            ui.visuals_mut().widgets.noninteractive.fg_stroke.color =
                theme.disabled_control.resolve(dark);
            // Setup stroke colors.
            let stroke = if rounded {
                Stroke::NONE
            } else {
                Stroke { width: 1.0, color: Colors::STROKE.resolve(dark) }
            };
            ui.visuals_mut().widgets.inactive.bg_stroke = stroke;
            ui.visuals_mut().widgets.hovered.bg_stroke = stroke;
            ui.visuals_mut().widgets.active.bg_stroke = stroke;
            ui.visuals_mut().widgets.noninteractive.bg_stroke = stroke;

            ui.put(key_rect, button)
        }).inner.on_hover_cursor(CursorIcon::PointingHand);

        if repeat {
            let now = ui.input(|i| i.time);
            let down = resp.is_pointer_button_down_on();
            let inside = ui.input(|i| i.pointer.latest_pos())
                .map_or(false, |pos| key_rect.contains(pos));
            let fires = match self.buttons.get_mut(&key) {
                Some(button) => button.repeat_fires(now, down, enabled && inside),
                None => 0,
            };
            for _ in 0..fires {
                pressed.push(key);
            }
            // Keep frames coming to time fires while key is held.
            if down {
                ui.ctx().request_repaint();
            }
        } else if resp.clicked() || resp.long_touched() {
            pressed.push(key);
        }
    }

    /// Get background color for current presentation.
    fn chrome_fill(&self, dark: bool) -> Color32 {
        match self.presentation {
            PresentationStyle::Plain => Colors::SURFACE_FILL.resolve(dark),
            PresentationStyle::Keyboard => Colors::PAD_FILL.resolve(dark),
        }
    }
}

impl Drop for NumberKeypad {
    fn drop(&mut self) {
        // Return previously installed listener to the input.
        if let Some(proxy) = self.proxy.take() {
            proxy.uninstall();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use parking_lot::Mutex;

    use crate::input::EditBuffer;
    use crate::theme::KeypadTheme;

    use super::*;

    /// Input target counting received calls.
    struct CountingInput {
        inserts: Mutex<Vec<String>>,
        deletes: AtomicUsize,
        ends: AtomicUsize,
    }

    impl CountingInput {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                inserts: Mutex::new(vec![]),
                deletes: AtomicUsize::new(0),
                ends: AtomicUsize::new(0),
            })
        }
    }

    impl TextInput for CountingInput {
        fn text(&self) -> String {
            self.inserts.lock().concat()
        }

        fn selection(&self) -> CaretRange {
            CaretRange::caret(0)
        }

        fn set_selection(&self, _: CaretRange) {}

        fn insert_text(&self, text: &str) {
            self.inserts.lock().push(text.to_string());
        }

        fn delete_backward(&self) {
            self.deletes.fetch_add(1, Ordering::Relaxed);
        }

        fn begin_editing(&self) {}

        fn end_editing(&self) {
            self.ends.fetch_add(1, Ordering::Relaxed);
        }

        fn input_delegate(&self) -> Option<Weak<dyn InputDelegate>> {
            None
        }

        fn set_input_delegate(&self, _: Option<Weak<dyn InputDelegate>>) {}
    }

    /// Listener with fixed approval per action.
    struct FixedDelegate {
        insert: bool,
        ret: bool,
        delete: bool,
    }

    impl KeypadDelegate for FixedDelegate {
        fn should_insert_text(&self, _: &str) -> bool {
            self.insert
        }

        fn should_return(&self) -> bool {
            self.ret
        }

        fn should_delete_backward(&self) -> bool {
            self.delete
        }
    }

    fn keypad_with_input() -> (NumberKeypad, Arc<CountingInput>) {
        let mut keypad = NumberKeypad::new(Some(Locale::new("en")));
        let input = CountingInput::new();
        let target: Arc<dyn TextInput> = input.clone();
        keypad.set_key_input(Some(&target));
        (keypad, input)
    }

    #[test]
    fn digit_press_inserts_digit() {
        let (mut keypad, input) = keypad_with_input();
        keypad.press_key(Key::Digit(7));
        assert_eq!(input.inserts.lock().clone(), vec!["7".to_string()],
                   "Single press should insert digit once");
    }

    #[test]
    fn rejected_insert_leaves_input_untouched() {
        let (mut keypad, input) = keypad_with_input();
        let delegate = Arc::new(FixedDelegate { insert: false, ret: true, delete: true });
        let listener: Arc<dyn KeypadDelegate> = delegate.clone();
        keypad.set_delegate(Some(&listener));

        keypad.press_key(Key::Digit(7));
        assert!(input.inserts.lock().is_empty(), "Rejected press should not reach input");

        drop(listener);
        drop(delegate);
        keypad.press_key(Key::Digit(7));
        assert_eq!(input.inserts.lock().len(), 1,
                   "Gone listener should restore default approval");
    }

    #[test]
    fn decimal_press_inserts_locale_separator() {
        let mut keypad = NumberKeypad::new(Some(Locale::new("de-DE")));
        let input = CountingInput::new();
        let target: Arc<dyn TextInput> = input.clone();
        keypad.set_key_input(Some(&target));
        keypad.set_allows_decimal_point(true);

        keypad.press_key(Key::DecimalPoint);
        assert_eq!(input.inserts.lock().clone(), vec![",".to_string()]);
    }

    #[test]
    fn backspace_and_return_follow_approval() {
        let (mut keypad, input) = keypad_with_input();
        keypad.press_key(Key::Backspace);
        keypad.press_key(Key::Done);
        assert_eq!(input.deletes.load(Ordering::Relaxed), 1);
        assert_eq!(input.ends.load(Ordering::Relaxed), 1);

        let delegate = Arc::new(FixedDelegate { insert: true, ret: false, delete: false });
        let listener: Arc<dyn KeypadDelegate> = delegate.clone();
        keypad.set_delegate(Some(&listener));
        keypad.press_key(Key::Backspace);
        keypad.press_key(Key::Done);
        assert_eq!(input.deletes.load(Ordering::Relaxed), 1);
        assert_eq!(input.ends.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn special_press_calls_action_while_target_alive() {
        let mut keypad = NumberKeypad::new(Some(Locale::new("en")));
        let target = Arc::new(AtomicUsize::new(0));
        keypad.configure_special_key_with_target(ImageSource::Uri("test://image".into()),
                                                 &target,
                                                 |t| {
                                                     t.fetch_add(1, Ordering::Relaxed);
                                                 });
        keypad.press_key(Key::Special);
        assert_eq!(target.load(Ordering::Relaxed), 1);

        let gone = Arc::new(AtomicUsize::new(0));
        keypad.configure_special_key_with_target(ImageSource::Uri("test://image".into()),
                                                 &gone,
                                                 |t| {
                                                     t.fetch_add(1, Ordering::Relaxed);
                                                 });
        drop(gone);
        keypad.press_key(Key::Special);
        assert_eq!(target.load(Ordering::Relaxed), 1,
                   "Replaced action should not be called");
    }

    #[test]
    #[should_panic(expected = "Digit key should be from 0 to 9")]
    fn digit_out_of_range_is_rejected() {
        let (mut keypad, _input) = keypad_with_input();
        keypad.press_key(Key::Digit(10));
    }

    #[test]
    fn visible_keys_follow_configuration() {
        let mut keypad = NumberKeypad::new(Some(Locale::new("en")));
        let keys = keypad.visible_keys();
        assert!(!keys.contains(&Key::DecimalPoint));
        assert!(!keys.contains(&Key::Special));
        assert_eq!(keys.len(), 12);

        keypad.set_allows_decimal_point(true);
        keypad.configure_special_key(ImageSource::Uri("test://image".into()), || {});
        let keys = keypad.visible_keys();
        assert!(keys.contains(&Key::DecimalPoint));
        assert!(keys.contains(&Key::Special));
        assert_eq!(keys.len(), 14);
    }

    #[test]
    fn zero_key_covers_hidden_neighbors() {
        let mut keypad = NumberKeypad::new(Some(Locale::new("en")));
        let rect = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(400.0, 220.0));
        let zero_width = |keypad: &NumberKeypad| -> f32 {
            keypad.layout(rect).iter()
                .find(|(key, _)| *key == Key::Digit(0))
                .map(|(_, rect)| rect.width())
                .unwrap()
        };
        assert_eq!(zero_width(&keypad), 300.0);

        keypad.set_allows_decimal_point(true);
        assert_eq!(zero_width(&keypad), 200.0);

        keypad.configure_special_key(ImageSource::Uri("test://image".into()), || {});
        assert_eq!(zero_width(&keypad), 100.0);
    }

    #[test]
    fn return_key_style_changes_done_colors() {
        let mut keypad = NumberKeypad::new(Some(Locale::new("en")));
        keypad.set_return_key_style(ButtonStyle::White);
        let button = keypad.buttons.get(&Key::Done).unwrap();
        assert_eq!(button.theme(), KeypadTheme::for_style(ButtonStyle::White));
    }

    #[test]
    fn rounded_corners_apply_to_every_key() {
        let mut keypad = NumberKeypad::new(Some(Locale::new("en")));
        keypad.set_rounded_corners(true);
        assert!(keypad.buttons.values().all(|b| b.uses_rounded_corners()));
        keypad.set_rounded_corners(false);
        assert!(keypad.buttons.values().all(|b| !b.uses_rounded_corners()));
    }

    #[test]
    fn input_change_moves_proxy() {
        let buffer = EditBuffer::new("");
        let input: Arc<dyn TextInput> = buffer.clone();

        let mut keypad = NumberKeypad::new(Some(Locale::new("en")));
        keypad.set_key_input(Some(&input));
        assert!(input.input_delegate().and_then(|d| d.upgrade()).is_some(),
                "Proxy should be installed at the input");

        keypad.set_key_input(None);
        assert!(input.input_delegate().is_none(),
                "Proxy should leave the input without previous listener");
    }

    #[test]
    fn dead_input_press_uses_active_session_or_nothing() {
        let _guard = input::ACTIVE_INPUT_LOCK.lock();
        let (mut keypad, input) = keypad_with_input();
        drop(input);

        // Without active editing session presses go nowhere.
        keypad.press_key(Key::Digit(1));
        keypad.press_key(Key::Backspace);

        // Input of the active editing session receives presses instead.
        let buffer = EditBuffer::new("");
        buffer.begin_editing();
        keypad.press_key(Key::Digit(5));
        assert_eq!(buffer.text(), "5");

        buffer.end_editing();
        keypad.press_key(Key::Digit(9));
        assert_eq!(buffer.text(), "5",
                   "Finished session should not receive presses");
    }
}
