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

use egui::Color32;

/// Style of a keypad button.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ButtonStyle {
    /// Primary input keys like digits.
    White,
    /// Utility keys like backspace.
    Gray,
    /// Key to finish editing.
    Done,
}

/// Color rule resolved against current appearance.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ThemeColor {
    light: Color32,
    dark: Color32,
}

impl ThemeColor {
    /// Create color rule from light and dark appearance colors.
    pub const fn new(light: Color32, dark: Color32) -> Self {
        Self { light, dark }
    }

    /// Create color rule with same color for both appearances.
    pub const fn same(color: Color32) -> Self {
        Self { light: color, dark: color }
    }

    /// Resolve color for current appearance.
    pub fn resolve(&self, dark: bool) -> Color32 {
        if dark {
            self.dark
        } else {
            self.light
        }
    }
}

/// Button colors for a single [`ButtonStyle`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct KeypadTheme {
    /// Button background.
    pub fill: ThemeColor,
    /// Button background on press.
    pub highlighted_fill: ThemeColor,
    /// Button content.
    pub control: ThemeColor,
    /// Button content on press.
    pub highlighted_control: ThemeColor,
    /// Button background when disabled.
    pub disabled_fill: ThemeColor,
    /// Button content when disabled.
    pub disabled_control: ThemeColor,
    /// Shadow under the button.
    pub shadow: ThemeColor,
}

impl KeypadTheme {
    const WHITE: KeypadTheme = KeypadTheme {
        fill: ThemeColor::new(Color32::from_gray(253), Color32::from_gray(32)),
        highlighted_fill: ThemeColor::new(Color32::from_gray(244), Color32::from_gray(55)),
        control: ThemeColor::new(Color32::from_gray(70), Color32::from_gray(235)),
        highlighted_control: ThemeColor::new(Color32::from_gray(70), Color32::from_gray(235)),
        disabled_fill: ThemeColor::new(Color32::from_gray(249), Color32::from_gray(28)),
        disabled_control: ThemeColor::new(Color32::from_gray(150), Color32::from_gray(110)),
        shadow: ThemeColor::new(Color32::from_gray(190), Color32::from_gray(12)),
    };

    const GRAY: KeypadTheme = KeypadTheme {
        fill: ThemeColor::new(Color32::from_gray(244), Color32::from_gray(44)),
        highlighted_fill: ThemeColor::new(Color32::from_gray(253), Color32::from_gray(62)),
        control: ThemeColor::new(Color32::from_gray(70), Color32::from_gray(235)),
        highlighted_control: ThemeColor::new(Color32::from_gray(70), Color32::from_gray(235)),
        disabled_fill: ThemeColor::new(Color32::from_gray(232), Color32::from_gray(36)),
        disabled_control: ThemeColor::new(Color32::from_gray(150), Color32::from_gray(110)),
        shadow: ThemeColor::new(Color32::from_gray(190), Color32::from_gray(12)),
    };

    const DONE: KeypadTheme = KeypadTheme {
        fill: ThemeColor::new(Color32::from_rgb(0, 0x64, 0), Color32::from_rgb(0, 0x78, 0)),
        highlighted_fill: ThemeColor::new(Color32::from_rgb(0, 0x50, 0),
                                          Color32::from_rgb(0, 0x64, 0)),
        control: ThemeColor::same(Color32::from_gray(253)),
        highlighted_control: ThemeColor::same(Color32::from_gray(253)),
        disabled_fill: ThemeColor::new(Color32::from_gray(244), Color32::from_gray(44)),
        disabled_control: ThemeColor::new(Color32::from_gray(150), Color32::from_gray(110)),
        shadow: ThemeColor::new(Color32::from_gray(190), Color32::from_gray(12)),
    };

    /// Get button colors for provided [`ButtonStyle`].
    pub fn for_style(style: ButtonStyle) -> Self {
        match style {
            ButtonStyle::White => Self::WHITE,
            ButtonStyle::Gray => Self::GRAY,
            ButtonStyle::Done => Self::DONE,
        }
    }
}

/// Keypad colors outside of per-style button themes.
pub struct Colors;

impl Colors {
    /// Backplate behind the keys in keyboard presentation.
    pub const PAD_FILL: ThemeColor = ThemeColor::new(Color32::from_gray(214),
                                                     Color32::from_gray(18));
    /// Background in plain presentation.
    pub const SURFACE_FILL: ThemeColor = ThemeColor::new(Color32::from_gray(253),
                                                         Color32::from_gray(24));
    /// Separator between keys in flat layout.
    pub const STROKE: ThemeColor = ThemeColor::new(Color32::from_gray(220),
                                                   Color32::from_gray(54));
}
