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

/// Languages writing decimal fractions with a comma.
const COMMA_LANGUAGES: &[&str] = &[
    "az", "be", "bg", "bs", "ca", "cs", "da", "de", "el", "es", "et", "fi", "fr", "hr", "hu",
    "hy", "id", "is", "it", "ka", "kk", "lt", "lv", "mk", "nb", "nl", "nn", "no", "pl", "pt",
    "ro", "ru", "sk", "sl", "sq", "sr", "sv", "tr", "uk", "vi"
];

/// Languages writing decimal fractions with Arabic separator.
const ARABIC_LANGUAGES: &[&str] = &["ar", "fa"];

/// Locale to resolve input formatting.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Locale {
    /// Language tag like `en-US`.
    tag: String,
}

impl Locale {
    /// Default language tag.
    pub const DEFAULT: &'static str = "en";

    /// Create locale from provided language tag.
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_string() }
    }

    /// Create locale from system preferences.
    pub fn system() -> Self {
        let tag = sys_locale::get_locale().unwrap_or(String::from(Self::DEFAULT));
        Self { tag }
    }

    /// Get language part of the tag.
    pub fn language(&self) -> String {
        let tag = self.tag.replace("_", "-");
        let lang = if tag.contains("-") {
            tag.split("-").next().unwrap_or(Self::DEFAULT).to_string()
        } else {
            tag
        };
        lang.to_lowercase()
    }

    /// Get decimal separator for the locale.
    pub fn decimal_separator(&self) -> String {
        let lang = self.language();
        if ARABIC_LANGUAGES.contains(&lang.as_str()) {
            "٫".to_string()
        } else if COMMA_LANGUAGES.contains(&lang.as_str()) {
            ",".to_string()
        } else {
            ".".to_string()
        }
    }
}
