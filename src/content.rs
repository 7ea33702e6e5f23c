//! Static learning content
//!
//! The hiragana a-row, the two fruit vocabulary sets and the fixed phrases
//! spoken as feedback. Everything here is defined once and never mutated.

use serde::Serialize;
use std::fmt;

/// Identity of a hiragana card (its glyph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CharId(pub &'static str);

/// Identity of a vocabulary card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VocabId(pub &'static str);

impl fmt::Display for CharId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Display for VocabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Anything that can be learned on a board and asked in a recall game
pub trait LearnItem: Copy + fmt::Debug {
    type Id: Copy + Eq + std::hash::Hash + Ord + fmt::Debug;

    fn id(&self) -> Self::Id;

    /// Text handed to the speaker when this item is the target
    fn spoken(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharacterData {
    pub glyph: &'static str,
    pub romaji: &'static str,
    pub stroke_image_url: &'static str,
}

impl LearnItem for CharacterData {
    type Id = CharId;

    fn id(&self) -> CharId {
        CharId(self.glyph)
    }

    fn spoken(&self) -> &'static str {
        self.glyph
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VocabData {
    pub id: &'static str,
    pub word: &'static str,
    pub meaning: &'static str,
    pub illustration: &'static str,
}

impl LearnItem for VocabData {
    type Id = VocabId;

    fn id(&self) -> VocabId {
        VocabId(self.id)
    }

    fn spoken(&self) -> &'static str {
        self.word
    }
}

const STROKE_BASE_URL: &str = "https://raw.githubusercontent.com/nihow79207-wang/japanese-assets/main";

pub const HIRAGANA_A_COLUMN: &[CharacterData] = &[
    CharacterData {
        glyph: "あ",
        romaji: "a",
        stroke_image_url: "https://raw.githubusercontent.com/nihow79207-wang/japanese-assets/main/あ.png",
    },
    CharacterData {
        glyph: "い",
        romaji: "i",
        stroke_image_url: "https://raw.githubusercontent.com/nihow79207-wang/japanese-assets/main/い.png",
    },
    CharacterData {
        glyph: "う",
        romaji: "u",
        stroke_image_url: "https://raw.githubusercontent.com/nihow79207-wang/japanese-assets/main/う.png",
    },
    CharacterData {
        glyph: "え",
        romaji: "e",
        stroke_image_url: "https://raw.githubusercontent.com/nihow79207-wang/japanese-assets/main/え.png",
    },
    CharacterData {
        glyph: "お",
        romaji: "o",
        stroke_image_url: "https://raw.githubusercontent.com/nihow79207-wang/japanese-assets/main/お.png",
    },
];

pub const FRUIT_A: &[VocabData] = &[
    VocabData { id: "apple", word: "りんご", meaning: "蘋果", illustration: "🍎" },
    VocabData { id: "grape", word: "ぶどう", meaning: "葡萄", illustration: "🍇" },
    VocabData { id: "melon", word: "メロン", meaning: "哈密瓜", illustration: "🍈" },
    VocabData { id: "orange", word: "みかん", meaning: "橘子", illustration: "🍊" },
    VocabData { id: "watermelon", word: "すいか", meaning: "西瓜", illustration: "🍉" },
];

pub const FRUIT_B: &[VocabData] = &[
    VocabData { id: "pineapple", word: "パイナップル", meaning: "鳳梨", illustration: "🍍" },
    VocabData { id: "strawberry", word: "いちご", meaning: "草莓", illustration: "🍓" },
    VocabData { id: "kiwi", word: "キウイ", meaning: "奇異果", illustration: "🥝" },
    VocabData { id: "lemon", word: "レモン", meaning: "檸檬", illustration: "🍋" },
    VocabData { id: "banana", word: "バナナ", meaning: "香蕉", illustration: "🍌" },
];

/// Named vocabulary sets offered on the vocab menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VocabSet {
    FruitA,
    FruitB,
}

impl VocabSet {
    pub const ALL: [VocabSet; 2] = [VocabSet::FruitA, VocabSet::FruitB];

    pub fn items(self) -> &'static [VocabData] {
        match self {
            VocabSet::FruitA => FRUIT_A,
            VocabSet::FruitB => FRUIT_B,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            VocabSet::FruitA => "水果A",
            VocabSet::FruitB => "水果B",
        }
    }
}

/// Fixed phrases spoken as feedback
pub mod phrases {
    pub const CORRECT: &str = "正解！";
    pub const REGRET: &str = "残念";
    pub const WONDERFUL: &str = "素晴らしい";
    pub const CLOSE: &str = "惜しい";
    pub const NICE: &str = "いい感じ";

    /// Shown when a correct drawing comes back without judge feedback
    pub const WRITE_PRAISE: &str = "寫得真棒！";
    /// Shown when a rejected drawing comes back without judge feedback
    pub const TRY_AGAIN: &str = "再試一次！";
    /// Blocking notice when the microphone cannot be opened
    pub const MIC_PERMISSION: &str = "請開啟麥克風權限！";
    /// Local warning for an empty canvas
    pub const EMPTY_CANVAS: &str = "請先寫字再送出喔！";
}

/// Texts warmed into the audio cache when the app starts
pub fn startup_preload() -> Vec<String> {
    HIRAGANA_A_COLUMN
        .iter()
        .map(|c| c.glyph)
        .chain([
            phrases::CORRECT,
            phrases::REGRET,
            phrases::WONDERFUL,
            phrases::CLOSE,
            phrases::NICE,
        ])
        .map(str::to_string)
        .collect()
}

pub fn find_char(id: CharId) -> Option<&'static CharacterData> {
    HIRAGANA_A_COLUMN.iter().find(|c| c.id() == id)
}

pub fn stroke_base_url() -> &'static str {
    STROKE_BASE_URL
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_stroke_urls_share_base() {
        for c in HIRAGANA_A_COLUMN {
            assert!(c.stroke_image_url.starts_with(stroke_base_url()));
            assert!(c.stroke_image_url.ends_with(&format!("{}.png", c.glyph)));
        }
    }

    #[test]
    fn test_vocab_ids_unique_across_sets() {
        let ids: HashSet<_> = FRUIT_A.iter().chain(FRUIT_B).map(|v| v.id()).collect();
        assert_eq!(ids.len(), FRUIT_A.len() + FRUIT_B.len());
    }

    #[test]
    fn test_startup_preload_contents() {
        let texts = startup_preload();
        assert_eq!(texts.len(), 10);
        assert_eq!(texts[0], "あ");
        assert!(texts.contains(&"惜しい".to_string()));
    }

    #[test]
    fn test_find_char() {
        assert_eq!(find_char(CharId("う")).map(|c| c.romaji), Some("u"));
        assert!(find_char(CharId("か")).is_none());
    }
}
