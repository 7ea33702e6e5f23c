//! Screens of the learning adventure

/// Exactly one screen is active at any time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Home,
    Instructions,
    Menu,
    Learning,
    Game1,
    Game2,
    Story,
    VocabMenu,
    VocabLearning,
    VocabGame1,
    VocabGame2,
    VocabStory,
}

impl Screen {
    pub const ALL: [Screen; 12] = [
        Screen::Home,
        Screen::Instructions,
        Screen::Menu,
        Screen::Learning,
        Screen::Game1,
        Screen::Game2,
        Screen::Story,
        Screen::VocabMenu,
        Screen::VocabLearning,
        Screen::VocabGame1,
        Screen::VocabGame2,
        Screen::VocabStory,
    ];

    /// Header (home button + coin purse) is hidden on the intro screens
    pub fn shows_header(self) -> bool {
        !matches!(self, Screen::Home | Screen::Instructions)
    }

    /// Screens where the current target can be replayed
    pub fn has_replay(self) -> bool {
        matches!(self, Screen::Game1 | Screen::Game2 | Screen::VocabGame1)
    }

    pub fn name(self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Instructions => "instructions",
            Screen::Menu => "menu",
            Screen::Learning => "learning",
            Screen::Game1 => "game1",
            Screen::Game2 => "game2",
            Screen::Story => "story",
            Screen::VocabMenu => "vocab_menu",
            Screen::VocabLearning => "vocab_learning",
            Screen::VocabGame1 => "vocab_game1",
            Screen::VocabGame2 => "vocab_game2",
            Screen::VocabStory => "vocab_story",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
