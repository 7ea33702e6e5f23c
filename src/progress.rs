//! Learning progress primitives
//!
//! Per-card learn states, shuffled recall sequences and the coin counter
//! that decides which reward screen a finished track unlocks.

use crate::content::LearnItem;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Tri-state of a card on a learning board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LearnState {
    #[default]
    Normal,
    Flipped,
    Done,
}

impl LearnState {
    /// Next state after a click. `Done` is absorbing.
    pub fn next(self) -> Option<LearnState> {
        match self {
            LearnState::Normal => Some(LearnState::Flipped),
            LearnState::Flipped => Some(LearnState::Done),
            LearnState::Done => None,
        }
    }
}

/// Active set of cards and the learn state of each one
#[derive(Debug, Clone)]
pub struct LearnBoard<I: LearnItem> {
    items: Vec<I>,
    states: BTreeMap<I::Id, LearnState>,
}

impl<I: LearnItem> Default for LearnBoard<I> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            states: BTreeMap::new(),
        }
    }
}

impl<I: LearnItem> LearnBoard<I> {
    /// Load a set with every card face down
    pub fn new(items: &[I]) -> Self {
        Self {
            items: items.to_vec(),
            states: items.iter().map(|i| (i.id(), LearnState::Normal)).collect(),
        }
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    pub fn item(&self, id: I::Id) -> Option<&I> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn state(&self, id: I::Id) -> Option<LearnState> {
        self.states.get(&id).copied()
    }

    /// Move a card one step forward, returning its new state.
    /// Unknown or finished cards are left alone.
    pub fn advance(&mut self, id: I::Id) -> Option<LearnState> {
        let state = self.states.get_mut(&id)?;
        let next = state.next()?;
        *state = next;
        Some(next)
    }

    /// Every card of a non-empty set is done
    pub fn is_mastered(&self) -> bool {
        !self.items.is_empty()
            && self
                .items
                .iter()
                .all(|i| self.states.get(&i.id()) == Some(&LearnState::Done))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Shuffled order of targets for a recall game, with a cursor
#[derive(Debug, Clone)]
pub struct TargetSequence<I> {
    targets: Vec<I>,
    index: usize,
}

impl<I> Default for TargetSequence<I> {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            index: 0,
        }
    }
}

impl<I: Copy> TargetSequence<I> {
    /// Full random permutation of `items`, cursor at the first target
    pub fn shuffled<R: Rng + ?Sized>(items: &[I], rng: &mut R) -> Self {
        let mut targets = items.to_vec();
        targets.shuffle(rng);
        Self { targets, index: 0 }
    }

    pub fn current(&self) -> Option<I> {
        self.targets.get(self.index).copied()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn targets(&self) -> &[I] {
        &self.targets
    }

    /// Step to the next target. Returns `None` without moving when the
    /// sequence is exhausted.
    pub fn advance(&mut self) -> Option<I> {
        if self.index + 1 < self.targets.len() {
            self.index += 1;
            self.current()
        } else {
            None
        }
    }

    /// Back to the first target of the same order
    pub fn rewind(&mut self) -> Option<I> {
        self.index = 0;
        self.current()
    }
}

/// Which learning track finished a game sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Hiragana,
    Vocab,
}

/// Where the learner goes after being awarded a coin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardRoute {
    Menu,
    VocabStory,
    FinalStory,
}

/// Coins needed for the final reward story
pub const FINAL_REWARD_COINS: u32 = 2;

/// Session coin counter. Only grows until an explicit full reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coins(u32);

impl Coins {
    pub fn count(self) -> u32 {
        self.0
    }

    /// Grant one coin for a completed sequence and pick the reward route
    pub fn award(&mut self, track: Track) -> RewardRoute {
        self.0 = self.0.saturating_add(1);
        if self.0 >= FINAL_REWARD_COINS {
            RewardRoute::FinalStory
        } else {
            match track {
                Track::Hiragana => RewardRoute::Menu,
                Track::Vocab => RewardRoute::VocabStory,
            }
        }
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{CharId, HIRAGANA_A_COLUMN};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_learn_state_only_moves_forward() {
        assert_eq!(LearnState::Normal.next(), Some(LearnState::Flipped));
        assert_eq!(LearnState::Flipped.next(), Some(LearnState::Done));
        assert_eq!(LearnState::Done.next(), None);
    }

    #[test]
    fn test_board_done_is_absorbing() {
        let mut board = LearnBoard::new(HIRAGANA_A_COLUMN);
        let id = CharId("あ");
        assert_eq!(board.advance(id), Some(LearnState::Flipped));
        assert_eq!(board.advance(id), Some(LearnState::Done));
        assert_eq!(board.advance(id), None);
        assert_eq!(board.state(id), Some(LearnState::Done));
    }

    #[test]
    fn test_board_ignores_unknown_ids() {
        let mut board = LearnBoard::new(HIRAGANA_A_COLUMN);
        assert_eq!(board.advance(CharId("か")), None);
        assert_eq!(board.state(CharId("か")), None);
    }

    #[test]
    fn test_board_mastery() {
        let mut board = LearnBoard::new(HIRAGANA_A_COLUMN);
        assert!(!board.is_mastered());
        for c in HIRAGANA_A_COLUMN {
            board.advance(CharId(c.glyph));
            board.advance(CharId(c.glyph));
        }
        assert!(board.is_mastered());
    }

    #[test]
    fn test_empty_board_is_never_mastered() {
        let board: LearnBoard<crate::content::CharacterData> = LearnBoard::default();
        assert!(!board.is_mastered());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let seq = TargetSequence::shuffled(HIRAGANA_A_COLUMN, &mut rng);
            assert_eq!(seq.len(), HIRAGANA_A_COLUMN.len());
            assert_eq!(seq.index(), 0);
            let mut got: Vec<_> = seq.targets().iter().map(|c| c.glyph).collect();
            let mut want: Vec<_> = HIRAGANA_A_COLUMN.iter().map(|c| c.glyph).collect();
            got.sort();
            want.sort();
            assert_eq!(got, want);
        }
    }

    #[test]
    fn test_sequence_advance_and_exhaust() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seq = TargetSequence::shuffled(&[1, 2, 3], &mut rng);
        assert!(seq.advance().is_some());
        assert!(seq.advance().is_some());
        assert_eq!(seq.index(), 2);
        assert_eq!(seq.advance(), None);
        assert_eq!(seq.index(), 2);
        let first = seq.targets()[0];
        assert_eq!(seq.rewind(), Some(first));
    }

    #[test]
    fn test_coin_routing() {
        let mut coins = Coins::default();
        assert_eq!(coins.award(Track::Hiragana), RewardRoute::Menu);
        assert_eq!(coins.award(Track::Vocab), RewardRoute::FinalStory);
        assert_eq!(coins.count(), 2);
        coins.reset();
        assert_eq!(coins.award(Track::Vocab), RewardRoute::VocabStory);
        assert_eq!(coins.award(Track::Hiragana), RewardRoute::FinalStory);
        assert_eq!(coins.award(Track::Hiragana), RewardRoute::FinalStory);
        assert_eq!(coins.count(), 3);
    }
}
