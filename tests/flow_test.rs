//! End-to-end walks through the screen flow

mod common;

use common::{attempt, ticket_of, Driver};
use kana_quest::canvas::{DrawingSurface, Point, SubmitError};
use kana_quest::content::{phrases, LearnItem, VocabSet, HIRAGANA_A_COLUMN};
use kana_quest::flow::{Effect, Event, FeedbackKind, Screen, TimerKind};
use kana_quest::verify::Verdict;

fn vocab_words(set: VocabSet) -> Vec<&'static str> {
    set.items().iter().map(|v| v.word).collect()
}

/// Menu → vocab set mastered and both vocab games cleared
fn clear_vocab(d: &mut Driver, set: VocabSet) {
    d.send(Event::ChooseVocab);
    d.send(Event::ChooseVocabSet(set));
    let mut last = Vec::new();
    for v in set.items() {
        d.send(Event::LearnVocab(v.id()));
        last = d.send(Event::LearnVocab(v.id()));
    }
    d.fire(&last);
    assert_eq!(d.session.screen(), Screen::VocabGame1);

    while d.session.screen() == Screen::VocabGame1 {
        let target = d.session.vocab_targets().current().unwrap();
        d.send_and_fire(Event::PickVocab(target.id()));
    }
    assert_eq!(d.session.screen(), Screen::VocabGame2);

    while d.session.screen() == Screen::VocabGame2 {
        d.send(Event::RecordPressed);
        d.send(Event::RecordReleased);
        let sent = d.send(Event::RecordingFinished(b"RIFF".to_vec()));
        d.send_and_fire(Event::PronunciationJudged {
            attempt: attempt(&sent).unwrap(),
            verdict: Verdict::pass("よくできました"),
        });
    }
}

#[test]
fn test_learning_board_unlocks_listening_game() {
    let mut d = Driver::at_menu(7);
    let effects = d.master_hiragana();

    assert_eq!(d.session.screen(), Screen::Game1);
    assert_eq!(d.session.char_targets().index(), 0);
    assert_eq!(d.session.char_targets().len(), 5);

    // Entering the game announces the first target
    let first = d.session.char_targets().current().unwrap();
    assert_eq!(effects, vec![Effect::Speak(first.glyph.to_string())]);
}

#[test]
fn test_targets_are_a_permutation() {
    let mut d = Driver::at_menu(99);
    d.master_hiragana();
    let mut glyphs: Vec<&str> = d
        .session
        .char_targets()
        .targets()
        .iter()
        .map(|c| c.glyph)
        .collect();
    glyphs.sort_unstable();
    let mut expected: Vec<&str> = HIRAGANA_A_COLUMN.iter().map(|c| c.glyph).collect();
    expected.sort_unstable();
    assert_eq!(glyphs, expected);
}

#[test]
fn test_correct_picks_lead_to_writing() {
    let mut d = Driver::at_menu(3);
    d.master_hiragana();
    let order: Vec<&str> = d.session.char_targets().targets().iter().map(|c| c.glyph).collect();

    let last = d.clear_listen_hiragana();

    assert_eq!(d.session.screen(), Screen::Game2);
    assert_eq!(d.session.char_targets().index(), 0);
    assert!(last.contains(&Effect::ResetCanvas));
    assert!(last.contains(&Effect::Speak(order[0].to_string())));
    assert_eq!(d.spoken().iter().filter(|s| *s == phrases::CORRECT).count(), 5);
}

#[test]
fn test_first_completed_track_returns_to_menu_with_a_coin() {
    let mut d = Driver::at_menu(11);
    d.master_hiragana();
    d.clear_listen_hiragana();
    d.clear_writing();

    assert_eq!(d.session.coins(), 1);
    assert_eq!(d.session.screen(), Screen::Menu);
}

#[test]
fn test_writing_speaks_each_target() {
    let mut d = Driver::at_menu(12);
    d.master_hiragana();
    d.clear_listen_hiragana();
    let order: Vec<String> = d
        .session
        .char_targets()
        .targets()
        .iter()
        .map(|c| c.glyph.to_string())
        .collect();

    let before = d.log.len();
    d.clear_writing();
    let spoken: Vec<String> = d.log[before..]
        .iter()
        .filter_map(|e| match e {
            Effect::Speak(t) if t != phrases::WONDERFUL => Some(t.clone()),
            _ => None,
        })
        .collect();
    // The first target was announced on entry; the rest on each advance
    assert_eq!(spoken, order[1..].to_vec());
}

#[test]
fn test_vocab_first_goes_to_vocab_story() {
    let mut d = Driver::at_menu(21);
    clear_vocab(&mut d, VocabSet::FruitA);

    assert_eq!(d.session.coins(), 1);
    assert_eq!(d.session.screen(), Screen::VocabStory);

    d.send(Event::StoryDone);
    assert_eq!(d.session.screen(), Screen::Menu);
    assert_eq!(d.session.coins(), 1);
}

#[test]
fn test_second_coin_unlocks_final_story_and_resets() {
    let mut d = Driver::at_menu(31);
    d.master_hiragana();
    d.clear_listen_hiragana();
    d.clear_writing();
    assert_eq!(d.session.screen(), Screen::Menu);

    clear_vocab(&mut d, VocabSet::FruitB);
    assert_eq!(d.session.coins(), 2);
    assert_eq!(d.session.screen(), Screen::Story);

    d.send(Event::StoryDone);
    assert_eq!(d.session.screen(), Screen::Home);
    assert_eq!(d.session.coins(), 0);
}

#[test]
fn test_choosing_a_set_preloads_its_words() {
    let mut d = Driver::at_menu(1);
    d.send(Event::ChooseVocab);
    let effects = d.send(Event::ChooseVocabSet(VocabSet::FruitB));
    let expected: Vec<String> = vocab_words(VocabSet::FruitB)
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(effects, vec![Effect::Preload(expected)]);
}

#[test]
fn test_empty_drawing_never_reaches_the_judge() {
    let mut d = Driver::at_menu(8);
    d.master_hiragana();
    d.clear_listen_hiragana();

    let mut surface = DrawingSurface::new();
    let event = match surface.submit() {
        Ok(png) => Event::DrawingSubmitted(png),
        Err(SubmitError::Empty) => Event::DrawingRejected,
        Err(e) => panic!("unexpected {e}"),
    };
    let effects = d.send(event);

    assert!(effects.is_empty());
    assert!(surface.show_warning());
    assert!(!d.session.is_verifying());
    assert!(!d
        .log
        .iter()
        .any(|e| matches!(e, Effect::VerifyHandwriting { .. })));
}

#[test]
fn test_drawn_glyph_is_sent_for_the_current_target() {
    let mut d = Driver::at_menu(8);
    d.master_hiragana();
    d.clear_listen_hiragana();
    let target = d.session.char_targets().current().unwrap();

    let mut surface = DrawingSurface::new();
    surface.begin_stroke(Point::new(120.0, 80.0));
    surface.extend_stroke(Point::new(260.0, 320.0));
    surface.end_stroke();
    let png = surface.submit().unwrap();

    let effects = d.send(Event::DrawingSubmitted(png.clone()));
    assert_eq!(
        effects,
        vec![Effect::VerifyHandwriting {
            attempt: d.session.attempt(),
            image: png,
            glyph: target.glyph.to_string(),
        }]
    );
    assert!(d.session.is_verifying());

    // A second submission while busy is dropped
    assert!(d.send(Event::DrawingSubmitted(vec![1, 2, 3])).is_empty());
}

#[test]
fn test_judge_failure_is_retryable() {
    let mut d = Driver::at_menu(13);
    d.master_hiragana();
    d.clear_listen_hiragana();

    let sent = d.send(Event::DrawingSubmitted(vec![0]));
    let effects = d.send(Event::HandwritingJudged {
        attempt: attempt(&sent).unwrap(),
        result: Err("timeout".to_string()),
    });

    assert!(!d.session.is_verifying());
    assert_eq!(d.session.char_targets().index(), 0);
    assert_eq!(effects, vec![Effect::Speak(phrases::CLOSE.to_string())]);
    let feedback = d.session.feedback().unwrap();
    assert_eq!(feedback.kind, FeedbackKind::Error);
    assert_eq!(feedback.text, phrases::TRY_AGAIN);

    // And the learner can submit again
    assert!(!d.send(Event::DrawingSubmitted(vec![0])).is_empty());
}

#[test]
fn test_going_home_mid_game_cancels_pending_advance() {
    let mut d = Driver::at_menu(17);
    d.master_hiragana();
    let target = d.session.char_targets().current().unwrap();
    let effects = d.send(Event::PickChar(target.id()));
    let advance = ticket_of(&effects, TimerKind::ChoiceAdvance).unwrap();

    d.send(Event::GoHome);
    assert_eq!(d.session.screen(), Screen::Home);
    assert_eq!(d.session.coins(), 0);

    assert!(d.send(Event::TimerFired(advance)).is_empty());
    assert_eq!(d.session.screen(), Screen::Home);
}

#[test]
fn test_each_written_target_needs_its_own_pass() {
    let mut d = Driver::at_menu(19);
    d.master_hiragana();
    d.clear_listen_hiragana();
    let order: Vec<&str> = d.session.char_targets().targets().iter().map(|c| c.glyph).collect();

    let sent = d.send(Event::DrawingSubmitted(vec![1]));
    let first = attempt(&sent).unwrap();
    let passed = d.send(Event::HandwritingJudged {
        attempt: first,
        result: Ok(Verdict::pass("")),
    });

    // Pressing submit again while the praise is shown does nothing
    assert!(d.send(Event::DrawingSubmitted(vec![2])).is_empty());
    d.fire(&passed);
    assert_eq!(d.session.char_targets().index(), 1);

    // A repeated answer for the first glyph cannot credit the second
    let late = d.send_and_fire(Event::HandwritingJudged {
        attempt: first,
        result: Ok(Verdict::pass("")),
    });
    assert!(late.is_empty());
    assert_eq!(d.session.char_targets().index(), 1);
    assert_eq!(d.session.char_targets().current().unwrap().glyph, order[1]);
}

#[test]
fn test_each_spoken_word_needs_its_own_pass() {
    let mut d = Driver::at_menu(23);
    d.send(Event::ChooseVocab);
    d.send(Event::ChooseVocabSet(VocabSet::FruitA));
    let mut last = Vec::new();
    for v in VocabSet::FruitA.items() {
        d.send(Event::LearnVocab(v.id()));
        last = d.send(Event::LearnVocab(v.id()));
    }
    d.fire(&last);
    while d.session.screen() == Screen::VocabGame1 {
        let target = d.session.vocab_targets().current().unwrap();
        d.send_and_fire(Event::PickVocab(target.id()));
    }
    assert_eq!(d.session.screen(), Screen::VocabGame2);

    d.send(Event::RecordPressed);
    d.send(Event::RecordReleased);
    let first = attempt(&d.send(Event::RecordingFinished(vec![1]))).unwrap();
    let passed = d.send(Event::PronunciationJudged {
        attempt: first,
        verdict: Verdict::pass("很好"),
    });

    assert!(d.send(Event::RecordPressed).is_empty());
    assert!(d.send(Event::RecordingFinished(vec![2])).is_empty());
    d.fire(&passed);
    assert_eq!(d.session.vocab_targets().index(), 1);

    let late = d.send_and_fire(Event::PronunciationJudged {
        attempt: first,
        verdict: Verdict::pass("很好"),
    });
    assert!(late.is_empty());
    assert_eq!(d.session.vocab_targets().index(), 1);
}
