//! Listen-and-choose games and the speaking game

use crate::content::{CharacterData, LearnItem, VocabData, HIRAGANA_A_COLUMN};
use crate::flow::{ChoiceFeedback, Event};
use crate::gui::{KanaQuestApp, Message};
use crate::progress::TargetSequence;
use iced::widget::{button, column, mouse_area, text, Row};
use iced::{Alignment, Element, Length};

fn progress_label<'a, I: LearnItem>(name: &str, targets: &TargetSequence<I>) -> Element<'a, Message> {
    text(format!("{} ({}/{})", name, targets.index() + 1, targets.len()))
        .size(24)
        .style(text::secondary)
        .into()
}

fn replay_button<'a>() -> Element<'a, Message> {
    button(text("🔊").size(48))
        .padding(20)
        .style(button::primary)
        .on_press(Message::Event(Event::ReplayTarget))
        .into()
}

/// Options light up green once the target has been picked
fn choices<'a, I: LearnItem>(
    options: &'a [I],
    target: Option<I>,
    feedback: ChoiceFeedback,
    label: impl Fn(&I) -> &'static str,
    size: u16,
    on_pick: impl Fn(I::Id) -> Event,
) -> Element<'a, Message> {
    let target_id = target.map(|t| t.id());
    Row::with_children(options.iter().map(|option| {
        let revealed = feedback == ChoiceFeedback::Correct && Some(option.id()) == target_id;
        let mut pick = button(text(label(option)).size(size))
            .width(Length::Fixed(140.0))
            .height(Length::Fixed(140.0))
            .padding(10)
            .style(if revealed {
                button::success
            } else {
                button::secondary
            });
        if feedback == ChoiceFeedback::None {
            pick = pick.on_press(Message::Event(on_pick(option.id())));
        }
        pick.into()
    }))
    .spacing(20)
    .into()
}

fn wrong_hint<'a>(feedback: ChoiceFeedback) -> Element<'a, Message> {
    match feedback {
        ChoiceFeedback::Wrong => text("再聽一次！").size(24).color(super::ERROR).into(),
        _ => column![].into(),
    }
}

pub fn listen_hiragana(app: &KanaQuestApp) -> Element<'_, Message> {
    let session = &app.session;
    column![
        progress_label("聽音選字", session.char_targets()),
        replay_button(),
        choices(
            HIRAGANA_A_COLUMN,
            session.char_targets().current(),
            session.choice_feedback(),
            |c: &CharacterData| c.glyph,
            56,
            Event::PickChar,
        ),
        wrong_hint(session.choice_feedback()),
    ]
    .spacing(30)
    .align_x(Alignment::Center)
    .into()
}

pub fn listen_vocab(app: &KanaQuestApp) -> Element<'_, Message> {
    let session = &app.session;
    column![
        progress_label("聽音選圖", session.vocab_targets()),
        replay_button(),
        choices(
            session.vocab().items(),
            session.vocab_targets().current(),
            session.choice_feedback(),
            |v: &VocabData| v.illustration,
            72,
            Event::PickVocab,
        ),
        wrong_hint(session.choice_feedback()),
    ]
    .spacing(30)
    .align_x(Alignment::Center)
    .into()
}

/// Picture shown, word said aloud while the microphone button is held
pub fn speak_vocab(app: &KanaQuestApp) -> Element<'_, Message> {
    let session = &app.session;
    let Some(target) = session.vocab_targets().current() else {
        return column![].into();
    };

    let recording = session.is_recording();
    let mic = button(text(if recording { "⏹️" } else { "🎤" }).size(48))
        .width(Length::Fixed(120.0))
        .height(Length::Fixed(120.0))
        .padding(30)
        .style(if recording {
            button::danger
        } else {
            button::primary
        });

    // Press-and-hold: the button itself only renders, the mouse area drives
    let mic: Element<'_, Message> = if session.is_verifying() || session.awaiting_advance() {
        mic.into()
    } else {
        mouse_area(mic)
            .on_press(Message::Event(Event::RecordPressed))
            .on_release(Message::Event(Event::RecordReleased))
            .on_exit(Message::Event(Event::RecordReleased))
            .into()
    };

    let status = if session.is_verifying() {
        text("正在聽聽看發音...").size(22).color(super::ACCENT)
    } else if recording {
        text("錄音中...").size(22).color(super::ERROR)
    } else {
        text("按住麥克風並大聲唸出來").size(22).style(text::secondary)
    };

    column![
        text("看圖念字").size(24).style(text::secondary),
        text(target.illustration).size(120),
        text(target.word).size(44),
        mic,
        status,
        super::feedback_banner(session.feedback()),
    ]
    .spacing(20)
    .align_x(Alignment::Center)
    .into()
}
