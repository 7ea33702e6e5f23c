//! Flip-card boards: first tap reveals, second tap retires the card

use crate::content::{CharacterData, LearnItem, VocabData};
use crate::flow::Event;
use crate::gui::{KanaQuestApp, Message};
use crate::progress::{LearnBoard, LearnState};
use iced::widget::{button, column, row, text, Row, Space};
use iced::{Alignment, Element, Length};

const CARD: f32 = 170.0;

fn board<'a, I: LearnItem>(
    items: &'a LearnBoard<I>,
    face: impl Fn(&I, LearnState) -> Element<'a, Message>,
    on_tap: impl Fn(I::Id) -> Event,
) -> Element<'a, Message> {
    Row::with_children(items.items().iter().map(|item| {
        let state = items.state(item.id()).unwrap_or(LearnState::Normal);
        if state == LearnState::Done {
            return Space::new(Length::Fixed(CARD), Length::Fixed(CARD)).into();
        }
        button(face(item, state))
            .width(Length::Fixed(CARD))
            .height(Length::Fixed(CARD))
            .padding(12)
            .style(if state == LearnState::Flipped {
                button::primary
            } else {
                button::secondary
            })
            .on_press(Message::Event(on_tap(item.id())))
            .into()
    }))
    .spacing(20)
    .into()
}

fn heading<'a>(tag: &'a str, subject: &'a str, hint: &'a str) -> Element<'a, Message> {
    column![
        row![
            text(tag).size(22).style(text::secondary),
            text(subject).size(30).color(super::ACCENT),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        text(hint).size(18).style(text::secondary),
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .into()
}

fn char_face<'a>(c: &CharacterData, state: LearnState) -> Element<'a, Message> {
    match state {
        LearnState::Normal => text(c.glyph).size(96).into(),
        _ => column![text(c.glyph).size(72), text(c.romaji).size(28)]
            .align_x(Alignment::Center)
            .into(),
    }
}

fn vocab_face<'a>(v: &VocabData, state: LearnState) -> Element<'a, Message> {
    match state {
        LearnState::Normal => text(v.illustration).size(96).into(),
        _ => column![
            text(v.illustration).size(56),
            text(v.word).size(28),
            text(v.meaning).size(18).style(text::secondary),
        ]
        .align_x(Alignment::Center)
        .into(),
    }
}

pub fn hiragana(app: &KanaQuestApp) -> Element<'_, Message> {
    column![
        heading("學習中：", "五十音 (あ行)", "點擊字母發音，點第二次圓圈會消失！"),
        board(app.session.chars(), char_face, Event::LearnChar),
    ]
    .spacing(30)
    .align_x(Alignment::Center)
    .into()
}

pub fn vocab(app: &KanaQuestApp) -> Element<'_, Message> {
    column![
        heading("探索中：", "水果點點名", "點擊翻開單字，再點一次圓圈消失！"),
        board(app.session.vocab(), vocab_face, Event::LearnVocab),
    ]
    .spacing(30)
    .align_x(Alignment::Center)
    .into()
}
