use crate::content::VocabSet;
use crate::flow::Event;
use crate::gui::{KanaQuestApp, Message};
use iced::widget::{button, column, row, text, Column};
use iced::{Alignment, Element, Length};

pub fn view(_app: &KanaQuestApp) -> Element<'_, Message> {
    let tile = |icon: &'static str, label: &'static str, event: Event| {
        button(
            column![text(icon).size(72), text(label).size(26)]
                .spacing(10)
                .align_x(Alignment::Center),
        )
        .width(Length::Fixed(220.0))
        .padding(24)
        .style(button::secondary)
        .on_press(Message::Event(event))
    };

    column![
        super::title("冒險選擇"),
        row![
            tile("あ", "五十音", Event::ChooseHiragana),
            tile("🍎", "單字館", Event::ChooseVocab),
        ]
        .spacing(40),
    ]
    .spacing(40)
    .align_x(Alignment::Center)
    .into()
}

pub fn vocab(_app: &KanaQuestApp) -> Element<'_, Message> {
    let sets = VocabSet::ALL.into_iter().map(|set| {
        let words = Column::with_children(set.items().iter().map(|v| {
            row![text(v.illustration).size(24), text(v.word).size(20)]
                .spacing(10)
                .into()
        }))
        .spacing(6);

        button(column![text(set.title()).size(28), words].spacing(14))
            .width(Length::Fixed(260.0))
            .padding(20)
            .style(button::secondary)
            .on_press(Message::Event(Event::ChooseVocabSet(set)))
            .into()
    });

    column![
        super::title("單 字"),
        text("選 擇 冒 險 主 題").size(20).style(text::secondary),
        iced::widget::Row::with_children(sets).spacing(30),
    ]
    .spacing(24)
    .align_x(Alignment::Center)
    .into()
}
