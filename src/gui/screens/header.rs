use crate::flow::Event;
use crate::gui::{KanaQuestApp, Message};
use iced::widget::{button, container, row, text, Space};
use iced::{Alignment, Element, Length};

/// Home button and coin purse
pub fn view(app: &KanaQuestApp) -> Element<'_, Message> {
    let home = button(text("🏠").size(24))
        .padding(10)
        .style(button::primary)
        .on_press(Message::Event(Event::GoHome));

    let purse = container(
        row![
            text("💰").size(22),
            text(app.session.coins().to_string())
                .size(22)
                .color(super::ACCENT),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    )
    .padding([6, 16])
    .style(container::rounded_box);

    row![home, Space::with_width(Length::Fill), purse]
        .padding(12)
        .align_y(Alignment::Center)
        .into()
}
