use crate::flow::Event;
use crate::gui::{KanaQuestApp, Message};
use crate::progress::FINAL_REWARD_COINS;
use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length};

pub fn view(_app: &KanaQuestApp) -> Element<'_, Message> {
    column![
        Space::with_height(Length::Fill),
        text("日文一起學").size(64).color(super::ACCENT),
        text("Happy Japanese Learning!").size(22).style(text::secondary),
        Space::with_height(30),
        button(text("開始冒險").size(28))
            .padding([14, 48])
            .style(button::success)
            .on_press(Message::Event(Event::Start)),
        Space::with_height(Length::Fill),
    ]
    .spacing(12)
    .align_x(Alignment::Center)
    .into()
}

pub fn instructions(_app: &KanaQuestApp) -> Element<'_, Message> {
    let rule = |icon: &'static str, line: String| {
        container(row![text(icon).size(30), text(line).size(22)].spacing(16))
            .padding(16)
            .width(Length::Fixed(420.0))
            .style(container::rounded_box)
    };

    column![
        Space::with_height(Length::Fill),
        super::title("冒險任務卡"),
        rule("⭐", "完成單元獲得金幣獎勵".to_string()),
        rule("💰", format!("累積 {} 枚金幣解鎖神祕故事", FINAL_REWARD_COINS)),
        Space::with_height(20),
        button(text("準備好了！").size(26))
            .padding([12, 40])
            .style(button::primary)
            .on_press(Message::Event(Event::Ready)),
        Space::with_height(Length::Fill),
    ]
    .spacing(16)
    .align_x(Alignment::Center)
    .into()
}
