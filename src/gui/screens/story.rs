//! Reward stories

use crate::flow::Event;
use crate::gui::{KanaQuestApp, Message};
use iced::widget::{button, column, container, text};
use iced::{Alignment, Element, Length};

fn story<'a>(
    icon: &'a str,
    heading: &'a str,
    lines: Column<'a>,
    action: &'a str,
) -> Element<'a, Message> {
    column![
        text(icon).size(96),
        text(heading).size(34).color(super::ACCENT),
        container(lines)
            .padding(24)
            .max_width(640.0)
            .style(container::rounded_box),
        button(text(action).size(24))
            .padding([12, 36])
            .style(button::success)
            .on_press(Message::Event(Event::StoryDone)),
    ]
    .spacing(24)
    .align_x(Alignment::Center)
    .width(Length::Fill)
    .into()
}

type Column<'a> = iced::widget::Column<'a, Message>;

/// Unlocked by finishing a vocabulary set
pub fn vocab_story(_app: &KanaQuestApp) -> Element<'_, Message> {
    story(
        "🐓",
        "單元獎勵：你知道「鳥居」嗎？",
        column![
            text("日本神社的紅色「鳥居」，其實跟「雞」有關喔！🐓").size(22),
            text("傳說天照大神躲進洞穴，世界變黑了，眾神便讓公雞啼叫引誘她出來。所以鳥居其實是公雞站的架子喔！")
                .size(20),
        ]
        .spacing(16),
        "再去拿一枚金幣吧！",
    )
}

/// Unlocked by the final coin; finishing it starts a new adventure
pub fn final_story(_app: &KanaQuestApp) -> Element<'_, Message> {
    story(
        "🌟",
        "究極獎勵故事：樹勾衣餒！",
        column![
            text("有一天小明跟朋友去樹下野餐，衣服不小心被樹枝勾住了...").size(20),
            text("他指著勾住的地方，跟朋友大聲驚呼：").size(20),
            text("「 樹 勾 衣 餒 ！ 」").size(36).color(super::ACCENT),
            text("( すごいね - Sugoi ne! 日本語：好厲害喔！ )")
                .size(18)
                .style(text::secondary),
            text("恭喜你完成所有冒險！你真的太「樹勾衣餒」了！").size(22),
        ]
        .spacing(14)
        .align_x(Alignment::Center),
        "重新開始大冒險",
    )
}
