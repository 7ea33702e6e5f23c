//! One view function per screen

use iced::widget::{button, column, container, text};
use iced::{Alignment, Color, Element, Length};

use crate::flow::{Feedback, FeedbackKind};
use crate::gui::Message;

pub mod games;
pub mod header;
pub mod home;
pub mod learning;
pub mod menu;
pub mod story;
pub mod writing;

pub(crate) const SUCCESS: Color = Color::from_rgb(0.08, 0.5, 0.24);
pub(crate) const ERROR: Color = Color::from_rgb(0.73, 0.11, 0.11);
pub(crate) const ACCENT: Color = Color::from_rgb(0.05, 0.52, 0.78);

/// Screen heading
pub(crate) fn title(label: &str) -> Element<'_, Message> {
    text(label).size(40).color(ACCENT).into()
}

/// Verdict banner under a game, empty when there is nothing to say
pub(crate) fn feedback_banner(feedback: Option<&Feedback>) -> Element<'_, Message> {
    let Some(feedback) = feedback else {
        return column![].into();
    };
    let color = match feedback.kind {
        FeedbackKind::Success => SUCCESS,
        FeedbackKind::Error => ERROR,
    };
    container(text(&feedback.text).size(28).color(color))
        .padding(16)
        .style(container::rounded_box)
        .into()
}

/// Blocking notice card, dismissed with its button
pub(crate) fn notice(message: &str) -> Element<'_, Message> {
    container(
        column![
            text(message).size(24),
            button(text("好").size(20))
                .padding([8, 32])
                .style(button::primary)
                .on_press(Message::DismissNotice),
        ]
        .spacing(20)
        .align_x(Alignment::Center),
    )
    .padding(30)
    .width(Length::Shrink)
    .style(container::bordered_box)
    .into()
}
