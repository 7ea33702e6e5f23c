use crate::content::phrases;
use crate::gui::board::Board;
use crate::gui::{KanaQuestApp, Message};
use crate::canvas::CANVAS_SIZE;
use crate::flow::Event;
use iced::widget::{button, canvas, column, container, row, text};
use iced::{Alignment, Element, Length};

/// Handwriting practice: hear the target, write it, send it to the judge
pub fn view(app: &KanaQuestApp) -> Element<'_, Message> {
    let session = &app.session;
    let targets = session.char_targets();
    let Some(target) = targets.current() else {
        return column![].into();
    };
    let verifying = session.is_verifying();
    let locked = verifying || session.awaiting_advance();

    let prompt = row![
        button(text("🔊").size(32))
            .padding(12)
            .style(button::primary)
            .on_press(Message::Event(Event::ReplayTarget)),
        text(target.glyph).size(48).color(super::ACCENT),
    ]
    .spacing(20)
    .align_y(Alignment::Center);

    let side = Length::Fixed(CANVAS_SIZE as f32);
    let board = container(
        canvas(Board {
            surface: &app.canvas,
        })
        .width(side)
        .height(side),
    )
    .padding(8)
    .style(if app.canvas.show_warning() {
        container::bordered_box
    } else {
        container::rounded_box
    });

    let clear = button(text("清除").size(20))
        .padding([8, 24])
        .style(button::secondary)
        .on_press_maybe((!locked).then_some(Message::ClearDrawing));
    let submit = button(text(if verifying { "辨識中..." } else { "送出答案" }).size(20))
        .padding([8, 40])
        .style(button::primary)
        .on_press_maybe((!locked).then_some(Message::SubmitDrawing));

    let status: Element<'_, Message> = if verifying {
        text("老師批改中...").size(22).color(super::ACCENT).into()
    } else if app.canvas.show_warning() {
        text(phrases::EMPTY_CANVAS).size(22).color(super::ERROR).into()
    } else {
        super::feedback_banner(session.feedback())
    };

    column![
        text(format!("寫字練習 ({}/{})", targets.index() + 1, targets.len()))
            .size(24)
            .style(text::secondary),
        prompt,
        board,
        row![clear, submit].spacing(16),
        status,
    ]
    .spacing(16)
    .align_x(Alignment::Center)
    .into()
}
