//! iced canvas program rendering a `DrawingSurface`

use iced::mouse;
use iced::touch;
use iced::widget::canvas::{self, event, Frame, Geometry, Path, Stroke};
use iced::{Color, Rectangle, Renderer, Theme};

use super::messages::{Message, StrokeInput};
use crate::canvas::{self as surface, DrawingSurface, GUIDE_WIDTH, STROKE_WIDTH};

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::from_rgb8(r, g, b)
}

pub struct Board<'a> {
    pub surface: &'a DrawingSurface,
}

impl Board<'_> {
    fn point(position: iced::Point) -> surface::Point {
        surface::Point::new(position.x, position.y)
    }

    /// Touch positions arrive in window coordinates
    fn local(position: iced::Point, bounds: Rectangle) -> surface::Point {
        surface::Point::new(position.x - bounds.x, position.y - bounds.y)
    }
}

impl canvas::Program<Message> for Board<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        if self.surface.is_locked() {
            return (event::Status::Ignored, None);
        }

        let input = match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => cursor
                .position_in(bounds)
                .map(|p| StrokeInput::Begin(Self::point(p))),
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. })
                if self.surface.is_drawing() =>
            {
                // Leaving the board ends the stroke
                Some(match cursor.position_in(bounds) {
                    Some(p) => StrokeInput::Extend(Self::point(p)),
                    None => StrokeInput::End,
                })
            }
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
                if self.surface.is_drawing() =>
            {
                Some(StrokeInput::End)
            }
            canvas::Event::Touch(touch::Event::FingerPressed { position, .. })
                if bounds.contains(position) =>
            {
                Some(StrokeInput::Begin(Self::local(position, bounds)))
            }
            canvas::Event::Touch(touch::Event::FingerMoved { position, .. })
                if self.surface.is_drawing() =>
            {
                Some(StrokeInput::Extend(Self::local(position, bounds)))
            }
            canvas::Event::Touch(
                touch::Event::FingerLifted { .. } | touch::Event::FingerLost { .. },
            ) if self.surface.is_drawing() => Some(StrokeInput::End),
            _ => None,
        };

        match input {
            Some(input) => (event::Status::Captured, Some(Message::Stroke(input))),
            None => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let size = bounds.size();

        frame.fill_rectangle(iced::Point::ORIGIN, size, rgb(surface::BACKGROUND));

        let guide = Path::new(|b| {
            b.move_to(iced::Point::new(size.width / 2.0, 0.0));
            b.line_to(iced::Point::new(size.width / 2.0, size.height));
            b.move_to(iced::Point::new(0.0, size.height / 2.0));
            b.line_to(iced::Point::new(size.width, size.height / 2.0));
        });
        frame.stroke(
            &guide,
            Stroke::default()
                .with_width(GUIDE_WIDTH)
                .with_color(rgb(surface::GUIDE_COLOR)),
        );

        let ink = rgb(surface::INK_COLOR);
        for stroke in self.surface.strokes() {
            match stroke.as_slice() {
                [] => {}
                [dot] => frame.fill(
                    &Path::circle(iced::Point::new(dot.x, dot.y), STROKE_WIDTH / 2.0),
                    ink,
                ),
                [first, rest @ ..] => {
                    let path = Path::new(|b| {
                        b.move_to(iced::Point::new(first.x, first.y));
                        for p in rest {
                            b.line_to(iced::Point::new(p.x, p.y));
                        }
                    });
                    frame.stroke(
                        &path,
                        Stroke::default()
                            .with_width(STROKE_WIDTH)
                            .with_color(ink)
                            .with_line_cap(canvas::LineCap::Round)
                            .with_line_join(canvas::LineJoin::Round),
                    );
                }
            }
        }

        if self.surface.is_locked() {
            frame.fill_rectangle(
                iced::Point::ORIGIN,
                size,
                Color {
                    a: 0.6,
                    ..Color::WHITE
                },
            );
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if !cursor.is_over(bounds) {
            mouse::Interaction::default()
        } else if self.surface.is_locked() {
            mouse::Interaction::NotAllowed
        } else {
            mouse::Interaction::Crosshair
        }
    }
}
