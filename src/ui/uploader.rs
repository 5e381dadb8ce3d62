/// Image slot card
///
/// Empty slots show a pick button, filled slots show the preview with a
/// clear action. The shell owns the value; this widget only renders it
/// and reports clicks.

use iced::widget::{button, column, container, horizontal_space, row, text};
use iced::{Alignment, Element, Length};

use crate::photo::UploadedImage;

pub fn image_slot<'a, Message: Clone + 'a>(
    label: &'a str,
    value: Option<&'a UploadedImage>,
    busy: bool,
    on_pick: Message,
    on_clear: Message,
) -> Element<'a, Message> {
    let title = text(format!("{} *", label)).size(18);

    let body: Element<'a, Message> = match value {
        None => {
            let prompt = if busy { "Loading..." } else { "Choose a photo" };
            button(
                container(text(prompt).size(16))
                    .width(Length::Fill)
                    .center_x(Length::Fill)
                    .padding(28),
            )
            .on_press_maybe((!busy).then_some(on_pick))
            .width(Length::Fill)
            .into()
        }
        Some(photo) => container(
            column![
                iced::widget::image(photo.preview.clone()).width(Length::Fill),
                row![
                    text(format!("✅ {}", photo.filename)).size(14),
                    horizontal_space(),
                    button(text("Remove").size(14)).on_press(on_clear),
                ]
                .spacing(10)
                .padding(8)
                .align_y(Alignment::Center),
            ]
            .spacing(4),
        )
        .style(container::bordered_box)
        .width(Length::Fill)
        .into(),
    };

    column![title, body].spacing(8).into()
}
