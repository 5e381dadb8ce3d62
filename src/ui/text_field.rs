/// Labeled controlled text input
///
/// Change events flow up on every keystroke; the submit (Enter) event
/// doubles as the commit notification the shell uses to trigger the
/// participant check.

use iced::widget::{column, text, text_input};
use iced::Element;

pub fn labeled_input<'a, Message: Clone + 'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    required: bool,
    on_change: impl Fn(String) -> Message + 'a,
    on_commit: Option<Message>,
) -> Element<'a, Message> {
    let title = if required {
        format!("{} *", label)
    } else {
        label.to_string()
    };

    let mut input = text_input(placeholder, value)
        .on_input(on_change)
        .padding(12)
        .size(18);

    if let Some(message) = on_commit {
        input = input.on_submit(message);
    }

    column![text(title).size(18), input].spacing(8).into()
}
