/// Blocking native message boxes
use crate::APP_NAME;
use rfd::{MessageButtons, MessageDialog, MessageLevel};

/// Something the user has to acknowledge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

pub fn show(notice: &Notice) {
    let (level, text) = match notice {
        Notice::Info(text) => (MessageLevel::Info, text),
        Notice::Error(text) => {
            tracing::error!("{}", text);
            (MessageLevel::Error, text)
        }
    };

    let _ = MessageDialog::new()
        .set_level(level)
        .set_title(APP_NAME)
        .set_description(text.as_str())
        .set_buttons(MessageButtons::Ok)
        .show();
}
