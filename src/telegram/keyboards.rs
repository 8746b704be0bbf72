//! Keyboard construction: the persistent command menu and the one-tap
//! shortcut-pair keyboard, both laid out two buttons per row.

use crate::bot::{Markup, SHORTCUT_PAIRS};
use crate::telegram::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, ReplyKeyboardMarkup, ReplyMarkup,
};

pub const MENU_BUTTONS: &[&str] = &["/start", "/help", "/convert", "/often_exchanges"];

/// Renders the router's abstract markup intent into a concrete keyboard.
pub fn render(markup: Markup) -> ReplyMarkup {
    match markup {
        Markup::MainMenu => main_menu_keyboard(),
        Markup::ShortcutPairs => shortcut_pairs_keyboard(),
    }
}

fn main_menu_keyboard() -> ReplyMarkup {
    let buttons: Vec<KeyboardButton> = MENU_BUTTONS
        .iter()
        .map(|label| KeyboardButton {
            text: (*label).to_string(),
        })
        .collect();
    ReplyMarkup::Keyboard(ReplyKeyboardMarkup {
        keyboard: buttons.chunks(2).map(<[KeyboardButton]>::to_vec).collect(),
        resize_keyboard: true,
        input_field_placeholder: Some("Choose a command".to_string()),
    })
}

fn shortcut_pairs_keyboard() -> ReplyMarkup {
    // Label and callback payload are the same "SRC DST" string.
    let buttons: Vec<InlineKeyboardButton> = SHORTCUT_PAIRS
        .iter()
        .map(|pair| InlineKeyboardButton {
            text: (*pair).to_string(),
            callback_data: (*pair).to_string(),
        })
        .collect();
    ReplyMarkup::Inline(InlineKeyboardMarkup {
        inline_keyboard: buttons
            .chunks(2)
            .map(<[InlineKeyboardButton]>::to_vec)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn menu_lays_out_two_buttons_per_row() {
        let ReplyMarkup::Keyboard(menu) = render(Markup::MainMenu) else {
            panic!("main menu must be a reply keyboard");
        };
        assert_eq!(menu.keyboard.len(), 2);
        assert!(menu.keyboard.iter().all(|row| row.len() == 2));
        assert!(menu.resize_keyboard);
        assert_eq!(menu.keyboard[0][0].text, "/start");
    }

    #[test]
    fn shortcut_keyboard_covers_every_pair() {
        let ReplyMarkup::Inline(keyboard) = render(Markup::ShortcutPairs) else {
            panic!("shortcut pairs must be an inline keyboard");
        };
        let buttons: Vec<&InlineKeyboardButton> =
            keyboard.inline_keyboard.iter().flatten().collect();
        assert_eq!(buttons.len(), SHORTCUT_PAIRS.len());
        assert!(keyboard.inline_keyboard.iter().all(|row| row.len() <= 2));
        // Payload matches the label, which the router parses back.
        for (button, pair) in buttons.iter().zip(SHORTCUT_PAIRS) {
            assert_eq!(button.text, *pair);
            assert_eq!(button.callback_data, *pair);
        }
    }
}
