use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::database::models::AppealType;

/// Shows the appeal type selection keyboard. The actual submission happens
/// in the callback handler once the user taps a button.
pub async fn handle_appeal(bot: Bot, msg: Message) -> ResponseResult<()> {
    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            "🔓 Fed Unban Appeal",
            AppealType::Unban.as_str(),
        )],
        vec![InlineKeyboardButton::callback(
            "👑 Fed Admin Request",
            AppealType::Admin.as_str(),
        )],
    ]);

    bot.send_message(msg.chat.id, "Select appeal type:")
        .reply_markup(keyboard)
        .await?;

    Ok(())
}
