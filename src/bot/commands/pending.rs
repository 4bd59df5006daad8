use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::database::connection::DatabaseManager;
use crate::database::models::{Appeal, AppealStatus};
use crate::utils::datetime::format_timestamp;
use crate::utils::validation::parse_page_argument;

/// Appeals shown per page of the review queue.
pub const PAGE_SIZE: i64 = 5;

pub async fn handle_pending(
    bot: Bot,
    msg: Message,
    page_arg: String,
    db: &DatabaseManager,
) -> ResponseResult<()> {
    let page = match parse_page_argument(&page_arg) {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!("Rejected /pending argument '{}': {}", page_arg, e);
            bot.send_message(msg.chat.id, "Usage: /pending [page]").await?;
            return Ok(());
        }
    };

    match build_pending_view(db, page).await {
        Ok(Some((text, keyboard))) => {
            let mut request = bot.send_message(msg.chat.id, text);
            if let Some(keyboard) = keyboard {
                request = request.reply_markup(keyboard);
            }
            request.await?;
        }
        Ok(None) => {
            bot.send_message(msg.chat.id, "No pending appeals!").await?;
        }
        Err(e) => {
            tracing::error!("Failed to load pending appeals: {}", e);
            bot.send_message(msg.chat.id, "❌ Error processing request").await?;
        }
    }

    Ok(())
}

/// Renders one page of the pending queue. Returns `None` when the requested
/// page slice is empty, which also covers pages past the end.
pub async fn build_pending_view(
    db: &DatabaseManager,
    page: i64,
) -> Result<Option<(String, Option<InlineKeyboardMarkup>)>, sqlx::Error> {
    let total = Appeal::count_by_status(&db.pool, AppealStatus::Pending).await?;
    let appeals =
        Appeal::list_by_status(&db.pool, AppealStatus::Pending, PAGE_SIZE, page * PAGE_SIZE)
            .await?;

    if appeals.is_empty() {
        return Ok(None);
    }

    let mut lines = vec![format!("📋 Pending Appeals (Page {}):\n", page + 1)];
    for appeal in &appeals {
        lines.push(format!(
            "\nID: {}\nUser: @{} (ID: {})\nType: {}\nTime: {}\n───────────────",
            appeal.id,
            appeal.username,
            appeal.user_id,
            appeal.appeal_type.as_str(),
            format_timestamp(&appeal.timestamp),
        ));
    }

    Ok(Some((lines.join("\n"), page_keyboard(page, total))))
}

pub fn has_previous_page(page: i64) -> bool {
    page > 0
}

pub fn has_next_page(page: i64, total: i64) -> bool {
    (page + 1) * PAGE_SIZE < total
}

/// Previous/Next controls for the current page, `None` when neither applies.
pub fn page_keyboard(page: i64, total: i64) -> Option<InlineKeyboardMarkup> {
    let mut row = Vec::new();
    if has_previous_page(page) {
        row.push(InlineKeyboardButton::callback(
            "⬅ Previous",
            format!("page_{}", page - 1),
        ));
    }
    if has_next_page(page, total) {
        row.push(InlineKeyboardButton::callback(
            "Next ➡",
            format!("page_{}", page + 1),
        ));
    }

    if row.is_empty() {
        None
    } else {
        Some(InlineKeyboardMarkup::new(vec![row]))
    }
}
