use chrono::Utc;
use teloxide::prelude::*;

use crate::bot::auth;
use crate::bot::commands::pending;
use crate::database::connection::DatabaseManager;
use crate::database::models::{Appeal, AppealType};
use crate::utils::datetime::format_timestamp;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    db: DatabaseManager,
    admin_user_id: i64,
) -> ResponseResult<()> {
    let user_id = q.from.id.0 as i64;
    let username = q.from.username.as_deref().unwrap_or("unknown").to_string();

    let Some(data) = q.data.clone() else {
        bot.answer_callback_query(q.id)
            .text("Invalid callback data")
            .await?;
        return Ok(());
    };

    tracing::info!("Callback received: '{}' from @{} ({})", data, username, user_id);

    if let Some(page_arg) = data.strip_prefix("page_") {
        return handle_page_callback(bot, q, page_arg, &db, admin_user_id).await;
    }

    handle_type_selection(bot, q, &data, &db, admin_user_id).await
}

/// Records the appeal type the user tapped. On success the selection message
/// becomes the confirmation and the admin is notified; an unrecognized
/// payload writes nothing.
async fn handle_type_selection(
    bot: Bot,
    q: CallbackQuery,
    data: &str,
    db: &DatabaseManager,
    admin_user_id: i64,
) -> ResponseResult<()> {
    let user_id = q.from.id.0 as i64;
    let username = q.from.username.as_deref().unwrap_or("unknown").to_string();

    let appeal_type = match AppealType::parse(data) {
        Ok(appeal_type) => appeal_type,
        Err(e) => {
            tracing::warn!("Invalid appeal type from user {}: {}", user_id, e);
            if let Some(message) = q.message.as_ref() {
                bot.edit_message_text(
                    message.chat.id,
                    message.id,
                    "❌ Invalid appeal type selected!",
                )
                .await?;
            }
            bot.answer_callback_query(q.id).await?;
            return Ok(());
        }
    };

    let timestamp = Utc::now().to_rfc3339();
    match Appeal::create(&db.pool, user_id, &username, appeal_type, &timestamp).await {
        Ok(appeal_id) => {
            tracing::info!(
                "Appeal {} created: @{} requested {}",
                appeal_id,
                username,
                appeal_type.as_str()
            );
            if let Some(message) = q.message.as_ref() {
                bot.edit_message_text(
                    message.chat.id,
                    message.id,
                    format!("✅ {} appeal submitted!", appeal_type.display_name()),
                )
                .await?;
            }
            notify_admin(&bot, admin_user_id, &username, appeal_type, &timestamp).await;
            bot.answer_callback_query(q.id).await?;
        }
        Err(e) => {
            tracing::error!("Failed to save appeal: {}", e);
            bot.answer_callback_query(q.id)
                .text("❌ Error processing request")
                .await?;
        }
    }

    Ok(())
}

/// Best-effort admin notification; a delivery failure never unwinds the
/// already-committed appeal.
async fn notify_admin(
    bot: &Bot,
    admin_user_id: i64,
    username: &str,
    appeal_type: AppealType,
    timestamp: &str,
) {
    if admin_user_id == 0 {
        tracing::warn!("ADMIN_USER_ID is not configured; skipping admin notification");
        return;
    }

    let text = format!(
        "🚨 New Appeal\nUser: @{}\nType: {}\nTime: {}\n\nUse /pending to view all appeals",
        username,
        appeal_type.as_str(),
        format_timestamp(timestamp)
    );
    if let Err(e) = bot.send_message(ChatId(admin_user_id), text).await {
        tracing::warn!("Failed to notify admin about new appeal: {}", e);
    }
}

/// Previous/Next taps on the review queue: edits the list message in place
/// to the requested page.
async fn handle_page_callback(
    bot: Bot,
    q: CallbackQuery,
    page_arg: &str,
    db: &DatabaseManager,
    admin_user_id: i64,
) -> ResponseResult<()> {
    if !auth::is_admin(admin_user_id, q.from.id.0 as i64) {
        bot.answer_callback_query(q.id)
            .text("⛔ Unauthorized access!")
            .await?;
        return Ok(());
    }

    let page: i64 = match page_arg.parse() {
        Ok(page) if page >= 0 => page,
        _ => {
            bot.answer_callback_query(q.id).text("Invalid page").await?;
            return Ok(());
        }
    };

    match pending::build_pending_view(db, page).await {
        Ok(Some((text, keyboard))) => {
            if let Some(message) = q.message.as_ref() {
                let mut request = bot.edit_message_text(message.chat.id, message.id, text);
                if let Some(keyboard) = keyboard {
                    request = request.reply_markup(keyboard);
                }
                request.await?;
            }
            bot.answer_callback_query(q.id).await?;
        }
        Ok(None) => {
            if let Some(message) = q.message.as_ref() {
                bot.edit_message_text(message.chat.id, message.id, "No pending appeals!")
                    .await?;
            }
            bot.answer_callback_query(q.id).await?;
        }
        Err(e) => {
            tracing::error!("Failed to load pending appeals page {}: {}", page, e);
            bot.answer_callback_query(q.id)
                .text("❌ Error processing request")
                .await?;
        }
    }

    Ok(())
}
