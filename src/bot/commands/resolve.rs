use teloxide::prelude::*;

use crate::database::connection::DatabaseManager;
use crate::database::models::{Appeal, AppealStatus};
use crate::utils::validation::parse_appeal_id;

/// Applies an approve/reject decision to an appeal and notifies its owner.
///
/// The status update is authoritative once committed: a failure in the
/// follow-up owner notification is logged and reported to the admin, but the
/// resolution is not rolled back.
pub async fn handle_resolve(
    bot: Bot,
    msg: Message,
    raw_id: String,
    status: AppealStatus,
    db: &DatabaseManager,
) -> ResponseResult<()> {
    let command_name = match status {
        AppealStatus::Approved => "approve",
        AppealStatus::Rejected => "reject",
        AppealStatus::Pending => {
            tracing::error!("handle_resolve called with a non-terminal status");
            return Ok(());
        }
    };

    let appeal_id = match parse_appeal_id(&raw_id) {
        Ok(appeal_id) => appeal_id,
        Err(e) => {
            tracing::warn!("Rejected /{} argument '{}': {}", command_name, raw_id, e);
            bot.send_message(msg.chat.id, format!("Usage: /{command_name} <appeal_id>"))
                .await?;
            return Ok(());
        }
    };

    let affected = match Appeal::update_status(&db.pool, appeal_id, status).await {
        Ok(affected) => affected,
        Err(e) => {
            tracing::error!("Failed to update appeal {}: {}", appeal_id, e);
            bot.send_message(msg.chat.id, "❌ Error processing request").await?;
            return Ok(());
        }
    };

    if affected == 0 {
        bot.send_message(msg.chat.id, "⚠ Appeal ID not found!").await?;
        return Ok(());
    }

    let user_id = match Appeal::get_user_id(&db.pool, appeal_id).await {
        Ok(Some(user_id)) => user_id,
        Ok(None) => {
            tracing::error!("Appeal {} vanished after its status update", appeal_id);
            bot.send_message(msg.chat.id, "❌ Error processing request").await?;
            return Ok(());
        }
        Err(e) => {
            tracing::error!("Failed to look up the owner of appeal {}: {}", appeal_id, e);
            bot.send_message(msg.chat.id, "❌ Error processing request").await?;
            return Ok(());
        }
    };

    tracing::info!("Appeal {} {} for user {}", appeal_id, status.as_str(), user_id);
    bot.send_message(
        msg.chat.id,
        format!("{} appeal #{}", status.display_name(), appeal_id),
    )
    .await?;

    let notification = format!(
        "📨 Your appeal has been {}!\n\nReference ID: {}",
        status.as_str(),
        appeal_id
    );
    if let Err(e) = bot.send_message(ChatId(user_id), notification).await {
        tracing::warn!(
            "Failed to notify user {} about appeal {}: {}",
            user_id,
            appeal_id,
            e
        );
        bot.send_message(msg.chat.id, "❌ Error processing request").await?;
    }

    Ok(())
}
