use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::auth;
use crate::bot::commands::{appeal, pending, resolve, Command};
use crate::database::connection::DatabaseManager;
use crate::database::models::AppealStatus;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    db: DatabaseManager,
    admin_user_id: i64,
) -> ResponseResult<()> {
    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
        Command::Start => {
            bot.send_message(
                msg.chat.id,
                "📝 Use /appeal to submit a FedBan appeal or request Fed Admin status",
            )
            .await?;
        }
        Command::Appeal => {
            appeal::handle_appeal(bot, msg).await?;
        }
        Command::Pending { page } => {
            if ensure_admin(&bot, &msg, admin_user_id).await? {
                pending::handle_pending(bot, msg, page, &db).await?;
            }
        }
        Command::Approve { id } => {
            if ensure_admin(&bot, &msg, admin_user_id).await? {
                resolve::handle_resolve(bot, msg, id, AppealStatus::Approved, &db).await?;
            }
        }
        Command::Reject { id } => {
            if ensure_admin(&bot, &msg, admin_user_id).await? {
                resolve::handle_resolve(bot, msg, id, AppealStatus::Rejected, &db).await?;
            }
        }
    }
    Ok(())
}

/// Admin gate for review commands. Replies with the unauthorized message and
/// reports `false` when the sender is not the configured administrator.
async fn ensure_admin(bot: &Bot, msg: &Message, admin_user_id: i64) -> ResponseResult<bool> {
    let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(0);
    if auth::is_admin(admin_user_id, user_id) {
        return Ok(true);
    }

    tracing::warn!("Unauthorized admin command from user {}", user_id);
    bot.send_message(msg.chat.id, "⛔ Unauthorized access!").await?;
    Ok(false)
}
