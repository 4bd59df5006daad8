pub mod callback;
pub mod message;

use teloxide::{
    dispatching::{UpdateFilterExt, UpdateHandler},
    prelude::*,
};

use crate::database::connection::DatabaseManager;

/// Binds inbound updates to handler functions: one branch for commands, one
/// for callback queries.
pub struct BotHandler {
    pub db: DatabaseManager,
    pub admin_user_id: i64,
}

impl BotHandler {
    pub fn new(db: DatabaseManager, admin_user_id: i64) -> Self {
        Self { db, admin_user_id }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        let db = self.db.clone();
        let db_callback = self.db.clone();
        let admin_user_id = self.admin_user_id;

        dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<crate::bot::commands::Command>()
                    .endpoint(move |bot, msg, cmd| {
                        let db = db.clone();
                        async move {
                            message::command_handler(bot, msg, cmd, db, admin_user_id)
                                .await
                                .map_err(Into::into)
                        }
                    }),
            )
            .branch(Update::filter_callback_query().endpoint(move |bot, q| {
                let db = db_callback.clone();
                async move {
                    callback::callback_handler(bot, q, db, admin_user_id)
                        .await
                        .map_err(Into::into)
                }
            }))
    }
}
