pub mod appeal;
pub mod pending;
pub mod resolve;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Fed appeals bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Submit a fed unban appeal or admin request")]
    Appeal,
    #[command(description = "List pending appeals (admin only)")]
    Pending { page: String },
    #[command(description = "Approve an appeal by ID (admin only)")]
    Approve { id: String },
    #[command(description = "Reject an appeal by ID (admin only)")]
    Reject { id: String },
}
