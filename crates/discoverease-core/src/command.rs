//! # CRUD Commands
//!
//! Request and result types for the four catalog operations.
//!
//! Every user action becomes an [`AppCommand`] handed to a handler, which
//! answers with a [`CommandOutcome`] carrying the affected aggregate or a
//! typed error. Nothing here knows how results are rendered.

use serde::{Deserialize, Serialize};

use crate::types::{AppAggregate, NewAppForm, UpdateAppForm};

/// A CRUD request against the app aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AppCommand {
    /// Create application, developer and pricing rows.
    Create(NewAppForm),

    /// Look up an application by exact name.
    Read { app_name: String },

    /// Change name, genre, developer name and price of an existing app.
    Update(UpdateAppForm),

    /// Remove an app and its linked rows.
    Delete { app_id: String },
}

impl AppCommand {
    /// Short action name, used in logs.
    pub fn action(&self) -> &'static str {
        match self {
            AppCommand::Create(_) => "create",
            AppCommand::Read { .. } => "read",
            AppCommand::Update(_) => "update",
            AppCommand::Delete { .. } => "delete",
        }
    }
}

/// Successful result of an [`AppCommand`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "app", rename_all = "snake_case")]
pub enum CommandOutcome {
    Created(AppAggregate),
    Found(AppAggregate),
    Updated(AppAggregate),
    /// The aggregate as it was before removal.
    Deleted(AppAggregate),
}

impl CommandOutcome {
    /// Returns the affected aggregate.
    pub fn aggregate(&self) -> &AppAggregate {
        match self {
            CommandOutcome::Created(agg)
            | CommandOutcome::Found(agg)
            | CommandOutcome::Updated(agg)
            | CommandOutcome::Deleted(agg) => agg,
        }
    }

    /// User-facing confirmation line.
    pub fn message(&self) -> &'static str {
        match self {
            CommandOutcome::Created(_) => "App created successfully!",
            CommandOutcome::Found(_) => "App read successfully!",
            CommandOutcome::Updated(_) => "App updated successfully!",
            CommandOutcome::Deleted(_) => "App and related records deleted successfully!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::sample_aggregate;

    #[test]
    fn test_command_serializes_with_action_tag() {
        let cmd = AppCommand::Delete {
            app_id: "A1".to_string(),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["action"], "delete");
        assert_eq!(json["app_id"], "A1");
        assert_eq!(cmd.action(), "delete");
    }

    #[test]
    fn test_outcome_exposes_aggregate() {
        let outcome = CommandOutcome::Deleted(sample_aggregate());
        assert_eq!(outcome.aggregate().app_id(), "A1");
        assert!(outcome.message().contains("deleted"));
    }
}
