use std::str::FromStr;

use accord_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// One action constraint row as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActionConstraint {
    time_stamp: String,
    constraint_target: String,
    constraint: String,
    constraint_owner: String,
    file: String,
}

impl ActionConstraint {
    /// Creates a constraint row from its five display fields.
    #[must_use]
    pub fn new(
        time_stamp: impl Into<String>,
        constraint_target: impl Into<String>,
        constraint: impl Into<String>,
        constraint_owner: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            time_stamp: time_stamp.into(),
            constraint_target: constraint_target.into(),
            constraint: constraint.into(),
            constraint_owner: constraint_owner.into(),
            file: file.into(),
        }
    }

    /// Returns when the constraint was recorded.
    #[must_use]
    pub fn time_stamp(&self) -> &str {
        self.time_stamp.as_str()
    }

    /// Returns the user the constraint applies to.
    #[must_use]
    pub fn constraint_target(&self) -> &str {
        self.constraint_target.as_str()
    }

    /// Returns the human-readable restriction.
    #[must_use]
    pub fn constraint(&self) -> &str {
        self.constraint.as_str()
    }

    /// Returns the user who owns the constraint.
    #[must_use]
    pub fn constraint_owner(&self) -> &str {
        self.constraint_owner.as_str()
    }

    /// Returns the constrained file name.
    #[must_use]
    pub fn file(&self) -> &str {
        self.file.as_str()
    }
}

/// Actions a constraint can be requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstrainedAction {
    /// Adding a user to a resource.
    #[serde(rename = "Add Permission")]
    AddPermission,
    /// Removing a user from a resource.
    #[serde(rename = "Remove Permission")]
    RemovePermission,
    /// Changing a user's permission level.
    #[serde(rename = "Update Permission")]
    UpdatePermission,
    /// Moving the file.
    Move,
    /// Editing the file.
    Edit,
    /// Deleting the file.
    Delete,
}

impl ConstrainedAction {
    /// Returns the transport value understood by the backend.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddPermission => "Add Permission",
            Self::RemovePermission => "Remove Permission",
            Self::UpdatePermission => "Update Permission",
            Self::Move => "Move",
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }
}

impl FromStr for ConstrainedAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace(['-', '_'], " ").as_str() {
            "add permission" => Ok(Self::AddPermission),
            "remove permission" => Ok(Self::RemovePermission),
            "update permission" => Ok(Self::UpdatePermission),
            "move" => Ok(Self::Move),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            _ => Err(AppError::Validation(format!(
                "unknown constrained action '{value}'"
            ))),
        }
    }
}

/// Request to restrict one user's action on one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintRequest {
    #[serde(rename = "fileName")]
    file_name: NonEmptyString,
    #[serde(rename = "fileID")]
    file_id: NonEmptyString,
    #[serde(rename = "performingUser")]
    performing_user: NonEmptyString,
    action: ConstrainedAction,
}

impl ConstraintRequest {
    /// Creates a validated constraint request.
    pub fn new(
        file_name: impl Into<String>,
        file_id: impl Into<String>,
        performing_user: impl Into<String>,
        action: ConstrainedAction,
    ) -> AppResult<Self> {
        Ok(Self {
            file_name: NonEmptyString::new(file_name)?,
            file_id: NonEmptyString::new(file_id)?,
            performing_user: NonEmptyString::new(performing_user)?,
            action,
        })
    }

    /// Returns the file display name.
    #[must_use]
    pub fn file_name(&self) -> &NonEmptyString {
        &self.file_name
    }

    /// Returns the file identifier.
    #[must_use]
    pub fn file_id(&self) -> &NonEmptyString {
        &self.file_id
    }

    /// Returns the user being constrained.
    #[must_use]
    pub fn performing_user(&self) -> &NonEmptyString {
        &self.performing_user
    }

    /// Returns the constrained action.
    #[must_use]
    pub fn action(&self) -> ConstrainedAction {
        self.action
    }
}
