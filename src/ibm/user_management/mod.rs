//! User Management v1 - account users, invitations and user settings

mod api;
mod commands;
pub mod models;
pub mod options;

pub use api::UserManagementV1;
pub use commands::run_users_command;
pub use models::{InvitedUserList, UserList, UserProfile, UserSettings};
pub use options::{
    InviteUsersOptions, ListUsersOptions, UpdateUserProfileOptions, UpdateUserSettingsOptions,
    UserState,
};
