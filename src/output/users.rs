//! User output formatter

use super::common::{detail_table, escape_csv, print_detail_csv, print_json, print_yaml};
use crate::cli::OutputFormat;
use crate::ibm::user_management::UserProfile;
use comfy_table::{presets::NOTHING, Table};
use serde::Serialize;

/// Serializable user for structured list output (JSON/YAML)
#[derive(Serialize)]
struct SerializableUser {
    iam_id: String,
    user_id: String,
    name: String,
    email: String,
    state: String,
    added_on: String,
}

impl From<&UserProfile> for SerializableUser {
    fn from(user: &UserProfile) -> Self {
        Self {
            iam_id: user.iam_id.clone().unwrap_or_default(),
            user_id: user.user_id.clone().unwrap_or_default(),
            name: user.display_name(),
            email: user.email.clone().unwrap_or_default(),
            state: user.state.clone().unwrap_or_default(),
            added_on: user.added_on.clone().unwrap_or_default(),
        }
    }
}

/// Output a list of users in the specified format
pub fn output_users(users: &[UserProfile], format: OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => println!("{}", users_table(users, no_header)),
        OutputFormat::Csv => output_csv(users, no_header),
        OutputFormat::Json => {
            let rows: Vec<SerializableUser> = users.iter().map(SerializableUser::from).collect();
            print_json(&rows);
        }
        OutputFormat::Yaml => {
            let rows: Vec<SerializableUser> = users.iter().map(SerializableUser::from).collect();
            print_yaml(&rows);
        }
    }
}

/// Output a single user profile; JSON/YAML carry the full API object
pub fn output_user(user: &UserProfile, format: OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => println!("{}", detail_table(&detail_rows(user), no_header)),
        OutputFormat::Csv => print_detail_csv(&detail_rows(user), no_header),
        OutputFormat::Json => print_json(user),
        OutputFormat::Yaml => print_yaml(user),
    }
}

fn users_table(users: &[UserProfile], no_header: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec!["IAM ID", "USER ID", "NAME", "EMAIL", "STATE", "ADDED ON"]);
    }

    for user in users.iter().map(SerializableUser::from) {
        table.add_row(vec![
            user.iam_id,
            user.user_id,
            user.name,
            user.email,
            user.state,
            user.added_on,
        ]);
    }
    table
}

fn output_csv(users: &[UserProfile], no_header: bool) {
    if !no_header {
        println!("IAM_ID,USER_ID,NAME,EMAIL,STATE,ADDED_ON");
    }
    for user in users.iter().map(SerializableUser::from) {
        println!(
            "{},{},{},{},{},{}",
            escape_csv(&user.iam_id),
            escape_csv(&user.user_id),
            escape_csv(&user.name),
            escape_csv(&user.email),
            escape_csv(&user.state),
            escape_csv(&user.added_on)
        );
    }
}

fn detail_rows(user: &UserProfile) -> Vec<(&'static str, String)> {
    let field = |v: &Option<String>| v.clone().unwrap_or_default();
    vec![
        ("IAM ID", field(&user.iam_id)),
        ("USER ID", field(&user.user_id)),
        ("NAME", user.display_name()),
        ("EMAIL", field(&user.email)),
        ("STATE", field(&user.state)),
        ("REALM", field(&user.realm)),
        ("PHONE", field(&user.phonenumber)),
        ("ACCOUNT", field(&user.account_id)),
        ("ADDED ON", field(&user.added_on)),
    ]
}
