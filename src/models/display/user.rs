//! User display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::User;
use crate::output::formatters::{format_active, opt_datetime_local};

/// User row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UserDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "USERNAME")]
    pub username: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "LAST LOGIN")]
    pub last_login: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<User> for UserDisplay {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.full_name,
            email: user.email,
            last_login: opt_datetime_local(&user.last_login),
            status: format_active(user.is_active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures;

    #[test]
    fn test_user_display_from_user() {
        let display = UserDisplay::from(fixtures::user(9));

        assert_eq!(display.id, 9);
        assert_eq!(display.username, "user9");
        assert_eq!(display.name, "Erin Moss");
        assert_eq!(display.last_login, "--");
        assert_eq!(display.status, "active");
    }
}
