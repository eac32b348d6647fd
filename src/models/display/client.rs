//! Client display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Client;
use crate::output::formatters::{format_active, opt_str};

/// Client row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ClientDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "COUNTRY")]
    pub country: String,

    #[tabled(rename = "TIMEZONE")]
    pub timezone: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<Client> for ClientDisplay {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            email: opt_str(&client.email),
            country: opt_str(&client.country),
            timezone: client.timezone,
            status: format_active(client.is_active),
        }
    }
}
