use serde::{Deserialize, Serialize};

// One row of the accounts file. Column names match the CSV header.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Account {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password_hash: String,  // SHA-256 hex digest, never the plain password
    #[serde(rename = "Full Name")]
    pub full_name: String,
    #[serde(rename = "Email")]
    pub email: String,
}
