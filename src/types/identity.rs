/// Caller identity resolved from a validated bearer token, attached to every
/// authenticated request as an extension.
#[derive(Clone, Debug)]
pub(crate) struct Subject {
    pub(crate) user_id: String,
    pub(crate) username: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) username: String,

    // Argon2 PHC string; never serialized into responses.
    pub(crate) password_hash: String,

    pub(crate) created_at: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct Profile {
    pub(crate) user_id: String,

    #[serde(default)]
    pub(crate) first_name: Option<String>,

    #[serde(default)]
    pub(crate) last_name: Option<String>,

    #[serde(default)]
    pub(crate) date_of_birth: Option<String>,

    #[serde(default)]
    pub(crate) address: Option<String>,

    pub(crate) created_at: String,
}
