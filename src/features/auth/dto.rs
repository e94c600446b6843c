use serde::Deserialize;

/// Credentials posted by the login forms
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginFormDto {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginFormDto {
    /// Both fields present and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|s| !s.is_empty())?;
        let password = self.password.as_deref().filter(|s| !s.is_empty())?;
        Some((username, password))
    }
}
