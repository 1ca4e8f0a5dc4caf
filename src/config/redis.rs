use serde::Deserialize;
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug, Deserialize)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub password: Option<SecretString>,
}

impl RedisSettings {
    /// Connection URL, with the password only when one is configured
    pub fn get_redis_url(&self) -> SecretString {
        let url = match &self.password {
            Some(password) if !password.expose_secret().is_empty() => format!(
                "redis://:{}@{}:{}",
                password.expose_secret(), self.host, self.port
            ),
            _ => format!("redis://{}:{}", self.host, self.port),
        };
        SecretString::new(url.into_boxed_str())
    }
}
