/// Runtime settings shared by both demo variants.
///
/// Everything here is a hardcoded constant: the demo has to behave the same
/// on every machine, so there is no config file and no environment lookup.
/// The only runtime override is the `--port` flag on the CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection string. Both variants share one database file.
    pub database_url: String,

    /// Key material for signing the hardened variant's session cookie.
    /// Must stay at least 64 bytes long or cookie key construction panics.
    pub secret_key: String,

    /// Characters the request gate refuses in any submitted form value.
    pub blacklist: String,

    /// Default listen port for the injectable variant.
    pub vulnerable_port: u16,

    /// Default listen port for the parameterized variant.
    pub hardened_port: u16,

    /// How many generated accounts are appended to the fixed seed list.
    pub random_user_count: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:users.db".to_string(),
            secret_key:
                "your-secret-key-your-secret-key-your-secret-key-your-secret-key-your-secret-key"
                    .to_string(),
            blacklist: "';--\"".to_string(),
            vulnerable_port: 5000,
            hardened_port: 5001,
            random_user_count: 20,
        }
    }
}
