use core::time::Duration;

pub const DEFAULT_BASE_URL: &str =
    "https://www.holidaycheck.de/dhr/bewertungen-dominikanische-republik/37c6c7e2-d224-3175-88c1-e6e115718836";

pub const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// How page markup is retrieved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TransportKind {
    /// Plain HTTP GET of the listing page.
    #[default]
    Direct,
    /// Navigate a headless Chrome tab and read back the rendered document.
    Browser,
}

#[derive(Clone, Debug, clap::Args)]
pub struct CrawlConfig {
    /// Listing URL of the first page; later pages append `?p=<n>`.
    #[arg(long, env = "REVIEW_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, env = "REVIEW_TRANSPORT", value_enum, default_value_t)]
    pub transport: TransportKind,

    /// Show the browser window (only meaningful with `--transport browser`).
    #[arg(long)]
    pub headful: bool,
}

#[derive(Clone, Debug, clap::Args)]
pub struct DbConfig {
    /// Host name, or a directory holding the PostgreSQL socket.
    #[arg(long = "db-host", env = "DB_HOST", default_value = "/var/run/postgresql")]
    pub host: String,

    #[arg(long = "db-port", env = "DB_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "db-user", env = "DB_USER", default_value = "postgres")]
    pub user: String,

    #[arg(long = "db-name", env = "DB_NAME", default_value = "postgres")]
    pub dbname: String,

    #[arg(long = "db-password", env = "DB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl DbConfig {
    pub fn to_postgres(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .user(&self.user)
            .dbname(&self.dbname)
            .connect_timeout(CONNECTION_TIMEOUT);
        if let Some(password) = &self.password {
            config.password(password);
        }
        config
    }
}
