use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub opening_hour: u32,
    pub closing_hour: u32,
    pub sweep_interval_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let opening_hour = env::var("OPENING_HOUR")
            .ok()
            .and_then(|h| h.parse::<u32>().ok())
            .unwrap_or(10);
        let closing_hour = env::var("CLOSING_HOUR")
            .ok()
            .and_then(|h| h.parse::<u32>().ok())
            .unwrap_or(22);
        let sweep_interval_secs = env::var("SWEEP_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        Ok(Self {
            database_url,
            host,
            port,
            opening_hour,
            closing_hour,
            sweep_interval_secs,
        })
    }
}
