use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub resend_api_key: String,
    pub resend_base_url: String,
    pub from_email: String,
    pub consultation_email: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            resend_api_key: std::env::var("RESEND_API_KEY")
                .map_err(|_| anyhow::anyhow!("RESEND_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("RESEND_API_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            resend_base_url: std::env::var("RESEND_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("RESEND_BASE_URL must start with http:// or https://");
                    }
                    Ok(url)
                })
                .transpose()?
                .unwrap_or_else(|| "https://api.resend.com".to_string()),
            from_email: std::env::var("FROM_EMAIL")
                .map_err(|_| anyhow::anyhow!("FROM_EMAIL environment variable required"))
                .and_then(|addr| {
                    if addr.trim().is_empty() {
                        anyhow::bail!("FROM_EMAIL cannot be empty");
                    }
                    if !addr.contains('@') {
                        anyhow::bail!("FROM_EMAIL must be an email address");
                    }
                    Ok(addr)
                })?,
            consultation_email: std::env::var("CONSULTATION_EMAIL")
                .map_err(|_| anyhow::anyhow!("CONSULTATION_EMAIL environment variable required"))
                .and_then(|addr| {
                    if addr.trim().is_empty() {
                        anyhow::bail!("CONSULTATION_EMAIL cannot be empty");
                    }
                    if !addr.contains('@') {
                        anyhow::bail!("CONSULTATION_EMAIL must be an email address");
                    }
                    Ok(addr)
                })?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Resend base URL: {}", config.resend_base_url);
        tracing::debug!("From address: {}", config.from_email);
        tracing::debug!("Consultation inbox: {}", config.consultation_email);
        tracing::debug!("Server port: {}", config.port);

        Ok(config)
    }
}
