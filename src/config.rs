use clap::{ArgAction, Parser};
use std::time::Duration;

use crate::provider::{Provider, ProviderKind};

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "content-gateway")]
#[command(about = "Content generation API with provider fallback and caching")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Cache TTL in seconds
    #[arg(short, long, default_value_t = 3600)]
    pub cache_ttl: u64,

    // How often expired cache entries are swept, in seconds
    #[arg(long, default_value_t = 300)]
    pub purge_interval: u64,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 10)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Timeout for a single provider call, in seconds
    #[arg(long, default_value_t = 30)]
    pub provider_timeout: u64,

    // Hugging Face inference endpoint
    #[arg(
        long,
        default_value = "https://api-inference.huggingface.co/models/gpt2"
    )]
    pub huggingface_url: String,

    // Hugging Face token, the provider stays disabled without it
    #[arg(long, env = "HUGGINGFACE_API_TOKEN", hide_env_values = true)]
    pub huggingface_token: Option<String>,

    // Ollama generate endpoint
    #[arg(long, default_value = "http://localhost:11434/api/generate")]
    pub ollama_url: String,

    #[arg(long, default_value = "llama2")]
    pub ollama_model: String,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub ollama_enabled: bool,

    // Generic text-generation server, enabled when set
    // Example: "http://localhost:5000/api/v1/generate"
    #[arg(long)]
    pub textgen_url: Option<String>,

    #[arg(long, default_value = "default")]
    pub textgen_model: String,

    // Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    // Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval.max(1))
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout)
    }

    /// Provider chain in the order it is tried.
    pub fn providers(&self) -> Vec<Provider> {
        let token = self
            .huggingface_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let mut huggingface = Provider::new(
            "huggingface",
            ProviderKind::HuggingFace,
            &self.huggingface_url,
            "",
        )
        .with_enabled(token.is_some());
        if let Some(token) = token {
            huggingface = huggingface.with_header("Authorization", format!("Bearer {}", token));
        }

        let ollama = Provider::new(
            "ollama",
            ProviderKind::Ollama,
            &self.ollama_url,
            &self.ollama_model,
        )
        .with_enabled(self.ollama_enabled);

        let textgen = Provider::new(
            "textgen",
            ProviderKind::TextGen,
            self.textgen_url.clone().unwrap_or_default(),
            &self.textgen_model,
        )
        .with_enabled(self.textgen_url.is_some());

        vec![huggingface, ollama, textgen]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["content-gateway"]).unwrap();
        assert_eq!(args.port, 8080);
        assert_eq!(args.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(args.provider_timeout(), Duration::from_secs(30));
        assert!(args.ollama_enabled);
    }

    #[test]
    fn test_provider_order_and_enablement() {
        let args = Args::try_parse_from([
            "content-gateway",
            "--huggingface-token",
            "hf_abc",
            "--ollama-enabled",
            "false",
            "--textgen-url",
            "http://localhost:5000/api/v1/generate",
        ])
        .unwrap();

        let providers = args.providers();
        let names: Vec<&str> = providers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["huggingface", "ollama", "textgen"]);

        assert!(providers[0].enabled);
        assert_eq!(
            providers[0].headers,
            vec![("Authorization".to_string(), "Bearer hf_abc".to_string())]
        );
        assert!(!providers[1].enabled);
        assert!(providers[2].enabled);
        assert_eq!(providers[2].endpoint, "http://localhost:5000/api/v1/generate");
    }

    #[test]
    fn test_huggingface_disabled_without_token() {
        let args = Args::try_parse_from(["content-gateway", "--huggingface-token", " "]).unwrap();
        let providers = args.providers();
        assert!(!providers[0].enabled);
        assert!(providers[0].headers.is_empty());
        assert!(!providers[2].enabled);
    }
}
