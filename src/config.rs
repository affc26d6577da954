use anyhow::Result;
use config::{Config, File};
use directories::ProjectDirs;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Theme {
    pub bg: String,      // background
    pub main: String,    // brand color (tokens, active highlights)
    pub caret: String,   // cursor block color
    pub text: String,    // story text
    pub sub: String,     // hints / inactive elements
    #[serde(alias = "subAlt")]
    pub sub_alt: String, // subtle UI elements (footer, borders)
    pub error: String,   // validation and failure messages
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: "#2c2e34".to_string(),
            main: "#e2b714".to_string(),
            caret: "#e2b714".to_string(),
            text: "#d1d0c5".to_string(),
            sub: "#646669".to_string(),
            sub_alt: "#45474d".to_string(),
            error: "#ca4754".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    pub base_url: String,
    pub model: String,
    /// environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 60,
            max_tokens: 500,
            temperature: 0.2,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub theme: Theme,
    pub generation: GenerationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let theme = Theme::default();
        let generation = GenerationConfig::default();

        let mut builder = Config::builder()
            .set_default("theme.bg", theme.bg)?
            .set_default("theme.main", theme.main)?
            .set_default("theme.caret", theme.caret)?
            .set_default("theme.text", theme.text)?
            .set_default("theme.sub", theme.sub)?
            .set_default("theme.subAlt", theme.sub_alt)?
            .set_default("theme.error", theme.error)?
            .set_default("generation.base_url", generation.base_url)?
            .set_default("generation.model", generation.model)?
            .set_default("generation.api_key_env", generation.api_key_env)?
            .set_default("generation.timeout_secs", generation.timeout_secs as i64)?
            .set_default("generation.max_tokens", generation.max_tokens as i64)?
            .set_default("generation.temperature", generation.temperature)?;

        if let Some(proj_dirs) = ProjectDirs::from("", "", "madly") {
            let config_path = proj_dirs.config_dir().join("config.toml");

            if config_path.exists() {
                builder = builder.add_source(File::from(config_path));
            }
        }

        let cfg = builder.build()?;
        let app_config: AppConfig = cfg.try_deserialize()?;

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_defaults_match_service_contract() {
        let g = GenerationConfig::default();
        assert_eq!(g.model, "gpt-4");
        assert_eq!(g.max_tokens, 500);
        assert!((g.temperature - 0.2).abs() < f64::EPSILON);
    }
}
