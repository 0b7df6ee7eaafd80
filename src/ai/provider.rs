//! Provider catalog: endpoints, default models, auth schemes.

use serde::{Deserialize, Serialize};

/// Supported generation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Grok,
    Anthropic,
    Gemini,
}

/// How the API key travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `x-api-key: <key>` plus the provider's version header.
    XApiKey,
    /// `?key=<key>` query parameter.
    Query,
}

impl Provider {
    /// Model used when the configuration names none.
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-5",
            Self::Grok => "grok-beta",
            Self::Anthropic => "claude-3-sonnet-20240229",
            Self::Gemini => "gemini-pro",
        }
    }

    /// Request URL for `model` (before any auth query parameter).
    #[must_use]
    pub fn endpoint(self, model: &str) -> String {
        match self {
            Self::OpenAi => "https://api.openai.com/v1/chat/completions".to_owned(),
            Self::Grok => "https://api.x.ai/v1/chat/completions".to_owned(),
            Self::Anthropic => "https://api.anthropic.com/v1/messages".to_owned(),
            Self::Gemini => format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent"
            ),
        }
    }

    #[must_use]
    pub const fn auth_scheme(self) -> AuthScheme {
        match self {
            Self::OpenAi | Self::Grok => AuthScheme::Bearer,
            Self::Anthropic => AuthScheme::XApiKey,
            Self::Gemini => AuthScheme::Query,
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "grok" => Ok(Self::Grok),
            "anthropic" => Ok(Self::Anthropic),
            "gemini" => Ok(Self::Gemini),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_endpoint_embeds_model() {
        let url = Provider::Gemini.endpoint("gemini-pro");
        assert!(url.ends_with("/models/gemini-pro:generateContent"));
    }

    #[test]
    fn test_provider_parse_round_trip() {
        for (text, provider) in [
            ("openai", Provider::OpenAi),
            ("grok", Provider::Grok),
            ("anthropic", Provider::Anthropic),
            ("gemini", Provider::Gemini),
        ] {
            assert_eq!(text.parse::<Provider>(), Ok(provider));
        }
        assert!("copilot".parse::<Provider>().is_err());
    }

    #[test]
    fn test_auth_schemes() {
        assert_eq!(Provider::OpenAi.auth_scheme(), AuthScheme::Bearer);
        assert_eq!(Provider::Anthropic.auth_scheme(), AuthScheme::XApiKey);
        assert_eq!(Provider::Gemini.auth_scheme(), AuthScheme::Query);
    }
}
