//! DripBot assistant features.
//!
//! Each feature is one Messages API round trip: a fixed system prompt, the
//! user-supplied content, and response parsing. Structured features ask the
//! model for a JSON object, parse it leniently (missing fields fall back to
//! defaults), and clamp numeric values into their documented ranges.

use serde::{Deserialize, Serialize};

use super::client::ClaudeClient;
use super::error::ClaudeError;
use super::types::{ChatRole, ContentBlock, ImageSource, Message, MessageContent};

const CHAT_SYSTEM_PROMPT: &str = "You are DripBot, an enthusiastic AI fashion assistant for \
    DRIPDEN, a local fashion marketplace. You help users discover shops, find products, build \
    outfits, and stay on trend. Be friendly, use Gen Z language, and give personalized fashion \
    advice. Keep responses concise and engaging.";

const DRIP_SCORE_SYSTEM_PROMPT: &str = "You are an AI fashion critic for DRIPDEN. Analyze \
    outfit images and provide a drip score (1-100), constructive feedback, and 3 specific style \
    suggestions. Respond with only a JSON object: \
    {\"score\": number, \"feedback\": string, \"suggestions\": [string]}";

const SHOP_RECS_SYSTEM_PROMPT: &str = "You are a fashion shopping assistant. Based on user \
    preferences, recommend 5 shop types they'd love. Respond with only a JSON object: \
    {\"recommendations\": [{\"shopName\": string, \"reason\": string, \"matchScore\": number}]}";

const OUTFIT_SYSTEM_PROMPT: &str = "You are an AI outfit builder. Create complete outfit \
    suggestions based on user preferences. Respond with only a JSON object: \
    {\"outfit\": {\"items\": [{\"category\": string, \"description\": string, \
    \"style\": string}], \"totalVibe\": string, \"occasions\": [string]}}";

const DROP_FORECAST_SYSTEM_PROMPT: &str = "You are a fashion trend predictor. Analyze recent \
    trends and predict upcoming flash drops. Respond with only a JSON object: \
    {\"prediction\": string, \"confidence\": number (0-1), \"suggestedCategories\": [string]}";

const CHAT_FALLBACK_REPLY: &str =
    "Sorry, I couldn't process that. Try asking me something else!";

/// One prior exchange in a DripBot conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who spoke.
    pub role: ChatRole,
    /// What they said.
    pub content: String,
}

/// Drip-score analysis of an outfit image.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DripScore {
    /// Rating in [1, 100].
    pub score: i32,
    /// Constructive feedback.
    pub feedback: String,
    /// Specific style suggestions.
    pub suggestions: Vec<String>,
}

/// One recommended shop type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopRecommendation {
    pub shop_name: String,
    pub reason: String,
    pub match_score: f64,
}

/// Shop recommendations for a user's stated preferences.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShopRecommendations {
    #[serde(default)]
    pub recommendations: Vec<ShopRecommendation>,
}

/// Preferences driving the outfit builder.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OutfitPreferences {
    pub style: Option<String>,
    pub occasion: Option<String>,
    pub colors: Option<Vec<String>>,
    pub budget: Option<String>,
}

/// One piece of a suggested outfit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitPiece {
    pub category: String,
    pub description: String,
    pub style: String,
}

/// A complete suggested outfit.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    #[serde(default)]
    pub items: Vec<OutfitPiece>,
    #[serde(default)]
    pub total_vibe: String,
    #[serde(default)]
    pub occasions: Vec<String>,
}

/// Outfit-builder response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OutfitSuggestion {
    #[serde(default)]
    pub outfit: Outfit,
}

/// Flash-drop trend forecast.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DropForecast {
    #[serde(default)]
    pub prediction: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub suggested_categories: Vec<String>,
}

/// Chat with DripBot.
///
/// Returns the raw reply text.
///
/// # Errors
///
/// Returns `ClaudeError` if the API call fails.
pub async fn chat(
    client: &ClaudeClient,
    history: &[ChatTurn],
    message: &str,
) -> Result<String, ClaudeError> {
    let mut messages: Vec<Message> = history
        .iter()
        .map(|turn| Message::text(turn.role, turn.content.clone()))
        .collect();
    messages.push(Message::text(ChatRole::User, message));

    let response = client
        .chat(messages, Some(CHAT_SYSTEM_PROMPT.to_owned()), 500)
        .await?;

    let reply = response.text();
    if reply.is_empty() {
        return Ok(CHAT_FALLBACK_REPLY.to_owned());
    }

    Ok(reply)
}

/// Analyze an outfit image and rate its drip.
///
/// The score is always clamped to [1, 100] regardless of what the model
/// returns; missing fields fall back to defaults.
///
/// # Errors
///
/// Returns `ClaudeError` if the API call fails.
pub async fn analyze_drip(
    client: &ClaudeClient,
    image_base64: &str,
) -> Result<DripScore, ClaudeError> {
    #[derive(Deserialize, Default)]
    struct RawScore {
        score: Option<i64>,
        feedback: Option<String>,
        suggestions: Option<Vec<String>>,
    }

    let messages = vec![Message {
        role: ChatRole::User,
        content: MessageContent::Blocks(vec![
            ContentBlock::Text {
                text: "Rate this outfit's drip level and give me fashion feedback!".to_owned(),
            },
            ContentBlock::Image {
                source: ImageSource::base64_jpeg(image_base64),
            },
        ]),
    }];

    let response = client
        .chat(messages, Some(DRIP_SCORE_SYSTEM_PROMPT.to_owned()), 1000)
        .await?;

    let raw: RawScore = parse_json_reply(&response.text()).unwrap_or_default();

    #[allow(clippy::cast_possible_truncation)] // clamped into i32 range first
    let score = raw.score.unwrap_or(50).clamp(1, 100) as i32;

    Ok(DripScore {
        score,
        feedback: raw.feedback.unwrap_or_else(|| "Looking fresh!".to_owned()),
        suggestions: raw.suggestions.unwrap_or_default(),
    })
}

/// Recommend shop types for the user's stated style preferences.
///
/// # Errors
///
/// Returns `ClaudeError` if the API call fails.
pub async fn recommend_shops(
    client: &ClaudeClient,
    preferences: &str,
) -> Result<ShopRecommendations, ClaudeError> {
    let messages = vec![Message::text(
        ChatRole::User,
        format!("My style preferences: {preferences}"),
    )];

    let response = client
        .chat(messages, Some(SHOP_RECS_SYSTEM_PROMPT.to_owned()), 800)
        .await?;

    Ok(parse_json_reply(&response.text()).unwrap_or_default())
}

/// Build a complete outfit suggestion from preferences.
///
/// # Errors
///
/// Returns `ClaudeError` if the API call fails or the request body cannot
/// be serialized.
pub async fn suggest_outfit(
    client: &ClaudeClient,
    preferences: &OutfitPreferences,
) -> Result<OutfitSuggestion, ClaudeError> {
    let rendered = serde_json::to_string(preferences)
        .map_err(|e| ClaudeError::Parse(format!("Failed to encode preferences: {e}")))?;
    let messages = vec![Message::text(
        ChatRole::User,
        format!("Build me an outfit with these preferences: {rendered}"),
    )];

    let response = client
        .chat(messages, Some(OUTFIT_SYSTEM_PROMPT.to_owned()), 1000)
        .await?;

    Ok(parse_json_reply(&response.text()).unwrap_or_default())
}

/// Predict upcoming flash drops from recent trend keywords.
///
/// # Errors
///
/// Returns `ClaudeError` if the API call fails.
pub async fn forecast_drop(
    client: &ClaudeClient,
    recent_trends: &[String],
) -> Result<DropForecast, ClaudeError> {
    let messages = vec![Message::text(
        ChatRole::User,
        format!("Recent trends: {}", recent_trends.join(", ")),
    )];

    let response = client
        .chat(messages, Some(DROP_FORECAST_SYSTEM_PROMPT.to_owned()), 600)
        .await?;

    let mut forecast: DropForecast = parse_json_reply(&response.text()).unwrap_or_default();
    forecast.confidence = forecast.confidence.clamp(0.0, 1.0);

    Ok(forecast)
}

/// Parse a JSON object out of a model reply.
///
/// Tolerates replies wrapped in markdown code fences or surrounded by prose
/// by slicing from the first `{` to the last `}`.
fn parse_json_reply<T: serde::de::DeserializeOwned>(reply: &str) -> Option<T> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    let candidate = reply.get(start..=end)?;
    serde_json::from_str(candidate).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Default)]
    struct RawScore {
        score: Option<i64>,
        feedback: Option<String>,
        suggestions: Option<Vec<String>>,
    }

    fn clamp_score(raw: &RawScore) -> i32 {
        #[allow(clippy::cast_possible_truncation)]
        let score = raw.score.unwrap_or(50).clamp(1, 100) as i32;
        score
    }

    #[test]
    fn test_parse_json_reply_plain() {
        let parsed: RawScore =
            parse_json_reply(r#"{"score": 87, "feedback": "clean fit"}"#).expect("parses");
        assert_eq!(parsed.score, Some(87));
        assert_eq!(parsed.feedback.as_deref(), Some("clean fit"));
    }

    #[test]
    fn test_parse_json_reply_fenced() {
        let reply = "Here you go:\n```json\n{\"score\": 42}\n```";
        let parsed: RawScore = parse_json_reply(reply).expect("parses");
        assert_eq!(parsed.score, Some(42));
    }

    #[test]
    fn test_parse_json_reply_garbage() {
        let parsed: Option<RawScore> = parse_json_reply("no json here");
        assert!(parsed.is_none());
    }

    #[test]
    fn test_score_clamped_high() {
        let raw: RawScore = parse_json_reply(r#"{"score": 9000}"#).expect("parses");
        assert_eq!(clamp_score(&raw), 100);
    }

    #[test]
    fn test_score_clamped_low() {
        let raw: RawScore = parse_json_reply(r#"{"score": -5}"#).expect("parses");
        assert_eq!(clamp_score(&raw), 1);
    }

    #[test]
    fn test_score_defaults_to_50() {
        let raw: RawScore = parse_json_reply(r#"{"feedback": "nice"}"#).expect("parses");
        assert_eq!(clamp_score(&raw), 50);
    }

    #[test]
    fn test_shop_recommendations_camel_case_roundtrip() {
        let json = r#"{"recommendations": [
            {"shopName": "Vintage Vault", "reason": "loves thrifted denim", "matchScore": 0.92}
        ]}"#;
        let recs: ShopRecommendations = serde_json::from_str(json).expect("deserialize");
        assert_eq!(recs.recommendations.len(), 1);
        let first = recs.recommendations.first().expect("one recommendation");
        assert_eq!(first.shop_name, "Vintage Vault");

        let back = serde_json::to_value(&recs).expect("serialize");
        assert_eq!(back["recommendations"][0]["matchScore"], 0.92);
    }

    #[test]
    fn test_outfit_suggestion_defaults_when_fields_missing() {
        let suggestion: OutfitSuggestion =
            parse_json_reply(r#"{"outfit": {"totalVibe": "y2k revival"}}"#).expect("parses");
        assert_eq!(suggestion.outfit.total_vibe, "y2k revival");
        assert!(suggestion.outfit.items.is_empty());
        assert!(suggestion.outfit.occasions.is_empty());
    }

    #[test]
    fn test_forecast_confidence_clamped() {
        let mut forecast: DropForecast =
            parse_json_reply(r#"{"prediction": "cargo everything", "confidence": 7.5}"#)
                .expect("parses");
        forecast.confidence = forecast.confidence.clamp(0.0, 1.0);
        assert!((forecast.confidence - 1.0).abs() < f64::EPSILON);
    }
}
