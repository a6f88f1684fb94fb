//! Claude API integration for the DripBot assistant.
//!
//! This module provides a typed client for the Anthropic Messages API and
//! the DripBot features built on top of it: chat, drip-score analysis,
//! shop recommendations, outfit building, and flash-drop forecasting.

mod client;
pub mod dripbot;
mod error;
mod types;

pub use client::ClaudeClient;
pub use dripbot::{
    ChatTurn, DripScore, DropForecast, Outfit, OutfitPiece, OutfitPreferences, OutfitSuggestion,
    ShopRecommendation, ShopRecommendations,
};
pub use error::ClaudeError;
pub use types::{ChatResponse, ChatRole, ContentBlock, ImageSource, Message, MessageContent};
