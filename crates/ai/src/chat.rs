//! Chat orchestration - model ↔ tools ↔ model loop.
//!
//! Each message builds an OpenRouter-backed rig agent with the system prompt
//! and the user's tool set, replays the user's recent thread as history, then
//! lets it run tool rounds until it answers or `max_turns` is reached. Both the
//! question and the answer are appended to the thread.

use log::{debug, error, info};
use reqwest::Client as HttpClient;
use rig::{
    client::CompletionClient,
    completion::{Message, Prompt},
    message::{AssistantContent, Text, ToolChoice, UserContent},
    providers::openrouter,
    OneOrMany,
};
use serde::Serialize;
use std::sync::Arc;
use wallet_core::chat::{ChatMessage, ChatRole, ChatThread};
use wallet_core::utils::MonthPeriod;

use crate::env::AssistantEnvironment;
use crate::error::AiError;
use crate::tools::{tool_names, ToolSet};

/// Model used when none is configured.
pub const DEFAULT_CHAT_MODEL: &str = "openai/gpt-oss-120b:free";

/// Maximum number of tool rounds per message.
pub const DEFAULT_MAX_TURNS: usize = 10;

/// Longest message accepted from the user.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Previous thread messages replayed to the model on each run.
pub const MAX_HISTORY_MESSAGES: usize = 20;

const PROVIDER_ID: &str = "openrouter";

// ============================================================================
// Chat Configuration
// ============================================================================

/// Configuration for the chat agent.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// OpenRouter API key. Chat is disabled without one.
    pub api_key: Option<String>,
    /// OpenRouter model id.
    pub model: String,
    /// Maximum number of tool call rounds before stopping.
    pub max_turns: usize,
    /// Maximum tokens for each completion.
    pub max_tokens: Option<u64>,
    /// Temperature for sampling.
    pub temperature: Option<f64>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_CHAT_MODEL.to_string(),
            max_turns: DEFAULT_MAX_TURNS,
            max_tokens: Some(4096),
            temperature: None,
        }
    }
}

/// Final assistant answer for one user message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub thread_id: String,
    pub text: String,
    pub model: String,
}

// ============================================================================
// Chat Service
// ============================================================================

/// Chat service: one agent run per message, over the user's single thread.
pub struct ChatService<E: AssistantEnvironment + 'static> {
    env: Arc<E>,
    config: ChatConfig,
}

impl<E: AssistantEnvironment + 'static> ChatService<E> {
    /// Create a new chat service.
    pub fn new(env: Arc<E>, config: ChatConfig) -> Self {
        Self { env, config }
    }

    /// Whether a provider key is configured.
    pub fn is_enabled(&self) -> bool {
        self.api_key().is_some()
    }

    /// List all available tool names.
    pub fn list_tools(&self) -> Vec<&'static str> {
        tool_names::<E>()
    }

    /// The user's thread, if they have chatted before.
    pub fn get_thread(&self, user_id: &str) -> Result<Option<ChatThread>, AiError> {
        Ok(self.env.chat_history_service().get_thread(user_id)?)
    }

    /// The user's thread, created on first use.
    pub async fn get_or_create_thread(&self, user_id: &str) -> Result<ChatThread, AiError> {
        Ok(self
            .env
            .chat_history_service()
            .get_or_create_thread(user_id)
            .await?)
    }

    /// Latest messages of one of the user's threads, oldest first.
    pub fn get_messages(
        &self,
        user_id: &str,
        thread_id: &str,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, AiError> {
        Ok(self
            .env
            .chat_history_service()
            .get_messages(user_id, thread_id, limit)?)
    }

    /// Run the agent on `message` for `user_id` and return its final answer.
    pub async fn send_message(&self, user_id: &str, message: &str) -> Result<ChatReply, AiError> {
        let prompt = validate_message(message)?;
        let api_key = self
            .api_key()
            .ok_or_else(|| AiError::MissingApiKey(PROVIDER_ID.to_string()))?;

        let history_service = self.env.chat_history_service();
        let thread = history_service.get_or_create_thread(user_id).await?;
        let previous = history_service.get_messages(user_id, &thread.id, MAX_HISTORY_MESSAGES)?;
        let mut history = build_history(&previous);
        history_service
            .append_message(user_id, &thread.id, ChatRole::User, prompt)
            .await?;

        debug!(
            "Starting chat run: provider={}, model={}, max_turns={}, history={}",
            PROVIDER_ID,
            self.config.model,
            self.config.max_turns,
            history.len()
        );

        let client = create_openrouter_client(api_key)?;
        let preamble = build_preamble(self.env.as_ref());
        let tools = ToolSet::new(self.env.clone(), user_id);

        let mut builder = client
            .agent(&self.config.model)
            .preamble(&preamble)
            .tool(tools.create_income)
            .tool(tools.create_fixed_expense)
            .tool(tools.create_variable_expense)
            .tool(tools.create_goal)
            .tool(tools.get_goals)
            .tool(tools.add_to_goal)
            .tool_choice(ToolChoice::Auto);

        if let Some(tokens) = self.config.max_tokens {
            builder = builder.max_tokens(tokens);
        }
        if let Some(temperature) = self.config.temperature {
            builder = builder.temperature(temperature);
        }

        let agent = builder.build();
        let text = agent
            .prompt(prompt)
            .with_history(&mut history)
            .max_turns(self.config.max_turns)
            .await
            .map_err(|e| {
                error!("Chat run failed for model {}: {}", self.config.model, e);
                AiError::provider(e.to_string())
            })?;

        info!("Chat run completed ({} chars)", text.len());
        if !text.trim().is_empty() {
            history_service
                .append_message(user_id, &thread.id, ChatRole::Assistant, &text)
                .await?;
        }
        Ok(ChatReply {
            thread_id: thread.id,
            text,
            model: self.config.model.clone(),
        })
    }

    /// Get the environment.
    pub fn env(&self) -> &Arc<E> {
        &self.env
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

fn validate_message(message: &str) -> Result<&str, AiError> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(AiError::invalid_input("Message cannot be empty"));
    }
    if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AiError::invalid_input(format!(
            "Message exceeds {} characters",
            MAX_MESSAGE_CHARS
        )));
    }
    Ok(trimmed)
}

/// Stored thread messages as rig chat history.
pub fn build_history(messages: &[ChatMessage]) -> Vec<Message> {
    messages
        .iter()
        .map(|msg| match msg.role {
            ChatRole::User => Message::User {
                content: OneOrMany::one(UserContent::Text(Text {
                    text: msg.content.clone(),
                })),
            },
            ChatRole::Assistant => Message::Assistant {
                id: None,
                content: OneOrMany::one(AssistantContent::Text(Text {
                    text: msg.content.clone(),
                })),
            },
        })
        .collect()
}

/// System prompt plus the date context the tools resolve "today" against.
pub fn build_preamble<E: AssistantEnvironment + ?Sized>(env: &E) -> String {
    let base_preamble = include_str!("system_prompt.txt").trim();
    let now = env.now();
    let period = MonthPeriod::of_date(now.date_naive());
    let dynamic_context = format!(
        "\n\n## Current Context\n\
        - Current date: {}\n\
        - Current datetime (UTC): {}\n\
        - Current month: {}\n\
        - Currency: {}",
        now.format("%Y-%m-%d"),
        now.format("%Y-%m-%d %H:%M"),
        period,
        wallet_core::constants::DEFAULT_CURRENCY_SYMBOL
    );
    format!("{}{}", base_preamble, dynamic_context)
}

// ============================================================================
// Provider Client Factory
// ============================================================================

fn create_openrouter_client(api_key: &str) -> Result<openrouter::Client<HttpClient>, AiError> {
    openrouter::Client::new(api_key).map_err(|e| AiError::Provider(e.to_string()))
}
