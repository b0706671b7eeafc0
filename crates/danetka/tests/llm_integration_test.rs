//! Integration test for a live LLM host.

use danetka::{GameConfig, LlmClient, LlmHost, LlmProvider};
use danetka_core::{GameDefinition, RoundController, RoundEvent};

async fn ask_live(provider: LlmProvider, model: &str) {
    dotenvy::dotenv().ok();

    let config = GameConfig::default()
        .with_llm_provider(provider)
        .with_llm_model(model.to_string())
        .with_llm_max_tokens(50);
    let llm_config = config.create_llm_config().expect("API key not set");

    let host = LlmHost::new(
        LlmClient::new(llm_config),
        "You host a yes/no riddle. Answer every question with Yes or No only.",
    );
    let game = GameDefinition::new("Shadow", "It follows you everywhere.", "A shadow")
        .expect("valid game");
    let mut round = RoundController::new(&host, game);

    let event = round.advance("Is it alive?").await.expect("Failed to ask host");
    match event {
        RoundEvent::Answered(answer) => {
            assert!(!answer.reply.is_empty(), "Reply should not be empty");
            eprintln!("Reply: {} ({})", answer.reply, answer.outcome);
        }
        RoundEvent::Abandoned => panic!("Round should not be abandoned"),
    }
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_host() {
    ask_live(LlmProvider::OpenAI, "gpt-4o-mini").await;
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_anthropic_host() {
    ask_live(LlmProvider::Anthropic, "claude-3-5-haiku-20241022").await;
}
