//! Scripted conversation against the bundled catalog.
//!
//! Run with: cargo run -p shop-assistant-agent --example chat_demo

use anyhow::Result;
use shop_assistant_agent::ShoppingAssistant;
use shop_assistant_core::EngagementAction;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let assistant = ShoppingAssistant::new()?;
    let session = assistant.create_session();

    let script = [
        "show me jackets under \u{20b9}400",
        "recommend something",
        "what about hoodies from uniqlo?",
        "what categories do you have?",
    ];

    for utterance in script {
        println!("\n> {utterance}");
        let reply = assistant.handle_query(session, utterance)?;
        println!("{}", reply.text);
        for suggestion in &reply.suggestions {
            println!("  suggestion: {suggestion}");
        }
        if let Some(first) = reply.products.first() {
            assistant.track(Some(session), first.id, EngagementAction::View)?;
        }
    }

    println!("\nBecause you looked at products, you might also like:");
    for entry in assistant.recommendations_for(session)? {
        println!(
            "  {} ({:.0}% match: {})",
            entry.product.name,
            entry.confidence * 100.0,
            entry.reasons.join(", ")
        );
    }

    Ok(())
}
