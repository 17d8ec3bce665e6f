//! Chat command handler
//!
//! Runs the ordering agent for one message or as an interactive session.

use anyhow::Result;
use std::io::{self, BufRead, Write};

use super::CommandContext;
use crate::agent::OrderingAgent;

/// Handle the `chat` command
pub async fn run_chat(
    ctx: &CommandContext,
    message: Option<String>,
    system: Option<String>,
) -> Result<()> {
    let registry = ctx.tools().await?;
    let backend = ctx.chat_backend()?;

    let mut agent = OrderingAgent::with_options(
        backend,
        registry.clone(),
        ctx.resolve_system_prompt(system),
        ctx.max_tool_rounds(),
    );

    println!(
        "Ordering agent with {} tools ({})",
        registry.len(),
        registry.names().join(", ")
    );
    println!("Model: {}", agent.model());
    println!();

    if let Some(msg) = message {
        // Single message mode
        println!("> {}\n", msg);
        let reply = agent.process_request(&msg).await?;
        println!("{}", reply);
        return Ok(());
    }

    println!("Interactive mode. 'reset' clears the conversation, 'quit' to exit.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "exit" {
            break;
        }
        if input == "reset" {
            agent.reset_conversation();
            println!("Conversation cleared.\n");
            continue;
        }

        match agent.process_request(input).await {
            Ok(reply) => println!("\n{}\n", reply),
            Err(e) => eprintln!("Error: {:#}\n", e),
        }
    }

    Ok(())
}
