//! Order wizard handler
//!
//! Runs the four-step wizard on stdin and places the finished order through
//! the generated `placeOrder` tool.

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::{self, BufRead, Write};

use pizza_common::{OrderResponse, Pizza};

use super::CommandContext;
use crate::cli::{CompletedOrder, OrderWizard, WizardReply, WizardStep};
use crate::tools::{ToolOutcome, ToolRegistry};

const RULE: &str = "------------------------------------------------------------";

/// Handle the `order` command
pub async fn run_order_wizard(ctx: &CommandContext) -> Result<()> {
    let registry = ctx.tools().await?;

    let menu = registry
        .execute_tool("listPizzas", Value::Null)
        .await
        .context("Could not load the menu; is the pizza API running?")?;
    let menu: Vec<Pizza> = serde_json::from_value(menu).context("Unexpected menu format")?;

    println!("MISSION-PIZZA: STEP-BY-STEP ORDERING");
    println!("Follow numbered steps 1-4, 'quit' to exit");
    println!("{}", RULE);

    let mut wizard = OrderWizard::new(menu);
    print_step(wizard.step());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("\nYou: ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        match wizard.handle(&input) {
            WizardReply::Quit => {
                println!("Thanks!");
                break;
            }
            WizardReply::ShowMenu => print_menu(wizard.menu()),
            WizardReply::Accepted { message, next } => {
                println!("\n{}", message);
                print_step(next);
            }
            WizardReply::Invalid(hint) => println!("{}", hint),
            WizardReply::Complete(order) => {
                place_order(&registry, &order, ctx.is_verbose()).await;
                println!("\nNew order? Say 'menu' or 'quit'");
                print_step(wizard.step());
            }
        }
        println!("{}", RULE);
    }

    Ok(())
}

fn print_step(step: WizardStep) {
    println!("\nSTEP {}/4: {}", step.number(), step.title());
    println!("   {}", step.hint());
}

fn print_menu(menu: &[Pizza]) {
    println!("\nCHOOSE PIZZA:");
    for pizza in menu {
        println!("  {}. {} - Rs.{}", pizza.id, pizza.name, pizza.price);
    }
}

async fn place_order(registry: &ToolRegistry, order: &CompletedOrder, verbose: bool) {
    println!("\nPlacing order (placeOrder tool)");

    let args = match serde_json::to_value(&order.request) {
        Ok(args) => args,
        Err(e) => {
            println!("Could not encode order: {}", e);
            return;
        }
    };

    let outcome = registry.execute("placeOrder", args).await;
    if verbose {
        println!("{}", outcome.to_message_content());
    }

    let confirmation = match outcome {
        ToolOutcome::Success { result } => serde_json::from_value::<OrderResponse>(result),
        ToolOutcome::Failure { error, .. } => {
            println!("Order failed: {}", error);
            return;
        }
    };

    match confirmation {
        Ok(resp) => {
            println!("\n{}", "=".repeat(50));
            println!("ORDER CONFIRMED!");
            println!("ID: {}", resp.order_id);
            println!("Total: Rs.{}", resp.total_price);
            println!(
                "{}x {} ({})",
                order.request.quantity, order.pizza_name, order.request.size
            );
            println!("{}", order.request.address);
            println!("Estimated delivery: {}", resp.estimated_delivery_time);
            println!("{}", "=".repeat(50));
        }
        Err(e) => println!("Order placed but the confirmation was unreadable: {}", e),
    }
}
