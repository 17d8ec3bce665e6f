//! CLI module
//!
//! This module provides:
//! - CLI argument definitions (args)
//! - The step-by-step order wizard (wizard)

pub mod args;
pub mod wizard;

pub use args::{Cli, Commands};
pub use wizard::{CompletedOrder, OrderWizard, WizardReply, WizardStep};
