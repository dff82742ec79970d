//
//  storedesk
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Interactive Prompts
//!
//! Thin wrappers over `dialoguer` for the few places `sd` asks the user
//! something: credentials at login and confirmation before destructive
//! commands.
//!
//! # Example
//!
//! ```no_run
//! use storedesk::interactive::{prompt_confirm, prompt_input, prompt_password};
//!
//! let username = prompt_input("Username").unwrap();
//! let password = prompt_password("Password").unwrap();
//! if prompt_confirm("Delete product 42?").unwrap() {
//!     println!("Deleting...");
//! }
//! ```

use std::io::IsTerminal;

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input, Password};

/// Whether stdin is attached to a terminal, i.e. prompting is possible.
pub fn can_prompt() -> bool {
    std::io::stdin().is_terminal()
}

/// Prompts for a non-empty line of text.
pub fn prompt_input(message: &str) -> Result<String> {
    ensure_interactive(message)?;
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input.trim().to_string())
}

/// Prompts for a secret without echoing it.
pub fn prompt_password(message: &str) -> Result<String> {
    ensure_interactive(message)?;
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

/// Asks a yes/no question, defaulting to no.
pub fn prompt_confirm(message: &str) -> Result<bool> {
    ensure_interactive(message)?;
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

fn ensure_interactive(message: &str) -> Result<()> {
    if !can_prompt() {
        bail!(
            "Cannot prompt for '{}' without a terminal; pass it as an argument instead",
            message
        );
    }
    Ok(())
}
