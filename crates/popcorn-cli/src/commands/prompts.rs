use color_eyre::Result;
use dialoguer::{Confirm, Input, Password, Select};
use popcorn_core::MAX_RATING;

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read password: {}", e))
}

pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Pick one of `items`; `None` when the user backs out with Esc or q
pub fn prompt_select<T: ToString>(prompt: &str, items: &[T]) -> Result<Option<usize>> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
}

/// 1..=10 stars, pre-selecting the current draft
pub fn prompt_rating(current: Option<u8>) -> Result<Option<u8>> {
    let items: Vec<String> = (1..=MAX_RATING)
        .map(|n| format!("{:>2} {}", n, "⭐".repeat(usize::from(n))))
        .collect();
    let default = current.map(|r| usize::from(r.saturating_sub(1))).unwrap_or(0);

    let picked = Select::new()
        .with_prompt("Your rating")
        .items(&items)
        .default(default)
        .interact_opt()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read rating: {}", e))?;

    // Index 0 is one star
    Ok(picked.map(|i| i as u8 + 1))
}
