//! Riot ID input validation.

use std::sync::OnceLock;

use regex::Regex;

use super::ApiError;

fn game_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9 _\.]+$").expect("valid regex"))
}

fn tag_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid regex"))
}

/// Validate a game name: 1-16 characters, letters/digits/spaces/underscores/
/// periods only, no leading or trailing spaces.
pub fn validate_game_name(game_name: &str) -> Result<(), ApiError> {
    if !(1..=16).contains(&game_name.chars().count()) {
        return Err(ApiError::InvalidInput(
            "Summoner name must be 1-16 characters long.".to_string(),
        ));
    }
    if game_name != game_name.trim() {
        return Err(ApiError::InvalidInput(
            "Summoner name cannot have leading or trailing spaces.".to_string(),
        ));
    }
    if !game_name_pattern().is_match(game_name) {
        return Err(ApiError::InvalidInput(
            "Summoner name contains invalid characters.".to_string(),
        ));
    }
    Ok(())
}

/// Validate a tagline: 2-5 alphanumeric characters.
pub fn validate_tag_line(tag_line: &str) -> Result<(), ApiError> {
    if !(2..=5).contains(&tag_line.chars().count()) {
        return Err(ApiError::InvalidInput(
            "Tagline must be 2-5 characters long.".to_string(),
        ));
    }
    if !tag_line_pattern().is_match(tag_line) {
        return Err(ApiError::InvalidInput(
            "Tagline must be alphanumeric.".to_string(),
        ));
    }
    Ok(())
}
