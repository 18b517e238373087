//! Console prompt helpers.

use std::io::Write;

/// Redisplay the input prompt after printing an incoming broadcast.
pub fn redisplay_prompt(user_id: &str) {
    print!("{}> ", user_id);
    let _ = std::io::stdout().flush();
}
