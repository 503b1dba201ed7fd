//! Output mode flags shared by all subcommands.
//!
//! `main` exports the global flags as environment variables so commands
//! can check them without threading arguments through.

pub const ENV_JSON: &str = "ANNOUNCE_FEED_JSON";
pub const ENV_QUIET: &str = "ANNOUNCE_FEED_QUIET";

pub fn is_json() -> bool {
    flag(ENV_JSON)
}

pub fn is_quiet() -> bool {
    flag(ENV_QUIET)
}

fn flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| v == "1")
}

/// Pretty-print a JSON value to stdout.
pub fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(_) => println!("{value}"),
    }
}
