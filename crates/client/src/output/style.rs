//! Terminal colors. `anstream` strips them when stdout is not a terminal.

pub use anstream::{eprintln as aeprintln, println as aprintln};

/// Tokyo Night color palette
pub mod colors {
    pub const RESET: &str = "\x1b[0m";

    pub const TKN_RED: &str = "\x1b[38;2;247;118;142m"; // #f7768e
    pub const TKN_GREEN: &str = "\x1b[38;2;158;206;106m"; // #9ece6a
    pub const TKN_YELLOW: &str = "\x1b[38;2;224;175;104m"; // #e0af68
    pub const TKN_BLUE: &str = "\x1b[38;2;122;162;247m"; // #7aa2f7
    pub const TKN_CYAN: &str = "\x1b[38;2;125;207;255m"; // #7dcfff

    pub const TKN_BG_BLUE: &str = "\x1b[48;2;122;162;247m";
    pub const TKN_BG_GREEN: &str = "\x1b[48;2;158;206;106m";
    pub const TKN_FG_NIGHT: &str = "\x1b[38;2;26;27;38m"; // #1a1b26
}

fn paint(color: &str, text: &str) -> String {
    format!("{}{}{}", color, text, colors::RESET)
}

pub fn p_g(text: &str) -> String {
    paint(colors::TKN_GREEN, text)
}

pub fn p_r(text: &str) -> String {
    paint(colors::TKN_RED, text)
}

pub fn p_y(text: &str) -> String {
    paint(colors::TKN_YELLOW, text)
}

pub fn p_b(text: &str) -> String {
    paint(colors::TKN_BLUE, text)
}

pub fn p_c(text: &str) -> String {
    paint(colors::TKN_CYAN, text)
}

/// Dark text on a blue bar, used for section banners.
pub fn banner_blue(text: &str) -> String {
    format!(
        "{}{} {} {}",
        colors::TKN_BG_BLUE,
        colors::TKN_FG_NIGHT,
        text,
        colors::RESET
    )
}

/// Dark text on a green bar, used for the completion banner.
pub fn banner_green(text: &str) -> String {
    format!(
        "{}{} {} {}",
        colors::TKN_BG_GREEN,
        colors::TKN_FG_NIGHT,
        text,
        colors::RESET
    )
}
