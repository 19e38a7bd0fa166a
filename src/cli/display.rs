// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal rendering for the sifter CLI.
//!
//! Colors are picked by role (path segment, string value, number, border...)
//! from a OneDark or One Light palette. The theme comes from `SIFTER_THEME`,
//! then the `COLORFGBG` background hint, and defaults to dark. `NO_COLOR` and
//! non-TTY output get plain text.

use std::sync::OnceLock;

/// Width between the `│` borders of a section box.
pub const BOX_WIDTH: usize = 80;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

// ═══════════════════════════════════════════════════════════════════════════
// THEME
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("SIFTER_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }
    // "fg;bg": background colors 7 and up (except 8) are light.
    let light_bg = std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| v.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()))
        .is_some_and(|bg| bg >= 7 && bg != 8);
    if light_bg {
        Theme::Light
    } else {
        Theme::Dark
    }
}

pub fn theme() -> Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    *THEME.get_or_init(detect_theme)
}

/// What a piece of output is, which decides its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Title,
    Frame,
    Border,
    Muted,
    Key,
    Text,
    Number,
    Literal,
    Fast,
    Moderate,
    Slow,
}

type Rgb = (u8, u8, u8);

/// OneDark (https://github.com/joshdick/onedark.vim)
fn one_dark(role: Role) -> Rgb {
    match role {
        Role::Title => (102, 217, 239),
        Role::Frame | Role::Key => (97, 175, 239),
        Role::Border | Role::Muted => (92, 99, 112),
        Role::Text | Role::Fast => (152, 195, 121),
        Role::Number | Role::Moderate => (229, 192, 123),
        Role::Literal => (198, 120, 221),
        Role::Slow => (224, 108, 117),
    }
}

/// One Light (https://github.com/sonph/onehalf)
fn one_light(role: Role) -> Rgb {
    match role {
        Role::Title => (1, 112, 158),
        Role::Frame | Role::Key => (64, 120, 242),
        Role::Border | Role::Muted => (160, 161, 167),
        Role::Text | Role::Fast => (80, 161, 79),
        Role::Number | Role::Moderate => (193, 132, 1),
        Role::Literal => (166, 38, 164),
        Role::Slow => (228, 86, 73),
    }
}

fn escape(role: Role) -> String {
    let (r, g, b) = match theme() {
        Theme::Dark => one_dark(role),
        Theme::Light => one_light(role),
    };
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    static COLORS: OnceLock<bool> = OnceLock::new();
    *COLORS.get_or_init(|| {
        std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
    })
}

/// Color `text` for `role`; plain when colors are off.
pub fn paint(role: Role, text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", escape(role), text, RESET)
    } else {
        text.to_string()
    }
}

/// Like `paint`, in bold.
pub fn paint_bold(role: Role, text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", BOLD, escape(role), text, RESET)
    } else {
        text.to_string()
    }
}

/// Characters a terminal will show, ignoring ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        match c {
            '\x1b' => in_escape = true,
            'm' if in_escape => in_escape = false,
            _ if !in_escape => len += 1,
            _ => {}
        }
    }
    len
}

pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_len(s));
    format!("{}{}", s, " ".repeat(pad))
}

/// Cut to `max_chars` characters, ending in an ellipsis when shortened.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

// ═══════════════════════════════════════════════════════════════════════════
// BOXES
// ═══════════════════════════════════════════════════════════════════════════

/// `│ content          │`
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    let border = paint(Role::Border, "│");
    println!("{}{}{}{}", border, content, " ".repeat(pad), border);
}

/// `┌─ LABEL ──────────┐`
pub fn section_top(label: &str) {
    let label = format!("─ {} ", paint_bold(Role::Key, label));
    let fill = "─".repeat(BOX_WIDTH.saturating_sub(visible_len(&label)));
    println!(
        "{}{}{}",
        paint(Role::Border, "┌"),
        label,
        paint(Role::Border, &format!("{}┐", fill))
    );
}

/// `└──────────────────┘`
pub fn section_bot() {
    println!(
        "{}",
        paint(Role::Border, &format!("└{}┘", "─".repeat(BOX_WIDTH)))
    );
}

/// Double-framed centered title.
pub fn banner(text: &str) {
    let title = paint_bold(Role::Title, &truncate(text, BOX_WIDTH - 2));
    let total = BOX_WIDTH.saturating_sub(visible_len(&title));
    let left = total / 2;
    let rule = "═".repeat(BOX_WIDTH);
    println!("{}", paint(Role::Frame, &format!("╔{}╗", rule)));
    println!(
        "{}{}{}{}{}",
        paint(Role::Frame, "║"),
        " ".repeat(left),
        title,
        " ".repeat(total - left),
        paint(Role::Frame, "║")
    );
    println!("{}", paint(Role::Frame, &format!("╚{}╝", rule)));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// A flattened path with keys highlighted and separators and indices muted.
pub fn path_label(path: &str) -> String {
    if path.is_empty() {
        return paint(Role::Muted, "(root)");
    }
    if !use_colors() {
        return path.to_string();
    }
    let mut out = String::new();
    let mut key = String::new();
    let mut index = String::new();
    let mut in_index = false;
    for c in path.chars() {
        match c {
            '[' if !in_index => {
                out.push_str(&paint(Role::Key, &std::mem::take(&mut key)));
                in_index = true;
                index.push(c);
            }
            ']' if in_index => {
                index.push(c);
                out.push_str(&paint(Role::Muted, &std::mem::take(&mut index)));
                in_index = false;
            }
            '.' if !in_index => {
                out.push_str(&paint(Role::Key, &std::mem::take(&mut key)));
                out.push_str(&paint(Role::Muted, "."));
            }
            _ if in_index => index.push(c),
            _ => key.push(c),
        }
    }
    out.push_str(&paint(Role::Key, &key));
    out.push_str(&paint(Role::Muted, &index));
    out
}

/// A leaf value colored by the kind it looks like.
pub fn value_label(value: &str) -> String {
    let role = match value {
        "null" | "true" | "false" => Role::Literal,
        v if v.trim().parse::<f64>().is_ok() => Role::Number,
        _ => Role::Text,
    };
    paint(role, value)
}

pub fn position_badge(position: usize) -> String {
    paint_bold(Role::Title, &format!("#{:<3}", position))
}

/// Milliseconds, colored by how long they took.
pub fn timing_ms(value: f64) -> String {
    let role = if value < 5.0 {
        Role::Fast
    } else if value < 50.0 {
        Role::Moderate
    } else {
        Role::Slow
    };
    paint(role, &format!("{:.3}", value))
}
