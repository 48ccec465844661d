//! Color constants for the vote board.

use eframe::egui::Color32;

/// Top bar background - Slate
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x26, 0x32, 0x38);

/// Main board background
pub const BOARD_BG: Color32 = Color32::from_rgb(0xEC, 0xEF, 0xF1);

/// Topic card background
pub const CARD_BG: Color32 = Color32::from_rgb(0xFF, 0xFF, 0xFF);

/// Topic card border
pub const CARD_BORDER: Color32 = Color32::from_rgb(0xB0, 0xBE, 0xC5);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xEC, 0xEF, 0xF1);

/// Text on light backgrounds
pub const TEXT_DARK: Color32 = Color32::from_rgb(0x26, 0x32, 0x38);

/// Muted text (counters, timestamps)
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x78, 0x90, 0x9C);

/// Upvote counter
pub const UPVOTE: Color32 = Color32::from_rgb(0x43, 0xA0, 0x47);

/// Downvote counter
pub const DOWNVOTE: Color32 = Color32::from_rgb(0xE5, 0x39, 0x35);

/// Success status
pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Error status
pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x73, 0x73);

/// Unpublished changes indicator
pub const WARNING: Color32 = Color32::from_rgb(0xFF, 0xA7, 0x26);
