use crate::commands::CmdResult;
use crate::config::NotesConfig;
use crate::error::{NotesError, Result};
use crate::formatting::{default_text_color, is_hex_color, FormattingState, Setting, Style};

pub fn toggle(state: &mut FormattingState, style: Style) -> CmdResult {
    let flag = match style {
        Style::Bold => &mut state.bold,
        Style::Italic => &mut state.italic,
        Style::Underline => &mut state.underline,
    };
    *flag = !*flag;
    CmdResult::default().with_changed_settings(vec![style.setting()])
}

/// Switching theme also resets the text color to the theme's default.
pub fn toggle_dark_mode(state: &mut FormattingState) -> CmdResult {
    state.dark_mode = !state.dark_mode;
    state.text_color = default_text_color(state.dark_mode).to_string();
    CmdResult::default().with_changed_settings(vec![Setting::DarkMode, Setting::TextColor])
}

/// Grows or shrinks the font; a step that would leave the allowed range is ignored.
pub fn adjust_font_size(state: &mut FormattingState, delta: i32, config: &NotesConfig) -> CmdResult {
    let proposed = state.font_size as i64 + delta as i64;
    match u32::try_from(proposed) {
        Ok(size) if config.font_size_in_range(size) && size != state.font_size => {
            state.font_size = size;
            CmdResult::default().with_changed_settings(vec![Setting::FontSize])
        }
        _ => CmdResult::default(),
    }
}

pub fn set_text_color(state: &mut FormattingState, color: &str) -> Result<CmdResult> {
    if !is_hex_color(color) {
        return Err(NotesError::InvalidColor(color.to_string()));
    }
    state.text_color = color.to_string();
    Ok(CmdResult::default().with_changed_settings(vec![Setting::TextColor]))
}
