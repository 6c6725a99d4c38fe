use inksac::prelude::*;

/// Styles interactive output, falling back to plain text when the terminal
/// reports no color support.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    color_support: ColorSupport,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn prompt(&self, cwd: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return format!("{} > ", cwd);
        }

        let cwd_style = Style::builder().foreground(Color::Cyan).bold().build();
        format!("{} > ", cwd.to_owned().style(cwd_style))
    }

    pub fn error(&self, message: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return message.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();

        message.to_owned().style(error_style).to_string()
    }

    pub fn banner(&self, text: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return text.to_string();
        }

        let banner_style = Style::builder().foreground(Color::Green).build();

        text.to_owned().style(banner_style).to_string()
    }
}
