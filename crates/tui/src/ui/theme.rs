use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub error: Color,
    pub positive: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(215, 218, 220),
            dim: Color::Rgb(130, 135, 140),
            accent: Color::Rgb(120, 160, 210),
            border: Color::Rgb(60, 66, 72),
            error: Color::Rgb(205, 90, 90),
            positive: Color::Rgb(110, 180, 120),
            warning: Color::Rgb(205, 170, 90),
        }
    }
}
