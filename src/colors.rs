#[cfg(feature = "color")]
mod styles {
    use ansi_term::{Color, Style};

    pub const RED: Style = Style {
        foreground: Some(Color::Fixed(9)),
        background: None,
        is_bold: true,
        is_dimmed: false,
        is_italic: false,
        is_underline: false,
        is_blink: false,
        is_reverse: false,
        is_hidden: false,
        is_strikethrough: false,
    };

    pub const YELLOW: Style = Style {
        foreground: Some(Color::Fixed(11)),
        ..RED
    };

    pub const CYAN: Style = Style {
        foreground: Some(Color::Fixed(14)),
        ..RED
    };

    pub const BLUE: Style = Style {
        foreground: Some(Color::Fixed(12)),
        ..RED
    };

    pub const WHITE: Style = Style {
        foreground: Some(Color::Fixed(15)),
        ..RED
    };
}

#[cfg(not(feature = "color"))]
mod styles {
    use ansi_term::Style;

    const PLAIN: Style = Style {
        foreground: None,
        background: None,
        is_bold: false,
        is_dimmed: false,
        is_italic: false,
        is_underline: false,
        is_blink: false,
        is_reverse: false,
        is_hidden: false,
        is_strikethrough: false,
    };

    pub const RED: Style = PLAIN;
    pub const YELLOW: Style = PLAIN;
    pub const CYAN: Style = PLAIN;
    pub const BLUE: Style = PLAIN;
    pub const WHITE: Style = PLAIN;
}

pub use self::styles::{BLUE, CYAN, RED, WHITE, YELLOW};

