/// Light and dark palettes for the control panel
use iced::theme::{self, Palette};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Colours derived from the dark-mode preference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub background: Color,
    pub panel: Color,
    pub text: Color,
    pub subtext: Color,
    pub accent: Color,
}

pub fn colors(dark: bool) -> ThemeColors {
    if dark {
        ThemeColors {
            background: Color::from_rgb8(0x15, 0x15, 0x15),
            panel: Color::from_rgb8(0x1e, 0x1e, 0x1e),
            text: Color::from_rgb8(0xff, 0xff, 0xff),
            subtext: Color::from_rgb8(0xcf, 0xcf, 0xcf),
            accent: Color::from_rgb8(0xff, 0x7a, 0x18),
        }
    } else {
        ThemeColors {
            background: Color::from_rgb8(0xf2, 0xf2, 0xf2),
            panel: Color::from_rgb8(0xff, 0xff, 0xff),
            text: Color::from_rgb8(0x11, 0x11, 0x11),
            subtext: Color::from_rgb8(0x33, 0x33, 0x33),
            accent: Color::from_rgb8(0xff, 0x7a, 0x18),
        }
    }
}

pub fn theme(dark: bool) -> Theme {
    let c = colors(dark);
    let name = if dark { "Dehydrated Dark" } else { "Dehydrated Light" };

    Theme::custom(
        name.to_string(),
        Palette {
            background: c.background,
            text: c.text,
            primary: c.accent,
            success: Color::from_rgb8(0x3f, 0xb9, 0x50),
            danger: Color::from_rgb8(0xe5, 0x48, 0x4d),
        },
    )
}

struct Panel(Color);

impl container::StyleSheet for Panel {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(self.0)),
            border: Border {
                radius: 6.0_f32.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

struct AccentBar;

impl container::StyleSheet for AccentBar {
    type Style = Theme;

    fn appearance(&self, style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(style.palette().primary)),
            ..Default::default()
        }
    }
}

/// Card background behind the buttons and reports
pub fn panel(dark: bool) -> theme::Container {
    theme::Container::Custom(Box::new(Panel(colors(dark).panel)))
}

/// Thin orange bar under the header
pub fn accent_bar() -> theme::Container {
    theme::Container::Custom(Box::new(AccentBar))
}
