//! Styles for the shelf CLI.
//!
//! Rendering code never picks colors itself. It asks the [`Palette`] for a semantic style
//! (a group header, a card title, a timestamp) and the palette maps that to concrete colors.
//! There are two palettes, one for light and one for dark terminals; `dark-light` decides
//! which one applies, and only when the output supports color at all.
//!
//! The semantic styles are:
//!
//!     * Header: group headers (bold)
//!     * Count: member counts next to headers (muted)
//!     * Marker: the expand / collapse arrows (accent)
//!     * Title: card titles (regular, bold)
//!     * Subtitle, Time, Property: card metadata (muted)
//!     * Preview: card body text (regular)
//!     * Tag: tags (accent)
//!     * Faint: thumbnails and hints
use console::Style;

#[derive(Debug, Clone)]
pub struct Palette {
    pub header: Style,
    pub count: Style,
    pub marker: Style,
    pub title: Style,
    pub subtitle: Style,
    pub preview: Style,
    pub tag: Style,
    pub time: Style,
    pub property: Style,
    pub faint: Style,
}

impl Palette {
    /// Resolves the palette for the current output.
    ///
    /// `use_color` forces styling on or off; `None` lets `console` decide from the terminal.
    pub fn resolve(use_color: Option<bool>) -> Self {
        let color = use_color.unwrap_or_else(console::colors_enabled);
        let palette = if color {
            match dark_light::detect() {
                dark_light::Mode::Light => build_light_palette(),
                dark_light::Mode::Dark => build_dark_palette(),
            }
        } else {
            build_light_palette()
        };
        palette.force_styling(color)
    }

    fn force_styling(self, color: bool) -> Self {
        let force = |style: Style| style.force_styling(color);
        Self {
            header: force(self.header),
            count: force(self.count),
            marker: force(self.marker),
            title: force(self.title),
            subtitle: force(self.subtitle),
            preview: force(self.preview),
            tag: force(self.tag),
            time: force(self.time),
            property: force(self.property),
            faint: force(self.faint),
        }
    }
}

fn build_light_palette() -> Palette {
    let regular = Style::new().black();
    let muted = Style::new().color256(243);
    let accent = Style::new().color256(136);
    Palette {
        header: regular.clone().bold(),
        count: muted.clone(),
        marker: accent.clone(),
        title: regular.clone().bold(),
        subtitle: muted.clone(),
        preview: regular,
        tag: accent,
        time: muted.clone().italic(),
        property: muted,
        faint: Style::new().color256(249),
    }
}

fn build_dark_palette() -> Palette {
    let regular = Style::new().white();
    let muted = Style::new().color256(250);
    let accent = Style::new().color256(220);
    Palette {
        header: regular.clone().bold(),
        count: muted.clone(),
        marker: accent.clone(),
        title: regular.clone().bold(),
        subtitle: muted.clone(),
        preview: regular,
        tag: accent,
        time: muted.clone().italic(),
        property: muted,
        faint: Style::new().color256(242),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_palette_has_no_escapes() {
        let palette = Palette::resolve(Some(false));
        assert_eq!(palette.title.apply_to("x").to_string(), "x");
    }

    #[test]
    fn test_colored_palette_styles_output() {
        let palette = Palette::resolve(Some(true));
        assert!(palette.title.apply_to("x").to_string().contains("\u{1b}["));
    }
}
