use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub panel: Color32,
    pub foreground: Color32,
    pub muted: Color32,
    pub accent: Color32,
    pub track: Color32,
    pub tab_size: f32,
    pub body_size: f32,
    pub arrow_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            panel: Color32::from_rgb(0x2A, 0x2A, 0x2E),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            muted: Color32::from_rgb(0x6A, 0x6A, 0x70),
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            track: Color32::from_rgb(0x3C, 0x3C, 0x42),
            tab_size: 18.0,
            body_size: 20.0,
            arrow_size: 22.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            panel: Color32::from_rgb(0xF5, 0xF5, 0xF7),
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            muted: Color32::from_rgb(0xA0, 0xA0, 0xAA),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            track: Color32::from_rgb(0xDD, 0xDD, 0xE3),
            tab_size: 18.0,
            body_size: 20.0,
            arrow_size: 22.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}
