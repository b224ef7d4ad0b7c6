/// Destination size and file names for one kind of metadata image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub width: u32,
    pub height: u32,
    pub file_names: &'static [&'static str],
}

const ICON_FILES: &[&str] = &["icon0.png"];
const BACKGROUND_FILES: &[&str] = &["pic0.png", "pic1.png"];

/// The two fixed upload presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Launcher icon, 512x512, `icon0.png`
    External,
    /// Background art, 1920x1080, `pic0.png` and `pic1.png` (same image)
    Internal,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::External, Preset::Internal];

    pub fn target(self) -> TargetSpec {
        match self {
            Preset::External => TargetSpec {
                width: 512,
                height: 512,
                file_names: ICON_FILES,
            },
            Preset::Internal => TargetSpec {
                width: 1920,
                height: 1080,
                file_names: BACKGROUND_FILES,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::External => "External",
            Preset::Internal => "Internal",
        }
    }

    pub fn tab_title(self) -> &'static str {
        match self {
            Preset::External => "External Icon Management",
            Preset::Internal => "Internal Background Management",
        }
    }

    /// Human readable list of target files, e.g. `pic0.png & pic1.png`
    pub fn target_files(self) -> String {
        self.target().file_names.join(" & ")
    }
}
