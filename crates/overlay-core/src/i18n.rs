//! User-facing strings in English and Turkish.

/// Identifies a translatable string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    MediaLoadError,
    InitError,
    EditModeActive,
    Locked,
    Shown,
    Hidden,
    Rotated,
    NoMedia,
    UnexpectedError,
}

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Turkish,
}

impl Language {
    /// Resolves a language code; unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        match code.to_ascii_lowercase().as_str() {
            "tr" => Self::Turkish,
            _ => Self::English,
        }
    }
}

/// Looks up strings for the active language.
///
/// Owned by the application context; switching language is a plain
/// method call on this value.
#[derive(Debug, Clone, Default)]
pub struct Localizer {
    language: Language,
}

impl Localizer {
    pub fn new(code: &str) -> Self {
        Self {
            language: Language::from_code(code),
        }
    }

    pub fn set_language(&mut self, code: &str) {
        self.language = Language::from_code(code);
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn get(&self, text: Text) -> &'static str {
        match self.language {
            Language::English => english(text),
            Language::Turkish => turkish(text),
        }
    }
}

fn english(text: Text) -> &'static str {
    match text {
        Text::MediaLoadError => "Media loading error: ",
        Text::InitError => "Initialization error: ",
        Text::EditModeActive => {
            "Edit mode is active! You can drag the media with your mouse. \
             Don't forget to lock it again when you're done."
        }
        Text::Locked => "Position locked.",
        Text::Shown => "Overlay shown.",
        Text::Hidden => "Overlay hidden.",
        Text::Rotated => "Rotated 90°.",
        Text::NoMedia => "No media selected.",
        Text::UnexpectedError => "An unexpected error occurred: ",
    }
}

fn turkish(text: Text) -> &'static str {
    match text {
        Text::MediaLoadError => "Medya yükleme hatası: ",
        Text::InitError => "Başlatma hatası: ",
        Text::EditModeActive => {
            "Düzenleme modu aktif! Medyayı farenizle sürükleyebilirsiniz. \
             İşiniz bitince tekrar kilitlemeyi unutmayın."
        }
        Text::Locked => "Konum kilitlendi.",
        Text::Shown => "Katman gösterildi.",
        Text::Hidden => "Katman gizlendi.",
        Text::Rotated => "90° döndürüldü.",
        Text::NoMedia => "Medya seçilmedi.",
        Text::UnexpectedError => "Beklenmeyen bir hata oluştu: ",
    }
}
