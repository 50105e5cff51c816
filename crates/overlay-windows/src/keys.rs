use overlay_core::settings::{HotkeyConfig, Modifier};

/// Named keys accepted in `[hotkey] key`, matched case-insensitively.
const NAMED_KEYS: &[(&[&str], u32)] = &[
    (&["SPACE"], 0x20),
    (&["ENTER", "RETURN"], 0x0D),
    (&["TAB"], 0x09),
    (&["ESCAPE", "ESC"], 0x1B),
    (&["BACKSPACE"], 0x08),
    (&["INSERT", "INS"], 0x2D),
    (&["DELETE", "DEL"], 0x2E),
    (&["HOME"], 0x24),
    (&["END"], 0x23),
    (&["PAGEUP", "PGUP"], 0x21),
    (&["PAGEDOWN", "PGDN"], 0x22),
    (&["LEFT"], 0x25),
    (&["UP"], 0x26),
    (&["RIGHT"], 0x27),
    (&["DOWN"], 0x28),
    (&["PAUSE"], 0x13),
    (&["SCROLLLOCK"], 0x91),
    (&["MINUS"], 0xBD),
    (&["PLUS", "EQUALS"], 0xBB),
    (&["COMMA"], 0xBC),
    (&["PERIOD", "DOT"], 0xBE),
    (&["BACKTICK", "GRAVE"], 0xC0),
];

/// Resolves a key name to a Windows virtual-key code.
///
/// Accepts single letters and digits, `F1`–`F24`, `Num0`–`Num9`, and the
/// names in [`NAMED_KEYS`].
pub fn vk_from_name(name: &str) -> Option<u32> {
    let upper = name.trim().to_ascii_uppercase();

    if let [ch] = upper.as_bytes()
        && (ch.is_ascii_uppercase() || ch.is_ascii_digit())
    {
        return Some(u32::from(*ch));
    }

    if let Some(n) = numbered(&upper, "F", 1..=24) {
        return Some(0x70 + n - 1); // VK_F1
    }
    if let Some(n) = numbered(&upper, "NUM", 0..=9) {
        return Some(0x60 + n); // VK_NUMPAD0
    }

    NAMED_KEYS
        .iter()
        .find(|(names, _)| names.contains(&upper.as_str()))
        .map(|&(_, vk)| vk)
}

fn numbered(name: &str, prefix: &str, range: std::ops::RangeInclusive<u32>) -> Option<u32> {
    let n = name.strip_prefix(prefix)?.parse::<u32>().ok()?;
    range.contains(&n).then_some(n)
}

/// Human-readable form of a binding, e.g. `Ctrl+Shift+H`.
pub fn describe(config: &HotkeyConfig) -> String {
    let mut parts: Vec<String> = config
        .modifiers
        .iter()
        .map(|m| {
            match m {
                Modifier::Ctrl => "Ctrl",
                Modifier::Shift => "Shift",
                Modifier::Alt => "Alt",
                Modifier::Win => "Win",
            }
            .to_string()
        })
        .collect();
    parts.push(config.key.to_ascii_uppercase());
    parts.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_characters_map_to_ascii() {
        // Assert
        assert_eq!(vk_from_name("h"), Some(0x48));
        assert_eq!(vk_from_name("H"), Some(0x48));
        assert_eq!(vk_from_name("7"), Some(0x37));
    }

    #[test]
    fn function_and_numpad_keys() {
        // Assert
        assert_eq!(vk_from_name("F1"), Some(0x70));
        assert_eq!(vk_from_name("f24"), Some(0x87));
        assert_eq!(vk_from_name("F25"), None);
        assert_eq!(vk_from_name("Num5"), Some(0x65));
    }

    #[test]
    fn named_keys_and_aliases() {
        // Assert
        assert_eq!(vk_from_name("space"), Some(0x20));
        assert_eq!(vk_from_name("Esc"), Some(0x1B));
        assert_eq!(vk_from_name("PgDn"), Some(0x22));
        assert_eq!(vk_from_name("nonsense"), None);
        assert_eq!(vk_from_name(""), None);
    }

    #[test]
    fn default_binding_is_described() {
        // Assert
        assert_eq!(describe(&HotkeyConfig::default()), "Ctrl+Shift+H");
    }
}
