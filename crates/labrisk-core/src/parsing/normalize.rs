/// Normalize a substance name or label to its canonical comparison key.
///
/// Steps:
/// 1. Lowercase
/// 2. Fold accented letters to their base letter, drop combining marks
/// 3. Collapse every run of non-alphanumeric characters into one space
/// 4. Trim
///
/// The result is only ever used for comparison, never for display.
/// `normalize(normalize(x)) == normalize(x)` for every input.
pub fn normalize(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars().flat_map(char::to_lowercase) {
        if is_combining_mark(c) {
            continue;
        }
        if let Some(folded) = fold_diacritic(c) {
            push_word_part(&mut result, &mut pending_space, folded);
        } else if c.is_alphanumeric() {
            let mut buf = [0u8; 4];
            push_word_part(&mut result, &mut pending_space, c.encode_utf8(&mut buf));
        } else {
            pending_space = true;
        }
    }

    result
}

/// Number of alphanumeric characters left after normalization.
pub fn alphanumeric_len(raw: &str) -> usize {
    normalize(raw).chars().filter(|c| c.is_alphanumeric()).count()
}

fn push_word_part(result: &mut String, pending_space: &mut bool, part: &str) {
    if *pending_space && !result.is_empty() {
        result.push(' ');
    }
    *pending_space = false;
    result.push_str(part);
}

/// Combining diacritical marks block (U+0300..U+036F).
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Base-letter replacement for precomposed Latin letters. Input is
/// already lowercase.
fn fold_diacritic(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'œ' => "oe",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ß' => "ss",
        'ţ' | 'ť' | 'ŧ' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name() {
        assert_eq!(normalize("Ethanol"), "ethanol");
    }

    #[test]
    fn test_whitespace_handling() {
        assert_eq!(normalize("  Sulfuric   Acid  "), "sulfuric acid");
    }

    #[test]
    fn test_punctuation_collapsed() {
        assert_eq!(normalize("Sodium-hypochlorite (bleach)"), "sodium hypochlorite bleach");
        assert_eq!(normalize("2,4-Dinitrophenol"), "2 4 dinitrophenol");
        assert_eq!(normalize("--acetone--"), "acetone");
    }

    #[test]
    fn test_diacritics_folded() {
        assert_eq!(normalize("Éthanol"), "ethanol");
        assert_eq!(normalize("Acide sulfurique à 98%"), "acide sulfurique a 98");
        assert_eq!(normalize("Hypochlorite de sodium (eau de Javel)"), "hypochlorite de sodium eau de javel");
        assert_eq!(normalize("Straße"), "strasse");
    }

    #[test]
    fn test_combining_marks_dropped() {
        // "e" followed by U+0301 COMBINING ACUTE ACCENT
        assert_eq!(normalize("e\u{0301}thanol"), "ethanol");
    }

    #[test]
    fn test_empty_and_symbols_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("!?-()"), "");
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "Sodium-hypochlorite (bleach)",
            "  ÉTHANOL  absolu ",
            "Chloroforme/Trichlorométhane",
            "Œstradiol",
            "H₂O₂ 30%",
            "x",
            "",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_alphanumeric_len() {
        assert_eq!(alphanumeric_len("A"), 1);
        assert_eq!(alphanumeric_len("-a-"), 1);
        assert_eq!(alphanumeric_len("HCl"), 3);
        assert_eq!(alphanumeric_len("a b"), 2);
    }
}
