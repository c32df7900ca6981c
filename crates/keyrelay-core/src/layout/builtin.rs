//! Built-in language layouts.
//!
//! Each layout follows the physical QWERTY grid; non-Latin layouts keep the
//! Latin position name as `logical_key` and carry the script character in
//! `display`.  Chinese and Japanese are intentionally absent: they require IME
//! composition, which this keyboard does not implement.

use super::{KeyDescriptor, LanguageLayout};

fn k(display: &str) -> KeyDescriptor {
    KeyDescriptor::normal(display)
}

fn ks(display: &str, shift: &str) -> KeyDescriptor {
    KeyDescriptor::normal(display).with_shift(shift)
}

fn kp(logical: &str, display: &str) -> KeyDescriptor {
    KeyDescriptor::keyed(logical, display)
}

fn kps(logical: &str, display: &str, shift: &str) -> KeyDescriptor {
    KeyDescriptor::keyed(logical, display).with_shift(shift)
}

/// US-style shifted digit row shared by the Latin layouts.
fn digit_row() -> Vec<KeyDescriptor> {
    let mut row = vec![
        ks("1", "!"),
        ks("2", "@"),
        ks("3", "#"),
        ks("4", "$"),
        ks("5", "%"),
        ks("6", "^"),
        ks("7", "&"),
        ks("8", "*"),
        ks("9", "("),
        ks("0", ")"),
        ks("-", "_"),
        ks("=", "+"),
    ];
    row.push(KeyDescriptor::special("Backspace", "⌫").with_width(2.0));
    row
}

/// The bottom row: modifiers around a wide space bar.
fn control_row() -> Vec<KeyDescriptor> {
    vec![
        KeyDescriptor::modifier("Ctrl", "Ctrl").with_width(1.5),
        KeyDescriptor::modifier("Alt", "Alt").with_width(1.5),
        KeyDescriptor::special(" ", "Space").with_width(6.0),
        KeyDescriptor::modifier("AltGr", "Alt").with_width(1.5),
        KeyDescriptor::modifier("CapsLock", "Caps").with_width(1.5),
    ]
}

fn shift_key() -> KeyDescriptor {
    KeyDescriptor::modifier("Shift", "Shift").with_width(2.25)
}

fn enter_key() -> KeyDescriptor {
    KeyDescriptor::special("Enter", "⏎").with_width(1.75)
}

fn tab_key() -> KeyDescriptor {
    KeyDescriptor::special("Tab", "Tab").with_width(1.5)
}

/// Assembles a layout from the three letter rows, adding the shared digit,
/// control, Tab/Enter/Shift furniture.
fn assemble(
    code: &str,
    name: &str,
    top: Vec<KeyDescriptor>,
    home: Vec<KeyDescriptor>,
    bottom: Vec<KeyDescriptor>,
) -> LanguageLayout {
    let mut top_row = vec![tab_key()];
    top_row.extend(top);

    let mut home_row = home;
    home_row.push(enter_key());

    let mut bottom_row = vec![shift_key()];
    bottom_row.extend(bottom);

    LanguageLayout {
        code: code.to_string(),
        name: name.to_string(),
        rows: vec![digit_row(), top_row, home_row, bottom_row, control_row()],
    }
}

fn letters(spec: &str) -> Vec<KeyDescriptor> {
    spec.split_whitespace()
        .map(|s| {
            let upper = s.to_uppercase();
            if upper != s {
                ks(s, &upper)
            } else {
                k(s)
            }
        })
        .collect()
}

fn english() -> LanguageLayout {
    let mut home = letters("a s d f g h j k l");
    home.push(ks(";", ":"));
    home.push(ks("'", "\""));
    let mut bottom = letters("z x c v b n m");
    bottom.push(ks(",", "<"));
    bottom.push(ks(".", ">"));
    bottom.push(ks("/", "?"));
    assemble("en", "English", letters("q w e r t y u i o p"), home, bottom)
}

fn spanish() -> LanguageLayout {
    let mut home = letters("a s d f g h j k l ñ");
    home.push(ks("´", "¨"));
    let mut bottom = letters("z x c v b n m");
    bottom.push(ks(",", ";"));
    bottom.push(ks(".", ":"));
    bottom.push(ks("¡", "¿"));
    assemble("es", "Español", letters("q w e r t y u i o p"), home, bottom)
}

fn french() -> LanguageLayout {
    // AZERTY letter positions; logical keys stay on the QWERTY grid.
    let top = vec![
        kps("q", "a", "A"),
        kps("w", "z", "Z"),
        ks("e", "E"),
        ks("r", "R"),
        ks("t", "T"),
        ks("y", "Y"),
        ks("u", "U"),
        ks("i", "I"),
        ks("o", "O"),
        ks("p", "P"),
    ];
    let home = vec![
        kps("a", "q", "Q"),
        ks("s", "S"),
        ks("d", "D"),
        ks("f", "F"),
        ks("g", "G"),
        ks("h", "H"),
        ks("j", "J"),
        ks("k", "K"),
        ks("l", "L"),
        kps(";", "m", "M"),
        kps("'", "ù", "%"),
    ];
    let bottom = vec![
        kps("z", "w", "W"),
        ks("x", "X"),
        ks("c", "C"),
        ks("v", "V"),
        ks("b", "B"),
        ks("n", "N"),
        kps("m", ",", "?"),
        kps(",", ";", "."),
        kps(".", ":", "/"),
        kps("/", "é", "è"),
    ];
    assemble("fr", "Français", top, home, bottom)
}

fn german() -> LanguageLayout {
    // QWERTZ: y and z swap positions; umlauts sit on the right-hand keys.
    let top = vec![
        ks("q", "Q"),
        ks("w", "W"),
        ks("e", "E"),
        ks("r", "R"),
        ks("t", "T"),
        kps("y", "z", "Z"),
        ks("u", "U"),
        ks("i", "I"),
        ks("o", "O"),
        ks("p", "P"),
        kps("[", "ü", "Ü"),
    ];
    let mut home = letters("a s d f g h j k l");
    home.push(kps(";", "ö", "Ö"));
    home.push(kps("'", "ä", "Ä"));
    let bottom = vec![
        kps("z", "y", "Y"),
        ks("x", "X"),
        ks("c", "C"),
        ks("v", "V"),
        ks("b", "B"),
        ks("n", "N"),
        ks("m", "M"),
        kps(",", ",", ";"),
        kps(".", ".", ":"),
        kps("/", "ß", "?"),
    ];
    assemble("de", "Deutsch", top, home, bottom)
}

fn russian() -> LanguageLayout {
    let top = vec![
        kps("q", "й", "Й"),
        kps("w", "ц", "Ц"),
        kps("e", "у", "У"),
        kps("r", "к", "К"),
        kps("t", "е", "Е"),
        kps("y", "н", "Н"),
        kps("u", "г", "Г"),
        kps("i", "ш", "Ш"),
        kps("o", "щ", "Щ"),
        kps("p", "з", "З"),
        kps("[", "х", "Х"),
        kps("]", "ъ", "Ъ"),
    ];
    let home = vec![
        kps("a", "ф", "Ф"),
        kps("s", "ы", "Ы"),
        kps("d", "в", "В"),
        kps("f", "а", "А"),
        kps("g", "п", "П"),
        kps("h", "р", "Р"),
        kps("j", "о", "О"),
        kps("k", "л", "Л"),
        kps("l", "д", "Д"),
        kps(";", "ж", "Ж"),
        kps("'", "э", "Э"),
    ];
    let bottom = vec![
        kps("z", "я", "Я"),
        kps("x", "ч", "Ч"),
        kps("c", "с", "С"),
        kps("v", "м", "М"),
        kps("b", "и", "И"),
        kps("n", "т", "Т"),
        kps("m", "ь", "Ь"),
        kps(",", "б", "Б"),
        kps(".", "ю", "Ю"),
        kps("/", ".", ","),
    ];
    assemble("ru", "Русский", top, home, bottom)
}

fn hindi() -> LanguageLayout {
    // InScript-derived Devanagari mapping; shift yields the aspirated or
    // independent-vowel counterpart where one exists.
    let top = vec![
        kps("q", "ौ", "औ"),
        kps("w", "ै", "ऐ"),
        kps("e", "ा", "आ"),
        kps("r", "ी", "ई"),
        kps("t", "ू", "ऊ"),
        kps("y", "ब", "भ"),
        kps("u", "ह", "ङ"),
        kps("i", "ग", "घ"),
        kps("o", "द", "ध"),
        kps("p", "ज", "झ"),
        kps("[", "ड", "ढ"),
    ];
    let home = vec![
        kps("a", "ो", "ओ"),
        kps("s", "े", "ए"),
        kps("d", "्", "अ"),
        kps("f", "ि", "इ"),
        kps("g", "ु", "उ"),
        kps("h", "प", "फ"),
        kps("j", "र", "ऱ"),
        kps("k", "क", "ख"),
        kps("l", "त", "थ"),
        kps(";", "च", "छ"),
        kps("'", "ट", "ठ"),
    ];
    let bottom = vec![
        kps("z", "ॉ", "ऑ"),
        kps("x", "ं", "ँ"),
        kps("c", "म", "ण"),
        kps("v", "न", "ऩ"),
        kps("b", "व", "ळ"),
        kps("n", "ल", "श"),
        kps("m", "स", "ष"),
        kps(",", ",", "।"),
        kps(".", ".", "॥"),
        kps("/", "य", "ञ"),
    ];
    assemble("hi", "हिन्दी", top, home, bottom)
}

fn arabic() -> LanguageLayout {
    let top = vec![
        kp("q", "ض"),
        kp("w", "ص"),
        kp("e", "ث"),
        kp("r", "ق"),
        kp("t", "ف"),
        kp("y", "غ"),
        kp("u", "ع"),
        kp("i", "ه"),
        kp("o", "خ"),
        kp("p", "ح"),
        kp("[", "ج"),
        kp("]", "د"),
    ];
    let home = vec![
        kp("a", "ش"),
        kp("s", "س"),
        kp("d", "ي"),
        kp("f", "ب"),
        kp("g", "ل"),
        kp("h", "ا"),
        kp("j", "ت"),
        kp("k", "ن"),
        kp("l", "م"),
        kp(";", "ك"),
        kp("'", "ط"),
    ];
    let bottom = vec![
        kp("z", "ئ"),
        kp("x", "ء"),
        kp("c", "ؤ"),
        kp("v", "ر"),
        kp("b", "لا"),
        kp("n", "ى"),
        kp("m", "ة"),
        kp(",", "و"),
        kp(".", "ز"),
        kp("/", "ظ"),
    ];
    assemble("ar", "العربية", top, home, bottom)
}

/// All built-in layouts in selector order.
pub(super) fn all() -> Vec<LanguageLayout> {
    vec![
        english(),
        hindi(),
        arabic(),
        spanish(),
        french(),
        german(),
        russian(),
    ]
}
