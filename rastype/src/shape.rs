//! Visual-order text preparation.
//!
//! Rendering walks characters in visual order, left to right. Input
//! strings carry characters in logical order, so right-to-left runs
//! must be reordered before drawing, Arabic letters replaced with
//! their contextual presentation forms, and decomposed Hangul jamo
//! composed into syllables. Doing these substitutions up front keeps
//! glyph lookup a plain codepoint-to-glyph mapping.

mod arabic;

/// Script classes that shape or reorder differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Script {
    Neutral,
    Hebrew,
    Arabic,
    Korean,
    Latin,
}

fn script_of(code: u32) -> Script {
    match code {
        0..=0x2f => Script::Neutral,
        0x0590..=0x05ff => Script::Hebrew,
        0x0600..=0x06ff | 0xfb1d..=0xfeff => Script::Arabic,
        0x1100..=0x11ff | 0x3130..=0x318f | 0xac00..=0xd7a3 => Script::Korean,
        _ => Script::Latin,
    }
}

/// Vertical presentation forms for punctuation that rotates in
/// vertical writing, keyed by the base character.
pub(crate) const VERTICAL_FORMS: [(u32, u32); 10] = [
    (0x002c, 0xfe10),
    (0x3001, 0xfe11),
    (0x3002, 0xfe12),
    (0x003a, 0xfe13),
    (0x003b, 0xfe14),
    (0x0021, 0xfe15),
    (0x003f, 0xfe16),
    (0x3016, 0xfe17),
    (0x3017, 0xfe18),
    (0x2026, 0xfe19),
];

fn vertical_form(code: u32) -> u32 {
    VERTICAL_FORMS
        .iter()
        .find(|(base, _)| *base == code)
        .map_or(code, |(_, form)| *form)
}

/// Shapes an Arabic run in place: initial form for the first letter,
/// medial for interior ones, final for the last, with LAM+ALEF pairs
/// collapsed into their ligatures, then reverses it into visual order.
fn arabic_run(word: &[u32]) -> Vec<u32> {
    if let [code] = word {
        return vec![arabic::form(&arabic::ISOL, *code)];
    }
    let mut visual = Vec::with_capacity(word.len());
    let mut prefix = arabic::form(&arabic::INIT, word[0]);
    visual.push(prefix);
    for (i, &raw) in word.iter().enumerate().skip(1) {
        let table = if i + 1 == word.len() {
            &arabic::FINA
        } else {
            &arabic::MEDI
        };
        let code = match arabic::lam_alef_ligature(prefix, raw) {
            Some(ligature) => {
                visual.pop();
                ligature
            }
            None => arabic::form(table, raw),
        };
        visual.push(code);
        prefix = code;
    }
    visual.reverse();
    visual
}

/// Latin ligature pairs, matched against the previously emitted
/// character so `ffi` builds up through U+FB00.
const LATIN_LIGATURES: [(u32, u32, u32); 5] = [
    (0x0066, 0x0066, 0xfb00),
    (0x0066, 0x0069, 0xfb01),
    (0x0066, 0x006c, 0xfb02),
    (0xfb00, 0x0069, 0xfb03),
    (0xfb00, 0x006c, 0xfb04),
];

fn latin_run(word: &[u32]) -> Vec<u32> {
    let mut visual: Vec<u32> = Vec::with_capacity(word.len());
    for &code in word {
        if let Some(last) = visual.last_mut() {
            if let Some((_, _, ligature)) = LATIN_LIGATURES
                .iter()
                .find(|(prefix, second, _)| prefix == last && *second == code)
            {
                *last = *ligature;
                continue;
            }
        }
        visual.push(code);
    }
    visual
}

/// Composes decomposed Hangul jamo into precomposed syllables. A
/// leading consonant followed by a vowel forms a syllable; a trailing
/// consonant after that joins it. Jamo that do not compose pass
/// through.
fn korean_run(word: &[u32]) -> Vec<u32> {
    let mut visual = Vec::with_capacity(word.len());
    let mut rest = word;
    while let [code, ..] = rest {
        let lead = code.wrapping_sub(0x1100);
        if lead <= 0x12 {
            if let [_, vowel, tail @ ..] = rest {
                let vowel_index = vowel.wrapping_sub(0x1161);
                if vowel_index <= 0x14 {
                    let mut syllable = 0xac00 + (lead * 21 + vowel_index) * 28;
                    rest = tail;
                    if let [trail, tail @ ..] = rest {
                        let trail_index = trail.wrapping_sub(0x11a7);
                        if (1..=0x1b).contains(&trail_index) {
                            syllable += trail_index;
                            rest = tail;
                        }
                    }
                    visual.push(syllable);
                    continue;
                }
            }
        }
        visual.push(*code);
        rest = &rest[1..];
    }
    visual
}

fn create_run(word: Vec<u32>, script: Script) -> Vec<u32> {
    match script {
        Script::Neutral => word,
        Script::Hebrew => {
            let mut word = word;
            if word.len() > 1 {
                word.reverse();
            }
            word
        }
        Script::Arabic => arabic_run(&word),
        Script::Korean => korean_run(&word),
        Script::Latin => latin_run(&word),
    }
}

/// Unicode codepoints of a string sorted into visual order.
pub struct CharacterIterator {
    text: Vec<u32>,
}

impl CharacterIterator {
    /// Reorders and shapes `text` (UTF-16 code units, logical order).
    ///
    /// `direction` biases the overall paragraph direction: each
    /// left-to-right run (Latin or Korean) adds one, every other run
    /// subtracts one, and a negative total reverses the run order.
    /// With `vertical` set, punctuation with a vertical presentation
    /// form is rewritten to that form before shaping.
    pub fn new(text: &[u16], direction: i32, vertical: bool) -> CharacterIterator {
        let mut runs: Vec<Vec<u32>> = Vec::new();
        let mut word: Vec<u32> = Vec::new();
        let mut script = Script::Neutral;
        let mut direction = direction;
        let mut lead: u32 = 0;
        for &unit in text {
            let mut code = unit as u32;
            if lead != 0 {
                code = 0x10000 | ((lead - 0xd800) << 10) | ((code - 0xdc00) & 0x3ff);
                lead = 0;
            }
            if (0xd800..0xdc00).contains(&code) {
                lead = code;
                continue;
            }
            if vertical {
                code = vertical_form(code);
            }
            let code_script = script_of(code);
            if code_script != script && !word.is_empty() {
                direction += run_direction(script);
                runs.push(create_run(std::mem::take(&mut word), script));
            }
            word.push(code);
            script = code_script;
        }
        if !word.is_empty() {
            direction += run_direction(script);
            runs.push(create_run(word, script));
        }
        if direction < 0 {
            runs.reverse();
        }
        CharacterIterator {
            text: runs.concat(),
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The codepoint at visual position `n`.
    pub fn char_code_at(&self, n: usize) -> u32 {
        self.text[n]
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.text.iter().copied()
    }
}

fn run_direction(script: Script) -> i32 {
    match script {
        Script::Latin | Script::Korean => 1,
        _ => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visual(text: &[u16]) -> Vec<u32> {
        CharacterIterator::new(text, 0, false).iter().collect()
    }

    #[test]
    fn latin_stays_in_logical_order() {
        assert_eq!(visual(&[0x41, 0x42, 0x43]), [0x41, 0x42, 0x43]);
    }

    #[test]
    fn latin_f_ligatures_chain() {
        // "ffi" composes through U+FB00 into U+FB03
        assert_eq!(visual(&[0x66, 0x66, 0x69]), [0xfb03]);
        assert_eq!(visual(&[0x66, 0x6c]), [0xfb02]);
        // "fa" has no ligature
        assert_eq!(visual(&[0x66, 0x61]), [0x66, 0x61]);
    }

    #[test]
    fn hebrew_run_reverses() {
        // ALEF BET -> visual BET ALEF
        assert_eq!(visual(&[0x05d0, 0x05d1]), [0x05d1, 0x05d0]);
        assert_eq!(visual(&[0x05d0]), [0x05d0]);
    }

    #[test]
    fn arabic_two_letters_take_initial_and_final_forms() {
        // BEH HAH: BEH initial U+FE91, HAH final U+FEA2, reversed
        assert_eq!(visual(&[0x0628, 0x062d]), [0xfea2, 0xfe91]);
    }

    #[test]
    fn arabic_single_letter_takes_isolated_form() {
        assert_eq!(visual(&[0x0628]), [0xfe8f]);
    }

    #[test]
    fn lam_alef_collapses_to_ligature() {
        // LAM ALEF: initial LAM U+FEDF absorbs the following ALEF
        assert_eq!(visual(&[0x0644, 0x0627]), [0xfefb]);
    }

    #[test]
    fn hangul_jamo_compose() {
        // HAN: H (U+1112) + A (U+1161) + N (U+11AB) -> U+D55C
        assert_eq!(visual(&[0x1112, 0x1161, 0x11ab]), [0xd55c]);
        // without a trailing consonant
        assert_eq!(visual(&[0x1112, 0x1161]), [0xd558]);
        // precomposed syllables pass through
        assert_eq!(visual(&[0xd55c]), [0xd55c]);
    }

    #[test]
    fn rtl_paragraph_reverses_run_order() {
        // Hebrew word, space, Hebrew word: three runs, net direction -1
        let text = [0x05d0, 0x05d1, 0x20, 0x05d2, 0x05d3];
        assert_eq!(visual(&text), [0x05d3, 0x05d2, 0x20, 0x05d1, 0x05d0]);
    }

    #[test]
    fn surrogate_pairs_decode() {
        // U+1D11E as a surrogate pair
        assert_eq!(visual(&[0xd834, 0xdd1e]), [0x1d11e]);
    }

    #[test]
    fn vertical_forms_rewrite_punctuation() {
        let iter = CharacterIterator::new(&[0x41, 0x2c], 0, true);
        let codes: Vec<u32> = iter.iter().collect();
        assert_eq!(codes, [0x41, 0xfe10]);
    }
}
