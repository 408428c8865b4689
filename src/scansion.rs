/*! Scansion helpers

Small, pure functions shared by readers: metrical pattern normalization and synalepha detection.
!*/

/// Symbol replacing each run of digits in a metrical pattern.
pub const STRESS_PLACEHOLDER: char = '+';

/// Syllable boundary marker found in annotated words and metrical attributes.
pub const SYLLABLE_BOUNDARY: char = '|';

/// Vowels that can merge with the first vowel of the following word.
const SYNALEPHA_VOWELS: [char; 10] = ['a', 'e', 'i', 'o', 'u', 'á', 'é', 'í', 'ó', 'ú'];

/// Normalize a raw metrical annotation.
///
/// Boundary markers are dropped and every maximal run of ASCII digits
/// becomes a single [STRESS_PLACEHOLDER]. Anything else is kept as is.
///
/// ```
/// use versekit::scansion::normalize_metrical_pattern;
/// assert_eq!(normalize_metrical_pattern("2|3"), "++");
/// assert_eq!(normalize_metrical_pattern("4-8-10"), "+-+-+");
/// ```
pub fn normalize_metrical_pattern(raw: &str) -> String {
    let mut pattern = String::with_capacity(raw.len());
    let mut in_digits = false;
    for c in raw.chars().filter(|c| *c != SYLLABLE_BOUNDARY) {
        if c.is_ascii_digit() {
            if !in_digits {
                pattern.push(STRESS_PLACEHOLDER);
            }
            in_digits = true;
        } else {
            pattern.push(c);
            in_digits = false;
        }
    }
    pattern
}

/// `true` if the word ends with a vowel eligible for synalepha.
///
/// Case sensitive. An empty word never has synalepha.
pub fn has_synalepha(word: &str) -> bool {
    word.chars()
        .last()
        .map_or(false, |c| SYNALEPHA_VOWELS.contains(&c))
}

/// Split an annotated word into its syllables, dropping empty fragments.
pub fn split_syllables(annotated: &str) -> Vec<String> {
    annotated
        .split(SYLLABLE_BOUNDARY)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
