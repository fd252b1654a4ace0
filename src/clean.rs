//! Generic label cleaning shared by the agency customizations
//!
//! Whole-word rules use `(^|\W)` and `(\W|$)` boundaries. The boundary
//! characters are captured and put back by the replacement, so only the word
//! itself is rewritten.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

pub const SPACE: &str = " ";

/// Builds a case-insensitive pattern matching any of `words` as a whole word
pub fn clean_words(words: &[&str]) -> Result<Regex, regex::Error> {
    let alternatives = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)((^|\W)({alternatives})(\W|$))"))
}

/// Replacement for a [clean_words] pattern, keeping the word boundaries
pub fn clean_words_replacement(replacement: &str) -> String {
    format!("${{2}}{}${{4}}", replacement.replace('$', "$$"))
}

lazy_static! {
    static ref CLEAN_SLASHES: Regex = Regex::new(r"\s*/\s*").unwrap();
    static ref SPACE_CHARS: Regex =
        Regex::new(r"[\t\n\r\x{00A0}\x{2007}\x{2009}\x{202F}\x{3000}]").unwrap();
    static ref SPACE_RUNS: Regex = Regex::new(r" {2,}").unwrap();
    static ref CLEAN_SPACES: Regex = Regex::new(r"\s+").unwrap();
    static ref CLEAN_PARENTHESIS_OPEN: Regex = Regex::new(r"\(\s+").unwrap();
    static ref CLEAN_PARENTHESIS_CLOSE: Regex = Regex::new(r"\s+\)").unwrap();
    static ref UPPER_CASE_WORD: Regex = Regex::new(r"\b\p{Lu}{2,}\b").unwrap();
    static ref CLEAN_ET: Regex = clean_words(&["et"]).unwrap();
    static ref SAINT: Regex = clean_words(&["saint"]).unwrap();
    static ref SAINTE: Regex = clean_words(&["sainte"]).unwrap();
    // lower case only: capitalized articles are part of a proper name
    static ref FRENCH_ARTICLES: Regex =
        Regex::new(r"(^|\s)(?:(?:de|des|du|la|le|les|au|aux|à)\s+|[ld]['’])+").unwrap();
    static ref STREET_TYPES_FR_CA: Vec<(Regex, String)> = [
        (vec!["autoroute"], "Aut."),
        (vec!["avenue"], "Av."),
        (vec!["boulevard"], "Boul."),
        (vec!["chemin"], "Ch."),
        (vec!["montée", "montee"], "Mtée"),
        (vec!["place"], "Pl."),
        (vec!["promenade"], "Prom."),
        (vec!["route"], "Rte"),
        (vec!["terrasse"], "Tsse"),
    ]
    .iter()
    .map(|(words, short)| (clean_words(words).unwrap(), clean_words_replacement(short)))
    .collect();
}

const WORD_DELIMITERS: [char; 6] = [' ', '-', '/', '(', '\'', '’'];

/// `a/b`, `a /b` and `a/ b` all become `a / b`
pub fn clean_slashes(label: &str) -> String {
    CLEAN_SLASHES.replace_all(label, " / ").into_owned()
}

/// Tabs, new lines and the non-breaking spaces become plain spaces
pub fn clean_space_chars(label: &str) -> String {
    SPACE_CHARS.replace_all(label, SPACE).into_owned()
}

pub fn clean_space_runs(label: &str) -> String {
    SPACE_RUNS.replace_all(label, SPACE).into_owned()
}

/// The word `et` becomes `&`
pub fn clean_et(label: &str) -> String {
    CLEAN_ET
        .replace_all(label, clean_words_replacement("&").as_str())
        .into_owned()
}

/// Abbreviates the French-Canadian street types
pub fn clean_street_types_fr_ca(label: &str) -> String {
    STREET_TYPES_FR_CA
        .iter()
        .fold(label.to_owned(), |label, (pattern, replacement)| {
            pattern.replace_all(&label, replacement.as_str()).into_owned()
        })
}

/// Lowercases the words written all in capitals, such as `BOUL. TASCHEREAU`
pub fn lower_case_upper_case_words(label: &str) -> String {
    UPPER_CASE_WORD
        .replace_all(label, |caps: &Captures| caps[0].to_lowercase())
        .into_owned()
}

pub fn clean_label(label: &str) -> String {
    let label = CLEAN_SPACES.replace_all(label, SPACE);
    let label = CLEAN_PARENTHESIS_OPEN.replace_all(&label, "(");
    let label = CLEAN_PARENTHESIS_CLOSE.replace_all(&label, ")");
    capitalize_words(label.trim())
}

pub fn clean_label_fr(label: &str) -> String {
    let label = SAINT.replace_all(label, clean_words_replacement("St").as_str());
    let label = SAINTE.replace_all(&label, clean_words_replacement("Ste").as_str());
    let label = FRENCH_ARTICLES.replace_all(label.trim(), "${1}");
    clean_label(&label)
}

/// Upper cases the first letter of each word, leaving the rest untouched
fn capitalize_words(label: &str) -> String {
    let mut result = String::with_capacity(label.len());
    let mut word_start = true;
    for c in label.chars() {
        if word_start && c.is_alphabetic() {
            result.extend(c.to_uppercase());
            word_start = false;
        } else {
            result.push(c);
            if WORD_DELIMITERS.contains(&c) {
                word_start = true;
            } else if c.is_alphanumeric() {
                word_start = false;
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_words_only() {
        let secteur = clean_words(&["secteur", "secteurs"]).unwrap();
        let replacement = clean_words_replacement("");
        assert_eq!(
            " B Brossard",
            secteur.replace_all("Secteur B Brossard", replacement.as_str())
        );
        assert_eq!(
            "Intersecteur",
            secteur.replace_all("Intersecteur", replacement.as_str())
        );
        assert_eq!(
            "(Ind.)",
            clean_words(&["industriel"])
                .unwrap()
                .replace_all("(industriel)", clean_words_replacement("Ind.").as_str())
        );
    }

    #[test]
    fn literal_words_and_replacements() {
        let dollar = clean_words(&["dollars"]).unwrap();
        assert_eq!(
            "pay $5 now",
            dollar.replace_all("pay dollars now", clean_words_replacement("$5").as_str())
        );
        assert_eq!(
            "${2}$$1${4}",
            clean_words_replacement("$1")
        );
        let initials = clean_words(&["p.v"]).unwrap();
        assert!(initials.is_match("secteur P.V Brossard"));
        assert!(!initials.is_match("secteur PxV Brossard"));
    }

    #[test]
    fn slashes_and_spaces() {
        assert_eq!("Panama / Ctr-Ville", clean_slashes("Panama/Ctr-Ville"));
        assert_eq!("Panama / Ctr-Ville", clean_slashes("Panama  /Ctr-Ville"));
        assert_eq!("a b", clean_space_chars("a\u{00A0}b"));
        assert_eq!("a b c", clean_space_runs("a   b  c"));
    }

    #[test]
    fn et() {
        assert_eq!("Thurber & De Gentilly", clean_et("Thurber et De Gentilly"));
        assert_eq!("Etienne", clean_et("Etienne"));
    }

    #[test]
    fn street_types() {
        assert_eq!(
            "Boul. Taschereau & Av. Auteuil",
            clean_street_types_fr_ca("boulevard Taschereau & avenue Auteuil")
        );
        assert_eq!("Mtée Sabourin", clean_street_types_fr_ca("Montée Sabourin"));
        assert_eq!("Aut. 20", clean_street_types_fr_ca("autoroute 20"));
        assert_eq!("Routier", clean_street_types_fr_ca("Routier"));
    }

    #[test]
    fn upper_case_words() {
        assert_eq!(
            "boul. taschereau / av. Auteuil",
            lower_case_upper_case_words("BOUL. TASCHEREAU / AV. Auteuil")
        );
        assert_eq!("cégep P-V", lower_case_upper_case_words("CÉGEP P-V"));
    }

    #[test]
    fn labels() {
        assert_eq!("Métro Papineau", clean_label("  métro   papineau "));
        assert_eq!("Parc (Nord)", clean_label("parc ( nord )"));
        assert_eq!("Gaétan-Boucher", clean_label("gaétan-boucher"));
        assert_eq!("CÉGEP Édouard-Montpetit", clean_label("CÉGEP édouard-montpetit"));
    }

    #[test]
    fn french_labels() {
        assert_eq!("St-Hubert", clean_label_fr("saint-hubert"));
        assert_eq!("Ste-Julie", clean_label_fr("Sainte-Julie"));
        assert_eq!("Église", clean_label_fr("l'église"));
        assert_eq!("Ch. Église", clean_label_fr("Ch. de l'église"));
        assert_eq!("Rue Paix", clean_label_fr("rue de la paix"));
        assert_eq!("Thurber & De Gentilly", clean_label_fr("thurber & De Gentilly"));
        assert_eq!("La Prairie", clean_label_fr("La Prairie"));
    }
}
