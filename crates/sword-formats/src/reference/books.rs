//! Book names, OSIS ids and abbreviations

use std::collections::HashMap;
use std::sync::LazyLock;

/// One book of the abbreviation table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookName {
    /// Canonical OSIS id
    pub osis: &'static str,
    /// English display name
    pub name: &'static str,
    /// Accepted abbreviations, lowercase with spaces removed
    pub abbreviations: &'static [&'static str],
}

const fn book(
    osis: &'static str,
    name: &'static str,
    abbreviations: &'static [&'static str],
) -> BookName {
    BookName {
        osis,
        name,
        abbreviations,
    }
}

/// The 66-book Protestant canon in canonical order
pub static CANONICAL_BOOKS: [BookName; 66] = [
    book("Gen", "Genesis", &["ge", "gn"]),
    book("Exod", "Exodus", &["ex", "exo", "exd"]),
    book("Lev", "Leviticus", &["le", "lv"]),
    book("Num", "Numbers", &["nu", "nm", "nb"]),
    book("Deut", "Deuteronomy", &["de", "dt", "deu"]),
    book("Josh", "Joshua", &["jos", "jsh"]),
    book("Judg", "Judges", &["jdg", "jg", "jdgs"]),
    book("Ruth", "Ruth", &["rth", "ru"]),
    book("1Sam", "1 Samuel", &["1sa", "1sm", "isamuel", "firstsamuel"]),
    book("2Sam", "2 Samuel", &["2sa", "2sm", "iisamuel", "secondsamuel"]),
    book("1Kgs", "1 Kings", &["1ki", "1kg", "1kin", "ikings", "firstkings"]),
    book("2Kgs", "2 Kings", &["2ki", "2kg", "2kin", "iikings", "secondkings"]),
    book("1Chr", "1 Chronicles", &["1ch", "1chron", "ichronicles", "firstchronicles"]),
    book("2Chr", "2 Chronicles", &["2ch", "2chron", "iichronicles", "secondchronicles"]),
    book("Ezra", "Ezra", &["ezr"]),
    book("Neh", "Nehemiah", &["ne"]),
    book("Esth", "Esther", &["est", "es"]),
    book("Job", "Job", &["jb"]),
    book("Ps", "Psalms", &["psalm", "psa", "pss", "psm", "pslm"]),
    book("Prov", "Proverbs", &["pr", "prv", "pro"]),
    book("Eccl", "Ecclesiastes", &["ecc", "ec", "qoh", "qoheleth"]),
    book("Song", "Song of Solomon", &["sos", "so", "songofsongs", "canticles", "cant"]),
    book("Isa", "Isaiah", &["is"]),
    book("Jer", "Jeremiah", &["je", "jr"]),
    book("Lam", "Lamentations", &["la"]),
    book("Ezek", "Ezekiel", &["eze", "ezk"]),
    book("Dan", "Daniel", &["da", "dn"]),
    book("Hos", "Hosea", &["ho"]),
    book("Joel", "Joel", &["jl"]),
    book("Amos", "Amos", &["am"]),
    book("Obad", "Obadiah", &["ob", "oba"]),
    book("Jonah", "Jonah", &["jon", "jnh"]),
    book("Mic", "Micah", &["mc"]),
    book("Nah", "Nahum", &["na"]),
    book("Hab", "Habakkuk", &["hb"]),
    book("Zeph", "Zephaniah", &["zep", "zp"]),
    book("Hag", "Haggai", &["hg"]),
    book("Zech", "Zechariah", &["zec", "zc"]),
    book("Mal", "Malachi", &["ml"]),
    book("Matt", "Matthew", &["mt", "mat"]),
    book("Mark", "Mark", &["mk", "mar", "mrk"]),
    book("Luke", "Luke", &["lk", "luk"]),
    book("John", "John", &["jn", "jhn", "joh"]),
    book("Acts", "Acts", &["ac", "act"]),
    book("Rom", "Romans", &["ro", "rm"]),
    book("1Cor", "1 Corinthians", &["1co", "icorinthians", "firstcorinthians"]),
    book("2Cor", "2 Corinthians", &["2co", "iicorinthians", "secondcorinthians"]),
    book("Gal", "Galatians", &["ga"]),
    book("Eph", "Ephesians", &["ephes"]),
    book("Phil", "Philippians", &["php", "pp"]),
    book("Col", "Colossians", &["co"]),
    book("1Thess", "1 Thessalonians", &["1th", "1thes", "ithessalonians"]),
    book("2Thess", "2 Thessalonians", &["2th", "2thes", "iithessalonians"]),
    book("1Tim", "1 Timothy", &["1ti", "1tm", "itimothy"]),
    book("2Tim", "2 Timothy", &["2ti", "2tm", "iitimothy"]),
    book("Titus", "Titus", &["tit", "ti"]),
    book("Phlm", "Philemon", &["phm", "philem"]),
    book("Heb", "Hebrews", &["he"]),
    book("Jas", "James", &["jm", "jam"]),
    book("1Pet", "1 Peter", &["1pe", "1pt", "ipeter"]),
    book("2Pet", "2 Peter", &["2pe", "2pt", "iipeter"]),
    book("1John", "1 John", &["1jn", "1jo", "1jhn", "ijohn"]),
    book("2John", "2 John", &["2jn", "2jo", "2jhn", "iijohn"]),
    book("3John", "3 John", &["3jn", "3jo", "3jhn", "iiijohn"]),
    book("Jude", "Jude", &["jud", "jd"]),
    book("Rev", "Revelation", &["re", "rv", "revelations", "apocalypse", "apoc"]),
];

/// Books of the larger Catholic, Orthodox and Ethiopian canons
pub static DEUTEROCANONICAL_BOOKS: [BookName; 16] = [
    book("Tob", "Tobit", &["tb", "tobias"]),
    book("Jdt", "Judith", &["jth", "jdth"]),
    book("Wis", "Wisdom", &["wisdomofsolomon", "ws", "wisd"]),
    book("Sir", "Sirach", &["ecclesiasticus", "ecclus", "sira"]),
    book("Bar", "Baruch", &["ba"]),
    book("EpJer", "Letter of Jeremiah", &["epistleofjeremiah", "letjer", "lje"]),
    book("1Macc", "1 Maccabees", &["1mac", "1ma", "imaccabees"]),
    book("2Macc", "2 Maccabees", &["2mac", "2ma", "iimaccabees"]),
    book("1Esd", "1 Esdras", &["1es", "iesdras"]),
    book("2Esd", "2 Esdras", &["2es", "iiesdras", "4ezra"]),
    book("PrMan", "Prayer of Manasseh", &["prayerofmanasses", "man"]),
    book("1En", "1 Enoch", &["enoch", "en", "henoch"]),
    book("Jub", "Jubilees", &["jubil"]),
    book("1Meq", "1 Meqabyan", &["1meqabyan", "imeqabyan"]),
    book("2Meq", "2 Meqabyan", &["2meqabyan", "iimeqabyan"]),
    book("3Meq", "3 Meqabyan", &["3meqabyan", "iiimeqabyan"]),
];

/// Paralipomena of Jeremiah, listed separately as it has no common English abbreviation
pub static REST_OF_BARUCH: BookName = book("4Bar", "4 Baruch", &["4baruch", "paraleipomenajeremiou"]);

/// OSIS ids of the 27 New Testament books
pub static NT_BOOKS: [&str; 27] = [
    "Matt", "Mark", "Luke", "John", "Acts", "Rom", "1Cor", "2Cor", "Gal", "Eph", "Phil", "Col",
    "1Thess", "2Thess", "1Tim", "2Tim", "Titus", "Phlm", "Heb", "Jas", "1Pet", "2Pet", "1John",
    "2John", "3John", "Jude", "Rev",
];

/// Lookup from normalised spelling to OSIS id
static LOOKUP: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    let books = CANONICAL_BOOKS
        .iter()
        .chain(DEUTEROCANONICAL_BOOKS.iter())
        .chain(std::iter::once(&REST_OF_BARUCH));
    for entry in books {
        map.insert(lookup_key(entry.osis), entry.osis);
        map.insert(lookup_key(entry.name), entry.osis);
        for abbreviation in entry.abbreviations {
            map.insert(lookup_key(abbreviation), entry.osis);
        }
    }
    map
});

/// Normalise a spelling for table lookup: lowercase, no spaces or dots
fn lookup_key(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve an abbreviation, full name or OSIS id to the canonical OSIS id
///
/// Returns an empty string when the input is not recognised.
pub fn normalize_book_name(input: &str) -> String {
    lookup_book(input).map(str::to_string).unwrap_or_default()
}

/// Resolve a book spelling to its OSIS id
pub fn lookup_book(input: &str) -> Option<&'static str> {
    LOOKUP.get(&lookup_key(input)).copied()
}

/// Position of an OSIS id in the fixed 66-book order
///
/// Only meaningful for the default versification; canons with extra books
/// must use [`crate::versification::Versification::ot_book_count`].
pub fn book_index(osis: &str) -> Option<usize> {
    CANONICAL_BOOKS.iter().position(|b| b.osis == osis)
}

/// Whether an OSIS id names a New Testament book
pub fn is_nt_book(osis: &str) -> bool {
    NT_BOOKS.contains(&osis)
}

/// Display name for an OSIS id
pub fn book_display_name(osis: &str) -> Option<&'static str> {
    CANONICAL_BOOKS
        .iter()
        .chain(DEUTEROCANONICAL_BOOKS.iter())
        .chain(std::iter::once(&REST_OF_BARUCH))
        .find(|b| b.osis == osis)
        .map(|b| b.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_normalize_full_names() {
        assert_eq!(normalize_book_name("Genesis"), "Gen");
        assert_eq!(normalize_book_name("song of solomon"), "Song");
        assert_eq!(normalize_book_name("1 John"), "1John");
        assert_eq!(normalize_book_name("I John"), "1John");
        assert_eq!(normalize_book_name("Revelation"), "Rev");
    }

    #[test]
    fn test_normalize_abbreviations() {
        assert_eq!(normalize_book_name("Mt"), "Matt");
        assert_eq!(normalize_book_name("1 Cor"), "1Cor");
        assert_eq!(normalize_book_name("Ps."), "Ps");
        assert_eq!(normalize_book_name("psalm"), "Ps");
        assert_eq!(normalize_book_name("Sir"), "Sir");
    }

    #[test]
    fn test_normalize_osis_is_identity() {
        for entry in &CANONICAL_BOOKS {
            assert_eq!(normalize_book_name(entry.osis), entry.osis);
        }
    }

    #[test]
    fn test_unknown_book() {
        assert_eq!(normalize_book_name("Hezekiah"), "");
        assert_eq!(normalize_book_name(""), "");
    }

    #[test]
    fn test_book_index() {
        assert_eq!(book_index("Gen"), Some(0));
        assert_eq!(book_index("Mal"), Some(38));
        assert_eq!(book_index("Matt"), Some(39));
        assert_eq!(book_index("Rev"), Some(65));
        assert_eq!(book_index("Tob"), None);
    }

    #[test]
    fn test_abbreviations_are_unambiguous() {
        let mut seen = HashSet::new();
        let books = CANONICAL_BOOKS
            .iter()
            .chain(DEUTEROCANONICAL_BOOKS.iter())
            .chain(std::iter::once(&REST_OF_BARUCH));
        for entry in books {
            let mut keys: HashSet<String> = entry
                .abbreviations
                .iter()
                .map(|a| lookup_key(a))
                .collect();
            keys.insert(lookup_key(entry.osis));
            keys.insert(lookup_key(entry.name));
            for key in keys {
                assert!(seen.insert(key.clone()), "duplicate spelling {key}");
            }
        }
        assert!(seen.len() >= 150);
    }

    #[test]
    fn test_nt_books_follow_ot_books() {
        assert!(CANONICAL_BOOKS[..39].iter().all(|b| !is_nt_book(b.osis)));
        assert!(CANONICAL_BOOKS[39..].iter().all(|b| is_nt_book(b.osis)));
    }
}
