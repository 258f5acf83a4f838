//! Book lists of the supported canons

mod deutero;
mod kjv;

use super::{BookData, VersificationSystem};

const PENTATEUCH_TO_NEHEMIAH: [&str; 16] = [
    "Gen", "Exod", "Lev", "Num", "Deut", "Josh", "Judg", "Ruth", "1Sam", "2Sam", "1Kgs", "2Kgs",
    "1Chr", "2Chr", "Ezra", "Neh",
];

const MINOR_PROPHETS: [&str; 12] = [
    "Hos", "Joel", "Amos", "Obad", "Jonah", "Mic", "Nah", "Hab", "Zeph", "Hag", "Zech", "Mal",
];

/// Books of a canon in reading order, Old Testament first
pub(super) fn books_for(system: VersificationSystem) -> Vec<BookData> {
    let (old_testament, overrides) = match system {
        VersificationSystem::Kjv => (protestant_order(), Vec::new()),
        VersificationSystem::Nrsv => (protestant_order(), nrsv_overrides()),
        VersificationSystem::Nrsva => {
            let mut order = protestant_order();
            order.extend([
                "Tob", "Jdt", "Wis", "Sir", "Bar", "EpJer", "1Macc", "2Macc", "1Esd", "PrMan",
                "2Esd",
            ]);
            let mut overrides = nrsv_overrides();
            overrides.push(("Bar", deutero::BARUCH.to_vec()));
            (order, overrides)
        }
        VersificationSystem::Vulgate => (
            vulgate_order(),
            vec![
                ("Esth", deutero::ESTHER_LATIN.to_vec()),
                ("Ps", latin_psalms()),
                ("Dan", deutero::DANIEL_LATIN.to_vec()),
            ],
        ),
        VersificationSystem::Catholic => (
            catholic_order(),
            vec![("Dan", deutero::DANIEL_LATIN.to_vec())],
        ),
        VersificationSystem::Ethiopian => (
            ethiopian_order(),
            vec![("Bar", deutero::BARUCH.to_vec())],
        ),
    };

    old_testament
        .into_iter()
        .chain(kjv::NEW_TESTAMENT.iter().map(|(osis, _)| *osis))
        .map(|osis| {
            let chapters = overrides
                .iter()
                .find(|(id, _)| *id == osis)
                .map_or_else(|| default_chapters(osis).to_vec(), |(_, c)| c.clone());
            BookData::new(osis, chapters)
        })
        .collect()
}

/// Default table for a book, empty if the id is not tabulated
fn default_chapters(osis: &str) -> &'static [u16] {
    kjv::OLD_TESTAMENT
        .iter()
        .chain(kjv::NEW_TESTAMENT.iter())
        .chain(deutero::BOOKS.iter())
        .find(|(id, _)| *id == osis)
        .map_or(&[], |(_, chapters)| *chapters)
}

fn protestant_order() -> Vec<&'static str> {
    kjv::OLD_TESTAMENT.iter().map(|(osis, _)| *osis).collect()
}

fn nrsv_overrides() -> Vec<(&'static str, Vec<u16>)> {
    let mut revelation = default_chapters("Rev").to_vec();
    if let Some(chapter_12) = revelation.get_mut(11) {
        *chapter_12 = 18;
    }
    vec![("3John", vec![15]), ("Rev", revelation)]
}

fn vulgate_order() -> Vec<&'static str> {
    let mut order = PENTATEUCH_TO_NEHEMIAH.to_vec();
    order.extend([
        "Tob", "Jdt", "Esth", "Job", "Ps", "Prov", "Eccl", "Song", "Wis", "Sir", "Isa", "Jer",
        "Lam", "Bar", "Ezek", "Dan",
    ]);
    order.extend(MINOR_PROPHETS);
    order.extend(["1Macc", "2Macc"]);
    order
}

fn catholic_order() -> Vec<&'static str> {
    let mut order = PENTATEUCH_TO_NEHEMIAH.to_vec();
    order.extend([
        "Tob", "Jdt", "Esth", "1Macc", "2Macc", "Job", "Ps", "Prov", "Eccl", "Song", "Wis", "Sir",
        "Isa", "Jer", "Lam", "Bar", "Ezek", "Dan",
    ]);
    order.extend(MINOR_PROPHETS);
    order
}

fn ethiopian_order() -> Vec<&'static str> {
    let mut order = vec!["Gen", "Exod", "Lev", "Num", "Deut", "1En", "Jub"];
    order.extend(PENTATEUCH_TO_NEHEMIAH[5..14].iter().copied());
    order.extend([
        "PrMan", "Ezra", "Neh", "1Esd", "2Esd", "Tob", "Jdt", "Esth", "1Meq", "2Meq", "3Meq", "Job",
        "Ps", "Prov", "Eccl", "Song", "Wis", "Sir", "Isa", "Jer", "Lam", "Bar", "EpJer", "4Bar",
        "Ezek", "Dan",
    ]);
    order.extend(MINOR_PROPHETS);
    order
}

/// Greek/Latin psalm numbering derived from the Hebrew counts
///
/// Latin 9 joins Hebrew 9-10 and Latin 113 joins Hebrew 114-115; Hebrew 116
/// and 147 are each split in two.
fn latin_psalms() -> Vec<u16> {
    let hebrew = |n: usize| kjv::PSALMS[n - 1];
    let mut psalms = Vec::with_capacity(150);
    psalms.extend((1..=8).map(hebrew));
    psalms.push(hebrew(9) + hebrew(10));
    psalms.extend((11..=113).map(hebrew));
    psalms.push(hebrew(114) + hebrew(115));
    psalms.extend([9, 10]);
    psalms.extend((117..=146).map(hebrew));
    psalms.extend([11, 9]);
    psalms.extend((148..=150).map(hebrew));
    psalms
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [VersificationSystem; 6] = [
        VersificationSystem::Kjv,
        VersificationSystem::Nrsv,
        VersificationSystem::Nrsva,
        VersificationSystem::Vulgate,
        VersificationSystem::Catholic,
        VersificationSystem::Ethiopian,
    ];

    #[test]
    fn test_every_book_is_tabulated() {
        for system in ALL {
            for book in books_for(system) {
                assert!(!book.chapters.is_empty(), "{system:?} {}", book.osis);
                assert!(book.chapters.iter().all(|&v| v > 0), "{system:?} {}", book.osis);
            }
        }
    }

    #[test]
    fn test_book_counts() {
        assert_eq!(books_for(VersificationSystem::Kjv).len(), 66);
        assert_eq!(books_for(VersificationSystem::Nrsva).len(), 77);
        assert_eq!(books_for(VersificationSystem::Vulgate).len(), 73);
        assert_eq!(books_for(VersificationSystem::Catholic).len(), 73);
        assert_eq!(books_for(VersificationSystem::Ethiopian).len(), 81);
    }

    #[test]
    fn test_latin_psalms() {
        let psalms = latin_psalms();
        assert_eq!(psalms.len(), 150);
        assert_eq!(psalms[8], 38);
        assert_eq!(psalms[117], 176);
        // Splits and joins keep the psalter's verse total
        assert_eq!(
            psalms.iter().map(|&v| u32::from(v)).sum::<u32>(),
            kjv::PSALMS.iter().map(|&v| u32::from(v)).sum::<u32>()
        );
    }
}
