//! Deuterocanonical and Ethiopian books
//!
//! Counts follow the Latin numbering unless noted. The Enoch, Jubilees,
//! Meqabyan and 4 Baruch tables are provisional: they give the chapter
//! structure of common editions, but verse counts differ between editions.

pub(super) static TOBIT: [u16; 14] = [25, 23, 25, 23, 28, 22, 20, 24, 12, 13, 21, 22, 23, 17];

pub(super) static JUDITH: [u16; 16] = [12, 18, 15, 17, 29, 21, 25, 34, 19, 20, 21, 20, 31, 18, 15, 31];

pub(super) static WISDOM: [u16; 19] = [
    16, 25, 19, 20, 24, 27, 30, 21, 19, 21, 27, 28, 19, 31, 19, 29, 21, 25, 22,
];

pub(super) static SIRACH: [u16; 51] = [
    40, 23, 34, 36, 18, 37, 40, 22, 25, 34, 36, 19, 32, 27, 22, 31, 31, 33, 28, 33, 31, 33, 38,
    47, 36, 28, 33, 30, 35, 27, 42, 28, 33, 31, 26, 28, 34, 39, 41, 32, 28, 26, 37, 27, 31, 23,
    31, 28, 19, 31, 38,
];

/// Baruch with the Letter of Jeremiah as chapter 6
pub(super) static BARUCH_LATIN: [u16; 6] = [22, 35, 38, 37, 9, 72];

/// Baruch without the Letter of Jeremiah
pub(super) static BARUCH: [u16; 5] = [22, 35, 37, 37, 9];

pub(super) static LETTER_OF_JEREMIAH: [u16; 1] = [73];

pub(super) static MACCABEES_1: [u16; 16] = [
    64, 70, 60, 61, 68, 63, 50, 32, 73, 89, 74, 54, 54, 49, 41, 24,
];

pub(super) static MACCABEES_2: [u16; 15] = [36, 33, 40, 50, 27, 31, 42, 36, 29, 38, 38, 45, 26, 46, 39];

pub(super) static ESDRAS_1: [u16; 9] = [58, 30, 24, 63, 73, 34, 15, 96, 55];

pub(super) static ESDRAS_2: [u16; 16] = [40, 48, 36, 52, 56, 59, 70, 63, 47, 59, 46, 51, 58, 48, 63, 78];

pub(super) static PRAYER_OF_MANASSEH: [u16; 1] = [15];

/// Esther with the Greek additions in chapters 10 to 16
pub(super) static ESTHER_LATIN: [u16; 16] = [
    22, 23, 15, 17, 14, 14, 10, 17, 32, 13, 12, 6, 18, 19, 19, 24,
];

/// Daniel with the Song of the Three, Susanna, and Bel and the Dragon
pub(super) static DANIEL_LATIN: [u16; 14] = [21, 49, 100, 34, 31, 28, 28, 27, 27, 21, 45, 13, 64, 42];

pub(super) static ENOCH: [u16; 108] = [
    9, 3, 1, 1, 10, 8, 6, 4, 11, 22, 2, 6, 10, 25, 12, 4, 8, 16, 3, 8, 10, 14, 4, 6, 7, 6, 5, 3,
    2, 3, 3, 6, 4, 3, 1, 4, 6, 6, 14, 10, 9, 3, 4, 1, 6, 8, 4, 10, 4, 5, 5, 9, 7, 10, 4, 8, 3, 6,
    25, 25, 13, 16, 12, 2, 12, 3, 13, 5, 29, 4, 17, 37, 8, 9, 17, 14, 8, 17, 8, 8, 10, 20, 11,
    11, 10, 6, 4, 3, 77, 42, 19, 17, 14, 11, 7, 8, 10, 16, 16, 13, 9, 15, 15, 13, 3, 19, 3, 15,
];

pub(super) static JUBILEES: [u16; 50] = [
    29, 33, 35, 33, 32, 38, 39, 30, 15, 36, 24, 31, 29, 24, 34, 31, 18, 19, 31, 29, 26, 30, 32,
    33, 23, 35, 27, 30, 20, 26, 32, 34, 23, 21, 27, 24, 25, 28, 18, 14, 28, 24, 24, 34, 16, 16,
    10, 19, 23, 13,
];

pub(super) static MEQABYAN_1: [u16; 36] = [
    33, 23, 13, 12, 24, 13, 12, 8, 30, 12, 12, 13, 15, 13, 16, 14, 17, 14, 14, 13, 27, 14, 13,
    13, 13, 15, 17, 15, 11, 19, 12, 13, 10, 13, 15, 11,
];

pub(super) static MEQABYAN_2: [u16; 21] = [
    32, 16, 12, 22, 25, 19, 12, 11, 38, 14, 16, 16, 15, 18, 10, 20, 14, 18, 14, 15, 25,
];

pub(super) static MEQABYAN_3: [u16; 10] = [17, 20, 12, 12, 18, 19, 17, 24, 15, 18];

pub(super) static BARUCH_4: [u16; 9] = [12, 10, 22, 11, 35, 25, 37, 12, 32];

/// Default chapter tables by OSIS id
pub(super) static BOOKS: [(&str, &[u16]); 17] = [
    ("Tob", &TOBIT),
    ("Jdt", &JUDITH),
    ("Wis", &WISDOM),
    ("Sir", &SIRACH),
    ("Bar", &BARUCH_LATIN),
    ("EpJer", &LETTER_OF_JEREMIAH),
    ("1Macc", &MACCABEES_1),
    ("2Macc", &MACCABEES_2),
    ("1Esd", &ESDRAS_1),
    ("2Esd", &ESDRAS_2),
    ("PrMan", &PRAYER_OF_MANASSEH),
    ("1En", &ENOCH),
    ("Jub", &JUBILEES),
    ("1Meq", &MEQABYAN_1),
    ("2Meq", &MEQABYAN_2),
    ("3Meq", &MEQABYAN_3),
    ("4Bar", &BARUCH_4),
];
