//! Book-name normalization.
//!
//! Every book has one canonical (English) name, a primary Dutch name, an OSIS
//! code and a set of alternate spellings (older Dutch orthography, NBV forms,
//! common English aliases). All lookups are pure table scans over [`BOOKS`].
//!
//! Lookup keys are case-insensitive and ignore whitespace, so `"1Samuel"`,
//! `"1 samuel"` and `"1 Samuel"` are the same key. Numeric identifiers
//! (`"1"` = Genesis .. `"66"` = Revelation) resolve through the book number.

use crate::types::Language;

/// One row of the book table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookInfo {
    pub number: u32,
    pub canonical: &'static str,
    pub dutch: &'static str,
    pub osis: &'static str,
    pub aliases: &'static [&'static str],
}

impl BookInfo {
    pub fn display_name(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.canonical,
            Language::Nl => self.dutch,
        }
    }

    fn names(&self) -> impl Iterator<Item = &'static str> {
        [self.canonical, self.dutch, self.osis].into_iter().chain(self.aliases.iter().copied())
    }
}

macro_rules! book {
    ($n:expr, $en:expr, $nl:expr, $osis:expr $(, $alias:expr)* $(,)?) => {
        BookInfo { number: $n, canonical: $en, dutch: $nl, osis: $osis, aliases: &[$($alias),*] }
    };
}

pub static BOOKS: [BookInfo; 66] = [
    book!(1, "Genesis", "Genesis", "Gen"),
    book!(2, "Exodus", "Exodus", "Exod"),
    book!(3, "Leviticus", "Leviticus", "Lev"),
    book!(4, "Numbers", "Numeri", "Num"),
    book!(5, "Deuteronomy", "Deuteronomium", "Deut"),
    book!(6, "Joshua", "Jozua", "Josh"),
    book!(7, "Judges", "Richteren", "Judg", "Rechters", "Richters"),
    book!(8, "Ruth", "Ruth", "Ruth"),
    book!(9, "1 Samuel", "1 Samuël", "1Sam", "I Samuel"),
    book!(10, "2 Samuel", "2 Samuël", "2Sam", "II Samuel"),
    book!(11, "1 Kings", "1 Koningen", "1Kgs", "I Kings"),
    book!(12, "2 Kings", "2 Koningen", "2Kgs", "II Kings"),
    book!(13, "1 Chronicles", "1 Kronieken", "1Chr", "I Chronicles", "1 Chronieken"),
    book!(14, "2 Chronicles", "2 Kronieken", "2Chr", "II Chronicles", "2 Chronieken"),
    book!(15, "Ezra", "Ezra", "Ezra"),
    book!(16, "Nehemiah", "Nehemia", "Neh"),
    book!(17, "Esther", "Esther", "Esth", "Ester"),
    book!(18, "Job", "Job", "Job"),
    book!(19, "Psalms", "Psalmen", "Ps", "Psalm"),
    book!(20, "Proverbs", "Spreuken", "Prov"),
    book!(21, "Ecclesiastes", "Prediker", "Eccl"),
    book!(22, "Song of Solomon", "Hooglied", "Song", "Song of Songs", "Canticles"),
    book!(23, "Isaiah", "Jesaja", "Isa"),
    book!(24, "Jeremiah", "Jeremia", "Jer"),
    book!(25, "Lamentations", "Klaagliederen", "Lam"),
    book!(26, "Ezekiel", "Ezechiël", "Ezek", "Ezechiel"),
    book!(27, "Daniel", "Daniël", "Dan"),
    book!(28, "Hosea", "Hosea", "Hos"),
    book!(29, "Joel", "Joël", "Joel"),
    book!(30, "Amos", "Amos", "Amos"),
    book!(31, "Obadiah", "Obadja", "Obad"),
    book!(32, "Jonah", "Jona", "Jonah"),
    book!(33, "Micah", "Micha", "Mic"),
    book!(34, "Nahum", "Nahum", "Nah"),
    book!(35, "Habakkuk", "Habakuk", "Hab"),
    book!(36, "Zephaniah", "Sefanja", "Zeph", "Zefanja"),
    book!(37, "Haggai", "Haggai", "Hag", "Haggaï"),
    book!(38, "Zechariah", "Zacharia", "Zech"),
    book!(39, "Malachi", "Maleachi", "Mal"),
    book!(40, "Matthew", "Mattheüs", "Matt", "Matteüs", "Mattheus", "Matteus"),
    book!(41, "Mark", "Markus", "Mark", "Marcus"),
    book!(42, "Luke", "Lukas", "Luke", "Lucas"),
    book!(43, "John", "Johannes", "John"),
    book!(44, "Acts", "Handelingen", "Acts", "Handelingen der Apostelen"),
    book!(45, "Romans", "Romeinen", "Rom"),
    book!(46, "1 Corinthians", "1 Korinthe", "1Cor", "1 Korintiërs", "1 Corinthiërs", "1 Korinthiërs"),
    book!(47, "2 Corinthians", "2 Korinthe", "2Cor", "2 Korintiërs", "2 Corinthiërs", "2 Korinthiërs"),
    book!(48, "Galatians", "Galaten", "Gal"),
    book!(49, "Ephesians", "Efeze", "Eph", "Efeziërs", "Efeziers"),
    book!(50, "Philippians", "Filippenzen", "Phil"),
    book!(51, "Colossians", "Kolossenzen", "Col", "Colossenzen"),
    book!(52, "1 Thessalonians", "1 Thessalonicenzen", "1Thess", "1 Tessalonicenzen"),
    book!(53, "2 Thessalonians", "2 Thessalonicenzen", "2Thess", "2 Tessalonicenzen"),
    book!(54, "1 Timothy", "1 Timotheüs", "1Tim", "1 Timoteüs", "1 Timotheus"),
    book!(55, "2 Timothy", "2 Timotheüs", "2Tim", "2 Timoteüs", "2 Timotheus"),
    book!(56, "Titus", "Titus", "Titus"),
    book!(57, "Philemon", "Filemon", "Phlm"),
    book!(58, "Hebrews", "Hebreeën", "Heb", "Hebreeen"),
    book!(59, "James", "Jakobus", "Jas", "Jacobus"),
    book!(60, "1 Peter", "1 Petrus", "1Pet"),
    book!(61, "2 Peter", "2 Petrus", "2Pet"),
    book!(62, "1 John", "1 Johannes", "1John"),
    book!(63, "2 John", "2 Johannes", "2John"),
    book!(64, "3 John", "3 Johannes", "3John"),
    book!(65, "Jude", "Judas", "Jude"),
    book!(66, "Revelation", "Openbaring", "Rev", "Revelations", "Openbaring van Johannes"),
];

/// Lowercased, whitespace-free comparison key.
pub fn lookup_key(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_lowercase).collect()
}

/// Table row for a name, alias, OSIS code or book number.
pub fn find(name: &str) -> Option<&'static BookInfo> {
    let trimmed = name.trim();
    if let Ok(number) = trimmed.parse::<u32>() {
        return by_number(number);
    }
    let key = lookup_key(trimmed);
    if key.is_empty() {
        return None;
    }
    BOOKS.iter().find(|b| b.names().any(|n| lookup_key(n) == key))
}

pub fn by_number(number: u32) -> Option<&'static BookInfo> {
    BOOKS.iter().find(|b| b.number == number)
}

/// Canonical name when known, else the input unchanged.
pub fn canonical(name: &str) -> String {
    find(name).map_or_else(|| name.to_string(), |b| b.canonical.to_string())
}

/// Names worth trying, in order, when searching a source for `name`.
///
/// Starts with the input itself, then the canonical form, the Dutch form and
/// the table's alternate spellings. Entries are unique case-insensitively.
/// Unknown names yield just the input.
pub fn variants(name: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |candidate: &str| {
        let lowered = candidate.to_lowercase();
        if !candidate.trim().is_empty() && !out.iter().any(|o| o.to_lowercase() == lowered) {
            out.push(candidate.to_string());
        }
    };
    push(name);
    if let Some(info) = find(name) {
        push(info.canonical);
        push(info.dutch);
        for alias in info.aliases {
            push(alias);
        }
    }
    out
}

/// Display form of `name` in `language`; unknown names pass through.
pub fn display_name(name: &str, language: Language) -> String {
    find(name).map_or_else(|| name.to_string(), |b| b.display_name(language).to_string())
}

pub fn osis_code(name: &str) -> Option<&'static str> {
    find(name).map(|b| b.osis)
}

pub fn book_number(name: &str) -> Option<u32> {
    find(name).map(|b| b.number)
}
