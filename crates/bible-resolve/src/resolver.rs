//! Book matching over a classified [`SourceShape`].
//!
//! Every lookup tries the requested name first, then each Name Normalizer
//! variant in order, and stops at the first structural match. Nothing here
//! does I/O; directory sources only get their file name matched.

use bible_core::books;

use crate::shape::{BookView, SourceShape};

/// Case-insensitive, whitespace-insensitive name equality.
pub fn same_name(a: &str, b: &str) -> bool {
    books::lookup_key(a) == books::lookup_key(b)
}

/// The book `name` inside `shape`, if any. Directory shapes never match here;
/// see [`match_directory_entry`].
pub fn find_book<'a>(shape: &'a SourceShape, name: &str) -> Option<BookView<'a>> {
    let candidates = books::variants(name);
    match shape {
        SourceShape::ArrayOfBooks(list) => {
            let by_name = |candidate: &str| {
                list.iter().find(|b| b.name.as_deref().is_some_and(|n| same_name(n, candidate)))
            };
            by_name(name)
                .or_else(|| {
                    let number = books::book_number(name)?;
                    list.iter().find(|b| b.number == Some(number))
                })
                .or_else(|| candidates.iter().skip(1).find_map(|c| by_name(c)))
                .map(|b| BookView::Chapters(&b.chapters))
        }
        SourceShape::FlatVerses(records) => {
            for candidate in &candidates {
                let matched: Vec<_> =
                    records.iter().filter(|r| r.name().is_some_and(|n| same_name(n, candidate))).collect();
                if !matched.is_empty() {
                    return Some(BookView::Records(matched));
                }
            }
            let number = books::book_number(name)?;
            let matched: Vec<_> = records.iter().filter(|r| r.number() == Some(number)).collect();
            (!matched.is_empty()).then_some(BookView::Records(matched))
        }
        SourceShape::NestedDict(map) => candidates
            .iter()
            .find_map(|c| map.iter().find(|(key, _)| same_name(key, c)))
            .and_then(|(_, value)| BookView::of_value(value)),
        SourceShape::Directory(_) => None,
    }
}

/// Book names in source order, as stored. Flat sources list each book once,
/// at its first record; records without a name fall back to their number.
pub fn list_books(shape: &SourceShape) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |name: String| {
        if !out.iter().any(|o| same_name(o, &name)) {
            out.push(name);
        }
    };
    match shape {
        SourceShape::ArrayOfBooks(list) => {
            for book in list {
                let name = book
                    .name
                    .clone()
                    .or_else(|| book.number.and_then(books::by_number).map(|b| b.canonical.to_string()));
                if let Some(name) = name {
                    push(name);
                }
            }
        }
        SourceShape::FlatVerses(records) => {
            for record in records {
                let name = record
                    .name()
                    .map(str::to_string)
                    .or_else(|| record.number().and_then(books::by_number).map(|b| b.canonical.to_string()));
                if let Some(name) = name {
                    push(name);
                }
            }
        }
        SourceShape::NestedDict(map) => map.keys().cloned().for_each(push),
        SourceShape::Directory(dir) => dir.files.iter().map(|f| entry_stem(f).to_string()).for_each(push),
    }
    out
}

/// File stem of a directory entry: `Genesis.json` → `Genesis`, `Genesis` → `Genesis`.
/// The extension matches in any case.
pub fn entry_stem(file: &str) -> &str {
    let split = file.len().saturating_sub(".json".len());
    match file.get(split..) {
        Some(ext) if ext.eq_ignore_ascii_case(".json") => &file[..split],
        _ => file,
    }
}

/// The entry of `files` that holds book `name`.
pub fn match_directory_entry<'a>(files: &'a [String], name: &str) -> Option<&'a str> {
    books::variants(name)
        .iter()
        .find_map(|candidate| files.iter().find(|f| same_name(entry_stem(f), candidate)))
        .map(String::as_str)
}
