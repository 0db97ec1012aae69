use scraper::{ElementRef, Selector};

/// Concatenated text of every element under `root` matching `sel`, in
/// document order, untrimmed.
pub fn select_text(root: ElementRef, sel: &Selector) -> String {
    root.select(sel).flat_map(|e| e.text()).collect()
}

/// Trimmed text of the first element under `root` matching `sel`, or an empty
/// string when nothing matches.
pub fn first_text(root: ElementRef, sel: &Selector) -> String {
    root.select(sel)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_owned())
        .unwrap_or_default()
}

/// Splits `s` on `delim` and trims every piece.
pub fn split_trimmed<'a>(s: &'a str, delim: &'a str) -> impl Iterator<Item = &'a str> {
    s.split(delim).map(str::trim)
}
