pub mod addr;
pub mod context;
pub mod dump;
pub mod general;

use std::io::BufRead;

/// Whitespace separated names, across as many lines as the reader yields.
pub fn read_names(reader: impl BufRead) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for line in reader.lines() {
        names.extend(line?.split_whitespace().map(str::to_string));
    }
    Ok(names)
}
