/**
 * Functions for reading term tables and locating the application's data files.
 *
 * Version: October 2026
 */
use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use log::debug;

use super::common::{QuizError, Result};
use super::quiz::TermPair;


pub const DESIGNATION_COLUMN: &str = "Bezeichnung";
pub const MEANING_COLUMN: &str = "Bedeutung";

const MISTAKES_FILE: &str = "mistakes.json";
const PROGRESS_FILE: &str = "progress.sqlite3";


/// Load the terms from the table at `path`.
pub fn load_table(path: &Path) -> Result<Vec<TermPair>> {
    let mut file = File::open(path).map_err(QuizError::Io)?;

    let mut header = String::new();
    BufReader::new(&mut file).read_line(&mut header).map_err(QuizError::Io)?;
    file.seek(SeekFrom::Start(0)).map_err(QuizError::Io)?;

    let pairs = read_table(file, guess_delimiter(&header))?;
    debug!("loaded {} term(s) from {}", pairs.len(), path.display());
    Ok(pairs)
}


/// Read a table whose first record is a header containing the `Bezeichnung` and
/// `Bedeutung` columns, in any case and order. Other columns are ignored, as are rows
/// where both cells are blank.
pub fn read_table<R: Read>(reader: R, delimiter: u8) -> Result<Vec<TermPair>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(QuizError::Table)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let designation = find_column(&headers, DESIGNATION_COLUMN);
    let meaning = find_column(&headers, MEANING_COLUMN);
    let (designation, meaning) = match (designation, meaning) {
        (Some(d), Some(m)) => (d, m),
        _ => {
            let found = headers.into_iter().filter(|h| !h.is_empty()).collect();
            return Err(QuizError::MissingColumns { found });
        }
    };

    let mut pairs = Vec::new();
    for record in reader.records() {
        let record = record.map_err(QuizError::Table)?;
        let front = record.get(designation).unwrap_or("");
        let back = record.get(meaning).unwrap_or("");
        if front.trim().is_empty() && back.trim().is_empty() {
            continue;
        }
        pairs.push(TermPair::new(front, back));
    }
    Ok(pairs)
}


/// Pick whichever of comma, semicolon and tab occurs most often in the header line.
pub fn guess_delimiter(header: &str) -> u8 {
    let mut best = b',';
    let mut best_count = header.matches(',').count();
    for candidate in [b';', b'\t'].iter() {
        let count = header.matches(*candidate as char).count();
        if count > best_count {
            best = *candidate;
            best_count = count;
        }
    }
    best
}


fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.to_lowercase() == name.to_lowercase())
}


/// Return the directory where statistics are kept, creating it if necessary.
pub fn require_app_dir_path(directory: Option<&Path>) -> Result<PathBuf> {
    let dirpath = match directory {
        Some(directory) => directory.to_path_buf(),
        None => get_default_app_dir_path(),
    };

    if !dirpath.exists() {
        fs::create_dir_all(&dirpath).or(Err(QuizError::CannotMakeAppDir(dirpath.clone())))?;
    }
    Ok(dirpath)
}


fn get_default_app_dir_path() -> PathBuf {
    let mut dirpath = dirs::data_dir().unwrap_or(PathBuf::from("."));
    dirpath.push("memtrain");
    dirpath
}


pub fn get_mistakes_path(app_dir: &Path) -> PathBuf {
    app_dir.join(MISTAKES_FILE)
}


pub fn get_progress_path(app_dir: &Path) -> PathBuf {
    app_dir.join(PROGRESS_FILE)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_read_table() {
        let data = "Bezeichnung,Bedeutung\nKatze,cat\nHund,dog\n";
        let pairs = read_table(data.as_bytes(), b',').unwrap();
        assert_eq!(pairs, vec![TermPair::new("Katze", "cat"), TermPair::new("Hund", "dog")]);
    }

    #[test]
    fn columns_are_matched_ignoring_case_and_order() {
        let data = "Notiz;BEDEUTUNG; bezeichnung \nx;cat;Katze\n";
        let pairs = read_table(data.as_bytes(), b';').unwrap();
        assert_eq!(pairs, vec![TermPair::new("Katze", "cat")]);
    }

    #[test]
    fn blank_rows_are_dropped() {
        let data = "Bezeichnung\tBedeutung\nKatze\tcat\n\t\n \t \nHund\t\n\"\"\t\"\"\n";
        let pairs = read_table(data.as_bytes(), b'\t').unwrap();
        assert_eq!(pairs, vec![TermPair::new("Katze", "cat"), TermPair::new("Hund", "")]);
    }

    #[test]
    fn cells_are_kept_as_is() {
        let data = "Bezeichnung,Bedeutung\n\"  der Hund, bellend\",dog \n";
        let pairs = read_table(data.as_bytes(), b',').unwrap();
        assert_eq!(pairs, vec![TermPair::new("  der Hund, bellend", "dog ")]);
    }

    #[test]
    fn missing_columns_are_reported() {
        let data = "Term,Definition\nKatze,cat\n";
        match read_table(data.as_bytes(), b',') {
            Err(QuizError::MissingColumns { found }) => {
                assert_eq!(found, vec![s("Term"), s("Definition")]);
            },
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn delimiter_is_guessed_from_header() {
        assert_eq!(guess_delimiter("Bezeichnung,Bedeutung"), b',');
        assert_eq!(guess_delimiter("Bezeichnung;Bedeutung"), b';');
        assert_eq!(guess_delimiter("Bezeichnung\tBedeutung"), b'\t');
        assert_eq!(guess_delimiter("Bezeichnung"), b',');
    }

    #[test]
    fn can_load_table_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.csv");
        fs::write(&path, "Bezeichnung;Bedeutung\nKatze;cat\n").unwrap();

        let pairs = load_table(&path).unwrap();
        assert_eq!(pairs, vec![TermPair::new("Katze", "cat")]);

        assert!(load_table(&dir.path().join("missing.csv")).is_err());
    }

    #[test]
    fn app_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join("data");
        let path = require_app_dir_path(Some(&app_dir)).unwrap();
        assert!(path.is_dir());
        assert_eq!(get_mistakes_path(&path), app_dir.join("mistakes.json"));
    }

    fn s(mystr: &str) -> String {
        String::from(mystr)
    }
}
