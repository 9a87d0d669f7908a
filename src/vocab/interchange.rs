//! `|`-separated CSV exchange of translation groups.
//!
//! The header is `category` followed by one language id per column; each
//! row is one group. Blank cells mean the group has no entry in that
//! language.

use super::core::{Category, Language, TranslationGroup};
use super::store::{LanguageDefinition, Vocabulary};
use crate::error::{Result, StoreError};
use std::io;

const DELIMITER: u8 = b'|';
const CATEGORY_COLUMN: &str = "category";

impl Vocabulary {
    /// Append the groups of a CSV document. Group ids are derived from
    /// `batch` so repeated imports do not reuse ids. Returns how many groups
    /// were added.
    pub fn import_csv<R: io::Read>(&mut self, reader: R, batch: i64) -> Result<usize> {
        let groups = parse_groups(reader, &self.languages, batch)?;
        let added = groups.len();
        self.groups.extend(groups);
        log::info!("Imported {} translation groups", added);
        Ok(added)
    }

    /// Write every group, one column per known language in declaration order
    pub fn export_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .from_writer(writer);

        let mut header = vec![CATEGORY_COLUMN.to_string()];
        header.extend(self.languages.iter().map(|lang| lang.id.to_string()));
        wtr.write_record(&header)?;

        for group in &self.groups {
            let mut row = vec![group.category.to_string()];
            row.extend(self.languages.iter().map(|lang| {
                group
                    .translations
                    .get(&lang.id)
                    .cloned()
                    .unwrap_or_default()
            }));
            wtr.write_record(&row)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

fn parse_groups<R: io::Read>(
    reader: R,
    languages: &[LanguageDefinition],
    batch: i64,
) -> Result<Vec<TranslationGroup>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header = rdr.headers()?.clone();
    if header.len() < 2 {
        return Err(StoreError::InvalidCsv(
            "header needs a category column and at least one language".to_string(),
        ));
    }
    if !header[0].eq_ignore_ascii_case(CATEGORY_COLUMN) {
        return Err(StoreError::InvalidCsv(format!(
            "first column must be \"{}\", found \"{}\"",
            CATEGORY_COLUMN, &header[0]
        )));
    }

    let columns = header
        .iter()
        .skip(1)
        .map(|code| {
            let lang = Language::new(code.to_lowercase());
            if languages.iter().any(|known| known.id == lang) {
                Ok(lang)
            } else {
                Err(StoreError::UnknownLanguage(lang.to_string()))
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let mut groups = Vec::new();
    let mut rows = 0;
    for record in rdr.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows += 1;

        if record.len() < header.len() {
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            return Err(StoreError::InvalidCsv(format!(
                "line {} has {} columns, expected {}",
                line,
                record.len(),
                header.len()
            )));
        }

        let translations = columns
            .iter()
            .zip(record.iter().skip(1))
            .filter(|(_, text)| !text.is_empty())
            .map(|(lang, text)| (lang.clone(), text.to_string()));
        let group = TranslationGroup::new(
            format!("group_{}_{}", batch, groups.len()),
            Category::new(&record[0]),
            translations,
        );

        // rows with only a category carry nothing to learn
        if group.has_any_translation() {
            groups.push(group);
        }
    }

    if rows == 0 {
        return Err(StoreError::InvalidCsv("no data rows".to_string()));
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn empty_vocabulary() -> Vocabulary {
        Vocabulary {
            languages: Vocabulary::builtin().languages,
            groups: Vec::new(),
        }
    }

    #[test]
    fn test_import_rows_become_groups() {
        let mut vocabulary = empty_vocabulary();
        let csv = "category|fr|en\nFRUIT|pomme|apple\nCOULEUR|rouge|\n\nACTION||\n";

        let added = vocabulary.import_csv(csv.as_bytes(), 7).unwrap();

        assert_eq!(added, 2);
        let apple = &vocabulary.groups[0];
        assert_eq!(apple.id, "group_7_0");
        assert_eq!(apple.category, Category::new("FRUIT"));
        assert_eq!(apple.translations[&Language::new("fr")], "pomme");
        assert_eq!(apple.translations[&Language::new("en")], "apple");

        let red = &vocabulary.groups[1];
        assert_eq!(red.category, Category::new("COULEUR"));
        assert!(!red.translations.contains_key(&Language::new("en")));
    }

    #[test]
    fn test_import_appends_to_existing_groups() {
        let mut vocabulary = Vocabulary::builtin();
        let before = vocabulary.groups.len();
        vocabulary
            .import_csv("CATEGORY|KR\nFRUIT|바나나\n".as_bytes(), 1)
            .unwrap();
        assert_eq!(vocabulary.groups.len(), before + 1);
        assert_eq!(
            vocabulary.groups[before].translations[&Language::new("kr")],
            "바나나"
        );
    }

    #[test]
    fn test_import_rejects_bad_documents() {
        let mut vocabulary = empty_vocabulary();

        assert_matches!(
            vocabulary.import_csv("fr|en\npomme|apple\n".as_bytes(), 0),
            Err(StoreError::InvalidCsv(_))
        );
        assert_matches!(
            vocabulary.import_csv("category\nFRUIT\n".as_bytes(), 0),
            Err(StoreError::InvalidCsv(_))
        );
        assert_matches!(
            vocabulary.import_csv("category|de\nFRUIT|Apfel\n".as_bytes(), 0),
            Err(StoreError::UnknownLanguage(lang)) if lang == "de"
        );
        assert_matches!(
            vocabulary.import_csv("category|fr|en\n".as_bytes(), 0),
            Err(StoreError::InvalidCsv(_))
        );
        assert_matches!(
            vocabulary.import_csv("category|fr|en\nFRUIT|pomme\n".as_bytes(), 0),
            Err(StoreError::InvalidCsv(msg)) if msg.contains("line 2")
        );
        assert!(vocabulary.groups.is_empty());
    }

    #[test]
    fn test_export_header_and_blank_cells() {
        let vocabulary = Vocabulary::builtin();
        let mut out = Vec::new();
        vocabulary.export_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("category|fr|kr|en"));
        assert_eq!(lines.clone().count(), vocabulary.groups.len());
        assert!(lines.any(|line| line == "ACTION||청소하다|clean"));
    }

    #[test]
    fn test_export_then_import_keeps_content() {
        let original = Vocabulary::builtin();
        let mut out = Vec::new();
        original.export_csv(&mut out).unwrap();

        let mut copy = empty_vocabulary();
        copy.import_csv(out.as_slice(), 3).unwrap();

        assert_eq!(copy.groups.len(), original.groups.len());
        for (imported, source) in copy.groups.iter().zip(&original.groups) {
            assert_eq!(imported.category, source.category);
            assert_eq!(imported.translations, source.translations);
        }
    }
}
