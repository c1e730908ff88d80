use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::model::{DocumentWords, PageWords, Word};
use crate::error::ExtractError;
use crate::parser::WordExtractor;

/// Word boxes from poppler's `pdftotext -bbox`.
#[derive(Debug, Clone, Default)]
pub struct PopplerWordExtractor {
    first_page: Option<usize>,
    last_page: Option<usize>,
}

impl PopplerWordExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict extraction to a 1-based inclusive page range.
    pub fn with_pages(mut self, first: usize, last: usize) -> Self {
        self.first_page = Some(first);
        self.last_page = Some(last);
        self
    }

    fn command(&self, pdf_path: &Path) -> Command {
        let mut command = Command::new("pdftotext");
        command.arg("-bbox").arg("-enc").arg("UTF-8");
        if let Some(first) = self.first_page {
            command.arg("-f").arg(first.to_string());
        }
        if let Some(last) = self.last_page {
            command.arg("-l").arg(last.to_string());
        }
        command.arg(pdf_path).arg("-");
        command
    }

    fn run(&self, pdf_path: &Path) -> Result<String, ExtractError> {
        let output = self
            .command(pdf_path)
            .output()
            .map_err(|source| ExtractError::Spawn {
                tool: "pdftotext",
                source,
            })?;

        if !output.status.success() {
            return Err(ExtractError::ToolFailed {
                tool: "pdftotext",
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl WordExtractor for PopplerWordExtractor {
    fn extract_words(&self, pdf_path: &Path) -> Result<DocumentWords> {
        let xhtml = self
            .run(pdf_path)
            .with_context(|| format!("failed to extract words from {}", pdf_path.display()))?;
        let first_idx = self.first_page.map(|p| p.saturating_sub(1)).unwrap_or(0);
        let document = parse_bbox_xhtml(&xhtml, first_idx)
            .with_context(|| format!("failed to parse words of {}", pdf_path.display()))?;

        log::debug!(
            "{}: {} pages, {} words",
            pdf_path.display(),
            document.pages.len(),
            document.word_count()
        );
        Ok(document)
    }
}

struct OpenWord {
    x0: f64,
    x1: f64,
    top: f64,
    bottom: f64,
    text: String,
}

/// Parse `pdftotext -bbox` output.
///
/// Each `<page>` becomes one `PageWords`, numbered from `first_page_idx`.
/// Words with empty text are dropped.
pub fn parse_bbox_xhtml(xhtml: &str, first_page_idx: usize) -> Result<DocumentWords, ExtractError> {
    let mut reader = Reader::from_str(xhtml);
    reader.trim_text(true);

    let mut document = DocumentWords::default();
    let mut open: Option<OpenWord> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"page" => {
                    let page = open_page(&e, first_page_idx + document.pages.len())?;
                    document.pages.push(page);
                }
                b"word" => {
                    open = Some(OpenWord {
                        x0: number(&e, "xMin")?,
                        x1: number(&e, "xMax")?,
                        top: number(&e, "yMin")?,
                        bottom: number(&e, "yMax")?,
                        text: String::new(),
                    })
                }
                other => log::trace!("skipping <{}>", String::from_utf8_lossy(other)),
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"page" {
                    let page = open_page(&e, first_page_idx + document.pages.len())?;
                    document.pages.push(page);
                }
            }
            Event::Text(e) => {
                if let Some(word) = open.as_mut() {
                    word.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(word) = open.as_mut() {
                    word.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"word" {
                    if let Some(word) = open.take() {
                        push_word(&mut document, word);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(document)
}

fn open_page(e: &BytesStart<'_>, page_idx: usize) -> Result<PageWords, ExtractError> {
    Ok(PageWords {
        page_idx,
        width: optional_number(e, "width")?.unwrap_or(0.0),
        height: optional_number(e, "height")?.unwrap_or(0.0),
        words: Vec::new(),
    })
}

fn push_word(document: &mut DocumentWords, word: OpenWord) {
    if word.text.is_empty() {
        return;
    }
    // Words outside any <page> still need a home.
    if document.pages.is_empty() {
        document.pages.push(PageWords::default());
    }
    if let Some(page) = document.pages.last_mut() {
        page.words
            .push(Word::new(word.text, word.x0, word.x1, word.top).with_bottom(word.bottom));
    }
}

fn number(e: &BytesStart<'_>, name: &'static str) -> Result<f64, ExtractError> {
    optional_number(e, name)?.ok_or(ExtractError::MissingAttribute {
        element: "word",
        name,
    })
}

fn optional_number(e: &BytesStart<'_>, name: &str) -> Result<Option<f64>, ExtractError> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() != name.as_bytes() {
            continue;
        }
        let value = String::from_utf8_lossy(&attr.value);
        return value
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ExtractError::Attribute {
                name: name.to_string(),
                value: value.into_owned(),
            });
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<title></title>
<meta name="Producer" content="pdftotext"/>
</head>
<body>
<doc>
  <page width="612.000000" height="792.000000">
    <word xMin="56.800000" yMin="57.160000" xMax="80.100000" yMax="69.160000">Name</word>
    <word xMin="200.000000" yMin="57.160000" xMax="230.500000" yMax="69.160000">R&amp;D</word>
  </page>
  <page width="612.000000" height="792.000000">
  </page>
  <page width="612.000000" height="792.000000">
    <word xMin="10.000000" yMin="20.000000" xMax="15.000000" yMax="30.000000">x</word>
  </page>
</doc>
</body>
</html>
"#;

    fn args(command: &Command) -> Vec<String> {
        command
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn builds_whole_document_command() {
        let command = PopplerWordExtractor::new().command(Path::new("in/report.pdf"));

        assert_eq!(command.get_program(), "pdftotext");
        assert_eq!(
            args(&command),
            vec!["-bbox", "-enc", "UTF-8", "in/report.pdf", "-"]
        );
    }

    #[test]
    fn builds_page_range_command() {
        let command = PopplerWordExtractor::new()
            .with_pages(2, 3)
            .command(Path::new("report.pdf"));

        assert_eq!(
            args(&command),
            vec!["-bbox", "-enc", "UTF-8", "-f", "2", "-l", "3", "report.pdf", "-"]
        );
    }

    #[test]
    fn parses_pages_and_words() {
        let document = parse_bbox_xhtml(SAMPLE, 0).unwrap();

        assert_eq!(document.pages.len(), 3);
        assert_eq!(document.pages[0].width, 612.0);
        assert_eq!(
            document.pages[0].words[1],
            Word::new("R&D", 200.0, 230.5, 57.16).with_bottom(69.16)
        );
        assert!(document.pages[1].words.is_empty());
        assert_eq!(document.pages[2].page_idx, 2);
        assert_eq!(document.word_count(), 3);
    }

    #[test]
    fn numbers_pages_from_offset() {
        let document = parse_bbox_xhtml(SAMPLE, 4).unwrap();
        let indices: Vec<usize> = document.pages.iter().map(|p| p.page_idx).collect();
        assert_eq!(indices, vec![4, 5, 6]);
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        let xhtml = r#"<doc><page><word xMin="a" yMin="0" xMax="1" yMax="1">w</word></page></doc>"#;
        assert!(matches!(
            parse_bbox_xhtml(xhtml, 0),
            Err(ExtractError::Attribute { .. })
        ));
    }

    #[test]
    fn rejects_missing_coordinates() {
        let xhtml = r#"<doc><page><word xMin="0" xMax="1" yMax="1">w</word></page></doc>"#;
        assert!(matches!(
            parse_bbox_xhtml(xhtml, 0),
            Err(ExtractError::MissingAttribute { name: "yMin", .. })
        ));
    }

    #[test]
    fn empty_output_has_no_pages() {
        assert_eq!(parse_bbox_xhtml("", 0).unwrap(), DocumentWords::default());
    }
}
