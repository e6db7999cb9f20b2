use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{PapersError, Result};

const ARTICLE_ROOT: &str = "PubmedArticle";

/// One `<Author>` element as read from the document.
#[derive(Debug, Default, Clone)]
pub struct AuthorEntry {
    pub fore_name: Option<String>,
    pub last_name: Option<String>,
    pub collective_name: Option<String>,
    /// First `AffiliationInfo/Affiliation` only
    pub affiliation: Option<String>,
}

impl AuthorEntry {
    /// `ForeName LastName`, falling back to `CollectiveName`. Never a placeholder.
    pub fn display_name(&self) -> String {
        let fore = self.fore_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        let name = format!("{} {}", fore, last).trim().to_string();
        if name.is_empty() {
            self.collective_name.clone().unwrap_or_default()
        } else {
            name
        }
    }

    /// Affiliation text, treating blank as absent.
    pub fn affiliation_text(&self) -> Option<&str> {
        self.affiliation.as_deref().filter(|a| !a.trim().is_empty())
    }
}

#[derive(Debug, Default, Clone)]
pub struct PubDate {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub medline_date: Option<String>,
}

impl PubDate {
    /// Year, then Month, then Day; stops at the first absent part so a
    /// lone Day never reads as a month.
    pub fn normalized(&self) -> String {
        let mut parts = Vec::new();
        if let Some(year) = present(&self.year) {
            parts.push(year.to_string());
            if let Some(month) = present(&self.month) {
                parts.push(normalize_month(month));
                if let Some(day) = present(&self.day) {
                    parts.push(normalize_day(day));
                }
            }
        }

        if !parts.is_empty() {
            return parts.join("-");
        }
        match present(&self.medline_date) {
            Some(text) => text.to_string(),
            None => "Unknown".to_string(),
        }
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn normalize_month(month: &str) -> String {
    if let Ok(n) = month.parse::<u8>() {
        if (1..=12).contains(&n) {
            return format!("{:02}", n);
        }
        return month.to_string();
    }
    let lowered = month.to_lowercase();
    MONTHS
        .iter()
        .position(|m| lowered.starts_with(m))
        .map(|idx| format!("{:02}", idx + 1))
        .unwrap_or_else(|| month.to_string())
}

fn normalize_day(day: &str) -> String {
    match day.parse::<u8>() {
        Ok(n) if (1..=31).contains(&n) => format!("{:02}", n),
        _ => day.to_string(),
    }
}

/// Raw fields of the first `PubmedArticle` in a document.
#[derive(Debug, Default)]
pub struct ParsedArticle {
    pub pmid: Option<String>,
    pub title: Option<String>,
    pub pub_date: PubDate,
    pub authors: Vec<AuthorEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Pmid,
    Title,
    Year,
    Month,
    Day,
    MedlineDate,
    ForeName,
    LastName,
    CollectiveName,
    Affiliation,
}

struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

#[derive(Default)]
struct ArticleWalker {
    stack: Vec<String>,
    seen_root: bool,
    /// Depth of the open `PubmedArticle`, if inside it
    article_depth: Option<usize>,
    article_done: bool,
    found_article: bool,
    pub_date_depth: Option<usize>,
    pub_date_done: bool,
    author_depth: Option<usize>,
    current_author: Option<AuthorEntry>,
    capture: Option<Capture>,
    article: ParsedArticle,
}

impl ArticleWalker {
    fn open(&mut self, name: String) {
        self.seen_root = true;
        let parent = self.stack.last().map(String::as_str);
        let depth = self.stack.len() + 1;

        if self.article_depth.is_none() {
            if name == ARTICLE_ROOT && !self.article_done {
                self.article_depth = Some(depth);
                self.found_article = true;
            }
            self.stack.push(name);
            return;
        }

        if self.capture.is_none() {
            if let Some(field) = self.field_for(&name, parent) {
                self.capture = Some(Capture {
                    field,
                    depth,
                    text: String::new(),
                });
            }
        }

        match name.as_str() {
            "PubDate" if self.pub_date_depth.is_none() && !self.pub_date_done => {
                self.pub_date_depth = Some(depth);
            }
            "Author" if self.author_depth.is_none() => {
                self.author_depth = Some(depth);
                self.current_author = Some(AuthorEntry::default());
            }
            _ => {}
        }

        self.stack.push(name);
    }

    fn field_for(&self, name: &str, parent: Option<&str>) -> Option<Field> {
        let in_pub_date = self.pub_date_depth.is_some();
        let author = self.current_author.as_ref();
        let field = match (name, parent) {
            ("PMID", _) if self.article.pmid.is_none() => Field::Pmid,
            ("ArticleTitle", _) if self.article.title.is_none() => Field::Title,
            ("Year", Some("PubDate")) if in_pub_date => Field::Year,
            ("Month", Some("PubDate")) if in_pub_date => Field::Month,
            ("Day", Some("PubDate")) if in_pub_date => Field::Day,
            ("MedlineDate", Some("PubDate")) if in_pub_date => Field::MedlineDate,
            ("ForeName", Some("Author")) if author.is_some() => Field::ForeName,
            ("LastName", Some("Author")) if author.is_some() => Field::LastName,
            ("CollectiveName", Some("Author")) if author.is_some() => Field::CollectiveName,
            ("Affiliation", Some("AffiliationInfo"))
                if author.is_some_and(|a| a.affiliation.is_none()) =>
            {
                Field::Affiliation
            }
            _ => return None,
        };
        Some(field)
    }

    fn text(&mut self, text: &str) {
        if let Some(capture) = self.capture.as_mut() {
            capture.text.push_str(text);
        }
    }

    fn close(&mut self) {
        let depth = self.stack.len();

        if self.capture.as_ref().is_some_and(|c| c.depth == depth) {
            if let Some(capture) = self.capture.take() {
                self.store(capture.field, capture.text.trim().to_string());
            }
        }

        if self.pub_date_depth == Some(depth) {
            self.pub_date_depth = None;
            self.pub_date_done = true;
        }

        if self.author_depth == Some(depth) {
            self.author_depth = None;
            if let Some(author) = self.current_author.take() {
                self.article.authors.push(author);
            }
        }

        if self.article_depth == Some(depth) {
            self.article_depth = None;
            self.article_done = true;
        }

        self.stack.pop();
    }

    fn store(&mut self, field: Field, value: String) {
        let date = &mut self.article.pub_date;
        let slot = match field {
            Field::Pmid => &mut self.article.pmid,
            Field::Title => &mut self.article.title,
            Field::Year => &mut date.year,
            Field::Month => &mut date.month,
            Field::Day => &mut date.day,
            Field::MedlineDate => &mut date.medline_date,
            Field::ForeName | Field::LastName | Field::CollectiveName | Field::Affiliation => {
                let Some(author) = self.current_author.as_mut() else {
                    return;
                };
                match field {
                    Field::ForeName => &mut author.fore_name,
                    Field::LastName => &mut author.last_name,
                    Field::CollectiveName => &mut author.collective_name,
                    _ => &mut author.affiliation,
                }
            }
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

fn malformed(reader: &Reader<&[u8]>, err: impl std::fmt::Display) -> PapersError {
    PapersError::MalformedInput(format!("{} at byte {}", err, reader.buffer_position()))
}

/// Rejects a second top-level element and malformed or duplicate attributes.
fn check_element(reader: &Reader<&[u8]>, walker: &ArticleWalker, e: &BytesStart) -> Result<()> {
    if walker.seen_root && walker.stack.is_empty() {
        return Err(malformed(reader, "content after the root element"));
    }
    for attr in e.attributes() {
        attr.map_err(|err| malformed(reader, err))?;
    }
    Ok(())
}

/// Reads the whole document, failing on any syntax error, and collects the
/// fields of its first `PubmedArticle`.
pub fn parse_article(xml: &str) -> Result<ParsedArticle> {
    let mut reader = Reader::from_str(xml);
    let mut walker = ArticleWalker::default();

    loop {
        match reader.read_event().map_err(|e| malformed(&reader, e))? {
            Event::Start(e) => {
                check_element(&reader, &walker, &e)?;
                walker.open(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Event::Empty(e) => {
                check_element(&reader, &walker, &e)?;
                walker.open(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                walker.close();
            }
            Event::End(_) => walker.close(),
            Event::Text(e) => {
                let text = e.unescape().map_err(|err| malformed(&reader, err))?;
                if walker.stack.is_empty() && !text.trim().is_empty() {
                    return Err(malformed(&reader, "text outside the root element"));
                }
                walker.text(&text);
            }
            Event::CData(e) => {
                if walker.stack.is_empty() {
                    return Err(malformed(&reader, "CDATA outside the root element"));
                }
                walker.text(&String::from_utf8_lossy(&e));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !walker.stack.is_empty() {
        return Err(malformed(
            &reader,
            format!("unclosed element <{}>", walker.stack.join("/")),
        ));
    }
    if !walker.seen_root {
        return Err(PapersError::MalformedInput(
            "document has no root element".to_string(),
        ));
    }
    if !walker.found_article {
        return Err(PapersError::MalformedInput(format!(
            "no <{}> element found",
            ARTICLE_ROOT
        )));
    }

    Ok(walker.article)
}
