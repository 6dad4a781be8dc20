//! Flat `.properties` documents.
//!
//! The format has no nesting, so a dotted path is used as one flat key.
//! Reading follows the Java properties conventions: `#` / `!` comments,
//! `=`, `:` or whitespace separators, backslash line continuation and the
//! `\t \n \r \f \uXXXX` escapes. Files are read as ISO-8859-1 and
//! written back sorted by key as ASCII, with everything outside printable
//! ASCII as `\uXXXX`, so Java's `Properties.load` reads them unchanged.

use super::{DocumentError, DocumentFormat};
use crate::error::{InjectError, InjectResult, ParseCause};
use crate::tree::DottedPath;
use std::collections::BTreeMap;
use std::path::Path;

const BLANKS: [char; 3] = [' ', '\t', '\u{c}'];

#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesFormat;

impl DocumentFormat for PropertiesFormat {
    type Document = BTreeMap<String, String>;

    const NAME: &'static str = "Properties";
    const EXTENSIONS: &'static [&'static str] = &[".properties"];

    fn parse(content: &str) -> Result<Self::Document, ParseCause> {
        Ok(parse_properties(content)?)
    }

    fn render(document: &Self::Document) -> Result<String, ParseCause> {
        let mut out = String::new();
        for (key, value) in document {
            out.push_str(&escape(key, true));
            out.push('=');
            out.push_str(&escape(value, false));
            out.push('\n');
        }
        Ok(out)
    }

    fn set(document: &mut Self::Document, path: &DottedPath, value: &str) -> bool {
        let previous = document.insert(path.as_str().to_string(), value.to_string());
        previous.as_deref() != Some(value)
    }

    fn load(path: &Path) -> InjectResult<Self::Document> {
        if !path.exists() {
            return Ok(Self::Document::default());
        }
        let bytes = std::fs::read(path).map_err(|e| InjectError::io(path, e))?;
        Self::parse(&decode_latin1(&bytes)).map_err(|cause| InjectError::malformed(path, cause))
    }
}

/// ISO-8859-1 maps every byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn parse_properties(content: &str) -> Result<BTreeMap<String, String>, DocumentError> {
    let mut properties = BTreeMap::new();
    let mut lines = content.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let line_number = index + 1;
        let line = raw.trim_start_matches(BLANKS);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = line.to_string();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(BLANKS)),
                None => break,
            }
        }

        let (key, value) = split_key_value(&logical);
        properties.insert(unescape(key, line_number)?, unescape(value, line_number)?);
    }

    Ok(properties)
}

/// An odd number of trailing backslashes joins the next line.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut split = None;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                split = Some((i, true));
                break;
            }
            c if BLANKS.contains(&c) => {
                split = Some((i, false));
                break;
            }
            _ => {}
        }
    }

    let Some((at, explicit)) = split else {
        return (line, "");
    };

    let key = &line[..at];
    // Separator chars are ASCII, one byte wide
    let mut rest = line[at + 1..].trim_start_matches(BLANKS);
    if !explicit && let Some(after) = rest.strip_prefix(['=', ':']) {
        rest = after.trim_start_matches(BLANKS);
    }
    (key, rest)
}

fn unescape(raw: &str, line: usize) -> Result<String, DocumentError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let unit = read_hex4(&mut chars, line)?;
                out.push(decode_unit(unit, &mut chars, line)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

fn read_hex4(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u32, DocumentError> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        u32::from_str_radix(&digits, 16).map_err(|e| malformed_unicode(line, &e.to_string()))
    } else {
        Err(malformed_unicode(line, &format!("\\u{digits}")))
    }
}

/// Turn a UTF-16 unit into a char, consuming a `\uXXXX` low surrogate when
/// `unit` is a high surrogate.
fn decode_unit(
    unit: u32,
    chars: &mut std::str::Chars<'_>,
    line: usize,
) -> Result<char, DocumentError> {
    if (0xD800..0xDC00).contains(&unit) {
        let rest = chars.as_str();
        if let Some(tail) = rest.strip_prefix("\\u") {
            let mut lookahead = tail.chars();
            let low = read_hex4(&mut lookahead, line)?;
            if (0xDC00..0xE000).contains(&low) {
                *chars = lookahead;
                let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                return char::from_u32(code)
                    .ok_or_else(|| malformed_unicode(line, "invalid surrogate pair"));
            }
        }
        return Err(malformed_unicode(line, "unpaired surrogate"));
    }
    char::from_u32(unit).ok_or_else(|| malformed_unicode(line, "unpaired surrogate"))
}

fn malformed_unicode(line: usize, detail: &str) -> DocumentError {
    DocumentError::Syntax {
        line,
        reason: format!("malformed \\uxxxx encoding ({detail})"),
    }
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{c}' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if !(' '..='~').contains(&c) => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04X}"));
                }
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> BTreeMap<String, String> {
        parse_properties(content).unwrap()
    }

    #[test]
    fn test_separators() {
        let props = parse("a=1\nb:2\nc 3\nd = 4\ne : 5\nf\t=\t6\ng\n");
        assert_eq!(props["a"], "1");
        assert_eq!(props["b"], "2");
        assert_eq!(props["c"], "3");
        assert_eq!(props["d"], "4");
        assert_eq!(props["e"], "5");
        assert_eq!(props["f"], "6");
        assert_eq!(props["g"], "");
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let props = parse("# comment\n! also comment\n\n   \n  key = value\n");
        assert_eq!(props.len(), 1);
        assert_eq!(props["key"], "value");
    }

    #[test]
    fn test_value_keeps_trailing_space_and_inner_separators() {
        let props = parse("url=jdbc:mysql://h:3306/db?a=b \n");
        assert_eq!(props["url"], "jdbc:mysql://h:3306/db?a=b ");
    }

    #[test]
    fn test_line_continuation() {
        let props = parse("list = one, \\\n       two, \\\n       three\nnext=x\n");
        assert_eq!(props["list"], "one, two, three");
        assert_eq!(props["next"], "x");
    }

    #[test]
    fn test_escaped_backslash_does_not_continue() {
        let props = parse("path=C:\\\\dir\\\\\nnext=x\n");
        assert_eq!(props["path"], "C:\\dir\\");
        assert_eq!(props["next"], "x");
    }

    #[test]
    fn test_escapes() {
        let props = parse("key\\ with\\ spaces=a\\tb\\nc\nunicode=caf\\u00e9 \\uD83D\\uDE00\n");
        assert_eq!(props["key with spaces"], "a\tb\nc");
        assert_eq!(props["unicode"], "café 😀");
    }

    #[test]
    fn test_malformed_unicode_escape() {
        assert!(parse_properties("bad=\\u12G4\n").is_err());
        assert!(parse_properties("short=\\u12\n").is_err());
        assert!(parse_properties("lonely=\\uD83D\n").is_err());
    }

    #[test]
    fn test_render_escapes_and_roundtrips() {
        let mut doc = BTreeMap::new();
        doc.insert("b.key".to_string(), " leading space".to_string());
        doc.insert("a key".to_string(), "x=y:z #!".to_string());
        doc.insert("c".to_string(), "line1\nline2\\".to_string());
        doc.insert("d".to_string(), "naïve".to_string());

        let rendered = PropertiesFormat::render(&doc).unwrap();
        assert_eq!(
            rendered,
            "a\\ key=x\\=y\\:z \\#\\!\n\
             b.key=\\ leading space\n\
             c=line1\\nline2\\\\\n\
             d=na\\u00EFve\n"
        );
        assert_eq!(parse(&rendered), doc);
    }

    #[test]
    fn test_render_escapes_astral_as_surrogate_pair() {
        let mut doc = BTreeMap::new();
        doc.insert("motd".to_string(), "café 😀".to_string());

        let rendered = PropertiesFormat::render(&doc).unwrap();
        assert_eq!(rendered, "motd=caf\\u00E9 \\uD83D\\uDE00\n");
        assert!(rendered.is_ascii());
        assert_eq!(parse(&rendered), doc);
    }

    #[test]
    fn test_decode_latin1() {
        assert_eq!(decode_latin1(b"motd=caf\xe9\n"), "motd=café\n");
    }

    #[test]
    fn test_set_uses_whole_path_as_key() {
        let mut doc = BTreeMap::new();
        let path = DottedPath::new("database.host").unwrap();
        assert!(PropertiesFormat::set(&mut doc, &path, "localhost"));
        assert!(!PropertiesFormat::set(&mut doc, &path, "localhost"));
        assert_eq!(doc["database.host"], "localhost");
        assert_eq!(doc.len(), 1);
    }
}
