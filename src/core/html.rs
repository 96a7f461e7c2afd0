// src/core/html.rs
use super::sanitize::{normalize_entities, normalize_ws};

/// ASCII-only lowercase; byte offsets stay valid against the original.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// One `<tag …>inner</tag>` occurrence.
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    pub opener: &'a str,
    pub inner: &'a str,
}

impl<'a> Element<'a> {
    /// Attribute value from the opening tag, quoted or bare.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        let lc = to_lower(self.opener);
        let needle = join!(to_lower(name), "=");
        let mut from = 0usize;
        while let Some(rel) = lc[from..].find(&needle) {
            let at = from + rel;
            from = at + needle.len();
            // must be a whole attribute name
            let boundary = lc[..at].chars().next_back().is_some_and(|c| c.is_ascii_whitespace());
            if !boundary { continue; }

            let val = &self.opener[from..];
            return Some(match val.as_bytes().first() {
                Some(q @ (b'"' | b'\'')) => {
                    let q = *q as char;
                    let end = val[1..].find(q).map(|e| e + 1).unwrap_or(val.len());
                    &val[1..end]
                }
                _ => {
                    let end = val
                        .find(|c: char| c.is_ascii_whitespace() || c == '>')
                        .unwrap_or(val.len());
                    &val[..end]
                }
            });
        }
        None
    }

    /// Visible text: entities decoded, tags dropped, whitespace collapsed.
    pub fn text(&self) -> String {
        strip_tags(normalize_entities(self.inner))
    }
}

/// Iterator over `<tag>` elements in document order.
///
/// Scanning resumes right after each opening tag, so elements nested inside a
/// wrapper of the same tag are still visited. `inner` runs to the first closing
/// tag, which is exact for leaf cells.
pub struct Elements<'a> {
    doc: &'a str,
    lc: String,
    open: String,
    close: String,
    pos: usize,
}

pub fn elements<'a>(doc: &'a str, tag: &str) -> Elements<'a> {
    let tag = to_lower(tag);
    Elements {
        doc,
        lc: to_lower(doc),
        open: join!("<", &tag),
        close: join!("</", &tag),
        pos: 0,
    }
}

impl<'a> Iterator for Elements<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Element<'a>> {
        loop {
            let start = self.lc.get(self.pos..)?.find(&self.open)? + self.pos;
            let after_name = start + self.open.len();
            // `<td` must not match `<tdx`
            let next = self.lc[after_name..].chars().next()?;
            if !(next.is_ascii_whitespace() || next == '>' || next == '/') {
                self.pos = after_name;
                continue;
            }
            let open_end = self.lc[start..].find('>')? + start + 1;
            self.pos = open_end;

            let close_at = self.lc[open_end..]
                .find(&self.close)
                .map(|e| open_end + e)
                .unwrap_or(self.doc.len());
            return Some(Element {
                opener: &self.doc[start..open_end],
                inner: &self.doc[open_end..close_at],
            });
        }
    }
}
