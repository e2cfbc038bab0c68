//! Conversion between XML text and JSON values.
//!
//! Elements become object members, repeated sibling elements become arrays,
//! attributes become members of the element object and mixed text is kept
//! under `#text`. Leaf text stays a string; callers that need numbers or
//! booleans coerce while deserializing.
//!
//! A self-closing element is `null`. An element with no content is the empty
//! string, which is also how empty arrays and objects are written.

use crate::{Error, Result};

use serde_json::{Map, Value};

/// Writes `value` as an XML document whose root element is `root`.
pub fn write(root: &str, value: &Value) -> String {
    let mut out = String::new();
    write_element(&mut out, root, value);
    out
}

fn write_element(out: &mut String, name: &str, value: &Value) {
    match value {
        Value::Null => {
            out.push('<');
            out.push_str(name);
            out.push_str(" />");
        }
        Value::Array(items) if items.is_empty() => {
            write_element(out, name, &Value::String(String::new()));
        }
        Value::Array(items) => {
            for item in items {
                write_element(out, name, item);
            }
        }
        Value::Object(map) => {
            out.push('<');
            out.push_str(name);
            out.push('>');
            for (key, value) in map {
                if key == "#text" {
                    escape_into(out, &scalar_text(value));
                } else if !value.is_null() {
                    write_element(out, key, value);
                }
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        scalar => {
            out.push('<');
            out.push_str(name);
            out.push('>');
            escape_into(out, &scalar_text(scalar));
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            ch => out.push(ch),
        }
    }
}

/// Reads an XML document and returns the content of its root element.
pub fn read(text: &str) -> Result<Value> {
    let mut parser = Parser { src: text, pos: 0 };
    parser.skip_misc()?;
    let (_, value) = parser.element()?;
    parser.skip_misc()?;

    if parser.pos != parser.src.len() {
        return Err(parser.error("trailing content after the root element"));
    }

    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        let src: &'a str = self.src;
        &src[self.pos..]
    }

    fn error(&self, message: &str) -> Error {
        crate::err!("malformed XML at byte {}: {}", self.pos, message)
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn skip_until(&mut self, terminator: &str) -> Result<&'a str> {
        let rest = self.rest();
        match rest.find(terminator) {
            Some(end) => {
                self.pos += end + terminator.len();
                Ok(&rest[..end])
            }
            None => Err(self.error(&format!("missing `{terminator}`"))),
        }
    }

    /// Skips the prolog, comments and doctype declarations.
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.skip_whitespace();
            if self.rest().starts_with("<?") {
                self.skip_until("?>")?;
            } else if self.rest().starts_with("<!--") {
                self.skip_until("-->")?;
            } else if self.rest().starts_with("<!") && !self.rest().starts_with("<![CDATA[") {
                self.skip_until(">")?;
            } else {
                return Ok(());
            }
        }
    }

    fn expect(&mut self, token: &str) -> Result<()> {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            Ok(())
        } else {
            Err(self.error(&format!("expected `{token}`")))
        }
    }

    fn name(&mut self) -> Result<&'a str> {
        let rest = self.rest();
        let end = rest
            .find(|ch: char| ch.is_whitespace() || matches!(ch, '>' | '/' | '='))
            .unwrap_or(rest.len());

        if end == 0 {
            return Err(self.error("expected a name"));
        }

        self.pos += end;
        Ok(&rest[..end])
    }

    fn element(&mut self) -> Result<(&'a str, Value)> {
        self.expect("<")?;
        let name = self.name()?;
        let mut members = Map::new();

        loop {
            self.skip_whitespace();
            if self.rest().starts_with("/>") {
                self.pos += 2;
                let value = if members.is_empty() {
                    Value::Null
                } else {
                    Value::Object(members)
                };
                return Ok((name, value));
            }
            if self.rest().starts_with('>') {
                self.pos += 1;
                break;
            }

            let attr = self.name()?;
            self.skip_whitespace();
            self.expect("=")?;
            self.skip_whitespace();
            let quote = if self.rest().starts_with('"') { "\"" } else { "'" };
            self.expect(quote)?;
            let raw = self.skip_until(quote)?;
            members.insert(attr.to_string(), Value::String(unescape(raw)?));
        }

        let mut text = String::new();

        loop {
            let rest = self.rest();
            if rest.starts_with("</") {
                self.pos += 2;
                let closing = self.name()?;
                if closing != name {
                    return Err(self.error(&format!(
                        "`</{closing}>` does not close `<{name}>`"
                    )));
                }
                self.skip_whitespace();
                self.expect(">")?;
                break;
            } else if rest.starts_with("<!--") {
                self.skip_until("-->")?;
            } else if rest.starts_with("<![CDATA[") {
                self.pos += "<![CDATA[".len();
                text.push_str(self.skip_until("]]>")?);
            } else if rest.starts_with('<') {
                let (child, value) = self.element()?;
                insert_member(&mut members, child, value);
            } else if rest.is_empty() {
                return Err(self.error(&format!("unclosed element `<{name}>`")));
            } else {
                let end = rest.find('<').unwrap_or(rest.len());
                text.push_str(&unescape(&rest[..end])?);
                self.pos += end;
            }
        }

        let value = if members.is_empty() {
            Value::String(text)
        } else {
            if !text.trim().is_empty() {
                members.insert("#text".to_string(), Value::String(text.trim().to_string()));
            }
            Value::Object(members)
        };

        Ok((name, value))
    }
}

fn insert_member(members: &mut Map<String, Value>, name: &str, value: Value) {
    match members.get_mut(name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            members.insert(name.to_string(), value);
        }
    }
}

fn unescape(raw: &str) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let Some(end) = rest.find(';') else {
            return Err(crate::err!("unterminated XML entity in `{raw}`"));
        };

        let entity = &rest[1..end];
        let ch = match entity {
            "lt" => '<',
            "gt" => '>',
            "amp" => '&',
            "quot" => '"',
            "apos" => '\'',
            _ => {
                let code = if let Some(hex) = entity.strip_prefix("#x") {
                    u32::from_str_radix(hex, 16).ok()
                } else if let Some(dec) = entity.strip_prefix('#') {
                    dec.parse().ok()
                } else {
                    None
                };

                match code.and_then(char::from_u32) {
                    Some(ch) => ch,
                    None => return Err(crate::err!("unknown XML entity `&{entity};`")),
                }
            }
        };

        out.push(ch);
        rest = &rest[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}
