//! Built-in decoders.

use std::fmt;
use std::path::Path;

use jsonc_parser::ParseOptions;
use serde_json::Value;

use crate::{DecodeError, Decoder};

fn parse_object_text(format: &str, path: &Path, text: &str) -> Result<Option<Value>, DecodeError> {
    jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
        .map_err(|e| DecodeError::syntax(format, path, e.to_string()))
}

/// Decodes JSON data files. Comments and trailing commas are tolerated.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn name(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn decode(&self, path: &Path, content: &str) -> Result<Option<Value>, DecodeError> {
        parse_object_text(self.name(), path, content)
    }
}

/// Decodes script modules whose only job is to export a data object.
///
/// Recognized forms:
///
/// ```text
/// export default { ... };
/// export default function () { return { ... }; }
/// module.exports = { ... };
/// ```
///
/// The object literal itself must be JSON5-like data: no expressions or
/// references.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModuleDecoder;

impl ModuleDecoder {
    fn exported_object<'a>(&self, path: &Path, content: &'a str) -> Result<Option<&'a str>, DecodeError> {
        let code = content.trim();
        if code.is_empty() {
            return Ok(None);
        }

        let after_export = ["export default", "module.exports ="]
            .iter()
            .find_map(|marker| code.find(marker).map(|at| &code[at + marker.len()..]))
            .ok_or_else(|| DecodeError::syntax(self.name(), path, "no exported object"))?;

        let body = after_export.trim_start();
        let literal = if body.starts_with('{') {
            body
        } else {
            let at = body
                .find("return")
                .ok_or_else(|| DecodeError::syntax(self.name(), path, "export is not an object"))?;
            body[at + "return".len()..].trim_start()
        };

        if !literal.starts_with('{') {
            return Err(DecodeError::syntax(self.name(), path, "export is not an object"));
        }
        let end = balanced_end(literal)
            .ok_or_else(|| DecodeError::syntax(self.name(), path, "unterminated object literal"))?;
        Ok(Some(&literal[..end]))
    }
}

impl Decoder for ModuleDecoder {
    fn name(&self) -> &str {
        "js"
    }

    fn extensions(&self) -> &[&str] {
        &["js", "mjs"]
    }

    fn decode(&self, path: &Path, content: &str) -> Result<Option<Value>, DecodeError> {
        match self.exported_object(path, content)? {
            Some(literal) => parse_object_text(self.name(), path, literal),
            None => Ok(None),
        }
    }
}

/// Returns the byte length of the brace-balanced prefix of `text`, which
/// must start with `{`. Braces in strings and comments are ignored.
fn balanced_end(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' | b'`' => {
                let quote = bytes[i];
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 1;
            }
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Decoders by file extension.
///
/// Registration order is the order in which extensions are tried for a
/// data file.
pub struct DecoderRegistry {
    decoders: Vec<Box<dyn Decoder>>,
}

impl DecoderRegistry {
    /// Creates a registry without decoders.
    pub fn empty() -> Self {
        Self { decoders: Vec::new() }
    }

    /// Appends a decoder.
    pub fn register(mut self, decoder: impl Decoder + 'static) -> Self {
        self.decoders.push(Box::new(decoder));
        self
    }

    /// All handled extensions in the order they are tried.
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = Vec::new();
        for ext in self.decoders.iter().flat_map(|d| d.extensions().iter().copied()) {
            if !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }
        extensions
    }

    /// Finds the decoder for a path's extension.
    pub fn decoder_for(&self, path: &Path) -> Option<&dyn Decoder> {
        let extension = path.extension()?.to_str()?;
        self.decoders
            .iter()
            .find(|decoder| decoder.can_decode(extension))
            .map(|decoder| decoder.as_ref())
    }

    /// Decodes `content` with the decoder for `path`.
    pub fn decode(&self, path: &Path, content: &str) -> Result<Option<Value>, DecodeError> {
        self.decoder_for(path)
            .ok_or_else(|| DecodeError::unsupported(path))?
            .decode(path, content)
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::empty().register(JsonDecoder).register(ModuleDecoder)
    }
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.decoders.iter().map(|d| d.name()))
            .finish()
    }
}
