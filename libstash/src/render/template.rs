//! Column template parsing.
//!
//! Templates are literal text interleaved with actions:
//!
//! ```text
//! table {{ .ID | printf "%-20.12s" }} {{ .Name }}\t{{.Size}}
//! ```
//!
//! An action references one row field and may pipe it through `printf` with a
//! single `%[-][width][.precision]s` verb. A leading `table` keyword asks for
//! a header line.

use super::Field;
use crate::error::{Result, StashError};

/// Keyword that turns on the header line.
const TABLE_KEYWORD: &str = "table";

/// Largest printf width or precision accepted.
const MAX_PRINTF_NUMBER: usize = 1_000_000;

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    header: bool,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field { field: Field, spec: PrintfSpec },
}

/// A printf format with exactly one string verb.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct PrintfSpec {
    prefix: String,
    left: bool,
    width: Option<usize>,
    precision: Option<usize>,
    suffix: String,
}

impl Template {
    /// Parses a template string.
    ///
    /// # Examples
    ///
    /// ```
    /// use libstash::render::Template;
    ///
    /// let template = Template::parse("table {{ .ID | printf \"%-8.4s\" }}|").unwrap();
    /// assert!(template.has_header());
    /// assert!(Template::parse("{{ .Nope }}").is_err());
    /// ```
    pub fn parse(source: &str) -> Result<Self> {
        let source = source.replace("\\t", "\t").replace("\\n", "\n");

        let (header, body) = match source.strip_prefix(TABLE_KEYWORD) {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                (true, rest.trim_start())
            }
            _ => (false, source.as_str()),
        };

        let mut segments = Vec::new();
        let mut rest = body;
        while let Some(open) = rest.find("{{") {
            if open > 0 {
                segments.push(Segment::Text(rest[..open].to_string()));
            }
            let after_open = &rest[open + 2..];
            let close = after_open
                .find("}}")
                .ok_or_else(|| StashError::template_syntax("unclosed action, missing '}}'"))?;
            segments.push(parse_action(&after_open[..close])?);
            rest = &after_open[close + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }
        if segments.is_empty() {
            return Err(StashError::template_syntax("template has no fields or text"));
        }

        Ok(Self { header, segments })
    }

    /// Whether the template starts with the `table` keyword.
    pub fn has_header(&self) -> bool {
        self.header
    }

    /// Fields referenced by the template, in column order.
    pub fn fields(&self) -> Vec<Field> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Field { field, .. } => Some(*field),
                Segment::Text(_) => None,
            })
            .collect()
    }

    /// Renders one line, taking each field's text from `value`.
    pub(crate) fn render_line<'a, F>(&self, value: F) -> String
    where
        F: Fn(Field) -> &'a str,
    {
        let mut line = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => line.push_str(text),
                Segment::Field { field, spec } => line.push_str(&spec.apply(value(*field))),
            }
        }
        line.trim_end().to_string()
    }
}

fn parse_action(action: &str) -> Result<Segment> {
    let (target, pipeline) = match action.split_once('|') {
        Some((target, stage)) => (target.trim(), Some(stage.trim())),
        None => (action.trim(), None),
    };

    let key = target.strip_prefix('.').ok_or_else(|| {
        StashError::template_syntax(format!("expected a field like '.ID', found '{}'", target))
    })?;
    let field = Field::from_key(key)
        .ok_or_else(|| StashError::template_syntax(format!("unknown field '.{}'", key)))?;

    let spec = match pipeline {
        None => PrintfSpec::default(),
        Some(stage) => parse_printf_stage(stage)?,
    };

    Ok(Segment::Field { field, spec })
}

/// Parses `printf "<format>"`, the only supported pipeline stage.
fn parse_printf_stage(stage: &str) -> Result<PrintfSpec> {
    let args = stage
        .strip_prefix("printf")
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .ok_or_else(|| {
            StashError::template_syntax(format!("unsupported function in '{}'", stage))
        })?
        .trim_start();

    let body = args.strip_prefix('"').ok_or_else(|| {
        StashError::template_syntax(format!(
            "printf expects a quoted format, found '{}'",
            args
        ))
    })?;
    let (quoted, trailing) = split_quoted(body).ok_or_else(|| {
        StashError::template_syntax(format!("unterminated string in '{}'", stage))
    })?;

    match trailing.trim() {
        "" => PrintfSpec::parse(&unescape(quoted)),
        t if t.starts_with('|') => Err(StashError::template_syntax(format!(
            "only one pipeline stage is supported in '{}'",
            stage
        ))),
        t => Err(StashError::template_syntax(format!(
            "unexpected '{}' after printf format",
            t
        ))),
    }
}

/// Splits `body` at its closing quote, skipping escaped quotes.
fn split_quoted(body: &str) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some((&body[..i], &body[i + 1..])),
            _ => {}
        }
    }
    None
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

impl PrintfSpec {
    fn parse(format: &str) -> Result<Self> {
        let mut spec = PrintfSpec::default();
        let mut seen_verb = false;
        let mut chars = format.chars().peekable();

        while let Some(c) = chars.next() {
            let text = if seen_verb {
                &mut spec.suffix
            } else {
                &mut spec.prefix
            };
            if c != '%' {
                text.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                text.push('%');
                continue;
            }
            if seen_verb {
                return Err(StashError::template_syntax(format!(
                    "printf format '{}' has more than one verb",
                    format
                )));
            }

            if chars.peek() == Some(&'-') {
                chars.next();
                spec.left = true;
            }
            spec.width = take_number(&mut chars, format)?;
            if chars.peek() == Some(&'.') {
                chars.next();
                spec.precision = Some(take_number(&mut chars, format)?.unwrap_or(0));
            }
            match chars.next() {
                Some('s') | Some('v') => seen_verb = true,
                Some(other) => {
                    return Err(StashError::template_syntax(format!(
                        "unsupported printf verb '%{}' in '{}'",
                        other, format
                    )));
                }
                None => {
                    return Err(StashError::template_syntax(format!(
                        "incomplete printf verb in '{}'",
                        format
                    )));
                }
            }
        }

        if !seen_verb {
            return Err(StashError::template_syntax(format!(
                "printf format '{}' has no verb",
                format
            )));
        }
        Ok(spec)
    }

    fn apply(&self, value: &str) -> String {
        let value: String = match self.precision {
            Some(p) => value.chars().take(p).collect(),
            None => value.to_string(),
        };
        let padded = match (self.width, self.left) {
            (Some(w), true) => format!("{:<w$}", value, w = w),
            (Some(w), false) => format!("{:>w$}", value, w = w),
            (None, _) => value,
        };
        format!("{}{}{}", self.prefix, padded, self.suffix)
    }
}

/// Reads a run of digits; an empty run is `None`.
fn take_number(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    format: &str,
) -> Result<Option<usize>> {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        digits.push(c);
        chars.next();
    }
    if digits.is_empty() {
        return Ok(None);
    }

    match digits.parse::<usize>() {
        Ok(n) if n <= MAX_PRINTF_NUMBER => Ok(Some(n)),
        _ => Err(StashError::template_syntax(format!(
            "printf width or precision {} in '{}' exceeds {}",
            digits, format, MAX_PRINTF_NUMBER
        ))),
    }
}
