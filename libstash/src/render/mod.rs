//! Output rendering for image listings.
//!
//! Rendering happens in two steps. [`resolve_format`] picks the format
//! string from the display options, then [`Renderer::from_format`] turns it
//! into one of two modes:
//!
//! - [`Renderer::Json`] - the rows as a JSON array
//! - [`Renderer::Table`] - the rows laid out by a column [`Template`]
//!
//! Both modes implement [`Render`].

use crate::error::{Result, StashError};
use crate::report::DisplayRow;

mod template;
pub use template::Template;


/// Format keyword selecting JSON output.
pub const JSON_FORMAT: &str = "json";

/// Template used in quiet mode.
pub const QUIET_FORMAT: &str = "{{.ID}}";

/// A column of the image listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Digest,
    CreatedAt,
    Size,
}

/// Field key as written in templates, and header label.
static FIELD_TABLE: [(Field, &str, &str); 5] = [
    (Field::Id, "ID", "IMAGE ID"),
    (Field::Name, "Name", "IMAGE NAME"),
    (Field::Digest, "Digest", "DIGEST"),
    (Field::CreatedAt, "CreatedAt", "CREATED AT"),
    (Field::Size, "Size", "SIZE"),
];

impl Field {
    /// All fields, in schema order.
    pub const ALL: [Field; 5] = [
        Field::Id,
        Field::Name,
        Field::Digest,
        Field::CreatedAt,
        Field::Size,
    ];

    /// Looks up a field by its template key (`ID`, `Name`, ...).
    ///
    /// Keys are case-sensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use libstash::render::Field;
    ///
    /// assert_eq!(Field::from_key("CreatedAt"), Some(Field::CreatedAt));
    /// assert_eq!(Field::from_key("id"), None);
    /// assert_eq!(Field::from_key("Tag"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Field> {
        FIELD_TABLE
            .iter()
            .find(|(_, k, _)| *k == key)
            .map(|(field, _, _)| *field)
    }

    /// Template key of the field.
    pub fn key(self) -> &'static str {
        self.entry().1
    }

    /// Column header label of the field.
    pub fn header(self) -> &'static str {
        self.entry().2
    }

    fn entry(self) -> &'static (Field, &'static str, &'static str) {
        // Every variant has exactly one entry in FIELD_TABLE.
        &FIELD_TABLE[self as usize]
    }

    /// The row's text for this field.
    pub fn value(self, row: &DisplayRow) -> &str {
        match self {
            Field::Id => &row.id,
            Field::Name => &row.name,
            Field::Digest => &row.digest,
            Field::CreatedAt => &row.created_at,
            Field::Size => &row.size,
        }
    }
}

/// User-selected listing and display options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Only print image identifiers
    pub quiet: bool,
    /// Suppress the header line
    pub no_heading: bool,
    /// Shorten identifiers to 12 characters
    pub truncate: bool,
    /// Add a digest column
    pub digests: bool,
    /// Explicit format, overriding the synthesized template
    pub format: Option<String>,
    /// Only list images carrying this exact name
    pub name: Option<String>,
    /// Filter expression
    pub filter: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            quiet: false,
            no_heading: false,
            truncate: true,
            digests: false,
            format: None,
            name: None,
            filter: None,
        }
    }
}

/// Picks the output format for the given options.
///
/// An explicit format wins. Otherwise quiet mode prints identifiers only,
/// and the default table has the columns ID, name, digest (when requested),
/// creation time and size.
///
/// # Examples
///
/// ```
/// use libstash::render::{RenderOptions, resolve_format};
///
/// let opts = RenderOptions { quiet: true, ..Default::default() };
/// assert_eq!(resolve_format(&opts), "{{.ID}}");
/// ```
pub fn resolve_format(opts: &RenderOptions) -> String {
    if let Some(format) = &opts.format {
        return format.clone();
    }
    if opts.quiet {
        return QUIET_FORMAT.to_string();
    }

    let mut format = if opts.truncate {
        "table {{ .ID | printf \"%-20.12s\" }} ".to_string()
    } else {
        "table {{ .ID | printf \"%-64s\" }} ".to_string()
    };
    format.push_str("{{ .Name | printf \"%-56s\" }} ");
    if opts.digests {
        format.push_str("{{ .Digest | printf \"%-71s \" }} ");
    }
    format.push_str("{{ .CreatedAt | printf \"%-22s\" }} {{ .Size }}");
    format
}

/// Shared contract of the output modes.
pub trait Render {
    /// Renders every row, returning the bytes to write.
    fn render(&self, rows: &[DisplayRow], opts: &RenderOptions) -> Result<Vec<u8>>;
}

/// Output mode selected from a format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Renderer {
    Json,
    Table(Template),
}

impl Renderer {
    /// Selects JSON for the `json` keyword, otherwise parses a template.
    pub fn from_format(format: &str) -> Result<Self> {
        if format.trim() == JSON_FORMAT {
            return Ok(Renderer::Json);
        }
        Template::parse(format).map(Renderer::Table)
    }
}

impl Render for Renderer {
    fn render(&self, rows: &[DisplayRow], opts: &RenderOptions) -> Result<Vec<u8>> {
        match self {
            Renderer::Json => {
                let mut out = serde_json::to_vec_pretty(rows)
                    .map_err(|e| StashError::io_with_source("failed to encode JSON output", e))?;
                out.push(b'\n');
                Ok(out)
            }
            Renderer::Table(template) => template.render(rows, opts),
        }
    }
}

impl Render for Template {
    fn render(&self, rows: &[DisplayRow], opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut out = String::new();

        // Headers come from the field table, so an empty row set still has one.
        if self.has_header() && !opts.no_heading {
            out.push_str(&self.render_line(Field::header));
            out.push('\n');
        }
        for row in rows {
            out.push_str(&self.render_line(|field| field.value(row)));
            out.push('\n');
        }

        Ok(out.into_bytes())
    }
}
