//! Print what the streaming reader sees in a font.
//!
//! By default this prints the font summary and the outline of `A`. Any
//! number of characters can be requested with `-c`; the directory and the
//! whole format 4 character map can be listed as well.

use std::str::FromStr;

use serde::Serialize;
use zhi_fonts::{
    tables::{
        cmap::{self, Cmap4, EncodingRecord},
        directory::{TableDirectory, TableRecord},
    },
    types::GlyphId,
    ByteSource, FileSource, FontInfo, GlyphArrayDelta, GlyphOutline, ReadError,
};

mod print;

use print::Printer;

/// The character dumped when none is requested.
const DEFAULT_CHAR: CodePoint = CodePoint('A' as u32);

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = flags::Args::from_env().map_err(|e| Error(e.to_string()))?;
    if args.buffered {
        let bytes = std::fs::read(&args.input)
            .map_err(|e| Error(format!("can't open file {}: {e}", args.input.display())))?;
        run(bytes.as_slice(), &args)
    } else {
        let source = FileSource::open(&args.input)
            .map_err(|e| Error(format!("can't open file {}: {e}", args.input.display())))?;
        run(&source, &args)
    }
}

fn run<S: ByteSource + ?Sized>(source: &S, args: &flags::Args) -> Result<(), Error> {
    let info = FontInfo::read(source).map_err(Error::new)?;
    let delta = if args.ignore_glyph_array_delta {
        GlyphArrayDelta::Ignore
    } else {
        GlyphArrayDelta::Apply
    };
    let codepoints = if args.codepoint.is_empty() && !args.list && !args.charmap {
        vec![DEFAULT_CHAR]
    } else {
        args.codepoint.clone()
    };
    let glyphs = codepoints
        .iter()
        .map(|cp| GlyphReport::new(source, &info, *cp, delta))
        .collect::<Vec<_>>();
    let (tables, encodings) = if args.list {
        (
            Some(table_records(source)?),
            Some(cmap::encoding_records(source, info.cmap().offset).map_err(Error::new)?),
        )
    } else {
        (None, None)
    };
    let charmap = if args.charmap {
        Some(charmap(source, &info, delta)?)
    } else {
        None
    };

    let report = Report {
        info,
        tables,
        encodings,
        charmap,
        glyphs,
    };
    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(Error::new)?;
        println!("{json}");
        return Ok(());
    }
    print_report(&report).map_err(|e| Error(format!("print failed: '{e}'")))
}

fn print_report(report: &Report) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let mut locked = stdout.lock();
    let mut printer = Printer::new(&mut locked);
    printer.print_info(&report.info)?;
    if let Some(tables) = &report.tables {
        printer.print_directory(tables)?;
    }
    if let Some(encodings) = &report.encodings {
        printer.print_encodings(encodings)?;
    }
    if let Some(charmap) = &report.charmap {
        printer.print_charmap(charmap)?;
    }
    for glyph in &report.glyphs {
        printer.print_glyph(glyph)?;
    }
    Ok(())
}

fn table_records<S: ByteSource + ?Sized>(source: &S) -> Result<Vec<TableRecord>, Error> {
    TableDirectory::read(source)
        .and_then(|dir| dir.records().collect())
        .map_err(Error::new)
}

fn charmap<S: ByteSource + ?Sized>(
    source: &S,
    info: &FontInfo,
    delta: GlyphArrayDelta,
) -> Result<Vec<CharmapEntry>, Error> {
    let subtable = Cmap4::find(source, info.cmap().offset).map_err(Error::new)?;
    let Some(subtable) = subtable else {
        log::warn!("no unicode format 4 cmap subtable");
        return Ok(Vec::new());
    };
    subtable
        .with_glyph_array_delta(delta)
        .iter()
        .map(|pair| {
            pair.map(|(codepoint, glyph_id)| CharmapEntry {
                codepoint: CodePoint(codepoint),
                glyph_id,
            })
        })
        .collect::<Result<_, _>>()
        .map_err(Error::new)
}

/// Everything printed, in the shape it is written as JSON.
#[derive(Serialize)]
struct Report {
    info: FontInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    tables: Option<Vec<TableRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    encodings: Option<Vec<EncodingRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    charmap: Option<Vec<CharmapEntry>>,
    glyphs: Vec<GlyphReport>,
}

#[derive(Serialize)]
struct CharmapEntry {
    codepoint: CodePoint,
    glyph_id: GlyphId,
}

/// The path from one character to its outline.
///
/// Each step is only present if the steps before it succeeded; the first
/// failure is kept in `error`.
#[derive(Serialize)]
struct GlyphReport {
    codepoint: CodePoint,
    glyph_id: Option<GlyphId>,
    glyf_offset: Option<u32>,
    outline: Option<GlyphOutline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl GlyphReport {
    fn new<S: ByteSource + ?Sized>(
        source: &S,
        info: &FontInfo,
        codepoint: CodePoint,
        delta: GlyphArrayDelta,
    ) -> Self {
        let mut report = GlyphReport {
            codepoint,
            glyph_id: None,
            glyf_offset: None,
            outline: None,
            error: None,
        };
        if let Err(e) = report.fill(source, info, delta) {
            log::debug!("{codepoint}: {e}");
            report.error = Some(e.to_string());
        }
        report
    }

    fn fill<S: ByteSource + ?Sized>(
        &mut self,
        source: &S,
        info: &FontInfo,
        delta: GlyphArrayDelta,
    ) -> Result<(), ReadError> {
        let glyph_id = info.map_codepoint_with(source, self.codepoint.0, delta)?;
        self.glyph_id = Some(glyph_id);
        self.glyf_offset = Some(info.glyph_offset(source, glyph_id)?);
        self.outline = Some(info.outline(source, glyph_id)?);
        Ok(())
    }
}

/// A code point given on the command line.
///
/// Accepts a single character, `U+0041` or `0x41`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodePoint(u32);

impl FromStr for CodePoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(CodePoint(c as u32));
        }
        let hex = s
            .strip_prefix("U+")
            .or_else(|| s.strip_prefix("u+"))
            .or_else(|| s.strip_prefix("0x"))
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| format!("expected a character, U+XXXX or 0xXXXX, found '{s}'"))?;
        u32::from_str_radix(hex, 16)
            .map(CodePoint)
            .map_err(|e| format!("invalid code point '{s}': {e}"))
    }
}

impl std::fmt::Display for CodePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "U+{:04X}", self.0)
    }
}

impl Serialize for CodePoint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone)]
struct Error(String);

impl Error {
    fn new(t: impl std::fmt::Display) -> Self {
        Self(t.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for Error {}

mod flags {
    use super::CodePoint;
    use std::path::PathBuf;

    xflags::xflags! {
        /// Dump the tables, character mapping and glyph outlines of a TrueType font
        cmd args
            {
                required input: PathBuf
                /// List the table directory and the cmap encoding records.
                optional -l, --list
                /// A character to look up: `A`, `U+0041` or `0x41`.
                repeated -c, --codepoint codepoint: CodePoint
                /// List every mapping in the format 4 cmap subtable.
                optional --charmap
                /// Write JSON instead of text.
                optional --json
                /// Return glyph id array values without adding idDelta.
                optional --ignore-glyph-array-delta
                /// Read the whole file into memory first.
                optional --buffered
            }
    }
}
