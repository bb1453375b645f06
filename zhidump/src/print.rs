//! text output

use std::io::Write;

use ansi_term::{Color, Style};
use zhi_fonts::{
    tables::{cmap::EncodingRecord, directory::TableRecord},
    FontInfo, GlyphOutline, LocFormat,
};

use crate::{CharmapEntry, GlyphReport};

pub struct Printer<'a> {
    is_tty: bool,
    writer: &'a mut (dyn std::io::Write + 'a),
}

impl std::io::Write for Printer<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

impl<'a> Printer<'a> {
    pub fn new(writer: &'a mut (dyn std::io::Write + 'a)) -> Self {
        Printer {
            is_tty: atty::is(atty::Stream::Stdout),
            writer,
        }
    }

    fn print_with_style(
        &mut self,
        style: Style,
        f: impl FnOnce(&mut Printer) -> std::io::Result<()>,
    ) -> std::io::Result<()> {
        if !self.is_tty {
            return f(self);
        }
        write!(self, "{}", style.prefix())?;
        f(self)?;
        write!(self, "{}", style.suffix())
    }

    fn print_heading(&mut self, text: &str) -> std::io::Result<()> {
        self.print_with_style(Style::new().bold(), |this| writeln!(this, "{text}"))
    }

    pub fn print_info(&mut self, info: &FontInfo) -> std::io::Result<()> {
        self.print_heading("Font")?;
        writeln!(
            self,
            "  sfnt version      '{}' 0x{:08X}",
            info.sfnt_version(),
            info.sfnt_version().to_u32()
        )?;
        writeln!(self, "  tables            {}", info.num_tables())?;
        for record in [info.cmap(), info.glyf(), info.loca(), info.head()] {
            write!(self, "  ")?;
            self.print_with_style(Color::Cyan.into(), |this| write!(this, "{}", record.tag))?;
            writeln!(
                self,
                " offset         0x{:08X} ({} bytes)",
                record.offset, record.length
            )?;
        }
        write!(self, "  indexToLocFormat  {}", info.index_to_loc_format())?;
        match (info.index_to_loc_format(), info.loc_format()) {
            (0, LocFormat::Short) => writeln!(self, " short (offsets are 16-bit words)"),
            (1, LocFormat::Long) => writeln!(self, " long (offsets are bytes)"),
            _ => self.print_with_style(Color::Red.into(), |this| {
                writeln!(this, " unknown, not 0 or 1 (reading loca as long)")
            }),
        }
    }

    pub fn print_directory(&mut self, records: &[TableRecord]) -> std::io::Result<()> {
        self.print_heading("Tag  Offset  Length  Checksum")?;
        writeln!(self, "-------------------------------")?;

        // pick how much padding we use for offsets based on the max offset in directory
        let offset_pad = hex_width(
            records
                .iter()
                .map(|rec| rec.offset)
                .max()
                .unwrap_or_default(),
        );
        for record in records {
            writeln!(
                self,
                "{0} 0x{1:02$X} {3:8} 0x{4:08X} ",
                record.tag, record.offset, offset_pad, record.length, record.checksum
            )?;
        }
        Ok(())
    }

    pub fn print_encodings(&mut self, records: &[EncodingRecord]) -> std::io::Result<()> {
        self.print_heading("Platform  Encoding  Offset")?;
        for record in records {
            write!(
                self,
                "{:8}  {:8}  0x{:08X}",
                record.platform_id, record.encoding_id, record.subtable_offset
            )?;
            if record.is_unicode() {
                self.print_with_style(Color::Cyan.into(), |this| write!(this, "  unicode"))?;
            }
            writeln!(self)?;
        }
        Ok(())
    }

    pub fn print_charmap(&mut self, entries: &[CharmapEntry]) -> std::io::Result<()> {
        self.print_heading("Character map")?;
        for entry in entries {
            write!(self, "  {} -> ", entry.codepoint)?;
            self.print_with_style(Color::Yellow.into(), |this| {
                writeln!(this, "{}", entry.glyph_id.to_u16())
            })?;
        }
        Ok(())
    }

    pub fn print_glyph(&mut self, glyph: &GlyphReport) -> std::io::Result<()> {
        self.print_heading(&format!("Glyph for {}", glyph.codepoint))?;
        if let Some(glyph_id) = glyph.glyph_id {
            write!(self, "  index             ")?;
            self.print_with_style(Color::Yellow.into(), |this| {
                writeln!(this, "{}", glyph_id.to_u16())
            })?;
        }
        if let Some(offset) = glyph.glyf_offset {
            writeln!(self, "  glyf offset       0x{offset:X}")?;
        }
        if let Some(outline) = &glyph.outline {
            self.print_outline(outline)?;
        }
        if let Some(error) = &glyph.error {
            self.print_with_style(Color::Red.into(), |this| {
                writeln!(this, "  error: {error}")
            })?;
        }
        Ok(())
    }

    fn print_outline(&mut self, outline: &GlyphOutline) -> std::io::Result<()> {
        let bbox = outline.bbox;
        writeln!(self, "  numberOfContours  {}", outline.contours.len())?;
        writeln!(
            self,
            "  bbox              ({}, {}) ({}, {})",
            bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max
        )?;
        writeln!(self, "  points            {}", outline.num_points())?;
        for (i, contour) in outline.contours.iter().enumerate() {
            writeln!(self, "  contour {i}")?;
            for point in &contour.points {
                let style = if point.on_curve {
                    Style::default()
                } else {
                    Color::Fixed(243).italic()
                };
                self.print_with_style(style, |this| {
                    write!(this, "    {:>6} {:>6}", point.x, point.y)?;
                    if !point.on_curve {
                        write!(this, "  off")?;
                    }
                    Ok(())
                })?;
                writeln!(self)?;
            }
        }
        Ok(())
    }
}

fn hex_width(val: u32) -> usize {
    match val {
        0..=0xffff => 4usize,
        0x10000..=0xffff_ff => 6,
        0x1000000.. => 8,
    }
}
