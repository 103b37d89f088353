//! Binary image writer.
//!
//! Layout: a fixed header, then `program_size` instruction records (a u16
//! type tag followed by a 64-bit operand word), then the raw memory bytes.
//! Everything is written explicit little-endian — a deliberate deviation
//! from the C original's raw host-endian struct write (see DESIGN.md),
//! since a binary image meant to outlive the process that wrote it
//! shouldn't silently depend on the host's endianness.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::error::{Diagnostic, Location, Result};
use crate::translator::Translator;

pub const MAGIC: u32 = 0x6d73_6162; // "basm" little-endian
pub const VERSION: u16 = 1;

pub fn write_image(translator: &Translator<'_>, output_path: &str) -> Result<()> {
    let file = File::create(output_path).map_err(|e| io_err(output_path, e))?;
    let mut w = BufWriter::new(file);
    write_all(translator, &mut w, output_path)?;
    w.flush().map_err(|e| io_err(output_path, e))
}

fn write_all(translator: &Translator<'_>, w: &mut impl Write, output_path: &str) -> Result<()> {
    let program = translator.program();
    let memory = translator.memory();

    w.write_all(&MAGIC.to_le_bytes())
        .and_then(|_| w.write_all(&VERSION.to_le_bytes()))
        .and_then(|_| w.write_all(&translator.entry().to_le_bytes()))
        .and_then(|_| w.write_all(&(program.len() as u64).to_le_bytes()))
        .and_then(|_| w.write_all(&memory.len().to_le_bytes()))
        .and_then(|_| w.write_all(&memory.len().to_le_bytes())) // memory_capacity == memory_size; this crate has no separate capacity bound
        .map_err(|e| io_err(output_path, e))?;

    for record in program {
        w.write_all(&(record.inst_type as u16).to_le_bytes())
            .and_then(|_| w.write_all(&record.operand.as_u64().to_le_bytes()))
            .map_err(|e| io_err(output_path, e))?;
    }

    w.write_all(memory.bytes()).map_err(|e| io_err(output_path, e))
}

fn io_err(output_path: &str, e: io::Error) -> Diagnostic {
    Diagnostic::new(
        Location::new(output_path, 0),
        format!("could not write to file `{output_path}`: {e}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::translator::translate_file;

    fn write_fixture(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn scratch_dir(tag: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("basm-image-test-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn header_layout_matches_spec() {
        let dir = scratch_dir("header");
        let input = write_fixture(&dir, "in.bm", "halt:\n%entry halt\n");
        let arena = Arena::new();
        let t = translate_file(&arena, input.to_str().unwrap()).unwrap();

        let mut buf = Vec::new();
        write_all(&t, &mut buf, "out.bin").unwrap();

        assert_eq!(u32::from_le_bytes(buf[0..4].try_into().unwrap()), MAGIC);
        assert_eq!(u16::from_le_bytes(buf[4..6].try_into().unwrap()), VERSION);
        // entry (u64) follows immediately after magic+version, no padding.
        assert_eq!(u64::from_le_bytes(buf[6..14].try_into().unwrap()), 0);
        let program_size = u64::from_le_bytes(buf[14..22].try_into().unwrap());
        assert_eq!(program_size, 1);
    }

    #[test]
    fn program_records_and_memory_follow_header() {
        let dir = scratch_dir("body");
        let input = write_fixture(&dir, "in.bm", "%const s \"hi\"\npush s\n");
        let arena = Arena::new();
        let t = translate_file(&arena, input.to_str().unwrap()).unwrap();

        let mut buf = Vec::new();
        write_all(&t, &mut buf, "out.bin").unwrap();

        let header_len = 4 + 2 + 8 + 8 + 8 + 8;
        let record_len = 2 + 8;
        let memory_start = header_len + record_len; // one program record
        assert_eq!(&buf[memory_start..], b"hi");
    }
}
