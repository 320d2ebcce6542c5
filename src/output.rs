//! Append-only writer for the generated `<group>.c`/`<group>.h` pair.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

/// Appends rendered blocks to a `<group>.c`/`<group>.h` pair in one
/// directory. Nothing is ever rewritten or deduplicated: appending the same
/// peripheral twice leaves two copies of its macros in the source file.
pub struct OutputSink {
    dir: PathBuf,
}

impl OutputSink {
    pub fn new(dir: impl Into<PathBuf>) -> OutputSink {
        OutputSink { dir: dir.into() }
    }

    /// Appends `block` to `<group>.c`, writing the include preamble first
    /// when the file is empty. The companion `<group>.h` is created
    /// alongside it so the self-include resolves, but nothing is written to
    /// it.
    pub fn append(&self, group: &str, block: &str) -> Result<()> {
        let source = self.dir.join(format!("{group}.c"));
        let header = self.dir.join(format!("{group}.h"));
        let mut file = open_append(&source)?;
        open_append(&header)?;

        let fresh = file
            .metadata()
            .with_context(|| format!("couldn't stat {}", source.display()))?
            .len()
            == 0;
        if fresh {
            write_preamble(&mut file, group)
                .with_context(|| format!("couldn't write to {}", source.display()))?;
        }
        file.write_all(block.as_bytes())
            .with_context(|| format!("couldn't write to {}", source.display()))?;
        info!("appended to {}", source.display());
        Ok(())
    }
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("couldn't open {}", path.display()))
}

fn write_preamble(file: &mut File, group: &str) -> std::io::Result<()> {
    writeln!(file, "/* libs */")?;
    writeln!(file, "#include <stdint.h>")?;
    writeln!(file, "/* own */")?;
    writeln!(file, "#include \"{group}.h\"")
}
