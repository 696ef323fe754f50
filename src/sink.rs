use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

/// Write rendered JIL text to the destination file.
///
/// The text is written in full or the I/O error is surfaced unmodified;
/// there is no partial-write recovery.
pub fn write(path: &Path, text: &str) -> io::Result<()> {
    fs::write(path, text)?;
    info!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_rendered_text_in_full() {
        let path = std::env::temp_dir().join("jilgen_sink_test.jil");
        let text = "/* -- job1 -- */\n\ninsert_job: job1\n\n";

        write(&path, text).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), text);

        fs::remove_file(&path).ok();
    }
}
