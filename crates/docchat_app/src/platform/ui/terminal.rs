use std::io::{self, Write};

use docchat_core::{AnalysisButtonView, LibraryView, MessageId, UPLOAD_LABEL};

use super::render::{TranscriptLine, ViewCommand, ViewPort};

pub const CLEARED_MARKER: &str = "--- conversation cleared ---";

/// Applies view commands to a line-oriented terminal. Only changes since the
/// previous render are written.
pub struct TerminalViewPort<W: Write> {
    out: W,
    printed: Vec<MessageId>,
    upload: (&'static str, bool),
    library: Option<LibraryView>,
    quick_analysis: Option<Vec<AnalysisButtonView>>,
}

impl<W: Write> TerminalViewPort<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            printed: Vec::new(),
            upload: (UPLOAD_LABEL, true),
            library: None,
            quick_analysis: None,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn sync_transcript(&mut self, lines: Vec<TranscriptLine>) -> io::Result<()> {
        if lines.is_empty() && !self.printed.is_empty() {
            writeln!(self.out, "{CLEARED_MARKER}")?;
        }
        for line in lines.iter().filter(|line| !self.printed.contains(&line.id)) {
            write_line(&mut self.out, line)?;
        }
        self.printed = lines.iter().map(|line| line.id).collect();
        Ok(())
    }

    fn write_library(&mut self, library: Option<&LibraryView>) -> io::Result<()> {
        match library {
            Some(library) => {
                writeln!(
                    self.out,
                    "Library: {} chunk(s) across {} file(s)",
                    library.total_chunks,
                    library.files.len()
                )?;
                for file in &library.files {
                    writeln!(self.out, "  * {file}")?;
                }
                Ok(())
            }
            None => writeln!(self.out, "Library: empty"),
        }
    }

    fn write_quick_analysis(&mut self, buttons: &[AnalysisButtonView]) -> io::Result<()> {
        writeln!(self.out, "Quick analysis (/analyze <key>):")?;
        for button in buttons {
            writeln!(self.out, "  {:<20} {}", button.key, button.label)?;
        }
        Ok(())
    }
}

impl<W: Write> ViewPort for TerminalViewPort<W> {
    fn apply(&mut self, commands: Vec<ViewCommand>) -> io::Result<()> {
        for command in commands {
            match command {
                ViewCommand::SyncTranscript(lines) => self.sync_transcript(lines)?,
                ViewCommand::SetUploadControl { label, enabled } => {
                    if self.upload != (label, enabled) {
                        let state = if enabled { "ready" } else { "busy" };
                        writeln!(self.out, "[{label}] {state}")?;
                        self.upload = (label, enabled);
                    }
                }
                ViewCommand::SetLibrary(library) => {
                    if self.library != library {
                        self.write_library(library.as_ref())?;
                        self.library = library;
                    }
                }
                ViewCommand::SetQuickAnalysis(buttons) => {
                    if self.quick_analysis != buttons {
                        if let Some(buttons) = &buttons {
                            self.write_quick_analysis(buttons)?;
                        }
                        self.quick_analysis = buttons;
                    }
                }
            }
        }
        self.out.flush()
    }

    fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}

fn write_line<W: Write>(out: &mut W, line: &TranscriptLine) -> io::Result<()> {
    let mut text_lines = line.text.lines();
    writeln!(
        out,
        "{}: {}",
        line.speaker,
        text_lines.next().unwrap_or_default()
    )?;
    for rest in text_lines {
        writeln!(out, "  {rest}")?;
    }
    if let Some(footer) = &line.footer {
        writeln!(out, "  ({footer})")?;
    }
    Ok(())
}
