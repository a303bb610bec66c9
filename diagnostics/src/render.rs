use crate::Diagnostic;
use crate::FileId;
use crate::Label;
use std::cmp::max;
use std::fmt::Write;

/// Provides access to source text for rendering diagnostics.
pub trait SourceProvider {
  /// Returns the display name for a file.
  fn file_name(&self, file: FileId) -> &str;
  /// Returns the file contents.
  fn file_text(&self, file: FileId) -> &str;
}

/// Render a diagnostic into a human-readable string with caret highlighting.
pub fn render_diagnostic(provider: &dyn SourceProvider, diagnostic: &Diagnostic) -> String {
  let mut output = String::new();

  writeln!(
    output,
    "{}[{}]: {}",
    diagnostic.severity, diagnostic.code, diagnostic.message
  )
  .unwrap();

  let primary = Label {
    span: diagnostic.primary,
    message: diagnostic.message.clone(),
    is_primary: true,
  };
  let mut secondary: Vec<&Label> = diagnostic.labels.iter().collect();
  secondary.sort_by_key(|l| (l.span.file, l.span.range.start));

  let mut current_file = None;
  for label in std::iter::once(&primary).chain(secondary.into_iter()) {
    let text = provider.file_text(label.span.file);
    if current_file != Some(label.span.file) {
      let (line, col) = line_and_column(text, label.span.range.start as usize);
      writeln!(
        output,
        " --> {}:{}:{}",
        provider.file_name(label.span.file),
        line,
        col
      )
      .unwrap();
      writeln!(output, "  |").unwrap();
      current_file = Some(label.span.file);
    }
    render_label(text, &mut output, label);
  }

  for note in &diagnostic.notes {
    writeln!(output, "= note: {}", note).unwrap();
  }

  output
}

fn render_label(text: &str, output: &mut String, label: &Label) {
  let starts = line_starts(text);
  let text_len = text.len();
  let start_offset = (label.span.range.start as usize).min(text_len);
  let end_offset = (label.span.range.end as usize).min(text_len);
  let start_line = line_index_at_offset(&starts, start_offset);
  let end_line = line_index_at_offset(&starts, end_offset.saturating_sub(1));

  let marker_char = if label.is_primary { '^' } else { '-' };

  for line_idx in start_line..=end_line {
    let line_start = starts[line_idx];
    let line_end = if line_idx + 1 < starts.len() {
      starts[line_idx + 1] - 1
    } else {
      text_len
    };

    let effective_start = if line_idx == start_line {
      start_offset
    } else {
      line_start
    };
    let effective_end = if line_idx == end_line {
      end_offset
    } else {
      line_end
    };
    let clamped_start = effective_start.clamp(line_start, line_end);
    let clamped_end = effective_end.clamp(clamped_start, line_end);

    let underline_start = clamped_start - line_start;
    let underline_len = max(1, clamped_end - clamped_start);
    let line_text = &text[line_start..line_end];

    writeln!(output, "{} | {}", line_idx + 1, line_text).unwrap();

    let mut underline = String::new();
    underline.push_str("  | ");
    underline.push_str(&" ".repeat(underline_start));
    for _ in 0..underline_len {
      underline.push(marker_char);
    }
    if line_idx == start_line && !label.message.is_empty() {
      underline.push(' ');
      underline.push_str(&label.message);
    }
    underline.push('\n');
    output.push_str(&underline);
  }
}

fn line_and_column(text: &str, offset: usize) -> (usize, usize) {
  let starts = line_starts(text);
  let offset = offset.min(text.len());
  let line_idx = line_index_at_offset(&starts, offset);
  (line_idx + 1, offset - starts[line_idx] + 1)
}

fn line_index_at_offset(starts: &[usize], offset: usize) -> usize {
  match starts.binary_search(&offset) {
    Ok(idx) => idx,
    Err(0) => 0,
    Err(idx) => idx - 1,
  }
}

fn line_starts(text: &str) -> Vec<usize> {
  let mut starts = vec![0];
  for (idx, ch) in text.char_indices() {
    if ch == '\n' {
      starts.push(idx + 1);
    }
  }
  starts
}
