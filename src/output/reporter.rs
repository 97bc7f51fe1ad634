use std::io::Write;

use crate::classify::{classify, Classification};
use crate::output::writer_jsonl::{write_event, Event, ResultEvent};
use crate::probe::{ProbeOutcome, ProbeResult};
use crate::target::Target;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text { color: bool },
    JsonLines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Hit,
    Miss,
    Error,
    Notice,
}

impl Tone {
    fn color_code(&self) -> &str {
        match self {
            Tone::Hit => "\x1b[32m",    // Green
            Tone::Miss => "\x1b[31m",   // Red
            Tone::Error => "\x1b[33m",  // Yellow
            Tone::Notice => "\x1b[90m", // Grey
        }
    }

    fn reset_color() -> &'static str {
        "\x1b[0m"
    }

    fn paint(&self, line: &str, color: bool) -> String {
        if color {
            format!("{}{}{}", self.color_code(), line, Tone::reset_color())
        } else {
            line.to_string()
        }
    }
}

/// `[Name: value, Name: value]`
pub fn format_headers(headers: &[(String, String)]) -> String {
    let pairs: Vec<String> = headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect();
    format!("[{}]", pairs.join(", "))
}

/// `403 => HTTP GET https://host/path [X-Header: value]`
///
/// Without color, hits are prefixed with `[+]` so they still stand out.
pub fn format_line(result: &ProbeResult, color: bool) -> String {
    let mut line = format!(
        "{} => HTTP {} {} {}",
        result.outcome,
        result.method,
        result.url,
        format_headers(&result.headers)
    );

    let tone = match (&result.outcome, classify(result)) {
        (ProbeOutcome::TransportError(e), _) => {
            line.push_str(&format!(" ({})", e));
            Tone::Error
        }
        (_, Classification::Interesting) => Tone::Hit,
        (_, Classification::Unremarkable) => Tone::Miss,
    };
    if tone == Tone::Hit && !color {
        line.insert_str(0, "[+] ");
    }
    tone.paint(&line, color)
}

/// Streams results to `out`, one line per record.
pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn report_result(&mut self, result: &ProbeResult) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Text { color } => writeln!(self.out, "{}", format_line(result, color))?,
            OutputFormat::JsonLines => {
                write_event(&mut self.out, &Event::Result(ResultEvent::from(result)))?
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Target not probed because of its baseline response.
    pub fn report_skipped(&mut self, target: &Target, baseline: &ProbeOutcome) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Text { color } => {
                let line = match baseline {
                    ProbeOutcome::Status(code) => format!(
                        "[-] skipped {}: baseline status {} is not 4xx (use -force to probe anyway)",
                        target.raw, code
                    ),
                    ProbeOutcome::TransportError(e) => {
                        format!("[-] skipped {}: baseline request failed ({})", target.raw, e)
                    }
                };
                let tone = if matches!(baseline, ProbeOutcome::TransportError(_)) {
                    Tone::Error
                } else {
                    Tone::Notice
                };
                writeln!(self.out, "{}", tone.paint(&line, color))?;
                writeln!(self.out)?;
            }
            OutputFormat::JsonLines => write_event(&mut self.out, &Event::skipped(target, baseline))?,
        }
        self.out.flush()?;
        Ok(())
    }

    /// Feed entry that could not be parsed as a URL.
    pub fn report_invalid(&mut self, raw: &str, error: &anyhow::Error) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Text { color } => {
                let line = format!("[!] invalid target: {:#}", error);
                writeln!(self.out, "{}", Tone::Error.paint(&line, color))?;
                writeln!(self.out)?;
            }
            OutputFormat::JsonLines => write_event(
                &mut self.out,
                &Event::Invalid {
                    target: raw.to_string(),
                    error: format!("{:#}", error),
                },
            )?,
        }
        self.out.flush()?;
        Ok(())
    }

    /// Separator after the last result of a target.
    pub fn end_target(&mut self) -> anyhow::Result<()> {
        if let OutputFormat::Text { .. } = self.format {
            writeln!(self.out)?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
