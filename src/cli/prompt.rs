//! Console confirmation prompt.
//!
//! Prints each proposed pair and reads one line of input:
//! `y`/`yes` accepts, `q`/`quit` cancels, anything else declines.
//! End of input cancels, since no further answers can arrive.

use std::io::{self, BufRead, Write};

use crate::error::Result;
use crate::matching::{Confirm, ConfirmationRequest, ConfirmationResponse};

/// Interactive [`Confirm`] implementation over a reader/writer pair.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn render(&mut self, request: &ConfirmationRequest<'_>) -> io::Result<()> {
        let track = request.track;
        let candidate = request.candidate;
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Associate this track with {}? (pass {}, score {:.1})",
            candidate.path.display(),
            request.pass,
            request.score
        )?;
        writeln!(self.output, "\t Track number:   {}", track.position)?;
        writeln!(self.output, "\t Track title:    {}", track.title)?;
        writeln!(self.output, "\t Track duration: {}", track.duration)?;
        writeln!(
            self.output,
            "\t File duration:  {}",
            format_seconds(candidate.duration_seconds)
        )?;
        writeln!(self.output, "\t Closest by:     {}", closest_by(request))?;
        write!(self.output, "[y/N/q]: ")?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> Confirm for ConsolePrompt<R, W> {
    fn confirm(&mut self, request: &ConfirmationRequest<'_>) -> Result<ConfirmationResponse> {
        self.render(request)?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(ConfirmationResponse::Cancel);
        }
        Ok(parse_answer(&line))
    }
}

fn closest_by(request: &ConfirmationRequest<'_>) -> &'static str {
    match (request.title_match, request.duration_match) {
        (true, true) => "title and duration",
        (true, false) => "title",
        (false, true) => "duration",
        (false, false) => "neither",
    }
}

/// Interpret one line of operator input.
pub fn parse_answer(line: &str) -> ConfirmationResponse {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => ConfirmationResponse::Accept,
        "q" | "quit" => ConfirmationResponse::Cancel,
        _ => ConfirmationResponse::Decline,
    }
}

/// Format seconds as "M:SS".
pub fn format_seconds(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Candidate, TrackMetadata};

    fn ask(input: &str) -> (ConfirmationResponse, String) {
        let track = TrackMetadata::new("A1", "Intro", "00:30");
        let candidate = Candidate::new("/album/01-Intro.mp3", 31);
        let request = ConfirmationRequest {
            track: &track,
            candidate: &candidate,
            score: 0.5,
            title_match: true,
            duration_match: false,
            pass: 1,
            pool_size: 2,
            committed: 0,
        };

        let mut output = Vec::new();
        let mut prompt = ConsolePrompt::new(input.as_bytes(), &mut output);
        let response = prompt.confirm(&request).unwrap();
        drop(prompt);
        (response, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("y\n"), ConfirmationResponse::Accept);
        assert_eq!(parse_answer("  YES "), ConfirmationResponse::Accept);
        assert_eq!(parse_answer("Y"), ConfirmationResponse::Accept);
        assert_eq!(parse_answer("n"), ConfirmationResponse::Decline);
        assert_eq!(parse_answer(""), ConfirmationResponse::Decline);
        assert_eq!(parse_answer("q"), ConfirmationResponse::Cancel);
    }

    #[test]
    fn test_prompt_shows_track_and_file() {
        let (response, output) = ask("y\n");
        assert_eq!(response, ConfirmationResponse::Accept);
        assert!(output.contains("/album/01-Intro.mp3"));
        assert!(output.contains("Track number:   A1"));
        assert!(output.contains("Track title:    Intro"));
        assert!(output.contains("Track duration: 00:30"));
        assert!(output.contains("File duration:  0:31"));
        assert!(output.contains("Closest by:     title"));
    }

    #[test]
    fn test_prompt_eof_cancels() {
        let (response, _) = ask("");
        assert_eq!(response, ConfirmationResponse::Cancel);
    }

    #[test]
    fn test_prompt_blank_line_declines() {
        let (response, _) = ask("\n");
        assert_eq!(response, ConfirmationResponse::Decline);
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(75), "1:15");
        assert_eq!(format_seconds(9), "0:09");
    }
}
