use crate::cue::Cue;
use crate::error::CueError;
use crate::processor;

use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use nom::bytes::complete::tag;
use nom::character::complete::digit1;
use nom::combinator::{all_consuming, map_res, opt};
use nom::sequence::preceded;
use nom::IResult;
use regex::Regex;

const TIMING_ARROW: &str = "-->";
const TAG_MARKER: &str = "<c>";
const INLINE_TAG: &str = r"<.*?c>|<.*?/c>";

/// The result of a successful conversion. `cleanup` holds the error raised
/// while removing the input file, if any.
#[derive(Debug)]
pub struct Parsed {
    pub cues: Vec<Cue>,
    pub cleanup: Option<CueError>,
}

pub struct Parser {
    inline_tag: Regex,
}

impl Parser {
    pub fn new() -> Result<Self, CueError> {
        Ok(Self {
            inline_tag: Regex::new(INLINE_TAG)?,
        })
    }

    /// Parses the caption file at `path` and removes it once every line has
    /// been read without error. Nothing is removed when parsing fails.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Parsed, CueError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => CueError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => CueError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;
        debug!("Read {} bytes from '{}'", data.len(), path.display());

        let cues = self.parse_str(&data)?;

        let cleanup = fs::remove_file(path)
            .err()
            .map(|source| CueError::DeletionFailure {
                path: path.to_path_buf(),
                source,
            });
        Ok(Parsed { cues, cleanup })
    }

    pub fn parse_str(&self, input: &str) -> Result<Vec<Cue>, CueError> {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        // `\n`, `\r\n` and a lone `\r` all end a line.
        let input = input.replace("\r\n", "\n");
        let lines: Vec<&str> = input
            .split_terminator(['\n', '\r'])
            .map(str::trim)
            .collect();

        let mut cues = Vec::new();
        let mut cursor = 0;
        while cursor < lines.len() {
            let line = lines[cursor];
            cursor += 1;
            if !is_timing_line(line) {
                continue;
            }
            // `cursor` now doubles as the 1-based number of the timing line.
            let (start_time, end_time) =
                timing(line).map_err(|timestamp| CueError::MalformedTimestamp {
                    line: cursor,
                    timestamp,
                })?;

            let (body, resume_at) = self.cue_body(&lines, cursor);
            match body {
                Some(subtitle) => cues.push(Cue {
                    start_time,
                    subtitle,
                    end_time,
                }),
                None => debug!("Skipped incomplete cue at line {}", cursor),
            }
            cursor = resume_at;
        }

        let parsed = cues.len();
        let cues = processor::collapse_repeats(cues);
        debug!("Parsed {} cues, {} after collapsing repeats", parsed, cues.len());
        Ok(cues)
    }

    /// Resolves the text of the cue whose timing line precedes `lines[at]`.
    /// Returns the text, if the record is complete, and the index at which
    /// scanning resumes. A timing line is never consumed as a body.
    fn cue_body(&self, lines: &[&str], at: usize) -> (Option<String>, usize) {
        match lines.get(at) {
            None => (None, at),
            Some(line) if is_timing_line(line) => (None, at),
            Some(line) if line.contains(TAG_MARKER) => match lines.get(at + 1) {
                Some(text) if !text.is_empty() && !is_timing_line(text) => {
                    (Some(self.strip_tags(text)), at + 2)
                }
                _ => (None, at + 1),
            },
            Some(line) => (Some(line.to_string()), at + 1),
        }
    }

    fn strip_tags(&self, line: &str) -> String {
        // Butted tags are split before the brackets go, or their
        // neighbouring words would run together.
        self.inline_tag
            .replace_all(line, "")
            .replace("><", "> <")
            .replace(['<', '>'], "")
            .trim()
            .to_string()
    }
}

fn is_timing_line(line: &str) -> bool {
    line.contains(TIMING_ARROW)
}

/// Splits a timing line into its start and end offsets. On failure, returns
/// the timestamp text that could not be decoded.
fn timing(line: &str) -> Result<(f64, f64), String> {
    let mut sides = line.split(TIMING_ARROW);
    let start = sides.next().unwrap_or_default().trim();
    let end = sides
        .next()
        .unwrap_or_default()
        .trim()
        .split(' ')
        .next()
        .unwrap_or_default();
    Ok((seconds(start)?, seconds(end)?))
}

fn seconds(input: &str) -> Result<f64, String> {
    let decoded = all_consuming(timestamp)(input)
        .ok()
        .and_then(|(_, (hours, minutes, seconds, millis))| {
            let whole = hours
                .checked_mul(3600)?
                .checked_add(minutes.checked_mul(60)?)?
                .checked_add(seconds)?;
            Some(whole as f64 + millis as f64 / 1000.0)
        });
    decoded.ok_or_else(|| input.to_string())
}

fn timestamp(input: &str) -> IResult<&str, (u64, u64, u64, u64)> {
    let (input, hours) = number(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, minutes) = number(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, seconds) = number(input)?;
    // A missing millisecond field reads as zero. Digits are taken as an
    // integer count of milliseconds, so `.5` is 5ms.
    let (input, millis) = opt(preceded(tag("."), number))(input)?;

    Ok((input, (hours, minutes, seconds, millis.unwrap_or(0))))
}

fn number(input: &str) -> IResult<&str, u64> {
    map_res(digit1, |s: &str| s.parse())(input)
}
