//! SRT caption parsing and the timeline lookup that drives the lyrics
//! overlay. Parsing is lossy by design: blocks that fail the id or
//! time-range checks are skipped, never fatal.

/// One time-coded caption. `start <= end`, times in seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionEntry {
    pub sequence: u32,
    pub start: f32,
    pub end: f32,
    pub text: String,
}

/// Entries sorted ascending by start time. Lookups are forward scans;
/// entry counts are small enough that binary search buys nothing.
#[derive(Clone, Debug, Default)]
pub struct CaptionTimeline {
    entries: Vec<CaptionEntry>,
}

impl CaptionTimeline {
    pub fn entries(&self) -> &[CaptionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry (in sort order) active at `t`, i.e. `start <= t <= end`.
    /// With overlapping entries the earliest match wins.
    pub fn current_entry(&self, t: f32) -> Option<&CaptionEntry> {
        self.entries.iter().find(|e| e.start <= t && t <= e.end)
    }

    /// First entry strictly after `t`.
    pub fn upcoming_entry(&self, t: f32) -> Option<&CaptionEntry> {
        self.entries.iter().find(|e| e.start > t)
    }
}

/// Parse SRT text into a timeline. Blocks are separated by blank lines and
/// need at least three lines: a numeric sequence id, a
/// `HH:MM:SS,mmm --> HH:MM:SS,mmm` range, and one or more text lines.
/// Markup tags are stripped. Output is sorted by start time regardless of
/// input order.
pub fn parse(input: &str) -> CaptionTimeline {
    let mut entries = Vec::new();

    for block in blocks(input) {
        if block.len() < 3 {
            continue;
        }
        let Ok(sequence) = block[0].trim().parse::<u32>() else {
            log::debug!("Skipping caption block with bad sequence id: {:?}", block[0]);
            continue;
        };
        let Some((start, end)) = parse_time_range(block[1]) else {
            log::debug!("Skipping caption block with bad time range: {:?}", block[1]);
            continue;
        };
        let text = block[2..]
            .iter()
            .map(|line| strip_tags(line))
            .collect::<Vec<_>>()
            .join("\n");
        entries.push(CaptionEntry {
            sequence,
            start,
            end,
            text,
        });
    }

    entries.sort_by(|a, b| a.start.total_cmp(&b.start));
    CaptionTimeline { entries }
}

/// Split into blank-line-separated blocks of trimmed, non-empty lines.
fn blocks(input: &str) -> Vec<Vec<&str>> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in input.lines() {
        let trimmed = line.trim_end_matches('\r').trim();
        if trimmed.is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push(trimmed);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn parse_time_range(line: &str) -> Option<(f32, f32)> {
    let (lhs, rhs) = line.split_once("-->")?;
    let start = parse_timestamp(lhs.trim())?;
    let end = parse_timestamp(rhs.trim())?;
    if start > end {
        return None;
    }
    Some((start, end))
}

/// `HH:MM:SS,mmm` to seconds. A `.` millisecond separator is tolerated
/// since it shows up in the wild.
fn parse_timestamp(s: &str) -> Option<f32> {
    let mut parts = s.split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    let rest = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let (secs, millis) = match rest.split_once(',').or_else(|| rest.split_once('.')) {
        Some((s, m)) => (s.parse::<u32>().ok()?, m.parse::<u32>().ok()?),
        None => (rest.parse::<u32>().ok()?, 0),
    };
    Some(hours as f32 * 3600.0 + minutes as f32 * 60.0 + secs as f32 + millis as f32 / 1000.0)
}

/// Remove `<...>` markup, keeping the text between tags.
fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
