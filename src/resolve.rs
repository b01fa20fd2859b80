use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::calendar::IN_SCOPE_MARKER;
use crate::error::{Result, ScrapeError};

/// Calendar rows render dates like "Wednesday, March 12, 2025 - 2:00PM".
pub const DATE_FORMAT: &str = "%A, %B %d, %Y - %I:%M%p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingSubtype {
    Regular,
    Special,
}

impl MeetingSubtype {
    pub fn as_str(self) -> &'static str {
        match self {
            MeetingSubtype::Regular => "Regular",
            MeetingSubtype::Special => "Special",
        }
    }
}

impl fmt::Display for MeetingSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regular iff the title names the Board. Classification stays defensive even
/// though the upstream filter makes records reaching the resolver always
/// Regular in practice.
pub fn classify(event: &str) -> MeetingSubtype {
    if event.contains(IN_SCOPE_MARKER) {
        MeetingSubtype::Regular
    } else {
        MeetingSubtype::Special
    }
}

/// Destination for one meeting document.
#[derive(Debug, Clone)]
pub struct ResolvedFile {
    /// `<output_dir>/<YYYY>/<MM-Mon>`
    pub dir: PathBuf,
    /// `<dir>/<prefix>_<Mon DD, YYYY>_Meeting <subtype> <doc_kind>.html`
    pub path: PathBuf,
}

/// Derive the destination path for a record. Pure: directory creation is the
/// caller's job. Deterministic for a given `date_time` and `event`.
pub fn resolve(
    output_dir: &Path,
    date_time: &str,
    event: &str,
    doc_kind: &str,
) -> Result<ResolvedFile> {
    let date = NaiveDateTime::parse_from_str(date_time.trim(), DATE_FORMAT)
        .map_err(|_| ScrapeError::DateParse(date_time.to_string()))?;

    let dir = output_dir
        .join(date.format("%Y").to_string())
        .join(date.format("%m-%b").to_string());

    let prefix = output_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("events");
    let file_name = format!(
        "{}_{}_Meeting {} {}.html",
        prefix,
        date.format("%b %d, %Y"),
        classify(event),
        doc_kind
    );

    let path = dir.join(file_name);
    Ok(ResolvedFile { dir, path })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Wednesday, March 12, 2025 - 2:00PM";

    #[test]
    fn resolves_sample_meeting_path() {
        let resolved = resolve(
            Path::new("San_Fran_Board_of_Supervisors_File"),
            SAMPLE,
            "Board of Supervisors Regular Meeting",
            "Agenda",
        )
        .unwrap();
        assert_eq!(
            resolved.dir,
            Path::new("San_Fran_Board_of_Supervisors_File/2025/03-Mar")
        );
        assert_eq!(
            resolved.path,
            Path::new(
                "San_Fran_Board_of_Supervisors_File/2025/03-Mar/\
                 San_Fran_Board_of_Supervisors_File_Mar 12, 2025_Meeting Regular Agenda.html"
            )
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let a = resolve(Path::new("out"), SAMPLE, "Board of Supervisors", "Agenda").unwrap();
        let b = resolve(Path::new("out"), SAMPLE, "Board of Supervisors", "Agenda").unwrap();
        assert_eq!(a.path, b.path);
        assert_eq!(a.dir, b.dir);
    }

    #[test]
    fn subtype_follows_title_marker() {
        assert_eq!(
            classify("Board of Supervisors Regular Meeting"),
            MeetingSubtype::Regular
        );
        assert_eq!(classify("Rules Committee"), MeetingSubtype::Special);
    }

    #[test]
    fn special_subtype_lands_in_file_name() {
        let resolved = resolve(Path::new("out"), SAMPLE, "Rules Committee", "Agenda").unwrap();
        let name = resolved.path.file_name().unwrap().to_str().unwrap();
        assert_eq!(name, "out_Mar 12, 2025_Meeting Special Agenda.html");
    }

    #[test]
    fn unparseable_date_is_a_date_error() {
        let result = resolve(Path::new("out"), "March 12 2025", "Board of Supervisors", "Agenda");
        assert!(matches!(result, Err(ScrapeError::DateParse(_))));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let resolved = resolve(
            Path::new("out"),
            "  Wednesday, March 12, 2025 - 2:00PM  ",
            "Board of Supervisors",
            "Agenda",
        );
        assert!(resolved.is_ok());
    }
}
