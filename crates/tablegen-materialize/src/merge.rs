//! Marker-delimited text merge.
//!
//! A file is read as a sequence of preserved text and generated regions. A
//! generated region starts at a line containing `<tag>:begin` and ends at
//! the next line containing `<tag>:end`, where `<tag>` is one of
//! [`MERGE_TAGS`]. Text after `:begin` on the begin line labels the region.
//!
//! Merging keeps every preserved byte of the existing file and swaps each
//! old region for the new region with the same label.

use std::error::Error as StdError;
use std::fmt;

/// Tag literals recognized as generated-region markers, newest first.
pub const MERGE_TAGS: [&str; 4] = [
    "@mbg.generated",
    "@mbggenerated",
    "@abatorgenerated",
    "@ibatorgenerated",
];

const BEGIN_SUFFIX: &str = ":begin";
const END_SUFFIX: &str = ":end";
const COMMENT_TERMINATORS: [&str; 2] = ["-->", "*/"];

/// Content that cannot be merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// A region begins but never ends.
    Unterminated { label: String, line: usize },
    /// A region begins inside another region.
    NestedBegin { line: usize },
    /// An end marker with no open region.
    StrayEnd { line: usize },
    /// Newly rendered content has no generated regions to merge.
    NoGeneratedRegions,
    /// The existing file has no generated regions to replace.
    ExistingHasNoRegions,
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::Unterminated { label, line } => {
                write!(f, "generated region '{}' opened at line {} is never closed", label, line)
            }
            MergeError::NestedBegin { line } => {
                write!(f, "nested generated region at line {}", line)
            }
            MergeError::StrayEnd { line } => {
                write!(f, "generated region end without begin at line {}", line)
            }
            MergeError::NoGeneratedRegions => {
                write!(f, "new content contains no generated regions")
            }
            MergeError::ExistingHasNoRegions => {
                write!(f, "existing file contains no generated regions")
            }
        }
    }
}

impl StdError for MergeError {}

#[derive(Debug, PartialEq, Eq)]
enum Marker {
    Begin(String),
    End,
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Preserved(&'a str),
    Generated { label: String, text: &'a str },
}

impl Segment<'_> {
    fn is_generated(&self) -> bool {
        matches!(self, Segment::Generated { .. })
    }
}

struct OpenRegion {
    start: usize,
    label: String,
    line: usize,
}

fn marker(line: &str) -> Option<Marker> {
    for tag in MERGE_TAGS {
        for (idx, _) in line.match_indices(tag) {
            let rest = &line[idx + tag.len()..];
            if let Some(label) = rest.strip_prefix(BEGIN_SUFFIX) {
                return Some(Marker::Begin(region_label(label)));
            }
            if rest.starts_with(END_SUFFIX) {
                return Some(Marker::End);
            }
        }
    }
    None
}

fn region_label(rest: &str) -> String {
    let end = COMMENT_TERMINATORS
        .iter()
        .filter_map(|t| rest.find(t))
        .min()
        .unwrap_or(rest.len());
    rest[..end].trim().to_string()
}

fn parse_segments(content: &str) -> Result<Vec<Segment<'_>>, MergeError> {
    let mut segments = Vec::new();
    let mut open: Option<OpenRegion> = None;
    let mut preserved_start = 0;
    let mut offset = 0;

    for (index, line) in content.split_inclusive('\n').enumerate() {
        let line_no = index + 1;
        let start = offset;
        offset += line.len();

        match marker(line) {
            Some(Marker::Begin(label)) => {
                if open.is_some() {
                    return Err(MergeError::NestedBegin { line: line_no });
                }
                if start > preserved_start {
                    segments.push(Segment::Preserved(&content[preserved_start..start]));
                }
                open = Some(OpenRegion {
                    start,
                    label,
                    line: line_no,
                });
            }
            Some(Marker::End) => match open.take() {
                Some(region) => {
                    segments.push(Segment::Generated {
                        label: region.label,
                        text: &content[region.start..offset],
                    });
                    preserved_start = offset;
                }
                None => return Err(MergeError::StrayEnd { line: line_no }),
            },
            None => {}
        }
    }

    if let Some(region) = open {
        return Err(MergeError::Unterminated {
            label: region.label,
            line: region.line,
        });
    }
    if preserved_start < content.len() {
        segments.push(Segment::Preserved(&content[preserved_start..]));
    }
    Ok(segments)
}

/// Whether `content` holds at least one well-formed generated region.
pub fn has_merge_markers(content: &str) -> bool {
    parse_segments(content).is_ok_and(|segments| segments.iter().any(Segment::is_generated))
}

/// Merge newly rendered content into an existing file's content.
///
/// Old regions are replaced in place by the new region with the same label,
/// matched in order of appearance. Old regions with no counterpart are
/// dropped. New regions with no counterpart go right after the last old
/// region.
pub fn merge(new_content: &str, existing: &str) -> Result<String, MergeError> {
    let new_regions: Vec<(String, &str)> = parse_segments(new_content)?
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Generated { label, text } => Some((label, text)),
            Segment::Preserved(_) => None,
        })
        .collect();
    if new_regions.is_empty() {
        return Err(MergeError::NoGeneratedRegions);
    }

    let old_segments = parse_segments(existing)?;
    let Some(last_generated) = old_segments.iter().rposition(Segment::is_generated) else {
        return Err(MergeError::ExistingHasNoRegions);
    };

    let mut used = vec![false; new_regions.len()];
    let mut out = String::with_capacity(existing.len() + new_content.len());

    for (index, segment) in old_segments.iter().enumerate() {
        match segment {
            Segment::Preserved(text) => out.push_str(text),
            Segment::Generated { label, text } => {
                let replacement = new_regions
                    .iter()
                    .enumerate()
                    .position(|(j, (new_label, _))| !used[j] && new_label == label);
                match replacement {
                    Some(j) => {
                        used[j] = true;
                        out.push_str(new_regions[j].1);
                        if text.ends_with('\n') && !out.ends_with('\n') {
                            out.push('\n');
                        }
                    }
                    None => tracing::debug!(label = %label, "Dropping generated region"),
                }
            }
        }

        if index == last_generated {
            for (j, (label, text)) in new_regions.iter().enumerate() {
                if used[j] {
                    continue;
                }
                used[j] = true;
                tracing::debug!(label = %label, "Inserting new generated region");
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str(text);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OLD: &str = "\
<mapper>
  <!-- user comment -->
  <!-- @mbg.generated:begin resultMap -->
  <resultMap id=\"old\"/>
  <!-- @mbg.generated:end -->
  <select id=\"custom\">hand written</select>
  <!-- @mbg.generated:begin insert -->
  <insert id=\"old\"/>
  <!-- @mbg.generated:end -->
</mapper>
";

    // ========================================================================
    // Parsing
    // ========================================================================

    #[test]
    fn test_marker_labels() {
        assert_eq!(
            marker("  <!-- @mbg.generated:begin resultMap -->\n"),
            Some(Marker::Begin("resultMap".to_string()))
        );
        assert_eq!(marker("  /* @ibatorgenerated:begin */"), Some(Marker::Begin(String::new())));
        assert_eq!(marker("// @mbggenerated:end"), Some(Marker::End));
        assert_eq!(marker("  @mbg.generated"), None);
    }

    #[test]
    fn test_parse_segments_covers_every_byte() {
        let segments = parse_segments(OLD).unwrap();
        assert_eq!(segments.iter().filter(|s| s.is_generated()).count(), 2);
        let joined: String = segments
            .iter()
            .map(|s| match s {
                Segment::Preserved(t) => *t,
                Segment::Generated { text, .. } => *text,
            })
            .collect();
        assert_eq!(joined, OLD);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_segments("a\n// @mbg.generated:begin x\nb\n").unwrap_err(),
            MergeError::Unterminated { label: "x".into(), line: 2 }
        );
        assert_eq!(
            parse_segments("// @mbg.generated:begin\n// @mbg.generated:begin\n").unwrap_err(),
            MergeError::NestedBegin { line: 2 }
        );
        assert_eq!(
            parse_segments("x\n// @mbg.generated:end\n").unwrap_err(),
            MergeError::StrayEnd { line: 2 }
        );
    }

    #[test]
    fn test_has_merge_markers() {
        assert!(has_merge_markers(OLD));
        assert!(!has_merge_markers("plain text\n"));
        assert!(!has_merge_markers("// @mbg.generated:begin\n"));
    }

    // ========================================================================
    // Merging
    // ========================================================================

    #[test]
    fn test_merge_replaces_regions_and_keeps_user_text() {
        let new = "\
<mapper>
  <!-- @mbg.generated:begin resultMap -->
  <resultMap id=\"new\"/>
  <!-- @mbg.generated:end -->
  <!-- @mbg.generated:begin insert -->
  <insert id=\"new\"/>
  <!-- @mbg.generated:end -->
</mapper>
";
        let merged = merge(new, OLD).unwrap();
        assert!(merged.contains("<!-- user comment -->"));
        assert!(merged.contains("<select id=\"custom\">hand written</select>"));
        assert!(merged.contains("<resultMap id=\"new\"/>"));
        assert!(merged.contains("<insert id=\"new\"/>"));
        assert!(!merged.contains("id=\"old\""));
        assert!(merged.starts_with("<mapper>\n  <!-- user comment -->\n"));
        assert!(merged.ends_with("</mapper>\n"));
    }

    #[test]
    fn test_merge_matches_by_label_not_position() {
        let new = "\
// @mbg.generated:begin insert
insert v2
// @mbg.generated:end
// @mbg.generated:begin resultMap
resultMap v2
// @mbg.generated:end
";
        let merged = merge(new, OLD).unwrap();
        let result_map = merged.find("resultMap v2").unwrap();
        let custom = merged.find("hand written").unwrap();
        let insert = merged.find("insert v2").unwrap();
        assert!(result_map < custom && custom < insert);
    }

    #[test]
    fn test_merge_drops_stale_and_appends_new_regions() {
        let new = "\
// @mbg.generated:begin resultMap
resultMap v2
// @mbg.generated:end
// @mbg.generated:begin delete
delete v1
// @mbg.generated:end
";
        let merged = merge(new, OLD).unwrap();
        assert!(!merged.contains("insert id"));
        let delete = merged.find("delete v1").unwrap();
        let closing = merged.find("</mapper>").unwrap();
        let custom = merged.find("hand written").unwrap();
        assert!(custom < delete && delete < closing);
    }

    #[test]
    fn test_legacy_tags_are_recognized() {
        let old = "keep\n/* @abatorgenerated:begin */\nold\n/* @abatorgenerated:end */\ntail";
        let new = "/* @mbg.generated:begin */\nnew\n/* @mbg.generated:end */\n";
        let merged = merge(new, old).unwrap();
        assert_eq!(merged, "keep\n/* @mbg.generated:begin */\nnew\n/* @mbg.generated:end */\ntail");
    }

    #[test]
    fn test_merge_errors() {
        assert_eq!(merge("no markers\n", OLD).unwrap_err(), MergeError::NoGeneratedRegions);
        let new = "// @mbg.generated:begin\nx\n// @mbg.generated:end\n";
        assert_eq!(merge(new, "hand written\n").unwrap_err(), MergeError::ExistingHasNoRegions);
    }
}
