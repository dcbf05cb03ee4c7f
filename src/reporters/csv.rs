//! CSV reporter
//!
//! One header row, then one row per record (raw) or per group (summary).
//! Rows end with CRLF and fields are quoted per RFC 4180 when needed.

use super::Report;
use anyhow::Result;

const RAW_HEADER: [&str; 6] = [
    "package",
    "functionName",
    "fileName",
    "startsAt",
    "endsAt",
    "lines",
];

const SUMMARY_HEADER: [&str; 5] = ["package", "mean", "median", "95%ile", "99%ile"];

/// Render report as CSV
pub fn render(report: &Report<'_>) -> Result<String> {
    let mut out = String::new();

    match report {
        Report::Raw(counts) => {
            write_row(&mut out, RAW_HEADER);
            for (group, records) in counts.raw() {
                for f in records {
                    write_row(
                        &mut out,
                        [
                            group.clone(),
                            f.name.clone(),
                            f.file_name.to_string_lossy().into_owned(),
                            f.starts_at.to_string(),
                            f.ends_at.to_string(),
                            f.lines().to_string(),
                        ],
                    );
                }
            }
        }
        Report::Summary(stats) => {
            write_row(&mut out, SUMMARY_HEADER);
            for (group, s) in stats {
                write_row(
                    &mut out,
                    [
                        group.clone(),
                        cell(s.mean),
                        cell(s.median),
                        cell(s.p95),
                        cell(s.p99),
                    ],
                );
            }
        }
    }

    Ok(out)
}

/// Undefined statistics become an empty cell
fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_row<I, S>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field.as_ref());
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    let needs_quotes =
        field.contains([',', '"', '\r', '\n']) || field.starts_with([' ', '\t']);
    if !needs_quotes {
        out.push_str(field);
        return;
    }
    out.push('"');
    out.push_str(&field.replace('"', "\"\""));
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Counts, FunctionCount};
    use crate::reporters::tests::test_counts;
    use std::path::PathBuf;

    #[test]
    fn test_csv_raw() {
        let counts = test_counts();
        let out = render(&Report::Raw(&counts)).expect("render CSV");
        let rows: Vec<&str> = out.split_terminator("\r\n").collect();

        assert_eq!(rows[0], "package,functionName,fileName,startsAt,endsAt,lines");
        assert_eq!(rows[1], "pkg/a,init,pkg/a/main.go,5,7,2");
        assert_eq!(rows[2], "pkg/a,main,pkg/a/main.go,9,12,3");
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_csv_summary() {
        let counts = test_counts();
        let out = render(&Report::Summary(counts.stats())).expect("render CSV");
        let rows: Vec<&str> = out.split_terminator("\r\n").collect();

        assert_eq!(rows[0], "package,mean,median,95%ile,99%ile");
        assert!(rows[1].starts_with("pkg/a,2.5,2.5,"));
        assert_eq!(rows[2], "pkg/b,,,,");
    }

    #[test]
    fn test_csv_quotes_special_fields() {
        let mut counts = Counts::new();
        counts.insert(FunctionCount {
            group: "dir,with,commas".into(),
            package: "p".into(),
            name: "f".into(),
            file_name: PathBuf::from("say \"hi\".go"),
            starts_at: 1,
            ends_at: 2,
        });
        let out = render(&Report::Raw(&counts)).expect("render CSV");
        let row = out.split_terminator("\r\n").nth(1).expect("data row");
        assert_eq!(row, "\"dir,with,commas\",f,\"say \"\"hi\"\".go\",1,2,1");
    }
}
