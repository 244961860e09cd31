//! List command handler.

use adde_core::ResolvEntry;
use anyhow::Result;
use serde::Serialize;

use crate::bootstrap::CliContext;

/// One row of `list --json`.
#[derive(Debug, Serialize)]
struct EntryRow<'a> {
    index: usize,
    group: Option<&'a str>,
    descriptor: Option<&'a str>,
    line: Option<String>,
    entry: &'a ResolvEntry,
}

/// Print entries with the index `remove` expects.
pub fn execute(ctx: &CliContext, json: bool) -> Result<()> {
    let entries = ctx.manager.entries();

    if json {
        let rows: Vec<EntryRow<'_>> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| EntryRow {
                index,
                group: entry.group(),
                descriptor: entry.descriptor(),
                line: entry.to_line(),
                entry,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!(
            "No entries in {}",
            ctx.manager.paths().resolv_file.display()
        );
        return Ok(());
    }

    print!("{}", format_table(entries));
    Ok(())
}

/// Render entries as `index  group  line` rows.
pub fn format_table(entries: &[ResolvEntry]) -> String {
    let width = entries
        .iter()
        .filter_map(ResolvEntry::group)
        .map(str::len)
        .max()
        .unwrap_or(0)
        .max("GROUP".len());

    let mut out = format!("{:>5}  {:<width$}  LINE\n", "INDEX", "GROUP");
    for (index, entry) in entries.iter().enumerate() {
        let group = entry.group().unwrap_or("-");
        let line = entry.to_line().unwrap_or_else(|| "(incomplete)".to_string());
        out.push_str(&format!("{index:>5}  {group:<width$}  {line}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table_aligns_groups() {
        let entries = vec![
            ResolvEntry::parse("N1=RTGOES,N2=GINI,"),
            ResolvEntry::parse("LONGGROUPNAME entry-b"),
            ResolvEntry::empty(),
        ];

        let table = format_table(&entries);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "INDEX  GROUP          LINE");
        assert_eq!(lines[1], "    0  RTGOES         N1=RTGOES,N2=GINI,");
        assert_eq!(lines[2], "    1  LONGGROUPNAME  LONGGROUPNAME entry-b");
        assert_eq!(lines[3], "    2  -              (incomplete)");
    }
}
