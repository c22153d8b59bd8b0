use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use chargelog::export::{ExportedTable, HISTORY_FILE_NAME};

/// Print the oxidation degree of one exported table or every table in a directory
pub fn run(path: PathBuf) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let tables = if path.is_dir() {
        collect_tables(&path)?
    } else {
        vec![path]
    };

    if tables.is_empty() {
        println!("No exported tables found");
        return Ok(());
    }

    for table_path in &tables {
        let table = ExportedTable::from_path(table_path)
            .with_context(|| format!("Failed to read {}", table_path.display()))?;
        let name = table_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match table.oxidation_degree() {
            Some(degree) => println!("{}: {:.4}", name, degree),
            None => println!("{}: not computable", name),
        }
    }

    Ok(())
}

/// `*.csv` files in `dir`, excluding the history log, in name order
fn collect_tables(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut tables: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
                && p.file_name().is_some_and(|n| n != HISTORY_FILE_NAME)
        })
        .collect();
    tables.sort();
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_skips_history_and_other_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_forsma4.csv"), "x\n1\n").unwrap();
        fs::write(dir.path().join("a_forsma4.csv"), "x\n1\n").unwrap();
        fs::write(dir.path().join(HISTORY_FILE_NAME), "h\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "n\n").unwrap();

        let tables = collect_tables(dir.path()).unwrap();
        let names: Vec<_> = tables
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_forsma4.csv", "b_forsma4.csv"]);
    }
}
