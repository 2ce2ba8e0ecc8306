use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub box_name: String,
    pub destination: PathBuf,
    pub files: Vec<ExtractedFile>,
    pub total_bytes: u64,
    pub duration: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

impl ExtractionReport {
    pub fn new<S: Into<String>>(
        box_name: S,
        destination: &Path,
        files: Vec<ExtractedFile>,
        duration: Duration,
    ) -> Self {
        let total_bytes = files.iter().map(|f| f.size).sum();

        Self {
            box_name: box_name.into(),
            destination: destination.to_path_buf(),
            files,
            total_bytes,
            duration,
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn largest_file(&self) -> Option<&ExtractedFile> {
        self.files.iter().max_by_key(|f| f.size)
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64) -> ExtractedFile {
        ExtractedFile {
            name: name.to_string(),
            path: PathBuf::from("/tmp/out").join(name),
            size,
        }
    }

    #[test]
    fn test_report_totals() {
        let report = ExtractionReport::new(
            "assets",
            Path::new("/tmp/out"),
            vec![file("a.txt", 5), file("big.bin", 2048)],
            Duration::from_millis(3),
        );

        assert_eq!(report.file_count(), 2);
        assert_eq!(report.total_bytes, 2053);
        assert_eq!(report.largest_file().unwrap().name, "big.bin");
    }

    #[test]
    fn test_empty_report() {
        let report = ExtractionReport::new("assets", Path::new("/tmp/out"), Vec::new(), Duration::ZERO);
        assert_eq!(report.total_bytes, 0);
        assert!(report.largest_file().is_none());
    }

    #[test]
    fn test_report_serializes() {
        let report = ExtractionReport::new("assets", Path::new("/tmp/out"), vec![file("a.txt", 5)], Duration::ZERO);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"box_name\":\"assets\""));
        assert!(json.contains("a.txt"));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
    }
}
