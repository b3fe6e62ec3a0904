//! Span 单元测试
//!
//! 测试 Location 与 SourceFile

use crate::util::span::{Location, SourceFile};

#[cfg(test)]
mod location_tests {
    use super::*;

    #[test]
    fn test_location_start() {
        let loc = Location::start();
        assert_eq!(loc.line, 1);
        assert_eq!(loc.col, 1);
        assert_eq!(loc.length, 0);
    }

    #[test]
    fn test_location_display() {
        let loc = Location::new(10, 20, 3);
        assert_eq!(format!("{}", loc), "10:20");
    }

    #[test]
    fn test_merge_same_line() {
        let left = Location::new(1, 1, 1);
        let right = Location::new(1, 5, 1);
        let merged = Location::merge(left, right);
        assert_eq!(merged, Location::new(1, 1, 4));
    }

    #[test]
    fn test_merge_is_symmetric_in_columns() {
        let a = Location::new(2, 9, 1);
        let b = Location::new(2, 3, 1);
        assert_eq!(Location::merge(a, b), Location::merge(b, a));
    }

    #[test]
    fn test_merge_averages_lines() {
        let merged = Location::merge(Location::new(1, 4, 1), Location::new(4, 2, 1));
        assert_eq!(merged.line, 2);
        assert_eq!(merged.col, 2);
        assert_eq!(merged.length, 2);
    }
}

#[cfg(test)]
mod source_file_tests {
    use super::*;

    #[test]
    fn test_line_text() {
        let file = SourceFile::new("test.nv", "1 + 2\n\"a\" + \"b\"\r\nnil");
        assert_eq!(file.line_count(), 3);
        assert_eq!(file.line_text(1), Some("1 + 2"));
        assert_eq!(file.line_text(2), Some("\"a\" + \"b\""));
        assert_eq!(file.line_text(3), Some("nil"));
        assert_eq!(file.line_text(0), None);
        assert_eq!(file.line_text(4), None);
    }

    #[test]
    fn test_source_text() {
        let file = SourceFile::new("test.nv", "1 + true");
        assert_eq!(file.source_text(Location::new(1, 5, 4)), Some("true"));
        assert_eq!(file.source_text(Location::new(1, 3, 1)), Some("+"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SourceFile::load(std::path::Path::new("/definitely/not/here.nv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"1 + 2\n").unwrap();

        let source = SourceFile::load(file.path()).unwrap();
        assert_eq!(source.content, "1 + 2\n");
        assert_eq!(source.line_text(1), Some("1 + 2"));
    }

    #[test]
    fn test_display_uses_name() {
        let file = SourceFile::new("main.nv", "");
        assert_eq!(file.to_string(), "main.nv");
    }
}
