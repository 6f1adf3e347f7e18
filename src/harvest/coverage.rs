use std::path::Path;

use crate::parsers::normalize_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedItem {
    pub name: String,
    pub expected_file: String,
}

/// Which item names already have an icon on disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    pub matched: Vec<String>,
    pub unmatched: Vec<UnmatchedItem>,
}

impl CoverageReport {
    pub fn total(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }
}

/// An item is covered when `<icon_dir>/<normalized name>.png` exists
pub fn check_coverage<'a, I>(names: I, icon_dir: &Path) -> CoverageReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut report = CoverageReport::default();

    for name in names {
        let expected_file = format!("{}.png", normalize_name(name));
        if icon_dir.join(&expected_file).is_file() {
            report.matched.push(name.to_string());
        } else {
            report.unmatched.push(UnmatchedItem {
                name: name.to_string(),
                expected_file,
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn splits_names_by_icon_presence() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("power_rod.png"), b"png").unwrap();
        fs::create_dir(dir.path().join("wires.png")).unwrap();

        let report = check_coverage(["Power Rod", "Wires", "Dog's Collar"], dir.path());

        assert_eq!(report.matched, vec!["Power Rod"]);
        assert_eq!(
            report.unmatched,
            vec![
                UnmatchedItem {
                    name: "Wires".to_string(),
                    expected_file: "wires.png".to_string(),
                },
                UnmatchedItem {
                    name: "Dog's Collar".to_string(),
                    expected_file: "dogs_collar.png".to_string(),
                },
            ]
        );
        assert_eq!(report.total(), 3);
    }
}
