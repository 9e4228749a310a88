//! # 记录目录收集器
//!
//! 在根目录下查找包含计算记录的目录，每个目录对应一份报告。
//!
//! ## 功能
//! - glob 模式匹配（逗号分隔多模式）
//! - 递归目录搜索
//! - 按所在目录分组，组内按文件名排序
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `walkdir` 遍历目录, `glob` 匹配文件名

use crate::error::{ReportError, Result};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 一个报告目录及其记录文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordGroup {
    pub directory: PathBuf,
    pub files: Vec<PathBuf>,
}

/// 文件收集器
pub struct FileCollector {
    /// 根目录
    root: PathBuf,
    /// 匹配模式列表
    patterns: Vec<glob::Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| {
                glob::Pattern::new(s).map_err(|e| {
                    ReportError::InvalidArgument(format!("Invalid pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件（已排序）
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(ReportError::DirectoryNotFound {
                path: self.root.display().to_string(),
            });
        }

        // 非递归时只看根目录及其直接子目录
        let max_depth = if self.recursive { usize::MAX } else { 2 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| !is_in_temp_dir(e.path()))
            .filter(|e| self.matches_patterns(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }

    /// 按所在目录分组
    pub fn collect_groups(&self) -> Result<Vec<RecordGroup>> {
        let mut groups: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
        for file in self.collect()? {
            let directory = file
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.root.clone());
            groups.entry(directory).or_default().push(file);
        }

        Ok(groups
            .into_iter()
            .map(|(directory, files)| RecordGroup { directory, files })
            .collect())
    }

    fn matches_patterns(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };
        self.patterns.iter().any(|p| p.matches(filename))
    }
}

/// 图片目录 `temp/` 下的文件不算记录
fn is_in_temp_dir(path: &Path) -> bool {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|n| n == "temp")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: PathBuf) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    #[test]
    fn test_groups_by_directory() {
        let root = TempDir::new().unwrap();
        touch(root.path().join("water/2_freq.json"));
        touch(root.path().join("water/1_opt.json"));
        touch(root.path().join("water/temp/ignored.json"));
        touch(root.path().join("benzene/td.json"));
        touch(root.path().join("benzene/notes.txt"));

        let groups = FileCollector::new(root.path().to_path_buf())
            .with_pattern("*.json")
            .unwrap()
            .collect_groups()
            .unwrap();

        assert_eq!(groups.len(), 2);
        assert!(groups[0].directory.ends_with("benzene"));
        assert_eq!(groups[1].files.len(), 2);
        assert!(groups[1].files[0].ends_with("1_opt.json"));
    }

    #[test]
    fn test_recursive_flag() {
        let root = TempDir::new().unwrap();
        touch(root.path().join("a/b/deep.json"));

        let shallow = FileCollector::new(root.path().to_path_buf())
            .with_pattern("*.json")
            .unwrap()
            .collect()
            .unwrap();
        assert!(shallow.is_empty());

        let deep = FileCollector::new(root.path().to_path_buf())
            .with_pattern("*.json")
            .unwrap()
            .recursive(true)
            .collect()
            .unwrap();
        assert_eq!(deep.len(), 1);
    }

    #[test]
    fn test_multiple_patterns_and_missing_root() {
        let root = TempDir::new().unwrap();
        touch(root.path().join("x/a.json"));
        touch(root.path().join("x/b.yaml"));

        let files = FileCollector::new(root.path().to_path_buf())
            .with_pattern("*.json, *.yaml")
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(files.len(), 2);

        let missing = FileCollector::new(root.path().join("nope"))
            .with_pattern("*.json")
            .unwrap()
            .collect();
        assert!(matches!(missing, Err(ReportError::DirectoryNotFound { .. })));
    }
}
