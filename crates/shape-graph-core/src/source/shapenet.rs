//! ShapeNet part-segmentation dataset reader.
//!
//! Expected layout (the benchmark's `shapenetcore_partanno_segmentation_benchmark_v0_normal`
//! release, optionally under a `raw/` directory):
//!
//! ```text
//! <root>/[raw/]<synset>/<shape_id>.txt
//! <root>/[raw/]train_test_split/shuffled_train_file_list.json
//! <root>/[raw/]train_test_split/shuffled_val_file_list.json
//! ```
//!
//! Each `.txt` line is `x y z nx ny nz part_label`; only the position is read.
//! Samples are ordered by the train split followed by the val split when the
//! split files exist, otherwise by file name. Nothing is downloaded.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::file::read_text_points;
use super::PointSource;
use crate::error::{CoreError, CoreResult};
use crate::types::PointSet;

/// Category name → WordNet synset id.
pub const SHAPENET_CATEGORIES: [(&str, &str); 16] = [
    ("Airplane", "02691156"),
    ("Bag", "02773838"),
    ("Cap", "02954340"),
    ("Car", "02958343"),
    ("Chair", "03001627"),
    ("Earphone", "03261776"),
    ("Guitar", "03467517"),
    ("Knife", "03624134"),
    ("Lamp", "03636649"),
    ("Laptop", "03642806"),
    ("Motorbike", "03790512"),
    ("Mug", "03797390"),
    ("Pistol", "03948459"),
    ("Rocket", "04099429"),
    ("Skateboard", "04225987"),
    ("Table", "04379243"),
];

const SPLIT_DIR: &str = "train_test_split";
const SPLIT_FILES: [&str; 2] = ["shuffled_train_file_list.json", "shuffled_val_file_list.json"];

/// Synset id for a category name (case-insensitive).
pub fn synset_for_category(category: &str) -> Option<&'static str> {
    SHAPENET_CATEGORIES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(category))
        .map(|(_, synset)| *synset)
}

/// Loads one sample of one ShapeNet category.
#[derive(Debug, Clone)]
pub struct ShapeNetSource {
    root: PathBuf,
    category: String,
    synset: &'static str,
    sample_index: usize,
}

impl ShapeNetSource {
    /// # Errors
    ///
    /// `SourceError` if `category` is not one of [`SHAPENET_CATEGORIES`].
    pub fn new(root: impl AsRef<Path>, category: &str, sample_index: usize) -> CoreResult<Self> {
        let synset = synset_for_category(category).ok_or_else(|| {
            CoreError::SourceError(format!("unknown ShapeNet category \"{category}\""))
        })?;

        Ok(Self {
            root: root.as_ref().to_path_buf(),
            category: category.to_string(),
            synset,
            sample_index,
        })
    }

    /// Synset id of the selected category.
    pub fn synset(&self) -> &str {
        self.synset
    }

    /// Directory holding the synset folders: `<root>/raw` if present, else `<root>`.
    fn data_dir(&self) -> PathBuf {
        let raw = self.root.join("raw");
        if raw.is_dir() {
            raw
        } else {
            self.root.clone()
        }
    }

    /// All sample files of the category, in dataset order.
    pub fn sample_files(&self) -> CoreResult<Vec<PathBuf>> {
        let data_dir = self.data_dir();
        let split_dir = data_dir.join(SPLIT_DIR);

        if split_dir.is_dir() {
            let mut files = Vec::new();
            for name in SPLIT_FILES {
                let path = split_dir.join(name);
                if !path.is_file() {
                    continue;
                }
                let entries: Vec<String> = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
                files.extend(entries.iter().filter_map(|entry| self.split_entry_path(&data_dir, entry)));
            }
            debug!(split_dir = %split_dir.display(), samples = files.len(), "using split file order");
            return Ok(files);
        }

        let category_dir = data_dir.join(self.synset);
        if !category_dir.is_dir() {
            return Err(CoreError::SourceError(format!(
                "ShapeNet category directory not found: {}",
                category_dir.display()
            )));
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(&category_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
            .collect();
        files.sort();
        Ok(files)
    }

    /// Map a split entry such as `shape_data/02691156/1a04e3eab45ca15dd86060f189eb133`
    /// to its file, if it belongs to this category.
    fn split_entry_path(&self, data_dir: &Path, entry: &str) -> Option<PathBuf> {
        let mut parts = entry.rsplit('/');
        let shape_id = parts.next()?;
        let synset = parts.next()?;
        (synset == self.synset).then(|| data_dir.join(synset).join(format!("{shape_id}.txt")))
    }
}

impl PointSource for ShapeNetSource {
    fn load(&self) -> CoreResult<PointSet> {
        let files = self.sample_files()?;
        let path = files.get(self.sample_index).ok_or_else(|| {
            CoreError::SourceError(format!(
                "sample {} out of range: category {} has {} samples under {}",
                self.sample_index,
                self.category,
                files.len(),
                self.root.display()
            ))
        })?;

        let points = read_text_points(path)?;
        info!(
            category = %self.category,
            sample = self.sample_index,
            path = %path.display(),
            points = points.len(),
            "loaded ShapeNet sample"
        );
        Ok(points)
    }

    fn describe(&self) -> String {
        format!(
            "ShapeNet {} ({}) sample {} under {}",
            self.category,
            self.synset,
            self.sample_index,
            self.root.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_shape(dir: &Path, synset: &str, id: &str, lines: &str) {
        let category_dir = dir.join(synset);
        std::fs::create_dir_all(&category_dir).unwrap();
        std::fs::write(category_dir.join(format!("{id}.txt")), lines).unwrap();
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(synset_for_category("Airplane"), Some("02691156"));
        assert_eq!(synset_for_category("airplane"), Some("02691156"));
        assert_eq!(synset_for_category("Table"), Some("04379243"));
        assert_eq!(synset_for_category("Boat"), None);
        assert!(ShapeNetSource::new("/tmp", "Boat", 0).is_err());
    }

    #[test]
    fn test_sorted_file_order_without_splits() {
        let dir = tempfile::tempdir().unwrap();
        write_shape(dir.path(), "02691156", "bbb", "1 1 1 0 0 1 0\n2 2 2 0 0 1 0\n");
        write_shape(dir.path(), "02691156", "aaa", "0 0 0 0 0 1 0\n0 1 0 0 0 1 1\n0 0 1 0 0 1 1\n");
        write_shape(dir.path(), "03001627", "chair", "5 5 5 0 0 1 0\n");

        let first = ShapeNetSource::new(dir.path(), "Airplane", 0).unwrap();
        assert_eq!(first.load().unwrap().len(), 3);

        let second = ShapeNetSource::new(dir.path(), "Airplane", 1).unwrap();
        assert_eq!(second.load().unwrap().len(), 2);

        let missing = ShapeNetSource::new(dir.path(), "Airplane", 2).unwrap();
        let err = missing.load().unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_split_file_order_under_raw() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        write_shape(&raw, "02691156", "aaa", "0 0 0 0 0 1 0\n");
        write_shape(&raw, "02691156", "zzz", "0 0 0 0 0 1 0\n1 0 0 0 0 1 0\n");
        write_shape(&raw, "02691156", "mmm", "0 0 0 0 0 1 0\n1 0 0 0 0 1 0\n2 0 0 0 0 1 0\n");

        let split = raw.join(SPLIT_DIR);
        std::fs::create_dir_all(&split).unwrap();
        std::fs::write(
            split.join(SPLIT_FILES[0]),
            r#"["shape_data/03001627/chair", "shape_data/02691156/zzz"]"#,
        )
        .unwrap();
        std::fs::write(split.join(SPLIT_FILES[1]), r#"["shape_data/02691156/mmm"]"#).unwrap();

        let source = ShapeNetSource::new(dir.path(), "Airplane", 0).unwrap();
        let files = source.sample_files().unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_stem().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["zzz", "mmm"]);
        assert_eq!(source.load().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_category_dir() {
        let dir = tempfile::tempdir().unwrap();
        let source = ShapeNetSource::new(dir.path(), "Mug", 0).unwrap();
        let err = source.load().unwrap_err();
        assert!(matches!(err, CoreError::SourceError(_)));
        assert!(source.describe().contains("03797390"));
    }
}
