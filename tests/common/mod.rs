#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use tempfile::TempDir;

pub const SPLITS: [&str; 3] = ["train", "valid", "test"];

/// A throwaway dataset tree: `<root>/data.yaml` plus
/// `<root>/{train,valid,test}/{images,labels}/`.
pub struct DatasetFixture {
    _temp: TempDir,
    root: PathBuf,
}

impl DatasetFixture {
    /// Empty dataset named `name` with all split directories created.
    pub fn new(name: &str, classes: &[&str]) -> Self {
        let temp = tempfile::tempdir().expect("create temp dir");
        let root = temp.path().join(name);
        for split in SPLITS {
            fs::create_dir_all(root.join(split).join("images")).expect("create images dir");
            fs::create_dir_all(root.join(split).join("labels")).expect("create labels dir");
        }

        let fixture = Self { _temp: temp, root };
        fixture.write_manifest(classes.len(), classes);
        fixture
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn write_manifest(&self, nc: usize, names: &[&str]) {
        let quoted: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
        let yaml = format!("nc: {nc}\nnames: [{}]\n", quoted.join(", "));
        fs::write(self.root.join("data.yaml"), yaml).expect("write data.yaml");
    }

    /// Placeholder image file; content is not decoded by stats or validation.
    pub fn touch_image(&self, split: &str, file_name: &str) -> PathBuf {
        let path = self.root.join(split).join("images").join(file_name);
        fs::write(&path, b"").expect("write image placeholder");
        path
    }

    /// A real, decodable white image.
    pub fn write_image(&self, split: &str, file_name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.root.join(split).join("images").join(file_name);
        RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
            .save(&path)
            .expect("write image");
        path
    }

    pub fn write_label(&self, split: &str, file_name: &str, content: &str) -> PathBuf {
        let path = self.root.join(split).join("labels").join(file_name);
        fs::write(&path, content).expect("write label file");
        path
    }

    pub fn remove_split(&self, split: &str) {
        fs::remove_dir_all(self.root.join(split)).expect("remove split dir");
    }
}
