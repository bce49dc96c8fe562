//! Extension-based file categorization.
//!
//! Maps a file's extension to one of the fixed category labels used as
//! folder names. The table is built once when the mapper is constructed and
//! is never mutated afterwards; categorization is a pure, total function.
//!
//! # Examples
//!
//! ```
//! use desktidy::categorizer::{Category, CategoryMapper};
//!
//! let mapper = CategoryMapper::default();
//! assert_eq!(mapper.category_for(".pdf"), Category::Pdf);
//! assert_eq!(mapper.category_for(".JPG"), Category::Images);
//! assert_eq!(mapper.category_for(""), Category::Others);
//! ```

use std::collections::HashMap;

/// One of the fixed organizational buckets a file can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Office documents and plain text.
    Documents,
    /// Raster and vector images.
    Images,
    /// Video files.
    Videos,
    /// PDF files get their own folder.
    Pdf,
    /// Archives and compressed files.
    Zips,
    /// Installer packages.
    Installers,
    /// Everything else, including files without an extension.
    Others,
}

impl Category {
    /// Returns the folder name for this category.
    ///
    /// Labels are part of the external contract: they name the folders on
    /// disk and must match byte-for-byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use desktidy::categorizer::Category;
    ///
    /// assert_eq!(Category::Pdf.label(), "PDF");
    /// assert_eq!(Category::Zips.label(), "ZIPs");
    /// ```
    pub fn label(&self) -> &'static str {
        match self {
            Category::Documents => "Documents",
            Category::Images => "Images",
            Category::Videos => "Videos",
            Category::Pdf => "PDF",
            Category::Zips => "ZIPs",
            Category::Installers => "Installers",
            Category::Others => "Others",
        }
    }
}

/// Maps file extensions to categories.
///
/// The mapping is keyed by the lower-cased extension including its leading
/// dot (e.g. `.pdf`). Lookups lower-case their input, so callers may pass
/// extensions in any case.
#[derive(Debug, Clone)]
pub struct CategoryMapper {
    extension_map: HashMap<String, Category>,
}

impl CategoryMapper {
    /// Creates a mapper populated with the fixed extension table.
    pub fn new() -> Self {
        let mut mapper = Self {
            extension_map: HashMap::new(),
        };
        mapper.populate_table();
        mapper
    }

    fn populate_table(&mut self) {
        let table: [(&[&str], Category); 6] = [
            (
                &[
                    ".doc", ".docx", ".txt", ".rtf", ".odt", ".xls", ".xlsx", ".ppt", ".pptx",
                ],
                Category::Documents,
            ),
            (
                &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".ico", ".webp"],
                Category::Images,
            ),
            (
                &[".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv", ".webm"],
                Category::Videos,
            ),
            (&[".pdf"], Category::Pdf),
            (&[".zip", ".rar", ".7z", ".tar", ".gz"], Category::Zips),
            (&[".exe", ".msi", ".dmg", ".pkg"], Category::Installers),
        ];

        for (extensions, category) in table {
            for ext in extensions {
                self.extension_map.insert(ext.to_lowercase(), category);
            }
        }
    }

    /// Returns the category for an extension.
    ///
    /// The extension is expected with its leading dot (`.pdf`); matching is
    /// case-insensitive. Anything outside the table, including the empty
    /// string, maps to [`Category::Others`].
    ///
    /// # Examples
    ///
    /// ```
    /// use desktidy::categorizer::{Category, CategoryMapper};
    ///
    /// let mapper = CategoryMapper::default();
    /// assert_eq!(mapper.category_for(".docx"), Category::Documents);
    /// assert_eq!(mapper.category_for(".xyz"), Category::Others);
    /// ```
    pub fn category_for(&self, extension: &str) -> Category {
        self.extension_map
            .get(&extension.to_lowercase())
            .copied()
            .unwrap_or(Category::Others)
    }
}

impl Default for CategoryMapper {
    fn default() -> Self {
        Self::new()
    }
}
