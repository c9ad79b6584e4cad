/// File categorization for recovered files.
///
/// Maps a file's extension (case-folded, without the leading dot) to one of a
/// closed set of destination categories. Classification is total: anything
/// not in the table lands in [`Category::Other`].
///
/// # Examples
///
/// ```
/// use reco::file_category::Category;
///
/// assert_eq!(Category::from_extension("jpg"), Category::Photos);
/// assert_eq!(Category::from_extension("NEF"), Category::Photos);
/// assert_eq!(Category::from_extension("xyz"), Category::Other);
/// ```

/// The top-level destination sub-directory for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Raw and rasterized photo formats.
    Photos,
    /// Video files.
    Movies,
    /// Audio files.
    Audio,
    /// Vector, flash and other visual formats.
    Media,
    /// Zip archives.
    Zips,
    /// Office documents.
    Docs,
    /// PDF documents.
    Pdf,
    /// Everything else.
    Other,
}

impl Category {
    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use reco::file_category::Category;
    ///
    /// assert_eq!(Category::Photos.dir_name(), "photos");
    /// assert_eq!(Category::Other.dir_name(), "other");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Photos => "photos",
            Category::Movies => "movies",
            Category::Audio => "audio",
            Category::Media => "media",
            Category::Zips => "zips",
            Category::Docs => "docs",
            Category::Pdf => "pdf",
            Category::Other => "other",
        }
    }

    /// Classifies a file extension (with or without case folding applied).
    ///
    /// The extension is given without the leading dot, the way
    /// `Path::extension` yields it. Unknown extensions, including the empty
    /// one, classify as [`Category::Other`].
    pub fn from_extension(ext: &str) -> Category {
        match ext.to_lowercase().as_str() {
            "nef" | "cr2" | "crw" | "erf" | "3fr" | "kdc" | "mos" | "nrw" | "tiff" | "tif"
            | "jpeg" | "jpg" | "png" | "bmp" => Category::Photos,
            "mov" | "3gp" | "mp4" | "mpeg" | "wmv" | "mts" | "avi" | "m4p" | "m4b" | "m4v"
            | "m4a" | "m4r" | "f4v" => Category::Movies,
            "wav" | "mp3" => Category::Audio,
            "wmf" | "flv" | "svg" | "ai" | "gif" | "thm" => Category::Media,
            "zip" => Category::Zips,
            "doc" | "docx" | "ppt" | "pptx" | "xls" | "xlsx" => Category::Docs,
            "pdf" => Category::Pdf,
            _ => Category::Other,
        }
    }
}
