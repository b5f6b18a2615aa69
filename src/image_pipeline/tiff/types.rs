/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression
    None,
    Lzw,
    DeflateFast,
    DeflateBalanced,
    DeflateBest,
}
