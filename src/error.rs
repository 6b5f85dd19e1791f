use jab_palette::CodecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG layout: {0}")]
    UnsupportedPng(String),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
