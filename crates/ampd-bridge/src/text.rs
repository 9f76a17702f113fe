use std::ffi::CString;

use jni::{JNIEnv, objects::JString};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarshalError {
    #[error("text argument is null")]
    NullText,
    #[error("text argument could not be read: {0}")]
    InvalidText(String),
    #[error("text argument contains a NUL byte at offset {position}")]
    InteriorNul { position: usize },
}

/// Copy a Java string into Rust.
///
/// The intermediate UTF chars handed out by the VM are released when the
/// borrowed `JavaStr` drops, before this returns, on success and failure alike.
pub fn read_jstring(env: &mut JNIEnv<'_>, text: &JString<'_>) -> Result<String, MarshalError> {
    if text.is_null() {
        return Err(MarshalError::NullText);
    }
    let chars = env
        .get_string(text)
        .map_err(|e| MarshalError::InvalidText(e.to_string()))?;
    Ok(chars.into())
}

/// NUL-terminated copy of `text`, byte for byte.
pub fn to_c_string(text: &str) -> Result<CString, MarshalError> {
    CString::new(text).map_err(|e| MarshalError::InteriorNul {
        position: e.nul_position(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_path() {
        let c = to_c_string("/data/data/be.deadba.ampd/files/mpd.conf").unwrap();
        assert_eq!(c.as_bytes(), b"/data/data/be.deadba.ampd/files/mpd.conf");
        assert_eq!(c.as_bytes_with_nul().last(), Some(&0));
    }

    #[test]
    fn non_ascii_bytes_are_preserved() {
        let path = "/sdcard/Musique/Бах/été 日本 🎵/mpd.conf";
        let c = to_c_string(path).unwrap();
        assert_eq!(c.as_bytes(), path.as_bytes());
        assert_eq!(c.to_str().unwrap(), path);
    }

    #[test]
    fn interior_nul_is_rejected() {
        assert_eq!(
            to_c_string("/sdcard/mpd\0.conf"),
            Err(MarshalError::InteriorNul { position: 11 })
        );
    }

    #[test]
    fn empty_text_is_allowed() {
        assert_eq!(to_c_string("").unwrap().as_bytes(), b"");
    }
}
