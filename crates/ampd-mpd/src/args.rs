use std::ffi::{CStr, CString, c_char};

use ampd_bridge::{MarshalError, to_c_string};

/// The two-entry argument vector handed to libmpd's run entry point:
/// a program name followed by the configuration path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchArgs {
    args: [CString; 2],
}

impl LaunchArgs {
    pub fn new(program: &str, config_path: &str) -> Result<Self, MarshalError> {
        Ok(Self {
            args: [to_c_string(program)?, to_c_string(config_path)?],
        })
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn program(&self) -> &CStr {
        &self.args[0]
    }

    pub fn config_path(&self) -> &CStr {
        &self.args[1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &CStr> {
        self.args.iter().map(CString::as_c_str)
    }

    /// NULL-terminated `argv`. The pointers borrow from `self`.
    pub fn argv(&self) -> Vec<*mut c_char> {
        self.args
            .iter()
            .map(|arg| arg.as_ptr() as *mut c_char)
            .chain(std::iter::once(std::ptr::null_mut()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_then_config_path() {
        let args = LaunchArgs::new("mpd", "/data/mpd.conf").unwrap();
        let collected: Vec<_> = args.iter().map(|a| a.to_bytes().to_vec()).collect();
        assert_eq!(collected, vec![b"mpd".to_vec(), b"/data/mpd.conf".to_vec()]);
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn argv_is_null_terminated() {
        let args = LaunchArgs::new("mpd", "/data/mpd.conf").unwrap();
        let argv = args.argv();
        assert_eq!(argv.len(), 3);
        assert!(argv[2].is_null());
        let first = unsafe { CStr::from_ptr(argv[0]) };
        assert_eq!(first, args.program());
    }

    #[test]
    fn non_ascii_path_is_byte_exact() {
        let path = "/storage/emulated/0/Música/ÆØÅ/设置.conf";
        let args = LaunchArgs::new("mpd", path).unwrap();
        assert_eq!(args.config_path().to_bytes(), path.as_bytes());
    }

    #[test]
    fn nul_in_path_is_rejected() {
        assert!(matches!(
            LaunchArgs::new("mpd", "a\0b"),
            Err(MarshalError::InteriorNul { position: 1 })
        ));
    }
}
