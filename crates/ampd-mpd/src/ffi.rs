// libmpd entry points. The library is built by ndk-build and found through
// AMPD_LIBMPD_DIR (see build.rs).

use std::ffi::{c_char, c_int};

use crate::args::LaunchArgs;
use crate::library::MpdLibrary;

#[link(name = "mpd")]
unsafe extern "C" {
    fn libmpd_init();
    fn libmpd_deinit();
    fn libmpd_run(argc: c_int, argv: *mut *mut c_char) -> c_int;
    fn libmpd_quit();
}

/// The real libmpd, shared by the whole process.
#[derive(Debug, Default)]
pub struct LibMpd;

impl MpdLibrary for LibMpd {
    fn init(&self) {
        unsafe { libmpd_init() }
    }

    fn deinit(&self) {
        unsafe { libmpd_deinit() }
    }

    fn run(&self, args: &LaunchArgs) -> i32 {
        let mut argv = args.argv();
        // argv borrows from args, which outlives the call
        unsafe { libmpd_run(args.len() as c_int, argv.as_mut_ptr()) }
    }

    fn quit(&self) {
        unsafe { libmpd_quit() }
    }
}
