//=========================================================================
// Stub Core
//
// Smallest library that satisfies the libretro version check, plus one
// two-argument export for binding tests.
//
//=========================================================================

use std::os::raw::c_uint;

#[no_mangle]
pub extern "C" fn retro_api_version() -> c_uint {
    1
}

#[no_mangle]
pub extern "C" fn stub_add(a: u32, b: u32) -> u32 {
    a.wrapping_add(b)
}
