//! Property-based tests for message rendering
//!
//! ALSA diagnostics are rendered into a fixed buffer: anything up to 1023
//! bytes arrives exactly, anything longer arrives as its first 1023 bytes.
//! JACK diagnostics are passed through byte for byte.

use diagbridge_ffi::prelude::*;
use diagbridge_ffi::register_with_hooks;
use proptest::prelude::*;
use std::ffi::{CStr, CString};
use std::ptr;
use std::sync::{Arc, Mutex};

static TEST_LOCK: Mutex<()> = Mutex::new(());
static LAST: Mutex<Option<(Channel, Vec<u8>)>> = Mutex::new(None);

fn remember_last(channel: Channel, message: &CStr) {
    *LAST.lock().unwrap() = Some((channel, message.to_bytes().to_vec()));
}

fn registered() -> RecordingHooks {
    let hooks = RecordingHooks::new();
    register_with_hooks(&hooks, Arc::new(remember_last));
    *LAST.lock().unwrap() = None;
    hooks
}

proptest! {
    /// Property: rendered ALSA text is exact up to 1023 bytes, a prefix beyond
    #[test]
    fn proptest_alsa_rendering_exact_or_truncated_prefix(
        prefix in "[a-zA-Z0-9 .:_-]{0,600}",
        arg in "[ -~]{0,1500}",
    ) {
        let _guard = TEST_LOCK.lock().unwrap();
        let hooks = registered();
        let alsa = hooks.alsa_error_handler().unwrap();
        let fmt = CString::new(format!("{prefix}%s")).unwrap();
        let arg_c = CString::new(arg.clone()).unwrap();

        unsafe { alsa(ptr::null(), 0, ptr::null(), 0, fmt.as_ptr(), arg_c.as_ptr()) };

        let full = format!("{prefix}{arg}");
        let limit = full.len().min(MESSAGE_CAPACITY - 1);
        let last = LAST.lock().unwrap().take();
        prop_assert_eq!(last, Some((Channel::AlsaError, full.as_bytes()[..limit].to_vec())));
    }

    /// Property: any non-NUL byte string passes through the JACK adapters unchanged
    #[test]
    fn proptest_jack_pass_through_is_byte_exact(
        bytes in prop::collection::vec(1u8..=255, 0..4096),
        error_channel in any::<bool>(),
    ) {
        let _guard = TEST_LOCK.lock().unwrap();
        let hooks = registered();
        let (handler, channel) = if error_channel {
            (hooks.jack_error_handler().unwrap(), Channel::JackError)
        } else {
            (hooks.jack_info_handler().unwrap(), Channel::JackInfo)
        };
        let message = CString::new(bytes.clone()).unwrap();

        unsafe { handler(message.as_ptr()) };

        let last = LAST.lock().unwrap().take();
        prop_assert_eq!(last, Some((channel, bytes)));
    }
}
